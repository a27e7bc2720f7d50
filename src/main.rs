use std::cell::RefCell;
use std::env;
use std::fs;
use std::io::{self, Stdout, Write};
use std::rc::Rc;

use crossterm::cursor;
use crossterm::event::{
    Event, KeyCode as TermKey, KeyEvent as TermKeyEvent, KeyEventKind, KeyModifiers, read,
};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use serde::Deserialize;
use unicode_width::UnicodeWidthStr;

use typeahead::{
    AttrOverrides, BufferSurface, Candidate, Engine, EngineOptions, KeyCode, KeyEvent, ListSource,
    MarkedLabel, TextSurface,
};

/// A demo sheet: prompt label, attribute overrides, candidate list. Loaded
/// from a YAML file passed as the first argument, else a built-in fruit list.
#[derive(Debug, Deserialize)]
struct DemoSheet {
    #[serde(default = "default_prompt")]
    prompt: String,
    #[serde(default)]
    attrs: AttrOverrides,
    list: Vec<Candidate>,
}

fn default_prompt() -> String {
    "Search".to_string()
}

impl Default for DemoSheet {
    fn default() -> Self {
        let fruits = [
            "apple",
            "apricot",
            "avocado",
            "banana",
            "blackberry",
            "blueberry",
            "cherry",
            "fig",
            "grape",
            "grapefruit",
            "kiwi",
            "mango",
            "melon",
            "nectarine",
            "orange",
            "papaya",
            "peach",
            "pear",
            "pineapple",
            "plum",
            "raspberry",
            "strawberry",
        ];
        Self {
            prompt: "Fruit".to_string(),
            attrs: AttrOverrides::new().with("minchars", "1"),
            list: fruits.iter().map(|label| Candidate::plain(*label)).collect(),
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
    }
}

fn run() -> io::Result<()> {
    let sheet = match env::args().nth(1) {
        Some(path) => load_sheet(&path)?,
        None => DemoSheet::default(),
    };

    let mut engine = Engine::with_config(
        BufferSurface::focused(),
        ListSource::Items(sheet.list.clone()),
        &sheet.attrs,
        EngineOptions::default(),
    );

    let picked: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&picked);
    engine.on_select_complete(move |text| {
        *sink.borrow_mut() = Some(text.to_string());
    });

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, cursor::Hide)?;

    let result = event_loop(&mut stdout, &mut engine, &sheet, &picked);

    execute!(stdout, cursor::Show)?;
    terminal::disable_raw_mode()?;

    if let Ok(true) = &result {
        println!("{}", engine.surface().text());
    }
    result.map(|_| ())
}

fn load_sheet(path: &str) -> io::Result<DemoSheet> {
    let raw = fs::read_to_string(path)?;
    serde_yaml::from_str(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Runs until the user submits (Ok(true)) or quits (Ok(false)).
fn event_loop(
    stdout: &mut Stdout,
    engine: &mut Engine<BufferSurface>,
    sheet: &DemoSheet,
    picked: &Rc<RefCell<Option<String>>>,
) -> io::Result<bool> {
    loop {
        paint(stdout, engine, &sheet.prompt, picked.borrow().as_deref())?;

        let Event::Key(key) = read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == TermKey::Char('c') {
            clear_frame(stdout)?;
            return Ok(false);
        }

        let mapped = map_key(&key);
        if engine.on_key(mapped) {
            continue;
        }

        // Keys the dropdown did not consume drive the input itself.
        match mapped.code {
            KeyCode::Char(c) if mapped.is_plain() => {
                *picked.borrow_mut() = None;
                let mut text = engine.surface().text();
                text.push(c);
                engine.surface_mut().set_text(&text);
                engine.evaluate();
            }
            KeyCode::Backspace => {
                *picked.borrow_mut() = None;
                let mut text = engine.surface().text();
                text.pop();
                engine.surface_mut().set_text(&text);
                engine.evaluate();
            }
            KeyCode::Enter => {
                // The native submit path: the dropdown is closed or has no
                // selection, so Enter accepts the current text.
                engine.close();
                clear_frame(stdout)?;
                return Ok(true);
            }
            KeyCode::Esc => {
                clear_frame(stdout)?;
                return Ok(false);
            }
            _ => {}
        }
    }
}

fn map_key(key: &TermKeyEvent) -> KeyEvent {
    let code = match key.code {
        TermKey::Char(c) => KeyCode::Char(c),
        TermKey::Enter => KeyCode::Enter,
        TermKey::Esc => KeyCode::Esc,
        TermKey::Up => KeyCode::Up,
        TermKey::Down => KeyCode::Down,
        TermKey::Backspace => KeyCode::Backspace,
        TermKey::Delete => KeyCode::Delete,
        TermKey::Left => KeyCode::Left,
        TermKey::Right => KeyCode::Right,
        _ => KeyCode::Other,
    };
    KeyEvent {
        code,
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
    }
}

fn paint(
    stdout: &mut Stdout,
    engine: &Engine<BufferSurface>,
    prompt: &str,
    picked: Option<&str>,
) -> io::Result<()> {
    queue!(stdout, cursor::MoveToColumn(0), Clear(ClearType::FromCursorDown))?;

    queue!(
        stdout,
        SetAttribute(Attribute::Dim),
        Print(prompt),
        Print(": Up/Down navigate, Enter select, Esc dismiss, Ctrl-C quit"),
        SetAttribute(Attribute::Reset),
        Print("\r\n"),
    )?;
    queue!(stdout, Print("> "), Print(engine.surface().text()), Print("\r\n"))?;

    let mut rows: u16 = 2;
    if engine.is_open() {
        let width = engine
            .items()
            .iter()
            .map(|item| UnicodeWidthStr::width(item.display.text()))
            .max()
            .unwrap_or(0);
        for item in engine.items() {
            let marker = if item.selected { "❯ " } else { "  " };
            queue!(stdout, Print(marker))?;
            if item.selected {
                queue!(stdout, SetAttribute(Attribute::Reverse))?;
            }
            print_marked(stdout, &item.display)?;
            let pad = width - UnicodeWidthStr::width(item.display.text());
            if pad > 0 {
                queue!(stdout, Print(" ".repeat(pad)))?;
            }
            if item.selected {
                queue!(stdout, SetAttribute(Attribute::Reset))?;
            }
            queue!(stdout, Print("\r\n"))?;
            rows += 1;
        }
    }

    let status = match (picked, engine.highlighted_item()) {
        (Some(text), _) => match engine.surface().companion() {
            Some(id) => format!("picked {text} ({id})"),
            None => format!("picked {text}"),
        },
        (None, Some(item)) => item.display.text().to_string(),
        (None, None) if engine.is_open() => format!("{} matches", engine.items().len()),
        (None, None) => String::new(),
    };
    queue!(
        stdout,
        SetAttribute(Attribute::Dim),
        Print(&status),
        SetAttribute(Attribute::Reset),
    )?;
    rows += 1;

    queue!(stdout, cursor::MoveUp(rows - 1), cursor::MoveToColumn(0))?;
    stdout.flush()
}

/// Prints a marked label, underlining each query occurrence.
fn print_marked(stdout: &mut Stdout, label: &MarkedLabel) -> io::Result<()> {
    let chars: Vec<char> = label.text().chars().collect();
    let mut cursor = 0usize;
    for &(start, end) in label.marks() {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start > cursor {
            queue!(stdout, Print(chars[cursor..start].iter().collect::<String>()))?;
        }
        if end > start {
            queue!(
                stdout,
                SetAttribute(Attribute::Underlined),
                Print(chars[start..end].iter().collect::<String>()),
                SetAttribute(Attribute::NoUnderline),
            )?;
        }
        cursor = end.max(cursor);
    }
    if cursor < chars.len() {
        queue!(stdout, Print(chars[cursor..].iter().collect::<String>()))?;
    }
    Ok(())
}

fn clear_frame(stdout: &mut Stdout) -> io::Result<()> {
    execute!(stdout, cursor::MoveToColumn(0), Clear(ClearType::FromCursorDown))
}
