use crate::core::candidate::Candidate;
use crate::core::matcher;

/// Label text with query occurrences marked as `(start, end)` char ranges.
/// The text itself stays plain; no markup ever reaches a committed value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkedLabel {
    text: String,
    marks: Vec<(usize, usize)>,
}

impl MarkedLabel {
    pub fn new(text: impl Into<String>, marks: Vec<(usize, usize)>) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn marks(&self) -> &[(usize, usize)] {
        self.marks.as_slice()
    }
}

/// One row of the open dropdown. `selected` is owned by the state machine;
/// renderers always leave it unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    pub candidate: Candidate,
    pub display: MarkedLabel,
    pub selected: bool,
}

pub type RenderFn = Box<dyn Fn(&Candidate, &str) -> RenderedItem>;

/// Maps a (candidate, query) pair to its display representation.
pub enum Renderer {
    /// Mark every case-insensitive occurrence of the trimmed query (default).
    Emphasize,
    Custom(RenderFn),
}

impl Renderer {
    pub fn render(&self, candidate: &Candidate, query: &str) -> RenderedItem {
        match self {
            Self::Emphasize => RenderedItem {
                candidate: candidate.clone(),
                display: mark_occurrences(candidate.label(), query),
                selected: false,
            },
            Self::Custom(render) => render(candidate, query),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::Emphasize
    }
}

/// Mark every case-insensitive occurrence of the trimmed query in `label`.
/// An empty-after-trim query yields no marks.
pub fn mark_occurrences(label: &str, query: &str) -> MarkedLabel {
    if query.trim().is_empty() {
        return MarkedLabel::plain(label);
    }
    let Some(pattern) = matcher::literal_pattern(query, false) else {
        return MarkedLabel::plain(label);
    };

    let mut marks = Vec::new();
    for found in pattern.find_iter(label) {
        let start = label[..found.start()].chars().count();
        let len = label[found.start()..found.end()].chars().count();
        marks.push((start, start + len));
    }
    MarkedLabel::new(label, marks)
}
