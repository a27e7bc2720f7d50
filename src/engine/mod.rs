pub mod hooks;
pub mod input;
pub mod surface;

use crate::core::config::{AttrOverrides, EngineConfig, EngineOptions};
use crate::core::matcher;
use crate::core::ranker;
use crate::core::render::RenderedItem;
use crate::core::source::{CandidateStore, ListResolver, ListSource, NoLists};
use crate::engine::hooks::{EngineHooks, SelectDecision, SelectNotice};
use crate::engine::input::{KeyCode, KeyEvent};
use crate::engine::surface::TextSurface;

/// Suggestion engine and interaction state machine for one attached input.
///
/// The engine owns its surface, candidate store, resolved configuration and
/// event subscriptions; each attached input gets its own independent engine.
/// Every operation is synchronous, and none can leave the open/highlight
/// state in an invalid combination: the highlight is always `None` or a
/// position inside the rendered list, a closed dropdown has no highlight,
/// and an empty rendered list is never open.
pub struct Engine<S: TextSurface> {
    surface: S,
    store: CandidateStore,
    resolver: Box<dyn ListResolver>,
    config: EngineConfig,
    hooks: EngineHooks,
    items: Vec<RenderedItem>,
    index: Option<usize>,
    open: bool,
}

impl<S: TextSurface> Engine<S> {
    /// Engine with built-in defaults for every option.
    pub fn new(surface: S, source: ListSource) -> Self {
        Self::with_config(
            surface,
            source,
            &AttrOverrides::default(),
            EngineOptions::default(),
        )
    }

    /// Engine with layered configuration, resolved once here: attribute
    /// overrides beat explicit options beat defaults.
    pub fn with_config(
        surface: S,
        source: ListSource,
        attrs: &AttrOverrides,
        options: EngineOptions,
    ) -> Self {
        Self {
            surface,
            store: CandidateStore::new(source),
            resolver: Box::new(NoLists),
            config: EngineConfig::resolve(attrs, options),
            hooks: EngineHooks::default(),
            items: Vec::new(),
            index: None,
            open: false,
        }
    }

    pub fn with_resolver(mut self, resolver: impl ListResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    // --- read-only state ---

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_selected(&self) -> bool {
        self.index.is_some()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.index
    }

    /// Currently highlighted item, if any. Mirrors the assistive status text
    /// a host would announce.
    pub fn highlighted_item(&self) -> Option<&RenderedItem> {
        self.index.and_then(|index| self.items.get(index))
    }

    pub fn items(&self) -> &[RenderedItem] {
        self.items.as_slice()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // --- subscriptions ---

    pub fn on_open(&mut self, subscriber: impl FnMut() + 'static) {
        self.hooks.on_open(subscriber);
    }

    pub fn on_close(&mut self, subscriber: impl FnMut() + 'static) {
        self.hooks.on_close(subscriber);
    }

    pub fn on_highlight(&mut self, subscriber: impl FnMut(Option<usize>) + 'static) {
        self.hooks.on_highlight(subscriber);
    }

    /// The only cancelable subscription: returning
    /// [`SelectDecision::Cancel`] suppresses the commit and keeps the
    /// dropdown exactly as it was.
    pub fn on_select(
        &mut self,
        guard: impl FnMut(&SelectNotice<'_>) -> SelectDecision + 'static,
    ) {
        self.hooks.on_select(guard);
    }

    pub fn on_select_complete(&mut self, subscriber: impl FnMut(&str) + 'static) {
        self.hooks.on_select_complete(subscriber);
    }

    // --- candidate source ---

    /// Reassign the candidate source. Re-derivation is lazy; if the surface
    /// holds focus the engine re-evaluates immediately with the current text.
    pub fn set_list(&mut self, source: ListSource) {
        self.store.set_source(source);
        if self.surface.is_focused() {
            self.evaluate();
        }
    }

    // --- lifecycle ---

    /// One filter/rank/render cycle over the current surface text. Runs on
    /// every query change; resets the highlight before filtering so a stale
    /// index never survives a re-filter.
    pub fn evaluate(&mut self) {
        let raw = self.surface.text();
        let query = raw.trim();

        let candidates = self.store.candidates(self.resolver.as_ref());
        if query.chars().count() < self.config.min_chars || candidates.is_empty() {
            self.items.clear();
            self.close();
            return;
        }

        let mut matched = matcher::filter(&self.config.matcher, candidates, query);
        self.set_index(None);
        ranker::sort(&self.config.ranker, &mut matched);
        matched.truncate(self.config.max_items);
        let rendered: Vec<RenderedItem> = matched
            .iter()
            .map(|candidate| self.config.renderer.render(candidate, query))
            .collect();
        self.items = rendered;

        if self.items.is_empty() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Open the dropdown. A no-op while the rendered list is empty; re-emits
    /// `open` when called on an already-open dropdown.
    pub fn open(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.open = true;
        if self.config.auto_first && self.index.is_none() {
            self.go_to(Some(0));
        }
        self.hooks.emit_open();
    }

    /// Close the dropdown and clear the highlight. Blur, Escape and form
    /// submission all route here; `close` is emitted from any state.
    pub fn close(&mut self) {
        self.open = false;
        self.set_index(None);
        self.hooks.emit_close();
    }

    // --- navigation ---

    /// Advance the highlight, wrapping to "no selection" after the last item.
    pub fn next(&mut self) {
        let count = self.items.len();
        let target = match self.index {
            Some(index) if index + 1 < count => Some(index + 1),
            Some(_) => None,
            None if count > 0 => Some(0),
            None => None,
        };
        self.go_to(target);
    }

    /// Step the highlight back; from "no selection" jumps to the last item,
    /// and past the first item wraps back to "no selection".
    pub fn previous(&mut self) {
        let count = self.items.len();
        let target = match self.index {
            Some(0) => None,
            Some(index) => Some(index - 1),
            None if count > 0 => Some(count - 1),
            None => None,
        };
        self.go_to(target);
    }

    /// Low-level highlight move. Emits `highlight` unconditionally; bounds
    /// are the caller's responsibility.
    pub fn go_to(&mut self, index: Option<usize>) {
        self.set_index(index);
        self.hooks.emit_highlight(index);
    }

    /// Moves the highlight and keeps the `selected` flags in step without
    /// emitting anything.
    fn set_index(&mut self, index: Option<usize>) {
        if let Some(old) = self.index {
            if let Some(item) = self.items.get_mut(old) {
                item.selected = false;
            }
        }
        self.index = index;
        if let Some(new) = index {
            if let Some(item) = self.items.get_mut(new) {
                item.selected = true;
            }
        }
    }

    // --- selection ---

    /// Select the currently highlighted item; a no-op without one.
    pub fn select(&mut self) {
        self.select_at(self.index);
    }

    /// Select an explicit item, e.g. from a pointer press on row `index`.
    pub fn select_index(&mut self, index: usize) {
        self.select_at(Some(index));
    }

    fn select_at(&mut self, index: Option<usize>) {
        let Some(item) = index.and_then(|index| self.items.get(index)).cloned() else {
            return;
        };

        let notice = SelectNotice {
            text: item.display.text(),
            candidate: &item.candidate,
        };
        if self.hooks.emit_select(&notice) == SelectDecision::Cancel {
            return;
        }

        let text = item.display.text().to_string();
        self.config.commit.apply(&mut self.surface, &item);
        self.close();
        self.hooks.emit_select_complete(&text);
    }

    // --- keyboard ---

    /// Keyboard entry point. Returns whether the key was consumed; while
    /// closed (and for modified keys, and Enter without a selection) every
    /// key falls through so the host's native behavior proceeds.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if !self.open || !key.is_plain() {
            return false;
        }
        match key.code {
            KeyCode::Enter if self.is_selected() => {
                self.select();
                true
            }
            KeyCode::Esc => {
                self.close();
                true
            }
            KeyCode::Down => {
                self.next();
                true
            }
            KeyCode::Up => {
                self.previous();
                true
            }
            _ => false,
        }
    }
}
