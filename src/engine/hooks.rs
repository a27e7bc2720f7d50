use crate::core::candidate::Candidate;
use crate::core::render::RenderedItem;
use crate::engine::surface::TextSurface;

/// Payload of the cancelable select notification.
#[derive(Debug)]
pub struct SelectNotice<'a> {
    /// Display text that would be committed.
    pub text: &'a str,
    pub candidate: &'a Candidate,
}

/// Verdict returned by select subscribers. Any `Cancel` suppresses the
/// commit and leaves the engine state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectDecision {
    Proceed,
    Cancel,
}

pub type CommitFn = Box<dyn Fn(&mut dyn TextSurface, &RenderedItem)>;

/// Writes a selection back into the consumer's surface.
pub enum Commit {
    /// Replace the surface text with the item's display text; structured
    /// candidates also write their id into the companion slot (default).
    Replace,
    Custom(CommitFn),
}

impl Commit {
    pub fn apply(&self, surface: &mut dyn TextSurface, item: &RenderedItem) {
        match self {
            Self::Replace => {
                surface.set_text(item.display.text());
                match &item.candidate {
                    Candidate::Plain(_) => {}
                    Candidate::WithId { id, .. } => surface.set_companion(id),
                }
            }
            Self::Custom(commit) => commit(surface, item),
        }
    }
}

impl Default for Commit {
    fn default() -> Self {
        Self::Replace
    }
}

type NotifyFn = Box<dyn FnMut()>;
type HighlightFn = Box<dyn FnMut(Option<usize>)>;
type SelectGuard = Box<dyn FnMut(&SelectNotice<'_>) -> SelectDecision>;
type CompleteFn = Box<dyn FnMut(&str)>;

/// Typed subscription points for the engine's observable events: `open`,
/// `close`, `highlight`, cancelable `select`, and `select_complete`.
#[derive(Default)]
pub struct EngineHooks {
    opened: Vec<NotifyFn>,
    closed: Vec<NotifyFn>,
    highlighted: Vec<HighlightFn>,
    select_guards: Vec<SelectGuard>,
    completed: Vec<CompleteFn>,
}

impl EngineHooks {
    pub fn on_open(&mut self, subscriber: impl FnMut() + 'static) {
        self.opened.push(Box::new(subscriber));
    }

    pub fn on_close(&mut self, subscriber: impl FnMut() + 'static) {
        self.closed.push(Box::new(subscriber));
    }

    pub fn on_highlight(&mut self, subscriber: impl FnMut(Option<usize>) + 'static) {
        self.highlighted.push(Box::new(subscriber));
    }

    pub fn on_select(
        &mut self,
        guard: impl FnMut(&SelectNotice<'_>) -> SelectDecision + 'static,
    ) {
        self.select_guards.push(Box::new(guard));
    }

    pub fn on_select_complete(&mut self, subscriber: impl FnMut(&str) + 'static) {
        self.completed.push(Box::new(subscriber));
    }

    pub(crate) fn emit_open(&mut self) {
        for subscriber in &mut self.opened {
            subscriber();
        }
    }

    pub(crate) fn emit_close(&mut self) {
        for subscriber in &mut self.closed {
            subscriber();
        }
    }

    pub(crate) fn emit_highlight(&mut self, index: Option<usize>) {
        for subscriber in &mut self.highlighted {
            subscriber(index);
        }
    }

    /// Every guard is consulted; one `Cancel` cancels.
    pub(crate) fn emit_select(&mut self, notice: &SelectNotice<'_>) -> SelectDecision {
        let mut decision = SelectDecision::Proceed;
        for guard in &mut self.select_guards {
            if guard(notice) == SelectDecision::Cancel {
                decision = SelectDecision::Cancel;
            }
        }
        decision
    }

    pub(crate) fn emit_select_complete(&mut self, text: &str) {
        for subscriber in &mut self.completed {
            subscriber(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{Commit, EngineHooks, SelectDecision, SelectNotice};
    use crate::core::candidate::Candidate;
    use crate::core::render::{MarkedLabel, RenderedItem};
    use crate::engine::surface::{BufferSurface, TextSurface};

    fn item(candidate: Candidate) -> RenderedItem {
        RenderedItem {
            display: MarkedLabel::plain(candidate.label()),
            candidate,
            selected: false,
        }
    }

    #[test]
    fn replace_writes_display_text() {
        let mut surface = BufferSurface::new();
        Commit::Replace.apply(&mut surface, &item(Candidate::plain("Apple")));
        assert_eq!(surface.text(), "Apple");
        assert_eq!(surface.companion(), None);
    }

    #[test]
    fn replace_writes_companion_id_for_structured_candidates() {
        let mut surface = BufferSurface::new();
        Commit::Replace.apply(&mut surface, &item(Candidate::with_id("42", "Apple")));
        assert_eq!(surface.text(), "Apple");
        assert_eq!(surface.companion(), Some("42"));
    }

    #[test]
    fn any_cancel_wins_but_every_guard_runs() {
        let mut hooks = EngineHooks::default();
        let calls = Rc::new(RefCell::new(0));

        let tally = Rc::clone(&calls);
        hooks.on_select(move |_| {
            *tally.borrow_mut() += 1;
            SelectDecision::Cancel
        });
        let tally = Rc::clone(&calls);
        hooks.on_select(move |_| {
            *tally.borrow_mut() += 1;
            SelectDecision::Proceed
        });

        let candidate = Candidate::plain("apple");
        let notice = SelectNotice {
            text: "apple",
            candidate: &candidate,
        };
        assert_eq!(hooks.emit_select(&notice), SelectDecision::Cancel);
        assert_eq!(*calls.borrow(), 2);
    }
}
