/// Host text-value surface the engine reads from and commits into.
pub trait TextSurface {
    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);

    /// Companion slot for structured-candidate ids. Default: no storage.
    fn set_companion(&mut self, _id: &str) {}

    /// Whether the surface currently holds input focus. Drives the
    /// re-evaluation that follows a list-source reassignment.
    fn is_focused(&self) -> bool {
        false
    }
}

/// In-memory surface for tests, demos, and hosts without a native input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferSurface {
    text: String,
    companion: Option<String>,
    focused: bool,
}

impl BufferSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused() -> Self {
        Self {
            focused: true,
            ..Self::default()
        }
    }

    pub fn companion(&self) -> Option<&str> {
        self.companion.as_deref()
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }
}

impl TextSurface for BufferSurface {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_companion(&mut self, id: &str) {
        self.companion = Some(id.to_string());
    }

    fn is_focused(&self) -> bool {
        self.focused
    }
}
