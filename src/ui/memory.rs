//! Headless surface that records everything it is asked to render.

use super::Surface;
use crate::ws::messages::InputKind;

/// In-memory [`Surface`] for embedding and tests.
///
/// Every call increments [`MemorySurface::mutations`], so callers can check
/// that a no-op update touched nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySurface {
    /// Output pane, oldest line first.
    pub lines: Vec<String>,
    /// Number of scroll-to-bottom requests.
    pub scrolls: usize,
    /// Widget currently shown, if any was ever shown.
    pub visible_input: Option<InputKind>,
    /// Widget currently focused.
    pub focused_input: Option<InputKind>,
    /// Rendered value of the single-line widget.
    pub text_value: String,
    /// Rendered value of the multi-line widget.
    pub textarea_value: String,
    /// Prompt label.
    pub prompt: String,
    /// Document title.
    pub title: String,
    /// Status markup.
    pub status: String,
    /// Whether the status indicator is shown.
    pub status_visible: bool,
    /// Total number of surface calls.
    pub mutations: usize,
}

impl MemorySurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the newest output line.
    #[must_use]
    pub fn last_line(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }
}

impl Surface for MemorySurface {
    fn append_line(&mut self, line: &str) {
        self.mutations += 1;
        self.lines.push(line.to_string());
    }

    fn scroll_to_bottom(&mut self) {
        self.mutations += 1;
        self.scrolls += 1;
    }

    fn show_input(&mut self, kind: InputKind) {
        self.mutations += 1;
        self.visible_input = Some(kind);
    }

    fn focus_input(&mut self, kind: InputKind) {
        self.mutations += 1;
        self.focused_input = Some(kind);
    }

    fn set_input_value(&mut self, kind: InputKind, value: &str) {
        self.mutations += 1;
        match kind {
            InputKind::Text => self.text_value = value.to_string(),
            InputKind::Textarea => self.textarea_value = value.to_string(),
        }
    }

    fn set_prompt(&mut self, text: &str) {
        self.mutations += 1;
        self.prompt = text.to_string();
    }

    fn set_title(&mut self, title: &str) {
        self.mutations += 1;
        self.title = title.to_string();
    }

    fn set_status(&mut self, markup: &str) {
        self.mutations += 1;
        self.status = markup.to_string();
    }

    fn set_status_visible(&mut self, visible: bool) {
        self.mutations += 1;
        self.status_visible = visible;
    }
}
