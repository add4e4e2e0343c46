//! Mirror of what the surface currently displays.

use crate::ws::messages::InputKind;

/// Title rendered before the server sets one.
pub const DEFAULT_TITLE: &str = "MudMaker";

/// Prompt rendered before the server sets one.
pub const DEFAULT_PROMPT: &str = "Command:";

/// Displayed UI state, used to skip no-op updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// Widget that currently receives keystrokes.
    pub active_input: InputKind,
    /// Value of the single-line widget.
    pub text_value: String,
    /// Value of the multi-line widget.
    pub textarea_value: String,
    /// Status markup.
    pub status: String,
    /// Whether the status indicator is shown.
    pub status_visible: bool,
    /// Prompt label.
    pub prompt: String,
    /// Document title.
    pub title: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_input: InputKind::Text,
            text_value: String::new(),
            textarea_value: String::new(),
            status: String::new(),
            status_visible: false,
            prompt: DEFAULT_PROMPT.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl UiState {
    /// Value held by the `kind` widget.
    #[must_use]
    pub fn input_value(&self, kind: InputKind) -> &str {
        match kind {
            InputKind::Text => &self.text_value,
            InputKind::Textarea => &self.textarea_value,
        }
    }

    /// Mutable value held by the `kind` widget.
    pub fn input_value_mut(&mut self, kind: InputKind) -> &mut String {
        match kind {
            InputKind::Text => &mut self.text_value,
            InputKind::Textarea => &mut self.textarea_value,
        }
    }

    /// Value held by the active widget.
    #[must_use]
    pub fn active_value(&self) -> &str {
        self.input_value(self.active_input)
    }
}
