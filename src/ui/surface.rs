//! The render target a session draws on.

use crate::ws::messages::InputKind;

/// Opaque UI surface: output log, two input widgets, status indicator,
/// prompt label and title.
///
/// Implementations only render; all state and change detection lives in
/// [`crate::session::Session`]. Methods are infallible because a render
/// failure never changes the session.
pub trait Surface {
    /// Appends one line to the output pane.
    fn append_line(&mut self, line: &str);

    /// Scrolls the output pane to its newest line.
    fn scroll_to_bottom(&mut self);

    /// Shows the `kind` widget and hides the other one.
    fn show_input(&mut self, kind: InputKind);

    /// Moves keyboard focus to the `kind` widget.
    fn focus_input(&mut self, kind: InputKind);

    /// Replaces the value held by the `kind` widget.
    fn set_input_value(&mut self, kind: InputKind, value: &str);

    /// Replaces the prompt label.
    fn set_prompt(&mut self, text: &str);

    /// Replaces the document title.
    fn set_title(&mut self, title: &str);

    /// Replaces the status markup.
    fn set_status(&mut self, markup: &str);

    /// Shows or hides the status indicator.
    fn set_status_visible(&mut self, visible: bool);
}
