//! Session state and the inbound command dispatcher.
//!
//! A [`Session`] owns everything the page would otherwise keep in globals:
//! the connection state and the displayed UI state. It never touches the
//! socket itself; the connection loop feeds it frames and lifecycle events
//! and sends whatever [`Session::submit`] hands back.

use crate::error::{ClientError, UNABLE_TO_CONNECT_MSG};
use crate::ui::{Surface, UiState};
use crate::ws::messages::{Command, Envelope, InputKind};

/// Line appended when the socket opens.
pub const CONNECTED_MSG: &str = "*** Connected ***";

/// Line appended when the socket closes.
pub const CONNECTION_CLOSED_MSG: &str = "*** Connection closed ***";

/// Line that ends a multi-line entry in the terminal front end.
pub const TEXTAREA_TERMINATOR: &str = ".";

/// Connection lifecycle.
///
/// `Disconnected → Connecting → Connected → Disconnected`. The final
/// `Disconnected` is terminal; a session never reconnects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// No socket.
    #[default]
    Disconnected,
    /// Bootstrap in progress.
    Connecting,
    /// Socket open; input can be sent.
    Connected,
}

/// Per-connection client state.
#[derive(Debug, Default)]
pub struct Session {
    connection: ConnectionState,
    ui: UiState,
}

impl Session {
    /// Creates a disconnected session with default page chrome.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the connection state.
    #[must_use]
    pub const fn connection_state(&self) -> ConnectionState {
        self.connection
    }

    /// Returns `true` while input can be sent.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connection == ConnectionState::Connected
    }

    /// Returns the displayed UI state.
    #[must_use]
    pub const fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Page load: renders the initial chrome and enters `Connecting`.
    ///
    /// The status indicator and the multi-line widget stay hidden until the
    /// socket is open.
    pub fn begin<S: Surface>(&mut self, surface: &mut S) {
        self.connection = ConnectionState::Connecting;
        self.ui.status_visible = false;
        surface.set_status_visible(false);
        surface.show_input(self.ui.active_input);
        surface.set_title(&self.ui.title);
        surface.set_prompt(&self.ui.prompt);
    }

    /// Socket opened.
    pub fn on_open<S: Surface>(&mut self, surface: &mut S) {
        self.connection = ConnectionState::Connected;
        tracing::info!("connected");
        write_message(surface, CONNECTED_MSG);
        self.ui.status_visible = true;
        surface.set_status_visible(true);
        surface.focus_input(self.ui.active_input);
    }

    /// Socket closed.
    pub fn on_close<S: Surface>(&mut self, surface: &mut S) {
        self.connection = ConnectionState::Disconnected;
        tracing::info!("connection closed");
        self.hide_status(surface);
        write_message(surface, CONNECTION_CLOSED_MSG);
    }

    /// Socket or bootstrap failure. No retry is attempted.
    pub fn on_error<S: Surface>(&mut self, surface: &mut S, error: &ClientError) {
        self.connection = ConnectionState::Disconnected;
        tracing::warn!(error = %error, "connection failed");
        self.hide_status(surface);
        write_message(surface, UNABLE_TO_CONNECT_MSG);
    }

    /// Handles one inbound text frame.
    ///
    /// Decoding problems are shown on the surface; the connection is kept.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MalformedEnvelope`] or
    /// [`ClientError::InvalidArguments`] after reporting them, so that the
    /// caller can log them. Neither is fatal.
    pub fn handle_frame<S: Surface>(&mut self, text: &str, surface: &mut S) -> Result<(), ClientError> {
        let decoded = Envelope::from_json(text).and_then(|envelope| Command::from_envelope(&envelope));
        match decoded {
            Ok(command) => {
                self.dispatch(command, surface);
                Ok(())
            }
            Err(e) => {
                write_message(surface, &e.user_message());
                Err(e)
            }
        }
    }

    /// Applies a decoded command to the surface.
    ///
    /// Every arm compares against [`UiState`] first and leaves the surface
    /// untouched when nothing would change.
    pub fn dispatch<S: Surface>(&mut self, command: Command, surface: &mut S) {
        tracing::trace!(command = command.name(), "dispatching");
        match command {
            Command::Message(text) => write_message(surface, &text),
            Command::InputType(kind) => {
                if kind != self.ui.active_input {
                    self.ui.active_input = kind;
                    surface.show_input(kind);
                    surface.focus_input(kind);
                }
            }
            Command::PromptText(text) => {
                if text != self.ui.prompt {
                    surface.set_prompt(&text);
                    self.ui.prompt = text;
                }
            }
            Command::Title(title) => {
                if title != self.ui.title {
                    surface.set_title(&title);
                    self.ui.title = title;
                }
            }
            Command::InputText(value) => {
                let active = self.ui.active_input;
                if value != self.ui.input_value(active) {
                    surface.set_input_value(active, &value);
                    *self.ui.input_value_mut(active) = value;
                }
            }
            Command::Status(markup) => {
                if markup != self.ui.status {
                    surface.set_status(&markup);
                    self.ui.status = markup;
                }
            }
            Command::Unknown(name) => {
                tracing::debug!(%name, "unrecognised command");
                // One line even when the name itself contains newlines.
                surface.append_line(&format!("Unrecognised command: {name}."));
                surface.scroll_to_bottom();
            }
        }
    }

    /// Replaces the active widget's value with what the user typed.
    ///
    /// The surface already shows typed text, so nothing is rendered.
    pub fn edit_input(&mut self, value: impl Into<String>) {
        let active = self.ui.active_input;
        *self.ui.input_value_mut(active) = value.into();
    }

    /// Form submission.
    ///
    /// Returns the exact value of the active widget when connected, after
    /// clearing and refocusing it. Otherwise shows the not-connected line
    /// and returns `None`.
    pub fn submit<S: Surface>(&mut self, surface: &mut S) -> Option<String> {
        if !self.is_connected() {
            let err = ClientError::NotConnected;
            tracing::debug!(error = %err, "input dropped");
            write_message(surface, &err.user_message());
            return None;
        }
        let active = self.ui.active_input;
        let value = std::mem::take(self.ui.input_value_mut(active));
        surface.set_input_value(active, "");
        surface.focus_input(active);
        Some(value)
    }

    /// Feeds one typed terminal line into the active widget.
    ///
    /// The single-line widget submits every line. The multi-line widget
    /// accumulates lines until [`TEXTAREA_TERMINATOR`] arrives on its own.
    pub fn accept_line<S: Surface>(&mut self, line: &str, surface: &mut S) -> Option<String> {
        match self.ui.active_input {
            InputKind::Text => {
                self.edit_input(line);
                self.submit(surface)
            }
            InputKind::Textarea if line == TEXTAREA_TERMINATOR => self.submit(surface),
            InputKind::Textarea => {
                let value = self.ui.input_value_mut(InputKind::Textarea);
                if !value.is_empty() {
                    value.push('\n');
                }
                value.push_str(line);
                None
            }
        }
    }

    fn hide_status<S: Surface>(&mut self, surface: &mut S) {
        if self.ui.status_visible {
            self.ui.status_visible = false;
            surface.set_status_visible(false);
        }
    }
}

/// Appends `text` one line per `\n`-separated piece, then scrolls.
fn write_message<S: Surface>(surface: &mut S, text: &str) {
    for line in text.split('\n') {
        surface.append_line(line);
    }
    surface.scroll_to_bottom();
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::error::NOT_CONNECTED_MSG;
    use crate::ui::MemorySurface;
    use crate::ui::state::{DEFAULT_PROMPT, DEFAULT_TITLE};

    fn connected() -> (Session, MemorySurface) {
        let mut session = Session::new();
        let mut surface = MemorySurface::new();
        session.begin(&mut surface);
        session.on_open(&mut surface);
        (session, surface)
    }

    #[test]
    fn begin_hides_status_and_textarea() {
        let mut session = Session::new();
        let mut surface = MemorySurface::new();
        session.begin(&mut surface);
        assert_eq!(session.connection_state(), ConnectionState::Connecting);
        assert!(!surface.status_visible);
        assert_eq!(surface.visible_input, Some(InputKind::Text));
        assert_eq!(surface.title, DEFAULT_TITLE);
        assert_eq!(surface.prompt, DEFAULT_PROMPT);
    }

    #[test]
    fn open_announces_and_focuses() {
        let (session, surface) = connected();
        assert!(session.is_connected());
        assert_eq!(surface.last_line(), Some(CONNECTED_MSG));
        assert!(surface.status_visible);
        assert_eq!(surface.focused_input, Some(InputKind::Text));
    }

    #[test]
    fn message_splits_lines() {
        let (mut session, mut surface) = connected();
        let before = surface.lines.len();
        let res = session.handle_frame(r#"{"name":"message","args":["hello\nworld"]}"#, &mut surface);
        assert!(res.is_ok());
        assert_eq!(surface.lines.len(), before + 2);
        assert_eq!(surface.lines.get(before).map(String::as_str), Some("hello"));
        assert_eq!(surface.last_line(), Some("world"));
    }

    #[test]
    fn message_only_appends_and_scrolls() {
        let (mut session, mut surface) = connected();
        let mut expected = surface.clone();
        session.dispatch(Command::Message("hi".to_string()), &mut surface);
        expected.lines.push("hi".to_string());
        expected.scrolls += 1;
        expected.mutations += 2;
        assert_eq!(surface, expected);
    }

    #[test]
    fn input_type_switches_and_focuses() {
        let (mut session, mut surface) = connected();
        let res = session.handle_frame(r#"{"name":"inputType","args":["textarea"]}"#, &mut surface);
        assert!(res.is_ok());
        assert_eq!(surface.visible_input, Some(InputKind::Textarea));
        assert_eq!(surface.focused_input, Some(InputKind::Textarea));
        assert_eq!(session.ui().active_input, InputKind::Textarea);
    }

    #[test]
    fn same_input_type_is_a_no_op() {
        let (mut session, mut surface) = connected();
        let before = surface.clone();
        session.dispatch(Command::InputType(InputKind::Text), &mut surface);
        assert_eq!(surface, before);
    }

    #[test]
    fn prompt_title_status_only_touch_their_target() {
        let (mut session, mut surface) = connected();

        let mut expected = surface.clone();
        session.dispatch(Command::PromptText("Name:".to_string()), &mut surface);
        expected.prompt = "Name:".to_string();
        expected.mutations += 1;
        assert_eq!(surface, expected);

        session.dispatch(Command::Title("The Void".to_string()), &mut surface);
        expected.title = "The Void".to_string();
        expected.mutations += 1;
        assert_eq!(surface, expected);

        session.dispatch(Command::Status("<b>HP</b>".to_string()), &mut surface);
        expected.status = "<b>HP</b>".to_string();
        expected.mutations += 1;
        assert_eq!(surface, expected);
    }

    #[test]
    fn repeated_updates_are_no_ops() {
        let (mut session, mut surface) = connected();
        session.dispatch(Command::Title("T".to_string()), &mut surface);
        session.dispatch(Command::Status("S".to_string()), &mut surface);
        session.dispatch(Command::InputText("look".to_string()), &mut surface);
        session.dispatch(Command::PromptText("P".to_string()), &mut surface);
        let before = surface.clone();
        session.dispatch(Command::Title("T".to_string()), &mut surface);
        session.dispatch(Command::Status("S".to_string()), &mut surface);
        session.dispatch(Command::InputText("look".to_string()), &mut surface);
        session.dispatch(Command::PromptText("P".to_string()), &mut surface);
        assert_eq!(surface, before);
    }

    #[test]
    fn input_text_targets_active_widget() {
        let (mut session, mut surface) = connected();
        session.dispatch(Command::InputType(InputKind::Textarea), &mut surface);
        session.dispatch(Command::InputText("draft".to_string()), &mut surface);
        assert_eq!(surface.textarea_value, "draft");
        assert_eq!(surface.text_value, "");
        assert_eq!(session.ui().active_value(), "draft");
    }

    #[test]
    fn unknown_command_appends_one_line_only() {
        let (mut session, mut surface) = connected();
        let mut expected = surface.clone();
        let res = session.handle_frame(r#"{"name":"dance","args":[]}"#, &mut surface);
        assert!(res.is_ok());
        expected.lines.push("Unrecognised command: dance.".to_string());
        expected.scrolls += 1;
        expected.mutations += 2;
        assert_eq!(surface, expected);
        assert!(session.is_connected());
    }

    #[test]
    fn unknown_name_with_newline_stays_one_line() {
        let (mut session, mut surface) = connected();
        let before = surface.lines.len();
        session.dispatch(Command::Unknown("a\nb".to_string()), &mut surface);
        assert_eq!(surface.lines.len(), before + 1);
        assert_eq!(surface.last_line(), Some("Unrecognised command: a\nb."));
    }

    #[test]
    fn malformed_frame_is_reported_not_fatal() {
        let (mut session, mut surface) = connected();
        let res = session.handle_frame("{oops", &mut surface);
        let Err(err) = res else {
            panic!("expected malformed envelope");
        };
        assert!(!err.is_fatal());
        assert_eq!(surface.last_line(), Some(crate::error::MALFORMED_MESSAGE_MSG));
        assert!(session.is_connected());
    }

    #[test]
    fn invalid_args_are_reported() {
        let (mut session, mut surface) = connected();
        let res = session.handle_frame(r#"{"name":"title","args":[7]}"#, &mut surface);
        assert!(matches!(res, Err(ClientError::InvalidArguments { .. })));
        assert_eq!(surface.last_line(), Some("Invalid arguments for command: title."));
        assert_eq!(surface.title, DEFAULT_TITLE);
    }

    #[test]
    fn submit_while_disconnected_never_sends() {
        let mut session = Session::new();
        let mut surface = MemorySurface::new();
        session.begin(&mut surface);
        session.edit_input("north");
        assert_eq!(session.submit(&mut surface), None);
        assert_eq!(surface.last_line(), Some(NOT_CONNECTED_MSG));
        assert_eq!(session.ui().active_value(), "north");
    }

    #[test]
    fn submit_while_connected_sends_exact_value_and_clears() {
        let (mut session, mut surface) = connected();
        session.edit_input("  say hello  ");
        let sent = session.submit(&mut surface);
        assert_eq!(sent.as_deref(), Some("  say hello  "));
        assert_eq!(session.ui().active_value(), "");
        assert_eq!(surface.text_value, "");
        assert_eq!(surface.focused_input, Some(InputKind::Text));
    }

    #[test]
    fn close_hides_status_and_announces() {
        let (mut session, mut surface) = connected();
        assert!(surface.status_visible);
        session.on_close(&mut surface);
        assert!(!surface.status_visible);
        assert_eq!(surface.last_line(), Some(CONNECTION_CLOSED_MSG));
        assert_eq!(session.connection_state(), ConnectionState::Disconnected);
        assert_eq!(session.submit(&mut surface), None);
    }

    #[test]
    fn error_clears_connection() {
        let (mut session, mut surface) = connected();
        session.on_error(&mut surface, &ClientError::NotConnected);
        assert!(!session.is_connected());
        assert_eq!(surface.last_line(), Some(UNABLE_TO_CONNECT_MSG));
    }

    #[test]
    fn single_line_accepts_each_line() {
        let (mut session, mut surface) = connected();
        assert_eq!(session.accept_line("look", &mut surface).as_deref(), Some("look"));
    }

    #[test]
    fn textarea_accumulates_until_terminator() {
        let (mut session, mut surface) = connected();
        session.dispatch(Command::InputType(InputKind::Textarea), &mut surface);
        assert_eq!(session.accept_line("first", &mut surface), None);
        assert_eq!(session.accept_line("second", &mut surface), None);
        let sent = session.accept_line(TEXTAREA_TERMINATOR, &mut surface);
        assert_eq!(sent.as_deref(), Some("first\nsecond"));
        assert_eq!(session.ui().active_value(), "");
    }
}
