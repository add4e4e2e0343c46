//! WebSocket message types: envelope and decoded commands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;

/// Top-level inbound message envelope.
///
/// The server sends every command as `{"name": ..., "args": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Command name.
    pub name: String,
    /// Positional arguments; opaque until the command is decoded.
    #[serde(default)]
    pub args: Vec<Value>,
}

impl Envelope {
    /// Creates an envelope from a name and its arguments.
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Shorthand for a `message` envelope carrying `text`.
    #[must_use]
    pub fn message(text: impl Into<String>) -> Self {
        Self::new("message", vec![Value::String(text.into())])
    }

    /// Decodes an envelope from a JSON text frame.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MalformedEnvelope`] if the frame is not valid
    /// JSON or lacks a string `name`.
    pub fn from_json(text: &str) -> Result<Self, ClientError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Returns the first argument as a string slice, if it is one.
    fn first_str(&self) -> Option<&str> {
        self.args.first().and_then(Value::as_str)
    }
}

/// Which input widget receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Single-line text field.
    #[default]
    Text,
    /// Multi-line text area.
    Textarea,
}

impl InputKind {
    /// Parses the wire name of an input kind.
    #[must_use]
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "text" => Some(Self::Text),
            "textarea" => Some(Self::Textarea),
            _ => None,
        }
    }
}

/// A decoded server command, one variant per recognised name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append text to the output pane.
    Message(String),
    /// Switch the active input widget.
    InputType(InputKind),
    /// Replace the prompt label.
    PromptText(String),
    /// Replace the document title.
    Title(String),
    /// Replace the active input's value.
    InputText(String),
    /// Replace the status markup.
    Status(String),
    /// Any name not listed above.
    Unknown(String),
}

impl Command {
    /// Decodes a command from an envelope.
    ///
    /// Unknown names are not an error; they decode to [`Command::Unknown`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArguments`] if a recognised command's
    /// first argument is missing or has the wrong type.
    pub fn from_envelope(envelope: &Envelope) -> Result<Self, ClientError> {
        let invalid = || ClientError::InvalidArguments {
            name: envelope.name.clone(),
        };
        let text = || envelope.first_str().map(str::to_string).ok_or_else(invalid);

        let command = match envelope.name.as_str() {
            "message" => Self::Message(text()?),
            "inputType" => Self::InputType(
                envelope
                    .first_str()
                    .and_then(InputKind::from_wire)
                    .ok_or_else(invalid)?,
            ),
            "promptText" => Self::PromptText(text()?),
            "title" => Self::Title(text()?),
            "inputText" => Self::InputText(text()?),
            "status" => Self::Status(text()?),
            other => Self::Unknown(other.to_string()),
        };
        Ok(command)
    }

    /// Returns the wire name of this command.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Message(_) => "message",
            Self::InputType(_) => "inputType",
            Self::PromptText(_) => "promptText",
            Self::Title(_) => "title",
            Self::InputText(_) => "inputText",
            Self::Status(_) => "status",
            Self::Unknown(name) => name.as_str(),
        }
    }
}
