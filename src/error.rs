//! Client error types with user-facing message mapping.
//!
//! [`ClientError`] is the central error type for the client. Transport-class
//! variants end the session; protocol-class variants are reported on the
//! output pane and the connection is kept.

use tokio_tungstenite::tungstenite;

/// Line shown when the socket cannot be opened or fails mid-session.
pub const UNABLE_TO_CONNECT_MSG: &str = "Unable to connect. Please refresh and try again.";

/// Line shown when the user submits input without a live connection.
pub const NOT_CONNECTED_MSG: &str = "You are not connected. Please refresh the page and try again.";

/// Line shown when an inbound frame is not a valid envelope.
pub const MALFORMED_MESSAGE_MSG: &str = "Malformed message from server.";

/// Client-side error enum.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The `/wsport` bootstrap request failed or returned a bad body.
    #[error("bootstrap request failed: {0}")]
    Bootstrap(#[from] reqwest::Error),

    /// The configured host could not be turned into a URL.
    #[error("invalid host: {0}")]
    InvalidHost(String),

    /// WebSocket transport failure.
    #[error("transport error: {0}")]
    Transport(Box<tungstenite::Error>),

    /// An inbound frame could not be decoded as an envelope.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(#[from] serde_json::Error),

    /// A recognised command carried arguments of the wrong shape.
    #[error("invalid arguments for command {name}")]
    InvalidArguments {
        /// Command name as sent by the server.
        name: String,
    },

    /// Input was submitted while no connection is present.
    #[error("not connected")]
    NotConnected,
}

impl From<tungstenite::Error> for ClientError {
    fn from(err: tungstenite::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

impl ClientError {
    /// Returns `true` if the error ends the session.
    ///
    /// There is no recovery path: a fatal error leaves the session
    /// disconnected until the user starts a new one.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        match self {
            Self::Bootstrap(_) | Self::InvalidHost(_) | Self::Transport(_) => true,
            Self::MalformedEnvelope(_) | Self::InvalidArguments { .. } | Self::NotConnected => false,
        }
    }

    /// Returns the fixed line shown to the user for this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Bootstrap(_) | Self::InvalidHost(_) | Self::Transport(_) => {
                UNABLE_TO_CONNECT_MSG.to_string()
            }
            Self::MalformedEnvelope(_) => MALFORMED_MESSAGE_MSG.to_string(),
            Self::InvalidArguments { name } => format!("Invalid arguments for command: {name}."),
            Self::NotConnected => NOT_CONNECTED_MSG.to_string(),
        }
    }
}
