//! WebSocket connection loop.
//!
//! Handles the read/write loop for a single connection: inbound frames are
//! dispatched to the [`Session`], typed lines are submitted through it and
//! whatever it returns is sent verbatim.

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;

use crate::error::ClientError;
use crate::session::Session;
use crate::ui::Surface;

/// Why the connection loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The server closed the socket.
    ServerClosed,
    /// The input source ended and the client closed the socket.
    InputClosed,
    /// A transport error ended the session.
    Failed,
}

/// Runs the read/write loop for an open socket.
///
/// The session must already be `Connected`. Events are handled strictly in
/// the order they are delivered. Returns once the session is disconnected.
pub async fn run_connection<T, S>(
    socket: WebSocketStream<T>,
    session: &mut Session,
    surface: &mut S,
    input_rx: &mut mpsc::Receiver<String>,
) -> LoopExit
where
    T: AsyncRead + AsyncWrite + Unpin,
    S: Surface,
{
    let (mut ws_tx, mut ws_rx) = socket.split();

    let exit = loop {
        tokio::select! {
            // Frame from the server
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let Err(e) = session.handle_frame(text.as_str(), surface) {
                            tracing::warn!(error = %e, "bad frame from server");
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        tracing::debug!(?frame, "close frame received");
                        session.on_close(surface);
                        break LoopExit::ServerClosed;
                    }
                    None => {
                        session.on_close(surface);
                        break LoopExit::ServerClosed;
                    }
                    Some(Err(e)) => {
                        session.on_error(surface, &ClientError::from(e));
                        session.on_close(surface);
                        break LoopExit::Failed;
                    }
                    Some(Ok(_)) => {}
                }
            }
            // Line typed by the user
            line = input_rx.recv() => {
                let Some(line) = line else {
                    tracing::debug!("input closed, closing socket");
                    if let Err(e) = ws_tx.send(Message::Close(None)).await {
                        tracing::debug!(error = %e, "close frame not sent");
                    }
                    session.on_close(surface);
                    break LoopExit::InputClosed;
                };
                if let Some(out) = session.accept_line(&line, surface)
                    && let Err(e) = ws_tx.send(Message::text(out)).await
                {
                    session.on_error(surface, &ClientError::from(e));
                    session.on_close(surface);
                    break LoopExit::Failed;
                }
            }
        }
    };

    tracing::debug!(?exit, "ws connection loop finished");
    exit
}
