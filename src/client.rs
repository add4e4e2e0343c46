//! Top-level client flow: bootstrap, connect, then run the connection loop.

use tokio::sync::mpsc;

use crate::bootstrap;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::Session;
use crate::ui::Surface;
use crate::ws::connection::{LoopExit, run_connection};

/// Runs one client session against the configured host.
///
/// Renders the initial chrome, discovers the WebSocket port, opens the
/// socket and processes events until the session is disconnected. Lines
/// received on `input_rx` are treated as typed input; input that arrives
/// before the socket opens waits in the channel. Lines still to come once
/// this returns belong to [`after_disconnect`].
///
/// # Errors
///
/// Returns the bootstrap or connect failure after reporting it on the
/// surface. A session that connected and later closed returns `Ok`.
pub async fn run<S: Surface>(
    config: &ClientConfig,
    session: &mut Session,
    surface: &mut S,
    input_rx: &mut mpsc::Receiver<String>,
) -> Result<LoopExit, ClientError> {
    session.begin(surface);
    tracing::info!(host = %config.host, "connecting");

    let socket = match bootstrap::discover_and_connect(config).await {
        Ok(socket) => socket,
        Err(e) => {
            session.on_error(surface, &e);
            return Err(e);
        }
    };

    session.on_open(surface);
    Ok(run_connection(socket, session, surface, input_rx).await)
}

/// Keeps answering typed input after the session has ended.
///
/// Every submission is refused with the not-connected line until the input
/// source closes. Nothing is ever sent.
pub async fn after_disconnect<S: Surface>(
    session: &mut Session,
    surface: &mut S,
    input_rx: &mut mpsc::Receiver<String>,
) {
    while let Some(line) = input_rx.recv().await {
        if let Some(dropped) = session.accept_line(&line, surface) {
            tracing::warn!(len = dropped.len(), "input accepted without a connection");
        }
    }
    tracing::debug!("input closed");
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::error::NOT_CONNECTED_MSG;
    use crate::ui::MemorySurface;

    #[tokio::test]
    async fn input_after_failed_bootstrap_is_refused() {
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        drop(listener);

        let config = ClientConfig::for_host(addr.to_string());
        let (tx, mut rx) = mpsc::channel(4);
        let mut session = Session::new();
        let mut surface = MemorySurface::new();
        assert!(run(&config, &mut session, &mut surface, &mut rx).await.is_err());

        let Ok(()) = tx.send("north".to_string()).await else {
            panic!("input send failed");
        };
        drop(tx);
        after_disconnect(&mut session, &mut surface, &mut rx).await;

        assert_eq!(surface.last_line(), Some(NOT_CONNECTED_MSG));
        assert!(!session.is_connected());
    }
}
