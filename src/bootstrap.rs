//! Port discovery and socket opening.
//!
//! The serving host answers `GET /wsport` with a bare JSON number: the port
//! its WebSocket server listens on. The socket is then opened on the same
//! hostname.

use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Socket type produced by [`connect`].
pub type ClientSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Builds the HTTP client used for port discovery.
///
/// # Errors
///
/// Returns [`ClientError::Bootstrap`] if the client cannot be constructed.
pub fn http_client(config: &ClientConfig) -> Result<reqwest::Client, ClientError> {
    let mut builder = reqwest::Client::builder().timeout(config.bootstrap_timeout());
    if !config.use_system_proxy {
        builder = builder.no_proxy();
    }
    Ok(builder.build()?)
}

/// Asks the serving host which port its WebSocket server listens on.
///
/// # Errors
///
/// Returns [`ClientError::InvalidHost`] for a bad host and
/// [`ClientError::Bootstrap`] if the request fails, the status is not a
/// success, or the body is not a port number.
pub async fn fetch_ws_port(client: &reqwest::Client, config: &ClientConfig) -> Result<u16, ClientError> {
    let url = config.wsport_url()?;
    tracing::debug!(%url, "requesting websocket port");
    let port = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<u16>()
        .await?;
    Ok(port)
}

/// Returns `ws://<hostname>:<port>`.
#[must_use]
pub fn ws_url(hostname: &str, port: u16) -> String {
    format!("ws://{hostname}:{port}")
}

/// Opens the WebSocket.
///
/// # Errors
///
/// Returns [`ClientError::Transport`] if the handshake fails.
pub async fn connect(url: &str) -> Result<ClientSocket, ClientError> {
    let (socket, response) = tokio_tungstenite::connect_async(url).await?;
    tracing::debug!(%url, status = %response.status(), "websocket handshake complete");
    Ok(socket)
}

/// Discovers the port and opens the socket on the configured host.
///
/// # Errors
///
/// Propagates any failure from [`fetch_ws_port`] or [`connect`].
pub async fn discover_and_connect(config: &ClientConfig) -> Result<ClientSocket, ClientError> {
    let client = http_client(config)?;
    let port = fetch_ws_port(&client, config).await?;
    let url = ws_url(&config.hostname()?, port);
    tracing::info!(%url, "websocket port discovered");
    connect(&url).await
}
