//! mudmaker-client entry point.
//!
//! Connects to the configured MudMaker host and plays in the terminal.

use std::io::BufRead;

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use mudmaker_client::client;
use mudmaker_client::config::{ClientConfig, LogFormat};
use mudmaker_client::session::Session;
use mudmaker_client::ui::TerminalSurface;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ClientConfig::from_env()?;

    // Initialize tracing; stdout belongs to the game output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }

    // Forward typed lines to the session task. A plain thread keeps a
    // pending stdin read from holding up runtime shutdown.
    let (input_tx, mut input_rx) = mpsc::channel(config.input_channel_capacity);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if input_tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stdin read failed");
                    break;
                }
            }
        }
    });

    let mut session = Session::new();
    let mut surface = TerminalSurface::new(std::io::stdout());
    let result = client::run(&config, &mut session, &mut surface, &mut input_rx).await;
    match &result {
        Ok(exit) => tracing::info!(?exit, "session over"),
        Err(e) => tracing::error!(error = %e, "session failed"),
    }

    // Like a page left open after the socket dies: input is refused until
    // stdin ends.
    client::after_disconnect(&mut session, &mut surface, &mut input_rx).await;

    result?;
    Ok(())
}
