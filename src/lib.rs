//! # mudmaker-client
//!
//! Terminal WebSocket client for MudMaker game servers.
//!
//! The client asks the serving host which port its WebSocket server uses,
//! opens the socket, renders inbound `{name, args}` commands on a
//! [`ui::Surface`] and sends typed input back verbatim.
//!
//! ## Architecture
//!
//! ```text
//! stdin lines ──► mpsc ──┐
//!                        ▼
//!   Bootstrap ──► Connection loop (ws/) ◄──► WebSocket server
//!  (GET /wsport)         │
//!                        ▼
//!                 Session (dispatcher + state)
//!                        │
//!                        ▼
//!                 Surface (terminal / memory)
//! ```

pub mod bootstrap;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod ui;
pub mod ws;
