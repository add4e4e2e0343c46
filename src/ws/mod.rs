//! WebSocket layer: message types and the connection loop.
//!
//! Inbound frames are JSON envelopes `{"name": ..., "args": [...]}`;
//! outbound frames are the raw text of the active input.

pub mod connection;
pub mod messages;
