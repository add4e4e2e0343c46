//! UI layer: the render surface abstraction and its implementations.
//!
//! A [`Surface`] stands in for the page a browser client would draw on.
//! [`UiState`] mirrors what is on screen so that handlers can skip no-op
//! updates.

pub mod memory;
pub mod state;
pub mod surface;
pub mod terminal;

pub use memory::MemorySurface;
pub use state::UiState;
pub use surface::Surface;
pub use terminal::TerminalSurface;
