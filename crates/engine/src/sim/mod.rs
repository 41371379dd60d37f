//! Interactive simulation sessions and auto-advance playback.

/// Auto-advance scheduled-task handle.
pub(crate) mod player;

/// Session: the controlled entry point over a driver.
pub mod session;

pub use session::Session;
