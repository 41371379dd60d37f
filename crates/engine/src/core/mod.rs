//! The scheduling core: unit pool, phase algorithms, driver, snapshots.

/// Cycle driver and its lifecycle state machine.
pub mod driver;

/// Phase algorithms (decode, issue, execute, commit).
pub(crate) mod phases;

/// Published snapshots and per-cycle summaries.
pub mod snapshot;

/// Fixed functional unit pool and derived occupancy.
pub mod units;

pub use driver::{CycleDriver, DriverState};
pub use snapshot::{CycleSummary, Snapshot, UnitView};
pub use units::{FunctionalUnit, Occupancy, UNITS};
