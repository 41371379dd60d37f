//! Cycle-driven superscalar instruction scheduling simulator.
//!
//! This crate implements the scheduling engine of a teaching simulator:
//! 1. **Program model:** Instruction entities with load-time dependency
//!    validation (backward edges only, positive latencies, unique ids).
//! 2. **Unit pool:** One ALU, one FPU, one MEM unit; occupancy derived per
//!    cycle.
//! 3. **Phases:** Decode, issue, execute, and commit as total per-cycle
//!    transformations, with width caps of two throughout.
//! 4. **Driver:** Policy-dependent phase orchestration (in-order and
//!    out-of-order issue/commit disciplines) with an Idle → Running →
//!    Completed lifecycle.
//! 5. **Sessions:** A controlled entry point with snapshot queries and a
//!    cancelable auto-advance ticker.
//!
//! Rendering, program editing, and explanation text live outside this
//! crate; they only consume the immutable [`Snapshot`]s published here.

/// Scheduling policies and fixed machine widths.
pub mod config;
/// Driver, phases, unit pool, and snapshots.
pub mod core;
/// Load-time configuration errors.
pub mod error;
/// Instruction and program model with validation.
pub mod program;
/// Interactive sessions and auto-advance playback.
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;

/// Validated policy pair; construct via its consts or [`Policy::new`].
pub use crate::config::{CommitPolicy, IssuePolicy, Policy};
/// The scheduling engine; construct with [`CycleDriver::new`].
pub use crate::core::{CycleDriver, CycleSummary, DriverState, Snapshot};
/// Load-time failure taxonomy.
pub use crate::error::ConfigError;
/// Validated program; construct with [`Program::new`] or [`Program::from_json`].
pub use crate::program::{InstructionSpec, Program};
/// Interactive session over one program.
pub use crate::sim::Session;
/// Per-run counters.
pub use crate::stats::SimStats;
