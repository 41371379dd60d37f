//! Published simulation snapshots and per-cycle summaries.
//!
//! A [`Snapshot`] is the immutable view the driver publishes after every
//! tick; presentation layers only ever read snapshots. [`CycleSummary`] is
//! a pure derivation of per-cycle event lists from a snapshot, with no
//! access to driver state.

use serde::Serialize;

use crate::core::driver::DriverState;
use crate::core::units::{Occupancy, UNITS};
use crate::program::{BlockReason, InstrType, Instruction, Stage, UnitId};

/// One functional unit and its occupant at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitView {
    /// Unit id.
    pub unit: UnitId,
    /// Unit type.
    pub ty: InstrType,
    /// Presentation label.
    pub label: &'static str,
    /// Program-order index of the executing occupant, if any.
    pub occupant: Option<usize>,
}

/// Immutable view of the simulation after a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Cycle number this snapshot was published at.
    pub cycle: u64,
    /// Driver state after the tick.
    pub state: DriverState,
    /// Full instruction state in program order.
    pub instructions: Vec<Instruction>,
    /// Per-unit occupancy, derived from executing instructions.
    pub units: Vec<UnitView>,
    /// Program-order indices currently decoded and awaiting issue.
    pub decode_buffer: Vec<usize>,
}

impl Snapshot {
    /// Builds a snapshot from the driver's current state.
    pub(crate) fn capture(
        instructions: &[Instruction],
        cycle: u64,
        state: DriverState,
    ) -> Self {
        let occupancy = Occupancy::derive(instructions).slots();
        let units = UNITS
            .iter()
            .map(|u| UnitView {
                unit: u.id,
                ty: u.ty,
                label: u.label,
                occupant: occupancy[u.id.0],
            })
            .collect();
        let decode_buffer = instructions
            .iter()
            .filter(|i| i.stage == Stage::Decoded)
            .map(|i| i.order)
            .collect();
        Self {
            cycle,
            state,
            instructions: instructions.to_vec(),
            units,
            decode_buffer,
        }
    }

    /// Number of committed instructions.
    pub fn done_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| i.stage == Stage::Done)
            .count()
    }

    /// Derives the event lists for the given cycle.
    ///
    /// The stamp-based lists (decoded/issued/completed) are valid for any
    /// past cycle. Stage-based lists (stalls, ready-to-commit, busy units)
    /// describe a single moment and are only populated when `cycle` equals
    /// the snapshot's own cycle; block reasons are recomputed every tick
    /// and are not recoverable for earlier cycles.
    pub fn cycle_summary(&self, cycle: u64) -> CycleSummary {
        let stamped = |stamp: fn(&Instruction) -> Option<u64>| -> Vec<usize> {
            self.instructions
                .iter()
                .filter(|i| stamp(i) == Some(cycle))
                .map(|i| i.order)
                .collect()
        };

        let mut summary = CycleSummary {
            cycle,
            decoded: stamped(|i| i.decode_at),
            issued: stamped(|i| i.issue_at),
            completed: stamped(|i| i.complete_at),
            ready_to_commit: Vec::new(),
            stalled: Vec::new(),
            busy_units: Vec::new(),
        };

        if cycle == self.cycle {
            summary.ready_to_commit = self
                .instructions
                .iter()
                .filter(|i| {
                    i.stage == Stage::Waiting && i.fu_remaining == 0 && i.block_reason.is_none()
                })
                .map(|i| i.order)
                .collect();
            summary.stalled = self
                .instructions
                .iter()
                .filter_map(|i| i.block_reason.map(|r| (i.order, r)))
                .collect();
            summary.busy_units = self
                .units
                .iter()
                .filter_map(|u| u.occupant.map(|occ| (u.unit, occ)))
                .collect();
        }

        summary
    }
}

/// Per-cycle event lists derived from a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleSummary {
    /// The cycle the summary describes.
    pub cycle: u64,
    /// Instructions that entered the decode buffer this cycle.
    pub decoded: Vec<usize>,
    /// Instructions issued to a functional unit this cycle.
    pub issued: Vec<usize>,
    /// Instructions committed this cycle.
    pub completed: Vec<usize>,
    /// Finished instructions awaiting a bus slot, unblocked.
    pub ready_to_commit: Vec<usize>,
    /// Instructions with a block reason, with the reason.
    pub stalled: Vec<(usize, BlockReason)>,
    /// Occupied units and their occupants.
    pub busy_units: Vec<(UnitId, usize)>,
}
