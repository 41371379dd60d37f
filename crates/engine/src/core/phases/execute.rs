//! Execute phase: count down functional unit latencies.
//!
//! Every executing instruction loses one remaining cycle; on reaching zero
//! it moves to [`Stage::Waiting`] and releases its unit (occupancy is
//! derived from executing instructions, so clearing `unit_id` is the
//! release). Identical under all policies.

use tracing::trace;

use crate::program::{Instruction, Stage};

/// Runs the execute phase. Returns the indices that finished execution.
pub(crate) fn run(instructions: &mut [Instruction], cycle: u64) -> Vec<usize> {
    let mut finished = Vec::new();

    for inst in instructions.iter_mut() {
        if inst.stage != Stage::Executing {
            continue;
        }
        inst.fu_remaining = inst.fu_remaining.saturating_sub(1);
        if inst.fu_remaining == 0 {
            inst.stage = Stage::Waiting;
            inst.unit_id = None;
            finished.push(inst.order);
        }
    }

    if !finished.is_empty() {
        trace!(cycle, ?finished, "execute finished");
    }
    finished
}
