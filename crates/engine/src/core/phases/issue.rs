//! Issue phase: select decoded instructions and allocate functional units.
//!
//! Eligible instructions are those in [`Stage::Decoded`] whose decode cycle
//! strictly precedes the current cycle (one-cycle decode-to-issue minimum).
//! An instruction can issue only once every dependency is Done and a unit
//! of its type is free.
//!
//! The two disciplines differ in how they treat a blocked instruction:
//! - **In-order** stops the scan at the first blocked instruction; nothing
//!   behind it may issue this cycle.
//! - **Out-of-order** marks each blocked instruction and keeps scanning,
//!   then truncates the issuable set to the issue width. Width-dropped
//!   candidates carry no block reason; they simply stay decoded.
//!
//! Block reasons on decoded instructions are cleared and recomputed from
//! scratch on every run.

use tracing::trace;

use crate::config::{ISSUE_WIDTH, IssuePolicy};
use crate::core::units::Occupancy;
use crate::program::{BlockReason, Instruction, Stage};

/// Runs the issue phase. Returns the program-order indices issued.
pub(crate) fn run(
    instructions: &mut [Instruction],
    policy: IssuePolicy,
    cycle: u64,
) -> Vec<usize> {
    for inst in instructions.iter_mut() {
        if inst.stage == Stage::Decoded {
            inst.block_reason = None;
        }
    }

    let mut occupancy = Occupancy::derive(instructions);
    let ready: Vec<usize> = instructions
        .iter()
        .filter(|i| i.stage == Stage::Decoded && i.decode_at.is_some_and(|c| c < cycle))
        .map(|i| i.order)
        .collect();

    // (index, reserved unit) pairs, collected in scan order.
    let mut candidates = Vec::with_capacity(ISSUE_WIDTH);

    match policy {
        IssuePolicy::InOrder => {
            for &idx in &ready {
                if !instructions[idx].deps_done(instructions) {
                    instructions[idx].block_reason = Some(BlockReason::Dependencies);
                    trace!(cycle, inst = %instructions[idx].label, "issue stalled on dependencies");
                    break;
                }
                let Some(unit) = occupancy.free_unit(instructions[idx].ty) else {
                    instructions[idx].block_reason = Some(BlockReason::FunctionalUnitBusy);
                    trace!(cycle, inst = %instructions[idx].label, "issue stalled on busy unit");
                    break;
                };
                occupancy.reserve(unit, idx);
                candidates.push((idx, unit));
                if candidates.len() == ISSUE_WIDTH {
                    break;
                }
            }
        }
        IssuePolicy::OutOfOrder => {
            for &idx in &ready {
                if !instructions[idx].deps_done(instructions) {
                    instructions[idx].block_reason = Some(BlockReason::Dependencies);
                    continue;
                }
                let Some(unit) = occupancy.free_unit(instructions[idx].ty) else {
                    instructions[idx].block_reason = Some(BlockReason::FunctionalUnitBusy);
                    continue;
                };
                occupancy.reserve(unit, idx);
                candidates.push((idx, unit));
            }
            // Width truncation: surplus candidates stay decoded with no
            // block reason. Their local unit reservations are irrelevant
            // because occupancy is re-derived next cycle.
            candidates.truncate(ISSUE_WIDTH);
        }
    }

    let mut issued = Vec::with_capacity(candidates.len());
    for (idx, unit) in candidates {
        let inst = &mut instructions[idx];
        inst.stage = Stage::Executing;
        inst.fu_remaining = inst.latency;
        inst.issue_at = Some(cycle);
        inst.unit_id = Some(unit);
        inst.block_reason = None;
        issued.push(idx);
    }

    if !issued.is_empty() {
        trace!(cycle, ?issued, "issue");
    }
    issued
}
