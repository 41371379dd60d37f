//! Commit phase: retire finished instructions over the write-back bus.
//!
//! Eligible instructions are those in [`Stage::Waiting`] with a drained
//! latency counter, considered in program order. The bus carries at most
//! [`COMMIT_WIDTH`] results per cycle.
//!
//! - **Out-of-order commit** retires up to the bus width, program order as
//!   the tie-break.
//! - **In-order commit** additionally requires that every earlier-order
//!   instruction is already Done (instructions retired earlier in this same
//!   scan count). The first instruction failing the check is marked
//!   `Order(blocking)` and the scan stops immediately; if the bus is
//!   already full when an otherwise committable instruction is reached, it
//!   is marked `WriteBusFull` instead.
//!
//! Block reasons on all eligible instructions are cleared before
//! recomputation, so stale reasons never survive a cycle.

use tracing::trace;

use crate::config::{COMMIT_WIDTH, CommitPolicy};
use crate::program::{BlockReason, Instruction, Stage};

/// Runs the commit phase. Returns the program-order indices committed.
pub(crate) fn run(
    instructions: &mut [Instruction],
    policy: CommitPolicy,
    cycle: u64,
) -> Vec<usize> {
    let eligible: Vec<usize> = instructions
        .iter()
        .filter(|i| i.stage == Stage::Waiting && i.fu_remaining == 0)
        .map(|i| i.order)
        .collect();

    for &idx in &eligible {
        instructions[idx].block_reason = None;
    }

    let mut committed = Vec::with_capacity(COMMIT_WIDTH);

    match policy {
        CommitPolicy::OutOfOrder => {
            for &idx in eligible.iter().take(COMMIT_WIDTH) {
                retire(&mut instructions[idx], cycle);
                committed.push(idx);
            }
        }
        CommitPolicy::InOrder => {
            for &idx in &eligible {
                let blocking = instructions[..idx]
                    .iter()
                    .position(|earlier| earlier.stage != Stage::Done);
                if let Some(blocking) = blocking {
                    instructions[idx].block_reason = Some(BlockReason::Order(blocking));
                    trace!(
                        cycle,
                        inst = %instructions[idx].label,
                        blocked_by = %instructions[blocking].label,
                        "commit held for order"
                    );
                    break;
                }
                if committed.len() < COMMIT_WIDTH {
                    retire(&mut instructions[idx], cycle);
                    committed.push(idx);
                } else {
                    instructions[idx].block_reason = Some(BlockReason::WriteBusFull);
                    trace!(cycle, inst = %instructions[idx].label, "commit held, bus full");
                }
            }
        }
    }

    if !committed.is_empty() {
        trace!(cycle, ?committed, "commit");
    }
    committed
}

fn retire(inst: &mut Instruction, cycle: u64) {
    inst.stage = Stage::Done;
    inst.complete_at = Some(cycle);
    inst.block_reason = None;
}
