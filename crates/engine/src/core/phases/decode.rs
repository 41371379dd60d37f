//! Decode phase: move instructions from the decode buffer into the window.
//!
//! Selects up to [`DECODE_WIDTH`] lowest-order instructions still in
//! [`Stage::Decode`] and stamps their decode cycle. There are no resource
//! checks beyond the width cap; gating (whether decode runs at all this
//! cycle) is the driver's concern.

use tracing::trace;

use crate::config::DECODE_WIDTH;
use crate::program::{Instruction, Stage};

/// Runs the decode phase. Returns the program-order indices decoded.
pub(crate) fn run(instructions: &mut [Instruction], cycle: u64) -> Vec<usize> {
    let mut decoded = Vec::with_capacity(DECODE_WIDTH);

    // The list is stored in program order, so a forward scan selects the
    // lowest-order candidates.
    for inst in instructions.iter_mut() {
        if inst.stage != Stage::Decode {
            continue;
        }
        inst.stage = Stage::Decoded;
        inst.decode_at = Some(cycle);
        decoded.push(inst.order);
        if decoded.len() == DECODE_WIDTH {
            break;
        }
    }

    if !decoded.is_empty() {
        trace!(cycle, ?decoded, "decode");
    }
    decoded
}
