//! Instruction entity and its per-cycle scheduling state.
//!
//! An [`Instruction`] is created once at program load and never destroyed;
//! the phase algorithms are the only code that mutates it during a tick.

use std::fmt;

use serde::Serialize;

/// Instruction class, matching the functional unit that executes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InstrType {
    /// Integer arithmetic.
    Alu,
    /// Floating point arithmetic.
    Fpu,
    /// Load/store.
    Mem,
}

impl InstrType {
    /// All instruction types, in functional unit order.
    pub const ALL: [Self; 3] = [Self::Alu, Self::Fpu, Self::Mem];

    /// Parses a type from its wire/display name (`"ALU"`, `"FPU"`, `"MEM"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ALU" => Some(Self::Alu),
            "FPU" => Some(Self::Fpu),
            "MEM" => Some(Self::Mem),
            _ => None,
        }
    }
}

impl fmt::Display for InstrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alu => write!(f, "ALU"),
            Self::Fpu => write!(f, "FPU"),
            Self::Mem => write!(f, "MEM"),
        }
    }
}

/// Lifecycle stage of an instruction.
///
/// The only legal progression is
/// Decode → Decoded → Executing → Waiting → Done; an instruction may cross
/// several stages within one tick (e.g. a latency-1 instruction issues and
/// finishes execution in the same cycle) but never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub enum Stage {
    /// Waiting in the decode buffer.
    #[default]
    Decode,
    /// Decoded, waiting to be issued to a functional unit.
    Decoded,
    /// Occupying a functional unit.
    Executing,
    /// Execution finished, waiting for a write-back bus slot.
    Waiting,
    /// Committed; result written back.
    Done,
}

/// Why an otherwise eligible instruction did not advance this cycle.
///
/// Block reasons are scheduling states, not errors. They are recomputed
/// from scratch every cycle by the issue and commit phases and may persist
/// across many cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockReason {
    /// A dependency has not yet reached [`Stage::Done`].
    Dependencies,
    /// No free functional unit of the required type.
    FunctionalUnitBusy,
    /// In-order commit: the instruction at the given program-order index
    /// has not committed yet.
    Order(usize),
    /// Both write-back bus slots were taken this cycle.
    WriteBusFull,
}

/// A single instruction flowing through the scheduler.
///
/// `order` is assigned at program load and never changes; it is the
/// canonical identity used for all tie-breaking. Dependencies are stored as
/// program-order indices, each strictly smaller than `order` (validated at
/// load). The three cycle stamps are set exactly once each and, when
/// defined, satisfy `decode_at <= issue_at <= complete_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instruction {
    /// Display label from the program source (e.g. `"I3"`).
    pub label: String,
    /// Immutable position in program order.
    pub order: usize,
    /// Instruction class; selects the functional unit type.
    pub ty: InstrType,
    /// Program-order indices this instruction depends on (all `< order`).
    pub deps: Vec<usize>,
    /// Execution latency in cycles (>= 1).
    pub latency: u32,
    /// Current lifecycle stage.
    pub stage: Stage,
    /// Cycle this instruction was decoded into the issue window.
    pub decode_at: Option<u64>,
    /// Cycle this instruction was issued to its functional unit.
    pub issue_at: Option<u64>,
    /// Cycle this instruction committed.
    pub complete_at: Option<u64>,
    /// Remaining execution cycles; meaningful only while [`Stage::Executing`].
    pub fu_remaining: u32,
    /// Occupied functional unit; held only while [`Stage::Executing`].
    pub unit_id: Option<UnitId>,
    /// Stall diagnostic for the current cycle, if any.
    pub block_reason: Option<BlockReason>,
}

impl Instruction {
    /// True once every dependency has committed.
    pub fn deps_done(&self, instructions: &[Self]) -> bool {
        self.deps.iter().all(|&d| instructions[d].stage == Stage::Done)
    }
}

/// Identifier of a functional unit in the fixed unit pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UnitId(pub usize);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.0)
    }
}
