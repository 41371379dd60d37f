//! Cycle driver: policy-dependent phase orchestration.
//!
//! The driver owns the single mutable (instruction list, cycle counter)
//! pair and is the only entry point that advances it. Each [`step`]
//! request runs the four phases atomically in the order the configured
//! policy demands, then publishes a fresh [`Snapshot`]:
//!
//! | Policy          | Phase order                 | Decode gating            |
//! |-----------------|-----------------------------|--------------------------|
//! | InOrder/InOrder | Commit, Issue, Exec, Decode | decode only on empty window |
//! | InOrder/OutOfOrder | same                     | same                     |
//! | OutOfOrder/OutOfOrder | cycle 1: Decode only; then Commit, Issue, Exec, Decode | never gated |
//!
//! The gating rule models a front end that cannot accept new instructions
//! until both currently decoded instructions have left the buffer; the
//! out-of-order front end tolerates a populated window.
//!
//! [`step`]: CycleDriver::step

use serde::Serialize;
use tracing::debug;

use crate::config::{IssuePolicy, Policy};
use crate::core::phases::{commit, decode, execute, issue};
use crate::core::snapshot::Snapshot;
use crate::program::{Instruction, Program, Stage};
use crate::stats::SimStats;

/// Driver lifecycle state.
///
/// `Completed` is terminal: once every instruction is Done, further step
/// requests are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DriverState {
    /// Constructed or reset; no cycle has run.
    Idle,
    /// At least one cycle has run and instructions remain in flight.
    Running,
    /// Every instruction is Done.
    Completed,
}

/// Per-policy orchestration entry, selected from [`SCHEDULE`].
#[derive(Debug, Clone, Copy)]
struct PhasePlan {
    /// Decode runs only if the decoded window drained after issue.
    gated_decode: bool,
    /// The first cycle runs decode alone (out-of-order window warm-up).
    warmup_decode_only: bool,
}

/// Phase-plan lookup keyed by the policy pair. Commit policy does not
/// change orchestration; only the issue side does.
const SCHEDULE: [(IssuePolicy, PhasePlan); 2] = [
    (
        IssuePolicy::InOrder,
        PhasePlan {
            gated_decode: true,
            warmup_decode_only: false,
        },
    ),
    (
        IssuePolicy::OutOfOrder,
        PhasePlan {
            gated_decode: false,
            warmup_decode_only: true,
        },
    ),
];

fn plan_for(policy: Policy) -> PhasePlan {
    // Both variants are present in the table.
    match SCHEDULE.iter().find(|(issue, _)| *issue == policy.issue()) {
        Some((_, plan)) => *plan,
        None => unreachable!(),
    }
}

/// The cycle-driven scheduling engine.
///
/// Holds the pristine validated [`Program`] (for reset) and the working
/// instruction list. All mutation happens inside [`CycleDriver::step`];
/// everything else reads published snapshots.
#[derive(Debug, Clone)]
pub struct CycleDriver {
    program: Program,
    instructions: Vec<Instruction>,
    cycle: u64,
    state: DriverState,
    policy: Policy,
    stats: SimStats,
}

impl CycleDriver {
    /// Creates a driver at cycle 0 over the given program and policy.
    pub fn new(program: Program, policy: Policy) -> Self {
        let instructions = program.instructions().to_vec();
        // Completion is a derived condition; the empty program is complete
        // before any cycle runs.
        let state = if instructions.is_empty() {
            DriverState::Completed
        } else {
            DriverState::Idle
        };
        Self {
            program,
            instructions,
            cycle: 0,
            state,
            policy,
            stats: SimStats::new(),
        }
    }

    /// Advances the simulation by one cycle and publishes the new snapshot.
    ///
    /// A no-op once the driver is [`DriverState::Completed`].
    pub fn step(&mut self) -> Snapshot {
        if self.state == DriverState::Completed {
            return self.snapshot();
        }

        self.cycle += 1;
        self.state = DriverState::Running;
        let cycle = self.cycle;
        let plan = plan_for(self.policy);

        let (decoded, issued, committed) = if plan.warmup_decode_only && cycle == 1 {
            let decoded = decode::run(&mut self.instructions, cycle);
            (decoded.len(), 0, 0)
        } else {
            let committed = commit::run(&mut self.instructions, self.policy.commit(), cycle);
            let issued = issue::run(&mut self.instructions, self.policy.issue(), cycle);
            let _finished = execute::run(&mut self.instructions, cycle);

            let window_empty = !self
                .instructions
                .iter()
                .any(|i| i.stage == Stage::Decoded);
            let decoded = if !plan.gated_decode || window_empty {
                decode::run(&mut self.instructions, cycle)
            } else {
                Vec::new()
            };
            (decoded.len(), issued.len(), committed.len())
        };

        self.stats
            .record_tick(&self.instructions, decoded, issued, committed);

        if self.done_count() == self.instructions.len() {
            self.state = DriverState::Completed;
            debug!(cycle, "simulation completed");
        }

        self.snapshot()
    }

    /// Restores the initial program state and cycle 0.
    pub fn reset(&mut self) {
        self.instructions = self.program.instructions().to_vec();
        self.cycle = 0;
        self.state = if self.instructions.is_empty() {
            DriverState::Completed
        } else {
            DriverState::Idle
        };
        self.stats = SimStats::new();
        debug!("driver reset");
    }

    /// Selects a new policy pair. Well-defined only between ticks, which
    /// the exclusive borrow enforces.
    pub fn set_policy(&mut self, policy: Policy) {
        if policy != self.policy {
            debug!(?policy, "policy changed");
        }
        self.policy = policy;
    }

    /// Publishes a read-only view of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.instructions, self.cycle, self.state)
    }

    /// Number of committed instructions.
    pub fn done_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| i.stage == Stage::Done)
            .count()
    }

    /// Current cycle number.
    #[inline]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Current driver state.
    #[inline]
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// The active policy pair.
    #[inline]
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// The validated program this driver runs.
    #[inline]
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Counters for the current run.
    #[inline]
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }
}
