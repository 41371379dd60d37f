//! Property tests: random valid programs under every policy.
//!
//! Programs are generated with backward-only dependencies, so they always
//! pass validation; the harness invariant checker then enforces the
//! published-snapshot properties on every step of every run.

use proptest::prelude::*;
use scalarsim_core::program::InstrType;
use scalarsim_core::{CycleDriver, DriverState, InstructionSpec, Policy, Program};

use crate::common::run_checked;

const MAX_INSTRUCTIONS: usize = 8;

/// A random program: per instruction a type, a latency in 1..=3, and a
/// dependency bitmask over the earlier instructions.
fn arb_specs() -> impl Strategy<Value = Vec<InstructionSpec>> {
    prop::collection::vec((0usize..3, 1u32..=3, any::<u8>()), 1..=MAX_INSTRUCTIONS).prop_map(
        |rows| {
            rows.iter()
                .enumerate()
                .map(|(idx, &(ty, latency, dep_mask))| InstructionSpec {
                    id: format!("I{}", idx + 1),
                    ty: InstrType::ALL[ty],
                    deps: (0..idx)
                        .filter(|j| dep_mask & (1 << j) != 0)
                        .map(|j| format!("I{}", j + 1))
                        .collect(),
                    latency,
                })
                .collect()
        },
    )
}

fn arb_policy() -> impl Strategy<Value = Policy> {
    prop::sample::select(Policy::ALL.to_vec())
}

proptest! {
    /// Every generated program terminates under every policy, with all
    /// per-step invariants holding along the way.
    #[test]
    fn prop_runs_complete_with_invariants(specs in arb_specs(), policy in arb_policy()) {
        let len = specs.len();
        let program = Program::new(specs).unwrap();
        let mut driver = CycleDriver::new(program, policy);

        let history = run_checked(&mut driver, 500);
        let last = history.last().unwrap();
        prop_assert_eq!(last.state, DriverState::Completed);
        prop_assert_eq!(last.done_count(), len);
        prop_assert_eq!(driver.stats().committed, len as u64);
        prop_assert_eq!(driver.stats().issued, len as u64);
    }

    /// Reset after a random number of steps restores the initial snapshot
    /// exactly.
    #[test]
    fn prop_reset_is_exact(specs in arb_specs(), policy in arb_policy(), steps in 0usize..20) {
        let program = Program::new(specs).unwrap();
        let mut driver = CycleDriver::new(program, policy);
        let initial = driver.snapshot();

        for _ in 0..steps {
            let _ = driver.step();
        }
        driver.reset();
        prop_assert_eq!(driver.snapshot(), initial);
    }

    /// Relaxing only the commit side never finishes later than fully
    /// in-order execution of the same program.
    #[test]
    fn prop_relaxed_commit_is_never_slower(specs in arb_specs()) {
        let program = Program::new(specs).unwrap();

        let mut strict = CycleDriver::new(program.clone(), Policy::IN_IN);
        let mut relaxed = CycleDriver::new(program, Policy::IN_OUT);

        let strict_end = run_checked(&mut strict, 500).last().unwrap().cycle;
        let relaxed_end = run_checked(&mut relaxed, 500).last().unwrap().cycle;
        prop_assert!(relaxed_end <= strict_end);
    }
}
