//! Simulation session: the single controlled entry point over a driver.
//!
//! A [`Session`] owns the driver behind a lock and exposes the external
//! operations: step, reset, policy selection, snapshot queries, and
//! play/pause of the auto-advance ticker. All mutation funnels through the
//! lock, so no tick ever observes another tick in flight.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::config::Policy;
use crate::core::driver::CycleDriver;
use crate::core::snapshot::Snapshot;
use crate::program::Program;
use crate::sim::player::AutoAdvance;
use crate::stats::SimStats;

/// An interactive simulation over one validated program.
#[derive(Debug)]
pub struct Session {
    driver: Arc<Mutex<CycleDriver>>,
    player: Option<AutoAdvance>,
}

impl Session {
    /// Creates a paused session at cycle 0.
    pub fn new(program: Program, policy: Policy) -> Self {
        Self {
            driver: Arc::new(Mutex::new(CycleDriver::new(program, policy))),
            player: None,
        }
    }

    fn driver(&self) -> MutexGuard<'_, CycleDriver> {
        // The engine never panics while holding the lock, but a poisoned
        // lock still holds consistent state: the driver mutates its
        // instruction list only through total phase functions.
        match self.driver.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Manually advances one cycle and returns the new snapshot.
    pub fn step(&self) -> Snapshot {
        self.driver().step()
    }

    /// Restores the initial program state and cancels any pending
    /// scheduled step.
    pub fn reset(&mut self) -> Snapshot {
        self.pause();
        let mut driver = self.driver();
        driver.reset();
        driver.snapshot()
    }

    /// Selects a new policy pair; takes effect from the next tick.
    pub fn set_policy(&self, policy: Policy) {
        self.driver().set_policy(policy);
    }

    /// The current published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.driver().snapshot()
    }

    /// Counters for the current run.
    pub fn stats(&self) -> SimStats {
        self.driver().stats().clone()
    }

    /// Starts auto-advance with the given interval. Restarting while
    /// already playing replaces the interval.
    pub fn play(&mut self, interval: Duration) {
        self.pause();
        self.player = Some(AutoAdvance::spawn(Arc::clone(&self.driver), interval));
    }

    /// Cancels auto-advance, if running.
    pub fn pause(&mut self) {
        if let Some(mut player) = self.player.take() {
            player.cancel();
        }
    }

    /// True while an auto-advance ticker is live (it self-cancels at
    /// completion).
    pub fn is_playing(&self) -> bool {
        self.player.as_ref().is_some_and(AutoAdvance::is_active)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.pause();
    }
}
