//! Auto-advance: a cancelable scheduled-task handle.
//!
//! Issues step requests at a fixed interval on a background thread. The
//! handle stops on [`cancel`], drops, or by itself once the driver reaches
//! [`DriverState::Completed`]. Steps go through the session's shared
//! driver lock, so an auto-advance tick can never overlap a manual step.
//!
//! [`cancel`]: AutoAdvance::cancel

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use crate::core::driver::{CycleDriver, DriverState};

/// Handle to a running auto-advance task.
#[derive(Debug)]
pub(crate) struct AutoAdvance {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl AutoAdvance {
    /// Spawns the ticker thread over the session's shared driver.
    pub(crate) fn spawn(driver: Arc<Mutex<CycleDriver>>, interval: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            loop {
                thread::sleep(interval);
                if stop_flag.load(Ordering::SeqCst) {
                    break;
                }
                let Ok(mut driver) = driver.lock() else {
                    break;
                };
                if driver.state() == DriverState::Completed {
                    debug!("auto-advance self-canceling at completion");
                    break;
                }
                let _ = driver.step();
            }
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Requests the ticker to stop and waits for it to exit.
    pub(crate) fn cancel(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// True while the ticker thread is alive.
    pub(crate) fn is_active(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for AutoAdvance {
    fn drop(&mut self) {
        self.cancel();
    }
}
