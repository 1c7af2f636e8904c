//! Cooperative run-to-completion scheduler.
//!
//! Tasks are registered once, in a fixed order, by the board's composition
//! root. Every epoch calls each of them with the same elapsed time and sleeps
//! for the most urgent wake request.

use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::idle::Idle;
use crate::task::{Cycle, Task, Wake};

/// Error returned when registering more tasks than the scheduler can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryFull;

/// Fixed-capacity task registry and main loop
///
/// `MAX_TASKS` is the registry capacity. Tasks are borrowed for the
/// scheduler's lifetime and called in registration order every epoch.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler: Scheduler<'_, 4> = Scheduler::new();
/// scheduler.register(&mut pwm_task)?;
/// scheduler.register(&mut fade_task)?;
/// scheduler.register(&mut blinky)?;
///
/// // Returns once a task requests shutdown
/// scheduler.run(&mut idle);
/// ```
pub struct Scheduler<'a, const MAX_TASKS: usize> {
    tasks: Vec<&'a mut dyn Task, MAX_TASKS>,
}

impl<'a, const MAX_TASKS: usize> Scheduler<'a, MAX_TASKS> {
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Append a task to the end of the epoch order
    pub fn register(&mut self, task: &'a mut dyn Task) -> Result<(), RegistryFull> {
        self.tasks.push(task).map_err(|_| RegistryFull)
    }

    /// Number of registered tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run one epoch: call every task with `cycle` and collate the soonest
    /// wake request.
    ///
    /// Every task is called even when an earlier one already asked for
    /// shutdown. An empty registry reports [`Wake::IDLE`].
    pub fn cycle_all(&mut self, cycle: Cycle) -> Wake {
        self.tasks
            .iter_mut()
            .map(|task| task.cycle(cycle))
            .fold(Wake::IDLE, Ord::min)
    }

    /// Start every task, drive epochs until one requests shutdown, then
    /// shut every task down.
    ///
    /// Each task sees [`Cycle::Startup`] and [`Cycle::Shutdown`] exactly
    /// once. Between epochs `idle` sleeps for the aggregated request and the
    /// time it reports becomes the next epoch's elapsed time.
    pub fn run<I: Idle + ?Sized>(mut self, idle: &mut I) {
        #[cfg(feature = "esp32-log")]
        println!("[Scheduler.run] starting {} tasks", self.tasks.len());

        let mut wake = self.cycle_all(Cycle::Startup);
        while !wake.is_shutdown() {
            let elapsed = idle.sleep(wake.sleep_ms());
            wake = self.cycle_all(Cycle::elapsed(elapsed));
        }

        #[cfg(feature = "esp32-log")]
        println!("[Scheduler.run] shutdown requested");

        let _ = self.cycle_all(Cycle::Shutdown);
    }
}

impl<const MAX_TASKS: usize> Default for Scheduler<'_, MAX_TASKS> {
    fn default() -> Self {
        Self::new()
    }
}
