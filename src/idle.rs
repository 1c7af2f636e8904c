//! Sleep sources for the scheduler's main loop.
//!
//! The scheduler only needs to be told how long it actually slept. Boards
//! with a millisecond timer interrupt use [`TickIdle`] over a shared
//! [`TickCounter`]; anything with an `embassy-time` driver can use
//! [`BlockingIdle`].

use core::cell::Cell;

use critical_section::Mutex;
use embassy_time::{Duration, Instant, block_for};

/// Waits between scheduler epochs
pub trait Idle {
    /// Sleep for roughly `ms` milliseconds.
    ///
    /// Returns the milliseconds that really elapsed since the previous call
    /// returned, which may be more than requested.
    fn sleep(&mut self, ms: u8) -> u8;
}

/// Millisecond counter advanced from the timer interrupt.
///
/// This is the only state shared with interrupt context, so it is the only
/// state guarded by a critical section.
///
/// ```ignore
/// static TICKS: TickCounter = TickCounter::new();
///
/// #[interrupt]
/// fn TIMER0_COMPA() {
///     TICKS.tick();
/// }
/// ```
pub struct TickCounter {
    ms: Mutex<Cell<u8>>,
}

impl TickCounter {
    pub const fn new() -> Self {
        Self {
            ms: Mutex::new(Cell::new(0)),
        }
    }

    /// Count one elapsed millisecond. Saturates instead of wrapping.
    pub fn tick(&self) {
        critical_section::with(|cs| {
            let ms = self.ms.borrow(cs);
            ms.set(ms.get().saturating_add(1));
        });
    }

    /// Milliseconds counted since the last [`TickCounter::take`]
    pub fn peek(&self) -> u8 {
        critical_section::with(|cs| self.ms.borrow(cs).get())
    }

    /// Return the counted milliseconds and restart from zero
    pub fn take(&self) -> u8 {
        critical_section::with(|cs| self.ms.borrow(cs).replace(0))
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Low-power sleep driven by a [`TickCounter`]
///
/// `wait_for_interrupt` puts the core to sleep until the next interrupt
/// (`cortex_m::asm::wfi`, `sleep_cpu`, ...). Time spent running tasks is
/// already on the counter, so the next sleep is shortened accordingly.
pub struct TickIdle<'a, F: FnMut()> {
    ticks: &'a TickCounter,
    wait_for_interrupt: F,
}

impl<'a, F: FnMut()> TickIdle<'a, F> {
    pub const fn new(ticks: &'a TickCounter, wait_for_interrupt: F) -> Self {
        Self {
            ticks,
            wait_for_interrupt,
        }
    }
}

impl<F: FnMut()> Idle for TickIdle<'_, F> {
    fn sleep(&mut self, ms: u8) -> u8 {
        while self.ticks.peek() < ms {
            (self.wait_for_interrupt)();
        }
        self.ticks.take()
    }
}

/// Busy-waiting sleep on top of the `embassy-time` driver
#[derive(Debug, Clone, Copy)]
pub struct BlockingIdle {
    last: Instant,
}

impl BlockingIdle {
    /// Start measuring from now
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for BlockingIdle {
    fn default() -> Self {
        Self::new()
    }
}

impl Idle for BlockingIdle {
    fn sleep(&mut self, ms: u8) -> u8 {
        let deadline = self.last + Duration::from_millis(u64::from(ms));
        let now = Instant::now();
        if deadline > now {
            block_for(deadline.duration_since(now));
        }

        let now = Instant::now();
        let elapsed = now.duration_since(self.last).as_millis();
        self.last = now;
        u8::try_from(elapsed).unwrap_or(u8::MAX)
    }
}
