//! Task contract shared by the scheduler and every periodic subsystem.
//!
//! A task is called once per scheduler epoch with a [`Cycle`] and answers
//! with a [`Wake`] request. Both have a one-byte raw encoding for boards that
//! keep the classic `uint8_t task(uint8_t ms_later)` calling convention.

const RAW_STARTUP: u8 = u8::MAX;
const RAW_SHUTDOWN: u8 = 0;

/// Longest sleep the scheduler will ever request, in milliseconds.
///
/// One below the raw startup value so an elapsed time is never mistaken for
/// the startup sentinel.
pub const MAX_SLEEP_MS: u8 = RAW_STARTUP - 1;

/// Why a task is being called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    /// First call since boot. Task state is not yet initialised.
    Startup,
    /// Regular call with the milliseconds elapsed since the previous one
    /// (always within `1..=MAX_SLEEP_MS`).
    Elapsed(u8),
    /// Last call before the board halts.
    Shutdown,
}

impl Cycle {
    /// Decode the raw `ms_later` byte
    pub const fn from_raw(value: u8) -> Self {
        match value {
            RAW_STARTUP => Self::Startup,
            RAW_SHUTDOWN => Self::Shutdown,
            ms => Self::Elapsed(ms),
        }
    }

    /// Encode as the raw `ms_later` byte
    pub const fn as_raw(self) -> u8 {
        match self {
            Self::Startup => RAW_STARTUP,
            Self::Shutdown => RAW_SHUTDOWN,
            Self::Elapsed(ms) => ms,
        }
    }

    /// Build a regular cycle, clamping into the legal elapsed range
    pub fn elapsed(ms: u8) -> Self {
        Self::Elapsed(ms.clamp(1, MAX_SLEEP_MS))
    }
}

/// Wake request returned by a task.
///
/// Ordered so that the most urgent request is the smallest: the scheduler
/// aggregates an epoch by taking the minimum, which makes a single
/// [`Wake::SHUTDOWN`] win over everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Wake(u8);

impl Wake {
    /// The task is done; once every task has been asked, the board halts.
    pub const SHUTDOWN: Self = Self(RAW_SHUTDOWN);
    /// No particular urgency, call again whenever another task forces a cycle.
    pub const IDLE: Self = Self(u8::MAX);

    /// Request another call within `ms` milliseconds.
    ///
    /// Clamped into `1..=MAX_SLEEP_MS`: zero would mean shutdown and a task
    /// must always allow forward progress.
    pub fn after(ms: u8) -> Self {
        Self(ms.clamp(1, MAX_SLEEP_MS))
    }

    pub const fn from_raw(value: u8) -> Self {
        Self(value)
    }

    pub const fn as_raw(self) -> u8 {
        self.0
    }

    pub const fn is_shutdown(self) -> bool {
        self.0 == RAW_SHUTDOWN
    }

    pub const fn is_idle(self) -> bool {
        self.0 == u8::MAX
    }

    /// Milliseconds to sleep for this request
    ///
    /// [`Wake::IDLE`] sleeps for the longest period the contract allows.
    pub const fn sleep_ms(self) -> u8 {
        if self.0 > MAX_SLEEP_MS {
            MAX_SLEEP_MS
        } else {
            self.0
        }
    }
}

/// A unit of periodic work driven by the [`Scheduler`](crate::Scheduler).
///
/// Implementations must return promptly: a task that blocks stalls every
/// other task on the board.
pub trait Task {
    /// Run one step and tell the scheduler when to call again
    fn cycle(&mut self, cycle: Cycle) -> Wake;
}

/// Accumulates elapsed milliseconds until a task's own tick period is due.
///
/// Most effect tasks share this shape: add the elapsed time, act once the
/// period is reached, and ask to be woken for the remainder.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Countdown {
    waited: u8,
}

impl Countdown {
    pub(crate) const fn new() -> Self {
        Self { waited: 0 }
    }

    pub(crate) fn reset(&mut self) {
        self.waited = 0;
    }

    /// Add `ms`; returns true (and restarts) once `period` is reached
    pub(crate) fn elapse(&mut self, ms: u8, period: u8) -> bool {
        self.waited = self.waited.saturating_add(ms);
        if self.waited < period {
            return false;
        }
        self.waited = 0;
        true
    }

    /// Like [`Countdown::elapse`], but keeps any overshoot past `period`
    /// so a late call is caught up on the following ticks.
    pub(crate) fn elapse_carry(&mut self, ms: u8, period: u8) -> bool {
        self.waited = self.waited.saturating_add(ms);
        if self.waited < period {
            return false;
        }
        self.waited -= period;
        true
    }

    /// Wake request for the time left until `period`
    pub(crate) fn remaining(self, period: u8) -> Wake {
        Wake::after(period.saturating_sub(self.waited))
    }
}
