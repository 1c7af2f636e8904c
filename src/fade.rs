//! Coordinated linear fading of a group of PWM channels.
//!
//! Effects steer the fade through a shared [`FadeControl`]; the
//! [`FadeTask`] periodically moves every channel of its group one step
//! toward the common target.

use core::cell::Cell;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::pwm::DutyTable;
use crate::task::{Countdown, Cycle, Task, Wake};

/// Fade parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeSettings {
    /// Duty every channel of the group converges to
    pub target: u8,
    /// Maximum duty change per step, `0` pauses the fade
    pub rate: u8,
    /// Milliseconds between steps, `0` applies the target immediately
    pub period_ms: u8,
}

impl FadeSettings {
    pub const fn new(target: u8, rate: u8, period_ms: u8) -> Self {
        Self {
            target,
            rate,
            period_ms,
        }
    }
}

impl Default for FadeSettings {
    /// Everything off, snapped immediately
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

/// Move `previous` up to `rate` toward `target` without overshooting
#[inline]
pub const fn adjust_linear(previous: u8, target: u8, rate: u8) -> u8 {
    if previous == target {
        target
    } else if previous > target {
        if previous - target > rate {
            previous - rate
        } else {
            target
        }
    } else if target - previous > rate {
        previous + rate
    } else {
        target
    }
}

/// Shared fade parameters
///
/// Setters take effect at the fade task's next step. A fade task that has
/// gone idle is not woken by them; it resumes when another task forces an
/// epoch.
#[derive(Debug)]
pub struct FadeControl {
    target: Cell<u8>,
    rate: Cell<u8>,
    period_ms: Cell<u8>,
}

impl FadeControl {
    pub const fn new(settings: FadeSettings) -> Self {
        Self {
            target: Cell::new(settings.target),
            rate: Cell::new(settings.rate),
            period_ms: Cell::new(settings.period_ms),
        }
    }

    /// Set the target brightness
    pub fn set_target(&self, target: u8) {
        #[cfg(feature = "esp32-log")]
        println!("[FadeControl.set_target] {:?} -> {:?}", self.target.get(), target);
        self.target.set(target);
    }

    /// Set the maximum duty change per step, `0` pauses
    pub fn set_rate(&self, rate: u8) {
        self.rate.set(rate);
    }

    /// Set milliseconds between steps, `0` snaps to the target ignoring rate
    pub fn set_period(&self, period_ms: u8) {
        self.period_ms.set(period_ms);
    }

    /// Replace all parameters at once
    pub fn apply(&self, settings: FadeSettings) {
        self.set_target(settings.target);
        self.set_rate(settings.rate);
        self.set_period(settings.period_ms);
    }

    pub fn settings(&self) -> FadeSettings {
        FadeSettings {
            target: self.target.get(),
            rate: self.rate.get(),
            period_ms: self.period_ms.get(),
        }
    }

    /// One step of `previous` toward the current target
    pub fn adjust(&self, previous: u8) -> u8 {
        adjust_linear(previous, self.target.get(), self.rate.get())
    }
}

impl Default for FadeControl {
    fn default() -> Self {
        Self::new(FadeSettings::default())
    }
}

/// Periodic task fading a fixed group of channels in lockstep
pub struct FadeTask<'a, const N: usize> {
    control: &'a FadeControl,
    duties: &'a DutyTable<N>,
    channels: &'a [u8],
    countdown: Countdown,
}

impl<'a, const N: usize> FadeTask<'a, N> {
    /// `channels` is the group moved by this task
    pub const fn new(control: &'a FadeControl, duties: &'a DutyTable<N>, channels: &'a [u8]) -> Self {
        Self {
            control,
            duties,
            channels,
            countdown: Countdown::new(),
        }
    }

    /// Step every channel; true if any of them moved
    fn step(&self) -> bool {
        let mut moved = false;
        for &channel in self.channels {
            let previous = self.duties.get(channel);
            let next = self.control.adjust(previous);
            if next != previous {
                moved = true;
                self.duties.set(channel, next);
            }
        }
        moved
    }

    fn snap(&self) {
        let target = self.control.target.get();
        for &channel in self.channels {
            self.duties.set(channel, target);
        }
    }
}

impl<const N: usize> Task for FadeTask<'_, N> {
    fn cycle(&mut self, cycle: Cycle) -> Wake {
        match cycle {
            Cycle::Startup => {
                self.countdown.reset();
                Wake::after(1)
            }
            Cycle::Shutdown => Wake::after(1),
            Cycle::Elapsed(ms) => {
                let period = self.control.period_ms.get();
                if period == 0 {
                    self.snap();
                    self.countdown.reset();
                    return Wake::IDLE;
                }

                if !self.countdown.elapse(ms, period) {
                    return self.countdown.remaining(period);
                }

                if self.step() {
                    Wake::after(period)
                } else {
                    Wake::IDLE
                }
            }
        }
    }
}
