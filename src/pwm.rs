//! Software pulse width modulation.
//!
//! [`DutyTable`] holds one duty factor per physical channel and is shared by
//! reference with everything that changes brightness. [`PwmTask`] is the only
//! place duties become pin levels: it splits a [`PWM_CYCLE_MS`] cycle into
//! millisecond ticks and switches each output on while its duty is above the
//! tick's threshold.

use core::cell::Cell;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::DigitalOutput;
use crate::task::{Cycle, Task, Wake};

/// Length of one PWM cycle in milliseconds (~62 Hz).
///
/// A power of two so the tick to threshold scaling reduces to a shift.
pub const PWM_CYCLE_MS: u8 = 16;

/// Duty factors for `N` channels, `0` = always off, `255` = always on.
///
/// Channels are addressed by `u8` index. Indices past `N` are accepted:
/// writes are ignored and reads return `0`, so effect code may address
/// channels a particular board does not have.
#[derive(Debug)]
pub struct DutyTable<const N: usize> {
    duty: [Cell<u8>; N],
}

impl<const N: usize> DutyTable<N> {
    /// All channels off
    pub const fn new() -> Self {
        Self {
            duty: [const { Cell::new(0) }; N],
        }
    }

    /// Set the duty factor of `channel`
    pub fn set(&self, channel: u8, duty: u8) {
        if let Some(slot) = self.duty.get(usize::from(channel)) {
            slot.set(duty);
        }
    }

    /// Duty factor of `channel`, `0` for a channel that does not exist
    pub fn get(&self, channel: u8) -> u8 {
        self.duty.get(usize::from(channel)).map_or(0, Cell::get)
    }

    /// Number of physical channels
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.duty.iter().map(Cell::get)
    }
}

impl<const N: usize> Default for DutyTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Duty threshold of a tick within the cycle
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn tick_threshold(tick: u8) -> u8 {
    ((256 * tick as u16) / PWM_CYCLE_MS as u16) as u8
}

/// First tick at which an output with `duty` is switched off.
///
/// `PWM_CYCLE_MS` for duty `255`, which never switches off.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn switch_off_tick(duty: u8) -> u8 {
    ((PWM_CYCLE_MS as u16 * (duty as u16 + 1)) / 256) as u8
}

/// Periodic task driving `N` outputs from a [`DutyTable`]
///
/// Output `i` shows channel `i`. The task sleeps until the next tick where
/// some output has to change, so a board with all channels fully on or off
/// wakes once per cycle.
pub struct PwmTask<'a, O: DigitalOutput, const N: usize> {
    duties: &'a DutyTable<N>,
    outputs: [O; N],
    tick: u8,
}

impl<'a, O: DigitalOutput, const N: usize> PwmTask<'a, O, N> {
    pub const fn new(duties: &'a DutyTable<N>, outputs: [O; N]) -> Self {
        Self {
            duties,
            outputs,
            tick: 0,
        }
    }

    /// Current tick within the cycle
    pub const fn tick(&self) -> u8 {
        self.tick
    }

    pub fn outputs(&self) -> &[O; N] {
        &self.outputs
    }

    /// Give the output pins back
    pub fn into_outputs(self) -> [O; N] {
        self.outputs
    }

    /// Advance the cycle by `ms`, update every output and return the wake
    /// request for the next transition.
    fn switch(&mut self, ms: u8) -> Wake {
        // 256 is a multiple of the cycle, so wrapping before the modulo is exact
        self.tick = self.tick.wrapping_add(ms) % PWM_CYCLE_MS;
        let threshold = tick_threshold(self.tick);

        let mut next_duty = u8::MAX;
        for (output, duty) in self.outputs.iter_mut().zip(self.duties.iter()) {
            if duty > threshold {
                output.set_high();
                next_duty = next_duty.min(duty);
            } else {
                output.set_low();
            }
        }

        let next_tick = switch_off_tick(next_duty);
        if next_tick <= self.tick {
            Wake::after(1)
        } else {
            Wake::after(next_tick - self.tick)
        }
    }
}

impl<O: DigitalOutput, const N: usize> Task for PwmTask<'_, O, N> {
    fn cycle(&mut self, cycle: Cycle) -> Wake {
        match cycle {
            Cycle::Startup => {
                // First elapsed millisecond lands on tick 0
                self.tick = u8::MAX;
                for output in &mut self.outputs {
                    output.configure_output();
                }
                #[cfg(feature = "esp32-log")]
                println!("[PwmTask.cycle] {} outputs enabled", N);
                Wake::after(1)
            }
            Cycle::Shutdown => {
                for output in &mut self.outputs {
                    output.release();
                }
                #[cfg(feature = "esp32-log")]
                println!("[PwmTask.cycle] {} outputs released", N);
                Wake::after(1)
            }
            Cycle::Elapsed(ms) => self.switch(ms),
        }
    }
}
