//! Narrow light bouncing between two endstops, like a scanner bar.
//!
//! Direction is encoded in the position's parity: even positions move
//! right, odd positions move left. Hitting an endstop flips the parity.

use crate::task::{Countdown, Cycle, Task, Wake};
use crate::twinkle::Twinkle;

/// Milliseconds per step (~1 s per sweep)
pub const SCAN_TICK_MS: u8 = 8;

/// Distance of both endstops from the ring's ends. Must be even.
pub const SCAN_ENDSTOP: u8 = 30;

const SCAN_BRIGHTNESS: u8 = 40;
const SCAN_STEP: u8 = 2;

const _: () = assert!(SCAN_ENDSTOP % 2 == 0, "SCAN_ENDSTOP must be even");

/// Next position of the scanning light
pub const fn scan_step(position: u8) -> u8 {
    if position < SCAN_ENDSTOP {
        // Left endstop, head right
        SCAN_ENDSTOP
    } else if position > u8::MAX - SCAN_ENDSTOP {
        // Right endstop, head left (odd)
        u8::MAX - SCAN_ENDSTOP
    } else if position % 2 == 0 {
        position + SCAN_STEP
    } else {
        position - SCAN_STEP
    }
}

pub struct Scan<'a, const N: usize> {
    twinkle: &'a Twinkle<'a, N>,
    countdown: Countdown,
}

impl<'a, const N: usize> Scan<'a, N> {
    pub const fn new(twinkle: &'a Twinkle<'a, N>) -> Self {
        Self {
            twinkle,
            countdown: Countdown::new(),
        }
    }
}

impl<const N: usize> Task for Scan<'_, N> {
    fn cycle(&mut self, cycle: Cycle) -> Wake {
        match cycle {
            Cycle::Startup => {
                self.countdown.reset();
                self.twinkle.set_position(0);
                self.twinkle.set_brightness(SCAN_BRIGHTNESS);
            }
            Cycle::Shutdown => self.twinkle.set_brightness(0),
            Cycle::Elapsed(ms) => {
                if self.countdown.elapse_carry(ms, SCAN_TICK_MS) {
                    self.twinkle.set_position(scan_step(self.twinkle.position()));
                }
            }
        }
        self.countdown.remaining(SCAN_TICK_MS)
    }
}
