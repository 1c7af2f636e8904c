//! Light source sweeping once around the ring every 2.6 seconds

use crate::task::{Countdown, Cycle, Task, Wake};
use crate::twinkle::Twinkle;

/// Milliseconds per position step
pub const BLINKY_TICK_MS: u8 = 10;

/// A third of the ring: lit, fading and dark for a third each
const BLINKY_BRIGHTNESS: u8 = 85;

pub struct Blinky<'a, const N: usize> {
    twinkle: &'a Twinkle<'a, N>,
    countdown: Countdown,
}

impl<'a, const N: usize> Blinky<'a, N> {
    pub const fn new(twinkle: &'a Twinkle<'a, N>) -> Self {
        Self {
            twinkle,
            countdown: Countdown::new(),
        }
    }
}

impl<const N: usize> Task for Blinky<'_, N> {
    fn cycle(&mut self, cycle: Cycle) -> Wake {
        match cycle {
            Cycle::Startup => {
                self.countdown.reset();
                self.twinkle.set_position(0);
                self.twinkle.set_brightness(BLINKY_BRIGHTNESS);
            }
            Cycle::Shutdown => self.twinkle.set_brightness(0),
            Cycle::Elapsed(ms) => {
                if self.countdown.elapse_carry(ms, BLINKY_TICK_MS) {
                    let position = self.twinkle.position();
                    self.twinkle.set_position(position.wrapping_add(1));
                }
            }
        }
        self.countdown.remaining(BLINKY_TICK_MS)
    }
}
