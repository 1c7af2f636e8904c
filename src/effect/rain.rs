//! Random channels flashing on and fading out

use crate::fade::{FadeControl, FadeSettings};
use crate::pwm::DutyTable;
use crate::random::Random;
use crate::task::{Countdown, Cycle, Task, Wake};

/// Milliseconds between raindrops
pub const RAIN_TICK_MS: u8 = 100;

/// Fade applied to every drop
pub const RAIN_FADE: FadeSettings = FadeSettings::new(0, 8, 80);

/// Highest channel a drop may hit. Boards with fewer channels simply miss
/// some drops, which thins the rain out.
const RAIN_SPREAD: u8 = 50;

pub struct Rain<'a, const N: usize> {
    duties: &'a DutyTable<N>,
    fade: &'a FadeControl,
    random: &'a Random,
    countdown: Countdown,
}

impl<'a, const N: usize> Rain<'a, N> {
    pub const fn new(duties: &'a DutyTable<N>, fade: &'a FadeControl, random: &'a Random) -> Self {
        Self {
            duties,
            fade,
            random,
            countdown: Countdown::new(),
        }
    }
}

impl<const N: usize> Task for Rain<'_, N> {
    fn cycle(&mut self, cycle: Cycle) -> Wake {
        match cycle {
            Cycle::Startup => {
                self.countdown.reset();
                self.fade.apply(RAIN_FADE);
            }
            Cycle::Shutdown => {}
            Cycle::Elapsed(ms) => {
                if self.countdown.elapse(ms, RAIN_TICK_MS) {
                    self.duties.set(self.random.get(RAIN_SPREAD), u8::MAX);
                }
            }
        }
        self.countdown.remaining(RAIN_TICK_MS)
    }
}
