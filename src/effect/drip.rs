//! Drops running down a list of channels and fading away behind them

use crate::fade::{FadeControl, FadeSettings};
use crate::pwm::DutyTable;
use crate::random::Random;
use crate::task::{Countdown, Cycle, Task, Wake};

/// Milliseconds between drop movements
pub const DRIP_TICK_MS: u8 = 100;

/// Fade left behind by a drop
pub const DRIP_FADE: FadeSettings = FadeSettings::new(0, 16, 100);

/// A new drop starts with probability `1 / (DRIP_CHANCE + 1)` per tick
const DRIP_CHANCE: u8 = 20;

pub struct Drip<'a, const N: usize> {
    duties: &'a DutyTable<N>,
    fade: &'a FadeControl,
    random: &'a Random,
    channels: &'a [u8],
    countdown: Countdown,
    /// Index into `channels` of the next channel to light, `None` between drops
    drop: Option<usize>,
}

impl<'a, const N: usize> Drip<'a, N> {
    /// `channels` is the path of a drop, usually the fade group
    pub const fn new(
        duties: &'a DutyTable<N>,
        fade: &'a FadeControl,
        random: &'a Random,
        channels: &'a [u8],
    ) -> Self {
        Self {
            duties,
            fade,
            random,
            channels,
            countdown: Countdown::new(),
            drop: None,
        }
    }

    /// True while a drop is running down the channels
    pub const fn is_dripping(&self) -> bool {
        self.drop.is_some()
    }

    fn advance(&mut self) {
        match self.drop {
            None => {
                if self.random.get(DRIP_CHANCE) == 0 {
                    self.drop = Some(0);
                }
            }
            Some(index) => {
                if let Some(&channel) = self.channels.get(index) {
                    self.duties.set(channel, u8::MAX);
                }
                let next = index + 1;
                self.drop = (next < self.channels.len()).then_some(next);
            }
        }
    }
}

impl<const N: usize> Task for Drip<'_, N> {
    fn cycle(&mut self, cycle: Cycle) -> Wake {
        match cycle {
            Cycle::Startup => {
                self.countdown.reset();
                self.drop = None;
                self.fade.apply(DRIP_FADE);
            }
            Cycle::Shutdown => {}
            Cycle::Elapsed(ms) => {
                if self.countdown.elapse(ms, DRIP_TICK_MS) {
                    self.advance();
                }
            }
        }
        self.countdown.remaining(DRIP_TICK_MS)
    }
}
