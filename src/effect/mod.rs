//! Effect programs built on the fade, twinkle and random subsystems
//!
//! Each effect is an ordinary [`Task`]. Boards that choose the effect at
//! startup (from a jumper or a stored byte) can use [`EffectSlot`] to hold
//! any of them without trait objects.

mod blinky;
mod drip;
mod rain;
mod scan;

pub use blinky::{BLINKY_TICK_MS, Blinky};
pub use drip::{DRIP_FADE, DRIP_TICK_MS, Drip};
pub use rain::{RAIN_FADE, RAIN_TICK_MS, Rain};
pub use scan::{SCAN_ENDSTOP, SCAN_TICK_MS, Scan, scan_step};

use crate::fade::FadeControl;
use crate::pwm::DutyTable;
use crate::random::Random;
use crate::task::{Cycle, Task, Wake};
use crate::twinkle::Twinkle;

const EFFECT_NAME_BLINKY: &str = "blinky";
const EFFECT_NAME_SCAN: &str = "scan";
const EFFECT_NAME_DRIP: &str = "drip";
const EFFECT_NAME_RAIN: &str = "rain";

const EFFECT_ID_BLINKY: u8 = 0;
const EFFECT_ID_SCAN: u8 = 1;
const EFFECT_ID_DRIP: u8 = 2;
const EFFECT_ID_RAIN: u8 = 3;

/// Known effect ids that can be selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectId {
    Blinky = EFFECT_ID_BLINKY,
    Scan = EFFECT_ID_SCAN,
    Drip = EFFECT_ID_DRIP,
    Rain = EFFECT_ID_RAIN,
}

impl EffectId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_BLINKY => Self::Blinky,
            EFFECT_ID_SCAN => Self::Scan,
            EFFECT_ID_DRIP => Self::Drip,
            EFFECT_ID_RAIN => Self::Rain,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blinky => EFFECT_NAME_BLINKY,
            Self::Scan => EFFECT_NAME_SCAN,
            Self::Drip => EFFECT_NAME_DRIP,
            Self::Rain => EFFECT_NAME_RAIN,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_BLINKY => Some(Self::Blinky),
            EFFECT_NAME_SCAN => Some(Self::Scan),
            EFFECT_NAME_DRIP => Some(Self::Drip),
            EFFECT_NAME_RAIN => Some(Self::Rain),
            _ => None,
        }
    }

    /// Build the effect on top of the board's shared subsystems
    pub fn to_slot<'a, const N: usize>(self, board: &EffectContext<'a, N>) -> EffectSlot<'a, N> {
        match self {
            Self::Blinky => EffectSlot::Blinky(Blinky::new(board.twinkle)),
            Self::Scan => EffectSlot::Scan(Scan::new(board.twinkle)),
            Self::Drip => EffectSlot::Drip(Drip::new(
                board.duties,
                board.fade,
                board.random,
                board.drip_channels,
            )),
            Self::Rain => EffectSlot::Rain(Rain::new(board.duties, board.fade, board.random)),
        }
    }
}

/// Shared subsystems an effect may drive
#[derive(Clone, Copy)]
pub struct EffectContext<'a, const N: usize> {
    pub duties: &'a DutyTable<N>,
    pub fade: &'a FadeControl,
    pub twinkle: &'a Twinkle<'a, N>,
    pub random: &'a Random,
    /// Path followed by drops, usually the fade group
    pub drip_channels: &'a [u8],
}

/// Effect slot - enum containing all possible effects
pub enum EffectSlot<'a, const N: usize> {
    Blinky(Blinky<'a, N>),
    Scan(Scan<'a, N>),
    Drip(Drip<'a, N>),
    Rain(Rain<'a, N>),
}

impl<const N: usize> EffectSlot<'_, N> {
    /// Get the effect ID for external observation
    pub const fn id(&self) -> EffectId {
        match self {
            Self::Blinky(_) => EffectId::Blinky,
            Self::Scan(_) => EffectId::Scan,
            Self::Drip(_) => EffectId::Drip,
            Self::Rain(_) => EffectId::Rain,
        }
    }
}

impl<const N: usize> Task for EffectSlot<'_, N> {
    fn cycle(&mut self, cycle: Cycle) -> Wake {
        match self {
            Self::Blinky(effect) => effect.cycle(cycle),
            Self::Scan(effect) => effect.cycle(cycle),
            Self::Drip(effect) => effect.cycle(cycle),
            Self::Rain(effect) => effect.cycle(cycle),
        }
    }
}
