//! Virtual light source moving around a ring of LEDs.
//!
//! Channels and the light share a ring of 256 positions. The light's
//! brightness doubles as its radius: channels within half of it are fully
//! on, channels further than all of it are off, and the band in between
//! ramps linearly.

use core::cell::Cell;

use crate::pwm::DutyTable;

/// A channel placed on the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwinkleLight {
    pub channel: u8,
    pub position: u8,
}

impl TwinkleLight {
    pub const fn new(channel: u8, position: u8) -> Self {
        Self { channel, position }
    }
}

/// Shorter arc between two ring positions.
///
/// The far half is folded back with a complement rather than a negation,
/// so the result is in `0..=127`.
#[inline]
pub const fn ring_distance(a: u8, b: u8) -> u8 {
    let distance = a.wrapping_sub(b);
    if distance & 0x80 != 0 {
        !distance
    } else {
        distance
    }
}

/// Duty of a channel `distance` away from a light of `brightness`
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn light_duty(distance: u8, brightness: u8) -> u8 {
    let distance = distance as u16;
    let brightness = brightness as u16;
    if distance >= brightness {
        0
    } else if distance * 2 < brightness {
        u8::MAX
    } else {
        // In the outer half: 2 * (distance - brightness / 2) < brightness
        let falloff = (256 * 2 * (distance - brightness / 2)) / brightness;
        (255 - falloff) as u8
    }
}

/// Light source mapped onto a set of PWM channels
///
/// Not a task: every setter immediately rewrites the duty of each
/// configured channel.
#[derive(Debug)]
pub struct Twinkle<'a, const N: usize> {
    duties: &'a DutyTable<N>,
    lights: &'a [TwinkleLight],
    position: Cell<u8>,
    brightness: Cell<u8>,
}

impl<'a, const N: usize> Twinkle<'a, N> {
    /// Light at position `0` with brightness `0`. Duties are left untouched
    /// until the first setter call.
    pub const fn new(duties: &'a DutyTable<N>, lights: &'a [TwinkleLight]) -> Self {
        Self {
            duties,
            lights,
            position: Cell::new(0),
            brightness: Cell::new(0),
        }
    }

    /// Move the light source, wrapping around 255 to 0
    pub fn set_position(&self, position: u8) {
        self.position.set(position);
        self.refresh();
    }

    pub fn position(&self) -> u8 {
        self.position.get()
    }

    /// Set brightness: `0` turns every light off, `255` turns every light on
    pub fn set_brightness(&self, brightness: u8) {
        self.brightness.set(brightness);
        self.refresh();
    }

    pub fn brightness(&self) -> u8 {
        self.brightness.get()
    }

    fn refresh(&self) {
        let position = self.position.get();
        let brightness = self.brightness.get();
        for light in self.lights {
            let distance = ring_distance(position, light.position);
            self.duties
                .set(light.channel, light_duty(distance, brightness));
        }
    }
}
