//! Pseudo-random bytes from a 32-bit Galois LFSR.
//!
//! Not suitable for anything security related.
//!
//! The register runs over the primitive polynomial
//! `x^32 + x^28 + x^19 + x^18 + x^16 + x^14 + x^11 + x^10 + x^9 + x^6 + x^5 + x + 1`,
//! so it cycles through every non-zero state (period `2^32 - 1`). The taps
//! are spread over all four bytes, which spreads injected entropy quickly.

use core::cell::Cell;

/// Feedback taps, one byte per register byte: `0x10`, `0x0D`, `0x4E`, `0x63`
const FEEDBACK: u32 = 0x100D_4E63;

const TOP_BIT: u32 = 0x8000_0000;

/// Pumps after entropy injection before the register is used again
const DIFFUSION_PUMPS: usize = 8;

/// Bounded random byte generator
///
/// The register is never zero, where it would stay forever, and can only be
/// perturbed with [`Random::add_entropy`], never set.
#[derive(Debug)]
pub struct Random {
    lfsr: Cell<u32>,
}

impl Random {
    pub const fn new() -> Self {
        Self {
            lfsr: Cell::new(TOP_BIT),
        }
    }

    /// Current register contents
    pub fn state(&self) -> u32 {
        self.lfsr.get()
    }

    /// Shift the register one step
    pub fn pump(&self) {
        let lfsr = self.lfsr.get();
        let shifted = lfsr << 1;
        self.lfsr.set(if lfsr & TOP_BIT != 0 {
            shifted ^ FEEDBACK
        } else {
            shifted
        });
    }

    /// Mix up to 8 bits of entropy into the register
    ///
    /// The seed is added to the existing state rather than replacing it, so
    /// seeding twice with the same byte does not repeat a sequence.
    pub fn add_entropy(&self, seed: u8) {
        let mut lfsr = self.lfsr.get() ^ u32::from_ne_bytes([seed; 4]);
        if lfsr == 0 {
            lfsr = TOP_BIT;
        }
        self.lfsr.set(lfsr);

        for _ in 0..DIFFUSION_PUMPS {
            self.pump();
        }
    }

    /// Random number in `0..=maximum`
    ///
    /// Draws the fewest top bits that can hold `maximum` and rejects values
    /// past it, which keeps the distribution flat. On average this takes
    /// fewer than two pumps. `get(0)` still pumps once and returns `0`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn get(&self, maximum: u8) -> u8 {
        let mask = u8::MAX.checked_shr(maximum.leading_zeros()).unwrap_or(0);
        loop {
            self.pump();
            let value = (self.lfsr.get() >> 24) as u8 & mask;
            if value <= maximum {
                return value;
            }
        }
    }

    #[cfg(test)]
    const fn with_state(lfsr: u32) -> Self {
        Self {
            lfsr: Cell::new(lfsr),
        }
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}
