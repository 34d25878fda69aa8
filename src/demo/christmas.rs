//! Random green, red and blue twinkle

use embedded_hal::delay::DelayNs;

use super::{DemoOutcome, Pacer, clear, pause_or_interrupt};
use crate::{
    PixelStrip,
    color::{BLUE, GREEN, RED, Rgb},
};

const DEFAULT_ROUNDS: u32 = 10;
const DEFAULT_INTERVAL_MS: u32 = 3_000;

/// Percent of pixels drawn green
const GREEN_SHARE: u32 = 80;
/// Percent of pixels drawn red, blue takes the rest
const RED_SHARE: u32 = 15;

/// Small xorshift generator, good enough for picking colors
#[derive(Debug, Clone)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    pub const DEFAULT_SEED: u32 = 0x2545_F491;

    /// Zero is not a valid state and is replaced by [`Self::DEFAULT_SEED`]
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { Self::DEFAULT_SEED } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Value in `0..100`
    pub fn percent(&mut self) -> u32 {
        self.next_u32() % 100
    }
}

/// Map a `0..100` roll onto the palette
pub const fn pick_color(roll: u32) -> Rgb {
    if roll < GREEN_SHARE {
        GREEN
    } else if roll < GREEN_SHARE + RED_SHARE {
        RED
    } else {
        BLUE
    }
}

/// Redraws every pixel in a random tree color at a fixed interval
#[derive(Debug, Clone)]
pub struct Christmas {
    rng: XorShift32,
    rounds: u32,
    interval_ms: u32,
}

impl Christmas {
    pub const fn new(seed: u32) -> Self {
        Self {
            rng: XorShift32::new(seed),
            rounds: DEFAULT_ROUNDS,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }

    #[must_use]
    pub const fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    #[must_use]
    pub const fn with_interval_ms(mut self, interval_ms: u32) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn run<S, D>(mut self, strip: &mut S, pacer: &mut Pacer<'_, D>) -> Result<DemoOutcome, S::Error>
    where
        S: PixelStrip,
        D: DelayNs,
    {
        for _ in 0..self.rounds {
            for index in 0..strip.pixel_count() {
                strip.set_pixel(index, pick_color(self.rng.percent()))?;
            }
            strip.show()?;
            pause_or_interrupt!(pacer, self.interval_ms);
        }
        clear(strip)?;
        Ok(DemoOutcome::Completed)
    }
}
