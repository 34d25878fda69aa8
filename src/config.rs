use embassy_time::Duration;
use embedded_hal::spi::{MODE_0, Mode, Polarity};

use crate::{
    color::ColorOrder,
    error::ConfigError,
    timing::{BitPatterns, DEFAULT_CLOCK_HZ, DEFAULT_LATCH, MIN_LATCH},
};

/// Bus settings fixed for the lifetime of a strip
///
/// Changing any of them requires building a new strip. Transports that
/// open the bus themselves apply `bus`, `chip_select`, `clock_hz` and
/// `mode`; with [`SpiTransport`](crate::SpiTransport) the HAL bus must
/// already run at `clock_hz` in `mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusConfig {
    /// Bus number, e.g. 0 for `/dev/spidev0.x`
    pub bus: u8,
    /// Chip select line on the bus
    pub chip_select: u8,
    /// SPI clock
    pub clock_hz: u32,
    /// Clock polarity and phase, only idle-low modes are accepted
    pub mode: Mode,
    /// Channel order expected by the strip
    pub color_order: ColorOrder,
    /// Reset gap enforced between frames
    pub latch: Duration,
    /// Global brightness scale (255 = unscaled)
    pub brightness: u8,
}

impl BusConfig {
    pub const DEFAULT: Self = Self {
        bus: 0,
        chip_select: 0,
        clock_hz: DEFAULT_CLOCK_HZ,
        mode: MODE_0,
        color_order: ColorOrder::Grb,
        latch: DEFAULT_LATCH,
        brightness: 255,
    };

    #[must_use]
    pub const fn with_bus(mut self, bus: u8, chip_select: u8) -> Self {
        self.bus = bus;
        self.chip_select = chip_select;
        self
    }

    #[must_use]
    pub const fn with_clock_hz(mut self, clock_hz: u32) -> Self {
        self.clock_hz = clock_hz;
        self
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn with_color_order(mut self, color_order: ColorOrder) -> Self {
        self.color_order = color_order;
        self
    }

    #[must_use]
    pub const fn with_latch(mut self, latch: Duration) -> Self {
        self.latch = latch;
        self
    }

    #[must_use]
    pub const fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    /// Check the mode and timing fields and derive the bit patterns
    pub fn validate(&self) -> Result<BitPatterns, ConfigError> {
        if self.mode.polarity == Polarity::IdleHigh {
            return Err(ConfigError::UnsupportedMode);
        }
        if self.latch < MIN_LATCH {
            return Err(ConfigError::LatchTooShort {
                micros: self.latch.as_micros(),
            });
        }
        BitPatterns::for_clock(self.clock_hz)
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
