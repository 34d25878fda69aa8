//! WS2812B signal timing and its quantization onto an SPI clock.
//!
//! Every protocol bit is sent as one byte on the bus. The leading
//! `sub_bits` bits of that byte cover one protocol bit period; the high
//! part of a bit is a run of leading ones whose length approximates
//! `T0H` or `T1H` at the bus clock. Remaining bits of the byte stay low.

use embassy_time::Duration;

use crate::error::ConfigError;

/// Protocol bit rate of the WS2812B data line
pub const PROTOCOL_BIT_RATE_HZ: u32 = 800_000;

/// Length of one protocol bit
pub const BIT_PERIOD_NS: u32 = 1_250;

/// High time of a logical "0"
pub const T0H_NS: u32 = 400;

/// High time of a logical "1"
pub const T1H_NS: u32 = 800;

/// Bits per color channel
pub const BITS_PER_CHANNEL: usize = 8;

/// Color channels per pixel
pub const CHANNELS_PER_PIXEL: usize = 3;

/// Encoded bytes emitted for every protocol bit
pub const BYTES_PER_PROTOCOL_BIT: usize = 1;

/// Encoded bytes per pixel
pub const BYTES_PER_PIXEL: usize = CHANNELS_PER_PIXEL * BITS_PER_CHANNEL * BYTES_PER_PROTOCOL_BIT;

/// Bus clock giving 4 sub-bits per protocol bit
pub const DEFAULT_CLOCK_HZ: u32 = 3_200_000;

/// Lowest supported oversampling ratio
pub const MIN_SUB_BITS: u8 = 2;

/// Highest supported oversampling ratio, one encoded byte per protocol bit
pub const MAX_SUB_BITS: u8 = 8;

/// Allowed relative deviation of the clock from an exact multiple of the protocol rate
const CLOCK_TOLERANCE: f32 = 0.1;

/// Protocol minimum for the reset gap
pub const MIN_LATCH: Duration = Duration::from_micros(50);

/// Default reset gap, long enough for strips that need 280 µs
pub const DEFAULT_LATCH: Duration = Duration::from_micros(300);

/// Oversampling ratio for a bus clock
///
/// Fails when the clock is not close to an integer multiple of
/// [`PROTOCOL_BIT_RATE_HZ`] or the multiple does not fit in one byte.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn oversampling_ratio(clock_hz: u32) -> Result<u8, ConfigError> {
    let exact = clock_hz as f32 / PROTOCOL_BIT_RATE_HZ as f32;
    let ratio = libm::roundf(exact);
    if ratio < f32::from(MIN_SUB_BITS) || ratio > f32::from(MAX_SUB_BITS) {
        return Err(ConfigError::ClockOutOfRange { clock_hz });
    }
    if libm::fabsf(exact - ratio) / ratio > CLOCK_TOLERANCE {
        return Err(ConfigError::ClockNotMultiple { clock_hz });
    }
    Ok(ratio as u8)
}

/// Encoded byte for each logical protocol bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitPatterns {
    /// Pattern sent for a logical "0"
    pub zero: u8,
    /// Pattern sent for a logical "1"
    pub one: u8,
    /// Sub-bits covering one protocol bit
    pub sub_bits: u8,
}

impl BitPatterns {
    /// Patterns for the default 3.2 MHz clock
    pub const DEFAULT: Self = Self {
        zero: 0b1000_0000,
        one: 0b1110_0000,
        sub_bits: 4,
    };

    /// Quantize the protocol high times onto `clock_hz`
    pub fn for_clock(clock_hz: u32) -> Result<Self, ConfigError> {
        let sub_bits = oversampling_ratio(clock_hz)?;

        let zero_high = high_sub_bits(sub_bits, T0H_NS).clamp(1, sub_bits - 1);
        let one_high = high_sub_bits(sub_bits, T1H_NS)
            .max(zero_high + 1)
            .min(sub_bits);

        Ok(Self {
            zero: leading_ones(zero_high),
            one: leading_ones(one_high),
            sub_bits,
        })
    }

    /// Encoded byte for one protocol bit
    #[inline]
    pub const fn pattern(self, bit: bool) -> u8 {
        if bit { self.one } else { self.zero }
    }
}

impl Default for BitPatterns {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn high_sub_bits(sub_bits: u8, high_ns: u32) -> u8 {
    let exact = f32::from(sub_bits) * high_ns as f32 / BIT_PERIOD_NS as f32;
    libm::roundf(exact) as u8
}

/// Byte with `count` leading set bits
const fn leading_ones(count: u8) -> u8 {
    0xFF << (8 - count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_clock_patterns() {
        let patterns = BitPatterns::for_clock(DEFAULT_CLOCK_HZ).unwrap();
        assert_eq!(patterns, BitPatterns::DEFAULT);
    }

    #[test]
    fn test_leading_ones() {
        assert_eq!(leading_ones(1), 0x80);
        assert_eq!(leading_ones(3), 0xE0);
        assert_eq!(leading_ones(8), 0xFF);
    }

    #[test]
    fn test_ratio_tolerates_3mhz() {
        assert_eq!(oversampling_ratio(3_000_000), Ok(4));
    }

    #[test]
    fn test_ratio_rejects_out_of_range() {
        assert_eq!(
            oversampling_ratio(800_000),
            Err(ConfigError::ClockOutOfRange { clock_hz: 800_000 })
        );
        assert_eq!(
            oversampling_ratio(8_000_000),
            Err(ConfigError::ClockOutOfRange {
                clock_hz: 8_000_000
            })
        );
    }

    #[test]
    fn test_ratio_rejects_fractional_clock() {
        assert_eq!(
            oversampling_ratio(2_000_000),
            Err(ConfigError::ClockNotMultiple {
                clock_hz: 2_000_000
            })
        );
    }
}
