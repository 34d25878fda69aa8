use core::fmt::{self, Display};

use embedded_hal::spi::ErrorKind;

/// Invalid strip or bus configuration, detected at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A strip needs at least one pixel
    ZeroPixels,
    /// Pixel count exceeds the compile-time capacity
    TooManyPixels { pixel_count: usize, capacity: usize },
    /// Encoded frame buffer cannot hold a full frame
    FrameBufferTooSmall { required: usize, capacity: usize },
    /// Clock gives less than 2 or more than 8 sub-bits per protocol bit
    ClockOutOfRange { clock_hz: u32 },
    /// Clock is too far from an integer multiple of the protocol bit rate
    ClockNotMultiple { clock_hz: u32 },
    /// Reset gap shorter than the protocol minimum
    LatchTooShort { micros: u64 },
    /// SPI mode idles the clock high, the strip needs MOSI to rest low
    UnsupportedMode,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPixels => write!(f, "pixel count must be at least 1"),
            Self::TooManyPixels {
                pixel_count,
                capacity,
            } => write!(f, "{pixel_count} pixels exceed capacity of {capacity}"),
            Self::FrameBufferTooSmall { required, capacity } => write!(
                f,
                "frame buffer holds {capacity} bytes, {required} required"
            ),
            Self::ClockOutOfRange { clock_hz } => {
                write!(f, "clock {clock_hz} Hz gives no usable oversampling ratio")
            }
            Self::ClockNotMultiple { clock_hz } => {
                write!(f, "clock {clock_hz} Hz is not a multiple of 800 kHz")
            }
            Self::LatchTooShort { micros } => {
                write!(f, "latch of {micros} µs is below the 50 µs minimum")
            }
            Self::UnsupportedMode => write!(f, "spi mode must idle the clock low"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Failure of the underlying serial bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// Peripheral could not be claimed
    Unavailable,
    /// Write issued on a released bus
    NotOpen,
    /// Peripheral reported an error during the transfer
    Write(ErrorKind),
    /// Transfer did not complete in time, for transports with a deadline
    Timeout,
}

impl Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "bus is unavailable"),
            Self::NotOpen => write!(f, "bus is not open"),
            Self::Write(kind) => write!(f, "bus write failed: {kind}"),
            Self::Timeout => write!(f, "bus write timed out"),
        }
    }
}

impl core::error::Error for BusError {}

/// Misuse of the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolViolation {
    /// Operation on a closed strip
    Closed,
}

impl Display for ProtocolViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "strip is closed"),
        }
    }
}

impl core::error::Error for ProtocolViolation {}

/// Any failure surfaced by the strip driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Config(ConfigError),
    Bus(BusError),
    Protocol(ProtocolViolation),
    /// Pixel index past the end of the strip
    IndexOutOfRange { index: usize, len: usize },
    /// Encoded frame does not fit the output buffer
    FrameOverflow { required: usize, capacity: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "config error: {err}"),
            Self::Bus(err) => write!(f, "bus error: {err}"),
            Self::Protocol(err) => write!(f, "protocol violation: {err}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for strip of {len}")
            }
            Self::FrameOverflow { required, capacity } => {
                write!(f, "frame needs {required} bytes, buffer holds {capacity}")
            }
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Bus(err) => Some(err),
            Self::Protocol(err) => Some(err),
            Self::IndexOutOfRange { .. } | Self::FrameOverflow { .. } => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<BusError> for Error {
    fn from(err: BusError) -> Self {
        Self::Bus(err)
    }
}

impl From<ProtocolViolation> for Error {
    fn from(err: ProtocolViolation) -> Self {
        Self::Protocol(err)
    }
}
