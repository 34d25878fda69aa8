#![no_std]

mod fmt;

pub mod color;
pub mod config;
pub mod demo;
pub mod encoder;
pub mod error;
pub mod latch;
pub mod strip;
pub mod timing;
pub mod transport;

pub use color::{ColorOrder, Rgb};
pub use config::BusConfig;
pub use demo::{DemoId, DemoOutcome, Pacer};
pub use encoder::{encode_frame, frame_size};
pub use error::{BusError, ConfigError, Error, ProtocolViolation};
pub use latch::LatchGate;
pub use strip::Ws2812Strip;
pub use timing::BitPatterns;
pub use transport::{SpiTransport, Transport};

pub use embassy_time::Duration;
pub use smart_leds::SmartLedsWrite;

/// Addressable strip as seen by callers
///
/// Implement this trait to drive the demos through a different backend,
/// e.g. a PWM/DMA driver. Pixel writes stay in memory until `show`.
pub trait PixelStrip {
    type Error;

    /// Number of pixels on the strip
    fn pixel_count(&self) -> usize;

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), Self::Error>;

    fn fill(&mut self, color: Rgb) -> Result<(), Self::Error>;

    /// Push the buffered pixels to the LEDs
    fn show(&mut self) -> Result<(), Self::Error>;

    /// Release the hardware. Calling it again is a no-op.
    fn close(&mut self) -> Result<(), Self::Error>;
}

impl<S: PixelStrip + ?Sized> PixelStrip for &mut S {
    type Error = S::Error;

    fn pixel_count(&self) -> usize {
        S::pixel_count(self)
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), Self::Error> {
        S::set_pixel(self, index, color)
    }

    fn fill(&mut self, color: Rgb) -> Result<(), Self::Error> {
        S::fill(self, color)
    }

    fn show(&mut self) -> Result<(), Self::Error> {
        S::show(self)
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        S::close(self)
    }
}
