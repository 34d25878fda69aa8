use heapless::Vec;
use smart_leds::SmartLedsWrite;

use crate::{
    PixelStrip,
    color::{BLACK, Rgb},
    config::BusConfig,
    encoder::{encode_frame, frame_size},
    error::{ConfigError, Error, ProtocolViolation},
    fmt::{debug, warning},
    latch::LatchGate,
    timing::BitPatterns,
    transport::Transport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open,
    Closed,
}

/// WS2812B strip driven through an oversampled serial transport
///
/// `MAX_LEDS` bounds the pixel buffer and `FRAME_BYTES` the encoded
/// frame; size the latter with [`frame_size`]. Pixel writes only touch the
/// in-memory buffer, [`Ws2812Strip::show`] is the only call doing I/O.
///
/// The transport is released by [`Ws2812Strip::close`], or on drop if the
/// strip was never closed explicitly.
pub struct Ws2812Strip<T: Transport, const MAX_LEDS: usize, const FRAME_BYTES: usize> {
    transport: T,
    config: BusConfig,
    patterns: BitPatterns,
    latch: LatchGate,
    state: State,

    pixels: Vec<Rgb, MAX_LEDS>,
    frame: Vec<u8, FRAME_BYTES>,
}

impl<T: Transport, const MAX_LEDS: usize, const FRAME_BYTES: usize>
    Ws2812Strip<T, MAX_LEDS, FRAME_BYTES>
{
    /// Validate the configuration and claim the transport
    ///
    /// All pixels start black. Nothing is sent until the first `show`.
    pub fn new(pixel_count: usize, config: BusConfig, mut transport: T) -> Result<Self, Error> {
        if pixel_count == 0 {
            return Err(ConfigError::ZeroPixels.into());
        }
        if pixel_count > MAX_LEDS {
            return Err(ConfigError::TooManyPixels {
                pixel_count,
                capacity: MAX_LEDS,
            }
            .into());
        }
        let required = frame_size(pixel_count);
        if required > FRAME_BYTES {
            return Err(ConfigError::FrameBufferTooSmall {
                required,
                capacity: FRAME_BYTES,
            }
            .into());
        }
        let patterns = config.validate()?;

        transport.open(&config)?;
        debug!(
            "[Ws2812Strip.new] opened spi{}.{} at {} Hz for {} pixels",
            config.bus, config.chip_select, config.clock_hz, pixel_count
        );

        let mut pixels = Vec::new();
        pixels.resize(pixel_count, BLACK).map_err(|()| {
            Error::Config(ConfigError::TooManyPixels {
                pixel_count,
                capacity: MAX_LEDS,
            })
        })?;

        Ok(Self {
            transport,
            config,
            patterns,
            latch: LatchGate::new(config.latch),
            state: State::Open,
            pixels,
            frame: Vec::new(),
        })
    }

    /// Number of pixels on the strip
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    pub fn patterns(&self) -> BitPatterns {
        self.patterns
    }

    pub fn is_open(&self) -> bool {
        self.state == State::Open
    }

    /// Current buffer contents
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        self.pixels.get(index).copied()
    }

    /// Frame encoded by the most recent `show`
    ///
    /// Empty before the first `show` and after a failed write.
    pub fn last_frame(&self) -> &[u8] {
        &self.frame
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), Error> {
        self.ensure_open()?;
        let len = self.pixels.len();
        let pixel = self
            .pixels
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        *pixel = color;
        Ok(())
    }

    pub fn fill(&mut self, color: Rgb) -> Result<(), Error> {
        self.ensure_open()?;
        self.pixels.fill(color);
        Ok(())
    }

    /// Encode the buffer and send it
    ///
    /// Blocks for the rest of the previous frame's latch gap, then for the
    /// transfer itself. A failed write leaves no frame behind; the next
    /// call encodes again from scratch.
    pub fn show(&mut self) -> Result<(), Error> {
        self.ensure_open()?;
        self.send()
    }

    /// Blank the strip and release the transport
    ///
    /// Only the first call has an effect. The transport is released even
    /// when the blanking frame fails, and that failure is returned.
    pub fn close(&mut self) -> Result<(), Error> {
        if self.state == State::Closed {
            return Ok(());
        }

        self.pixels.fill(BLACK);
        let blanked = self.send();
        if let Err(err) = &blanked {
            warning!("[Ws2812Strip.close] failed to blank strip: {}", err);
        }
        self.latch.wait();

        self.transport.release();
        self.state = State::Closed;
        debug!("[Ws2812Strip.close] transport released");

        blanked
    }

    fn send(&mut self) -> Result<(), Error> {
        encode_frame(
            &self.pixels,
            self.config.color_order,
            self.patterns,
            self.config.brightness,
            &mut self.frame,
        )?;

        self.latch.wait();
        let written = self.transport.write(&self.frame);
        // The gap counts from the end of whatever reached the line
        self.latch.mark();

        if let Err(err) = written {
            warning!("[Ws2812Strip.show] write failed: {}", err);
            self.frame.clear();
            return Err(err.into());
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), Error> {
        match self.state {
            State::Open => Ok(()),
            State::Closed => Err(ProtocolViolation::Closed.into()),
        }
    }
}

impl<T: Transport, const MAX_LEDS: usize, const FRAME_BYTES: usize> Drop
    for Ws2812Strip<T, MAX_LEDS, FRAME_BYTES>
{
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warning!("[Ws2812Strip.drop] close failed: {}", err);
        }
    }
}

impl<T: Transport, const MAX_LEDS: usize, const FRAME_BYTES: usize> PixelStrip
    for Ws2812Strip<T, MAX_LEDS, FRAME_BYTES>
{
    type Error = Error;

    fn pixel_count(&self) -> usize {
        Ws2812Strip::pixel_count(self)
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), Error> {
        Ws2812Strip::set_pixel(self, index, color)
    }

    fn fill(&mut self, color: Rgb) -> Result<(), Error> {
        Ws2812Strip::fill(self, color)
    }

    fn show(&mut self) -> Result<(), Error> {
        Ws2812Strip::show(self)
    }

    fn close(&mut self) -> Result<(), Error> {
        Ws2812Strip::close(self)
    }
}

impl<T: Transport, const MAX_LEDS: usize, const FRAME_BYTES: usize> SmartLedsWrite
    for Ws2812Strip<T, MAX_LEDS, FRAME_BYTES>
{
    type Error = Error;
    type Color = Rgb;

    /// Copy colors into the buffer from the first pixel on, then show
    ///
    /// Pixels past the end of the iterator keep their previous color. More
    /// colors than pixels is rejected before the buffer is touched.
    fn write<I, C>(&mut self, iterator: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = C>,
        C: Into<Self::Color>,
    {
        self.ensure_open()?;
        let len = self.pixels.len();
        let mut staged: Vec<Rgb, MAX_LEDS> = Vec::new();
        for (index, color) in iterator.into_iter().enumerate() {
            if index >= len {
                return Err(Error::IndexOutOfRange { index, len });
            }
            // len <= MAX_LEDS, so the push cannot fail
            let _ = staged.push(color.into());
        }
        self.pixels[..staged.len()].copy_from_slice(&staged);
        self.show()
    }
}
