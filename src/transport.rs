//! Byte oriented bus the encoded frames are shifted out on.

use embedded_hal::spi::{Error as _, SpiBus};

use crate::{config::BusConfig, error::BusError};

/// Physical transport for encoded frames
///
/// A strip owns its transport exclusively. `open` is called once when the
/// strip is built, `release` once when it is closed.
pub trait Transport {
    /// Claim the bus
    fn open(&mut self, config: &BusConfig) -> Result<(), BusError>;

    /// Send a whole frame in one blocking transfer
    fn write(&mut self, frame: &[u8]) -> Result<(), BusError>;

    /// Give the bus back
    fn release(&mut self);
}

/// [`Transport`] over an `embedded-hal` SPI bus
///
/// The HAL configures clock and mode when the bus is created, so `open`
/// only marks it as claimed. Only MOSI is used.
pub struct SpiTransport<SPI> {
    spi: SPI,
    open: bool,
}

impl<SPI: SpiBus<u8>> SpiTransport<SPI> {
    pub const fn new(spi: SPI) -> Self {
        Self { spi, open: false }
    }

    pub fn inner(&self) -> &SPI {
        &self.spi
    }

    /// Take the bus back
    pub fn into_inner(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiBus<u8>> Transport for SpiTransport<SPI> {
    fn open(&mut self, _config: &BusConfig) -> Result<(), BusError> {
        self.open = true;
        Ok(())
    }

    fn write(&mut self, frame: &[u8]) -> Result<(), BusError> {
        if !self.open {
            return Err(BusError::NotOpen);
        }
        self.spi
            .write(frame)
            .and_then(|()| self.spi.flush())
            .map_err(|err| BusError::Write(err.kind()))
    }

    fn release(&mut self) {
        self.open = false;
    }
}
