use embedded_hal::spi::{Mode, Phase, Polarity};
use linux_embedded_hal::{
    SpidevBus,
    spidev::{SpiModeFlags, SpidevOptions},
};
use myrtio_ws2812_spi::{BusConfig, BusError, SpiTransport, Transport};
use tracing::{debug, warn};

/// Linux spidev bus opened from the strip's [`BusConfig`]
///
/// `open` claims `/dev/spidev<bus>.<chip_select>` and programs clock and
/// mode, `release` closes the device.
#[derive(Default)]
pub(crate) struct SpidevTransport {
    bus: Option<SpiTransport<SpidevBus>>,
}

impl SpidevTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl Transport for SpidevTransport {
    fn open(&mut self, config: &BusConfig) -> Result<(), BusError> {
        let path = format!("/dev/spidev{}.{}", config.bus, config.chip_select);
        let mut spi = SpidevBus::open(&path).map_err(|err| {
            warn!("failed to open {}: {:?}", path, err);
            BusError::Unavailable
        })?;

        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(config.clock_hz)
            .mode(mode_flags(config.mode))
            .build();
        spi.configure(&options).map_err(|err| {
            warn!("failed to configure {}: {}", path, err);
            BusError::Unavailable
        })?;
        debug!("opened {} at {} Hz", path, config.clock_hz);

        let mut bus = SpiTransport::new(spi);
        bus.open(config)?;
        self.bus = Some(bus);
        Ok(())
    }

    fn write(&mut self, frame: &[u8]) -> Result<(), BusError> {
        self.bus.as_mut().ok_or(BusError::NotOpen)?.write(frame)
    }

    fn release(&mut self) {
        if let Some(mut bus) = self.bus.take() {
            bus.release();
        }
    }
}

fn mode_flags(mode: Mode) -> SpiModeFlags {
    match (mode.polarity, mode.phase) {
        (Polarity::IdleLow, Phase::CaptureOnFirstTransition) => SpiModeFlags::SPI_MODE_0,
        (Polarity::IdleLow, Phase::CaptureOnSecondTransition) => SpiModeFlags::SPI_MODE_1,
        (Polarity::IdleHigh, Phase::CaptureOnFirstTransition) => SpiModeFlags::SPI_MODE_2,
        (Polarity::IdleHigh, Phase::CaptureOnSecondTransition) => SpiModeFlags::SPI_MODE_3,
    }
}
