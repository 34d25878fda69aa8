//! Strip test for a WS2812B strip on a Raspberry Pi.
//!
//! Enable SPI and wire MOSI (GPIO 10) to DIN. Runs the solid sweep, pixel
//! walk and rainbow chase demos, then blanks the strip and releases the
//! bus. Ctrl-C stops the current demo at its next step.

mod transport;

use std::{
    process::ExitCode,
    sync::atomic::{AtomicBool, Ordering},
};

use linux_embedded_hal::Delay;
use myrtio_ws2812_spi::{
    BusConfig, DemoId, DemoOutcome, Pacer, Ws2812Strip, demo::run_and_close, frame_size,
};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::transport::SpidevTransport;

const LED_COUNT: usize = 10;
/// 20 % of full scale
const LED_BRIGHTNESS: u8 = 51;

static ABORT: AtomicBool = AtomicBool::new(false);

type Strip = Ws2812Strip<SpidevTransport, LED_COUNT, { frame_size(LED_COUNT) }>;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let config = BusConfig::DEFAULT.with_brightness(LED_BRIGHTNESS);
    info!(
        "strip test: {} LEDs on spidev{}.{} at {} Hz, brightness {}/255",
        LED_COUNT, config.bus, config.chip_select, config.clock_hz, config.brightness
    );

    if let Err(err) = ctrlc::set_handler(|| ABORT.store(true, Ordering::Relaxed)) {
        warn!("interrupt handler not installed: {}", err);
    }

    let strip = match Strip::new(LED_COUNT, config, SpidevTransport::new()) {
        Ok(strip) => strip,
        Err(err) => {
            error!("failed to set up strip: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut pacer = Pacer::new(Delay, &ABORT);
    match run_and_close(strip, &mut pacer, &DemoId::STRIP_TEST) {
        Ok(DemoOutcome::Completed) => {
            info!("all demos complete, LEDs cleared");
            ExitCode::SUCCESS
        }
        Ok(DemoOutcome::Interrupted) => {
            info!("interrupted by user, LEDs cleared");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("strip test failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
