//! Rainbow moving along the strip

use embedded_hal::delay::DelayNs;

use super::{DemoOutcome, Pacer, clear, pause_or_interrupt};
use crate::{
    PixelStrip,
    color::{Rgb, wheel},
};

const STEPS: u8 = 255;
const STEP_MS: u32 = 20;

/// Color of pixel `index` at chase step `step`
///
/// The whole wheel is spread over the strip and shifted by one position
/// per step.
#[allow(clippy::cast_possible_truncation)]
pub fn chase_color(index: usize, len: usize, step: u8) -> Rgb {
    let position = (index * 256 / len.max(1)) + usize::from(step);
    wheel((position & 0xFF) as u8)
}

/// Spread the color wheel over the strip and rotate it
pub fn rainbow_chase<S, D>(strip: &mut S, pacer: &mut Pacer<'_, D>) -> Result<DemoOutcome, S::Error>
where
    S: PixelStrip,
    D: DelayNs,
{
    let len = strip.pixel_count();
    for step in 0..STEPS {
        for index in 0..len {
            strip.set_pixel(index, chase_color(index, len, step))?;
        }
        strip.show()?;
        pause_or_interrupt!(pacer, STEP_MS);
    }
    clear(strip)?;
    Ok(DemoOutcome::Completed)
}
