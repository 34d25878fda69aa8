//! Whole strip in one color at a time

use embedded_hal::delay::DelayNs;

use super::{DemoOutcome, Pacer, clear, pause_or_interrupt};
use crate::{
    PixelStrip,
    color::{BLUE, GREEN, RED, Rgb, WHITE},
};

const COLORS: [Rgb; 4] = [RED, GREEN, BLUE, WHITE];
const HOLD_MS: u32 = 1_000;

/// Fill the strip red, green, blue and white, one second each
pub fn solid_sweep<S, D>(strip: &mut S, pacer: &mut Pacer<'_, D>) -> Result<DemoOutcome, S::Error>
where
    S: PixelStrip,
    D: DelayNs,
{
    for color in COLORS {
        strip.fill(color)?;
        strip.show()?;
        pause_or_interrupt!(pacer, HOLD_MS);
    }
    clear(strip)?;
    Ok(DemoOutcome::Completed)
}
