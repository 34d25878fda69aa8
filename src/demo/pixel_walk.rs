//! Light pixels one after another

use embedded_hal::delay::DelayNs;

use super::{DemoOutcome, Pacer, clear, pause_or_interrupt};
use crate::{
    PixelStrip,
    color::{BLUE, CYAN, GREEN, MAGENTA, RED, Rgb, WHITE, YELLOW},
};

const PALETTE: [Rgb; 7] = [RED, GREEN, BLUE, YELLOW, MAGENTA, CYAN, WHITE];
const STEP_MS: u32 = 300;
const HOLD_MS: u32 = 1_000;

/// Color of pixel `index` once the walk has reached it
pub const fn walk_color(index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}

/// Turn pixels on one by one, cycling through seven colors
///
/// Every step is shown on its own, so the walk is visible on the strip.
pub fn pixel_walk<S, D>(strip: &mut S, pacer: &mut Pacer<'_, D>) -> Result<DemoOutcome, S::Error>
where
    S: PixelStrip,
    D: DelayNs,
{
    clear(strip)?;
    for index in 0..strip.pixel_count() {
        strip.set_pixel(index, walk_color(index))?;
        strip.show()?;
        pause_or_interrupt!(pacer, STEP_MS);
    }
    pause_or_interrupt!(pacer, HOLD_MS);
    clear(strip)?;
    Ok(DemoOutcome::Completed)
}
