//! Canned strip demos
//!
//! Demos only talk to the strip through [`PixelStrip`], so they run the
//! same on any backend. An abort flag is polled between whole steps,
//! never while a frame is being sent.

mod christmas;
mod pixel_walk;
mod rainbow_chase;
mod solid_sweep;

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;

pub use christmas::{Christmas, XorShift32};
pub use pixel_walk::{pixel_walk, walk_color};
pub use rainbow_chase::{chase_color, rainbow_chase};
pub use solid_sweep::solid_sweep;

use crate::{PixelStrip, color::BLACK, fmt::debug};

const DEMO_NAME_SOLID_SWEEP: &str = "solid_sweep";
const DEMO_NAME_PIXEL_WALK: &str = "pixel_walk";
const DEMO_NAME_RAINBOW_CHASE: &str = "rainbow_chase";
const DEMO_NAME_CHRISTMAS: &str = "christmas";

const DEMO_ID_SOLID_SWEEP: u8 = 0;
const DEMO_ID_PIXEL_WALK: u8 = 1;
const DEMO_ID_RAINBOW_CHASE: u8 = 2;
const DEMO_ID_CHRISTMAS: u8 = 3;

/// Pause between two demos of a sequence
const GAP_MS: u32 = 500;

/// Rounds drawn by the christmas demo inside a sequence
const CHRISTMAS_ROUNDS: u32 = 5;

/// How a demo run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoOutcome {
    Completed,
    Interrupted,
}

/// Known demos
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum DemoId {
    SolidSweep = DEMO_ID_SOLID_SWEEP,
    PixelWalk = DEMO_ID_PIXEL_WALK,
    RainbowChase = DEMO_ID_RAINBOW_CHASE,
    Christmas = DEMO_ID_CHRISTMAS,
}

impl DemoId {
    /// Sequence run by the strip test program
    pub const STRIP_TEST: [Self; 3] = [Self::SolidSweep, Self::PixelWalk, Self::RainbowChase];

    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            DEMO_ID_SOLID_SWEEP => Some(Self::SolidSweep),
            DEMO_ID_PIXEL_WALK => Some(Self::PixelWalk),
            DEMO_ID_RAINBOW_CHASE => Some(Self::RainbowChase),
            DEMO_ID_CHRISTMAS => Some(Self::Christmas),
            _ => None,
        }
    }

    pub fn parse_from_str(name: &str) -> Option<Self> {
        match name {
            DEMO_NAME_SOLID_SWEEP => Some(Self::SolidSweep),
            DEMO_NAME_PIXEL_WALK => Some(Self::PixelWalk),
            DEMO_NAME_RAINBOW_CHASE => Some(Self::RainbowChase),
            DEMO_NAME_CHRISTMAS => Some(Self::Christmas),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SolidSweep => DEMO_NAME_SOLID_SWEEP,
            Self::PixelWalk => DEMO_NAME_PIXEL_WALK,
            Self::RainbowChase => DEMO_NAME_RAINBOW_CHASE,
            Self::Christmas => DEMO_NAME_CHRISTMAS,
        }
    }

    /// Run this demo once
    pub fn run<S, D>(self, strip: &mut S, pacer: &mut Pacer<'_, D>) -> Result<DemoOutcome, S::Error>
    where
        S: PixelStrip,
        D: DelayNs,
    {
        debug!("[DemoId.run] starting {}", self.as_str());
        match self {
            Self::SolidSweep => solid_sweep(strip, pacer),
            Self::PixelWalk => pixel_walk(strip, pacer),
            Self::RainbowChase => rainbow_chase(strip, pacer),
            Self::Christmas => Christmas::new(XorShift32::DEFAULT_SEED)
                .with_rounds(CHRISTMAS_ROUNDS)
                .run(strip, pacer),
        }
    }
}

/// Delay source plus abort flag shared by all demos
pub struct Pacer<'a, D> {
    delay: D,
    abort: &'a AtomicBool,
}

impl<'a, D: DelayNs> Pacer<'a, D> {
    pub const fn new(delay: D, abort: &'a AtomicBool) -> Self {
        Self { delay, abort }
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.load(Ordering::Relaxed)
    }

    /// Wait between two steps
    ///
    /// Returns `false` when an abort was requested before or during the wait.
    pub fn pause_ms(&mut self, ms: u32) -> bool {
        if self.is_aborted() {
            return false;
        }
        self.delay.delay_ms(ms);
        !self.is_aborted()
    }
}

/// Stop the current demo when the pacer reports an abort
macro_rules! pause_or_interrupt {
    ($pacer:expr, $ms:expr) => {
        if !$pacer.pause_ms($ms) {
            return Ok($crate::demo::DemoOutcome::Interrupted);
        }
    };
}
pub(crate) use pause_or_interrupt;

/// Turn every pixel off
pub fn clear<S: PixelStrip>(strip: &mut S) -> Result<(), S::Error> {
    strip.fill(BLACK)?;
    strip.show()
}

/// Run `demos` in order and leave the strip dark
///
/// The final all-off frame is sent on every path, including an abort or a
/// failed demo. A demo error wins over an error from the final clear.
pub fn run_demos<S, D>(
    strip: &mut S,
    pacer: &mut Pacer<'_, D>,
    demos: &[DemoId],
) -> Result<DemoOutcome, S::Error>
where
    S: PixelStrip,
    D: DelayNs,
{
    let outcome = run_sequence(strip, pacer, demos);
    if matches!(outcome, Ok(DemoOutcome::Interrupted)) {
        debug!("[run_demos] interrupted");
    }
    let cleared = clear(strip);
    let outcome = outcome?;
    cleared?;
    Ok(outcome)
}

/// Run `demos`, then close the strip
///
/// Takes ownership so the strip cannot be used after its bus is released.
pub fn run_and_close<S, D>(
    mut strip: S,
    pacer: &mut Pacer<'_, D>,
    demos: &[DemoId],
) -> Result<DemoOutcome, S::Error>
where
    S: PixelStrip,
    D: DelayNs,
{
    let outcome = run_demos(&mut strip, pacer, demos);
    let closed = strip.close();
    let outcome = outcome?;
    closed?;
    Ok(outcome)
}

fn run_sequence<S, D>(
    strip: &mut S,
    pacer: &mut Pacer<'_, D>,
    demos: &[DemoId],
) -> Result<DemoOutcome, S::Error>
where
    S: PixelStrip,
    D: DelayNs,
{
    for (i, demo) in demos.iter().enumerate() {
        if pacer.is_aborted() {
            return Ok(DemoOutcome::Interrupted);
        }
        if demo.run(strip, pacer)? == DemoOutcome::Interrupted {
            return Ok(DemoOutcome::Interrupted);
        }
        if i + 1 < demos.len() {
            pause_or_interrupt!(pacer, GAP_MS);
        }
    }
    Ok(DemoOutcome::Completed)
}
