#![allow(dead_code)]

use std::{
    cell::{Ref, RefCell},
    rc::Rc,
    sync::atomic::{AtomicBool, Ordering},
};

use embassy_time::Instant;
use embedded_hal::delay::DelayNs;
use myrtio_ws2812_spi::{
    BitPatterns, BusConfig, BusError, ColorOrder, Rgb, Transport, Ws2812Strip, frame_size,
    timing::BYTES_PER_PIXEL,
};

pub(crate) const MAX_LEDS: usize = 16;

pub(crate) type TestStrip = Ws2812Strip<MockTransport, MAX_LEDS, { frame_size(MAX_LEDS) }>;

/// Everything the mock bus has seen
#[derive(Debug, Default)]
pub(crate) struct BusLog {
    pub(crate) frames: Vec<Vec<u8>>,
    pub(crate) write_times: Vec<Instant>,
    pub(crate) open: bool,
    pub(crate) opens: usize,
    pub(crate) releases: usize,
    pub(crate) fail_open: bool,
    pub(crate) failing_writes: usize,
}

/// Transport recording frames and open/closed state
///
/// Clones share the same log, so a test can keep one clone while the strip
/// owns the other.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockTransport {
    log: Rc<RefCell<BusLog>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn unavailable() -> Self {
        let transport = Self::new();
        transport.log.borrow_mut().fail_open = true;
        transport
    }

    pub(crate) fn log(&self) -> Ref<'_, BusLog> {
        self.log.borrow()
    }

    /// Make the next `count` writes time out
    pub(crate) fn fail_next_writes(&self, count: usize) {
        self.log.borrow_mut().failing_writes = count;
    }

    pub(crate) fn last_frame(&self) -> Vec<u8> {
        self.log().frames.last().cloned().unwrap_or_default()
    }
}

impl Transport for MockTransport {
    fn open(&mut self, _config: &BusConfig) -> Result<(), BusError> {
        let mut log = self.log.borrow_mut();
        if log.fail_open {
            return Err(BusError::Unavailable);
        }
        log.open = true;
        log.opens += 1;
        Ok(())
    }

    fn write(&mut self, frame: &[u8]) -> Result<(), BusError> {
        let mut log = self.log.borrow_mut();
        if !log.open {
            return Err(BusError::NotOpen);
        }
        if log.failing_writes > 0 {
            log.failing_writes -= 1;
            return Err(BusError::Timeout);
        }
        log.frames.push(frame.to_vec());
        log.write_times.push(Instant::now());
        Ok(())
    }

    fn release(&mut self) {
        let mut log = self.log.borrow_mut();
        log.open = false;
        log.releases += 1;
    }
}

pub(crate) fn open_strip(pixel_count: usize) -> (TestStrip, MockTransport) {
    let transport = MockTransport::new();
    let strip = TestStrip::new(pixel_count, BusConfig::DEFAULT, transport.clone()).unwrap();
    (strip, transport)
}

/// Decode a frame back into wire ordered channel triples
///
/// Panics on any byte that is neither pattern.
pub(crate) fn decode_wire(frame: &[u8], patterns: BitPatterns) -> Vec<[u8; 3]> {
    assert_eq!(frame.len() % BYTES_PER_PIXEL, 0, "frame is not pixel aligned");
    frame
        .chunks(BYTES_PER_PIXEL)
        .map(|pixel| {
            let mut channels = [0u8; 3];
            for (channel, bits) in channels.iter_mut().zip(pixel.chunks(8)) {
                for &byte in bits {
                    let bit = if byte == patterns.one {
                        1
                    } else if byte == patterns.zero {
                        0
                    } else {
                        panic!("unexpected encoded byte {byte:#010b}");
                    };
                    *channel = (*channel << 1) | bit;
                }
            }
            channels
        })
        .collect()
}

/// Decode a frame back into colors
pub(crate) fn decode_colors(frame: &[u8], patterns: BitPatterns, order: ColorOrder) -> Vec<Rgb> {
    decode_wire(frame, patterns)
        .into_iter()
        .map(|wire| order.restore(wire))
        .collect()
}

/// Delay that returns immediately and can raise an abort flag
pub(crate) struct MockDelay<'a> {
    pub(crate) pauses: usize,
    pub(crate) total_ms: u64,
    abort: Option<(&'a AtomicBool, usize)>,
}

impl<'a> MockDelay<'a> {
    pub(crate) fn new() -> Self {
        Self {
            pauses: 0,
            total_ms: 0,
            abort: None,
        }
    }

    /// Set `flag` during the `pause`-th pause (1-based)
    pub(crate) fn abort_at(flag: &'a AtomicBool, pause: usize) -> Self {
        Self {
            abort: Some((flag, pause)),
            ..Self::new()
        }
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.pauses += 1;
        self.total_ms += u64::from(ms);
        if let Some((flag, pause)) = self.abort {
            if self.pauses == pause {
                flag.store(true, Ordering::Relaxed);
            }
        }
    }
}
