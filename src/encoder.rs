//! Pixel buffer to SPI bitstream encoding.
//!
//! Each pixel becomes 24 protocol bits in wire channel order, most
//! significant bit first, and every protocol bit becomes one byte from
//! [`BitPatterns`]. The output buffer is cleared and rebuilt on every call.

use heapless::Vec;

use crate::{
    color::{ColorOrder, Rgb},
    error::Error,
    timing::{BITS_PER_CHANNEL, BYTES_PER_PIXEL, BitPatterns},
};

/// Bytes needed to encode `pixel_count` pixels
///
/// Use it to size the frame buffer of a strip:
///
/// ```ignore
/// type Strip<T> = Ws2812Strip<T, 60, { frame_size(60) }>;
/// ```
pub const fn frame_size(pixel_count: usize) -> usize {
    pixel_count * BYTES_PER_PIXEL
}

/// Expand one channel byte into its protocol bit patterns
#[inline]
pub const fn encode_channel(value: u8, patterns: BitPatterns) -> [u8; BITS_PER_CHANNEL] {
    let mut out = [0; BITS_PER_CHANNEL];
    let mut i = 0;
    while i < BITS_PER_CHANNEL {
        let bit = value & (0x80 >> i) != 0;
        out[i] = patterns.pattern(bit);
        i += 1;
    }
    out
}

/// Encode `pixels` into `out`
///
/// Brightness is applied before channel reordering; 255 leaves colors
/// untouched. An empty slice yields an empty frame.
pub fn encode_frame<const N: usize>(
    pixels: &[Rgb],
    order: ColorOrder,
    patterns: BitPatterns,
    brightness: u8,
    out: &mut Vec<u8, N>,
) -> Result<(), Error> {
    out.clear();

    let required = frame_size(pixels.len());
    if required > out.capacity() {
        return Err(Error::FrameOverflow {
            required,
            capacity: out.capacity(),
        });
    }

    for pixel in scaled(pixels, brightness) {
        for channel in order.arrange(pixel) {
            out.extend_from_slice(&encode_channel(channel, patterns))
                .map_err(|()| Error::FrameOverflow {
                    required,
                    capacity: N,
                })?;
        }
    }

    Ok(())
}

fn scaled(pixels: &[Rgb], brightness: u8) -> impl Iterator<Item = Rgb> + '_ {
    smart_leds::brightness(pixels.iter().copied(), brightness)
}
