use crate::color::Rgb;

/// Order in which color channels are shifted onto the wire
///
/// WS2812B expects [`ColorOrder::Grb`]. Other orders exist for clones
/// and for WS2811 based strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorOrder {
    Rgb,
    #[default]
    Grb,
    Rbg,
    Gbr,
    Brg,
    Bgr,
}

impl ColorOrder {
    /// Channel bytes of `color` in wire order
    pub const fn arrange(self, color: Rgb) -> [u8; 3] {
        let Rgb { r, g, b } = color;
        match self {
            Self::Rgb => [r, g, b],
            Self::Grb => [g, r, b],
            Self::Rbg => [r, b, g],
            Self::Gbr => [g, b, r],
            Self::Brg => [b, r, g],
            Self::Bgr => [b, g, r],
        }
    }

    /// Inverse of [`ColorOrder::arrange`]
    pub const fn restore(self, wire: [u8; 3]) -> Rgb {
        let [a, b, c] = wire;
        match self {
            Self::Rgb => Rgb { r: a, g: b, b: c },
            Self::Grb => Rgb { r: b, g: a, b: c },
            Self::Rbg => Rgb { r: a, g: c, b },
            Self::Gbr => Rgb { r: c, g: a, b },
            Self::Brg => Rgb { r: b, g: c, b: a },
            Self::Bgr => Rgb { r: c, g: b, b: a },
        }
    }
}
