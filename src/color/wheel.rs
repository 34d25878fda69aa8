use crate::color::Rgb;

/// Classic three segment color wheel
///
/// Walks red -> green -> blue -> red over `0..=255`.
pub const fn wheel(position: u8) -> Rgb {
    match position {
        0..85 => Rgb {
            r: position * 3,
            g: 255 - position * 3,
            b: 0,
        },
        85..170 => {
            let position = position - 85;
            Rgb {
                r: 255 - position * 3,
                g: 0,
                b: position * 3,
            }
        }
        _ => {
            let position = position - 170;
            Rgb {
                r: 0,
                g: position * 3,
                b: 255 - position * 3,
            }
        }
    }
}
