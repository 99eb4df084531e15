//! ARGB pixel conversions for the terminal and for screenshots

use crossterm::style::Color;

/// Split an ARGB value into (alpha, red, green, blue)
#[inline]
pub fn channels(pixel: u32) -> (u8, u8, u8, u8) {
    let [a, r, g, b] = pixel.to_be_bytes();
    (a, r, g, b)
}

/// Helper to create RGB colors
pub fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

/// Terminal color for a pixel composited over black
///
/// Fully transparent pixels return `None` so the cell can stay blank.
pub fn pixel_color(pixel: u32) -> Option<Color> {
    let (a, r, g, b) = channels(pixel);
    if a == 0 {
        return None;
    }
    let scale = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
    Some(rgb(scale(r), scale(g), scale(b)))
}

/// ARGB to RGBA byte order
#[inline]
pub fn to_rgba(pixel: u32) -> [u8; 4] {
    let (a, r, g, b) = channels(pixel);
    [r, g, b, a]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ALIVE_COLOR, DEAD_COLOR};

    #[test]
    fn channels_split_argb() {
        assert_eq!(channels(0x80ff_4020), (0x80, 0xff, 0x40, 0x20));
    }

    #[test]
    fn transparent_is_blank() {
        assert_eq!(pixel_color(0x00ff_ffff), None);
        assert_eq!(pixel_color(0), None);
    }

    #[test]
    fn opaque_keeps_rgb() {
        assert_eq!(pixel_color(ALIVE_COLOR), Some(rgb(0xf0, 0x10, 0x20)));
        assert_eq!(pixel_color(DEAD_COLOR), Some(rgb(0xcc, 0x80, 0x00)));
    }

    #[test]
    fn half_alpha_dims() {
        assert_eq!(pixel_color(0x7fcc_8000), Some(rgb(102, 64, 0)));
    }

    #[test]
    fn rgba_order() {
        assert_eq!(to_rgba(0x11_22_33_44), [0x22, 0x33, 0x44, 0x11]);
    }
}
