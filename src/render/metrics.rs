//! Text measurement without a font engine.
//!
//! Glyph advances come from a fixed proportional table (hundredths of an
//! average glyph width for printable ASCII). That is good enough to keep
//! tick labels and point labels off the lines they annotate.

use crate::types::TextExtents;

/// Proportional character widths for ' '..='~'.
#[rustfmt::skip]
const AW_CHAR: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Width of a 100-unit glyph, in ems
const AVERAGE_GLYPH_EM: f64 = 0.08 / 0.14;

/// Height of capitals and digits, in ems
const CAP_HEIGHT_EM: f64 = 0.72;

/// Sum of the proportional widths of `text` (100 = one average glyph).
fn text_units(text: &str) -> u32 {
    text.chars()
        .map(|c| {
            if (' '..='~').contains(&c) {
                u32::from(AW_CHAR[(c as usize) - 0x20])
            } else {
                100
            }
        })
        .sum()
}

/// Measure `text` set at `font_size` pixels.
pub fn measure(text: &str, font_size: f64) -> TextExtents {
    if text.is_empty() {
        return TextExtents::default();
    }
    TextExtents {
        width: f64::from(text_units(text)) * 0.01 * AVERAGE_GLYPH_EM * font_size,
        height: CAP_HEIGHT_EM * font_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_extent() {
        assert_eq!(measure("", 12.0), TextExtents::default());
    }

    #[test]
    fn digits_share_a_width() {
        let one = measure("1", 12.0);
        let eight = measure("8", 12.0);
        assert_eq!(one.width, eight.width);
        assert!((one.height - 8.64).abs() < 1e-12);
    }

    #[test]
    fn width_scales_with_font_size() {
        let small = measure("x+y", 10.0);
        let big = measure("x+y", 20.0);
        assert!((big.width - 2.0 * small.width).abs() < 1e-12);
    }

    #[test]
    fn non_ascii_uses_average_width() {
        assert_eq!(text_units("θ"), 100);
        assert_eq!(text_units("W"), 150);
    }
}
