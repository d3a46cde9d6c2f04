//! Hex color parsing for swatch codes and styling knobs.
//!
//! Palette codes are bare 6-digit hex; configuration strings and host field
//! values may carry a leading `#` and may use the 3-digit shorthand.

use floem::peniko::Color;

/// Parse a hex color (with or without `#`, 3 or 6 digits) into RGB bytes.
pub(crate) fn parse_rgb(code: &str) -> Option<(u8, u8, u8)> {
    let stripped = code.trim_start_matches('#');
    if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match stripped.len() {
        3 => {
            let r = u8::from_str_radix(&stripped[0..1], 16).ok()?;
            let g = u8::from_str_radix(&stripped[1..2], 16).ok()?;
            let b = u8::from_str_radix(&stripped[2..3], 16).ok()?;
            Some((r * 17, g * 17, b * 17))
        }
        6 => {
            let r = u8::from_str_radix(&stripped[0..2], 16).ok()?;
            let g = u8::from_str_radix(&stripped[2..4], 16).ok()?;
            let b = u8::from_str_radix(&stripped[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Parse a hex color into a paintable [`Color`].
pub(crate) fn to_color(code: &str) -> Option<Color> {
    parse_rgb(code).map(|(r, g, b)| Color::rgb8(r, g, b))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_six_digit_codes() {
        assert_eq!(parse_rgb("990033"), Some((0x99, 0x00, 0x33)));
        assert_eq!(parse_rgb("#ff9966"), Some((0xff, 0x99, 0x66)));
    }

    #[test]
    fn parses_three_digit_shorthand() {
        assert_eq!(parse_rgb("#FFF"), Some((255, 255, 255)));
        assert_eq!(parse_rgb("#000"), Some((0, 0, 0)));
        assert_eq!(parse_rgb("A5F"), Some((0xaa, 0x55, 0xff)));
    }

    #[test]
    fn rejects_malformed_codes() {
        assert_eq!(parse_rgb(""), None);
        assert_eq!(parse_rgb("#12"), None);
        assert_eq!(parse_rgb("#12345"), None);
        assert_eq!(parse_rgb("gg0033"), None);
        assert_eq!(parse_rgb("#1234567"), None);
    }
}
