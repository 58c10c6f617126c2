//! Hex color parsing.

use tiny_skia::Color;

use crate::error::RenderError;

/// Parse `#rrggbb` (leading `#` optional) into an opaque color.
pub fn parse_hex(hex: &str) -> Result<Color, RenderError> {
    parse_hex_with_alpha(hex, u8::MAX)
}

/// Parse `#rrggbb` with an explicit alpha.
pub fn parse_hex_with_alpha(hex: &str, alpha: u8) -> Result<Color, RenderError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(RenderError::InvalidColor(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| RenderError::InvalidColor(hex.to_string()))
    };

    Ok(Color::from_rgba8(
        channel(0..2)?,
        channel(2..4)?,
        channel(4..6)?,
        alpha,
    ))
}
