//! Color representation helpers
//!
//! - RGB to hexadecimal and back
//! - RGB to CIE Lab (D65) for perceptual comparisons
//! - CIE76 ΔE between Lab colors

use palette::white_point::D65;
use palette::{FromColor, Lab, Srgb};

use crate::color::RgbTriple;
use crate::constants::{channel, display::HEX_DIGITS};
use crate::error::{InspectorError, Result};

/// Format 8-bit channels as six lowercase hex digits, e.g. `ff0011`
pub fn to_hex(r: u8, g: u8, b: u8) -> String {
    format!("{:02x}{:02x}{:02x}", r, g, b)
}

/// Parse a hex color string to 8-bit channels
///
/// # Arguments
///
/// * `hex` - Six hex digits, either case, with or without a leading `#`
///
/// # Errors
///
/// Returns `InspectorError::InvalidHex` for any other input
pub fn parse_hex(hex: &str) -> Result<(u8, u8, u8)> {
    let invalid = || InspectorError::InvalidHex {
        value: hex.to_string(),
    };

    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != HEX_DIGITS || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let byte = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
    };

    Ok((byte(0..2)?, byte(2..4)?, byte(4..6)?))
}

/// Convert an RGB triple on the 0-255 scale to CIE Lab in double precision
///
/// Channels outside [0, 255] are converted as-is rather than clamped.
/// Non-finite channels yield non-finite Lab components.
pub fn rgb_to_lab_f64(rgb: RgbTriple) -> Lab<D65, f64> {
    let srgb = Srgb::new(
        rgb.red / channel::MAX_F64,
        rgb.green / channel::MAX_F64,
        rgb.blue / channel::MAX_F64,
    );
    Lab::from_color(srgb)
}

/// Convert an RGB triple on the 0-255 scale to CIE Lab for display
pub fn rgb_to_lab(rgb: RgbTriple) -> Lab {
    let lab = rgb_to_lab_f64(rgb);
    Lab::new(lab.l as f32, lab.a as f32, lab.b as f32)
}

/// Compute Delta E (CIE76) between two Lab colors
pub fn delta_e(lab1: Lab<D65, f64>, lab2: Lab<D65, f64>) -> f64 {
    let dl = lab1.l - lab2.l;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    (dl * dl + da * da + db * db).sqrt()
}
