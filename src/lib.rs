//! # Pixel Inspector
//!
//! Pick a pixel from an image and name the closest color in a reference
//! palette.
//!
//! - Loads a named color table from CSV (`name,red,green,blue`)
//! - Decodes images to 8-bit RGB and samples a pixel by coordinate
//! - Finds the nearest table entry by Euclidean RGB distance (or CIE76 ΔE)
//! - Reports RGB, hex, Lab and the matched name with its distance
//!
//! ## Example
//!
//! ```rust,no_run
//! use pixel_inspector::{color::load_table, image_loader::load_image, inspect_pixel, ColorMatcher};
//! use std::path::Path;
//!
//! let table = load_table(Path::new("colors.csv"))?;
//! let image = load_image(Path::new("photo.jpg"))?;
//! let report = inspect_pixel(&image, 10, 20, &table, &ColorMatcher::default())?;
//! println!("{}", report);
//! # Ok::<(), pixel_inspector::InspectorError>(())
//! ```

use std::fmt;

use image::RgbImage;
use palette::Lab;
use serde::{Deserialize, Serialize};

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod image_loader;

pub use color::{find_closest, ColorEntry, ColorMatch, ColorMatcher, ColorTable, DistanceMetric, RgbTriple};
pub use config::InspectorConfig;
pub use error::{InspectorError, Result};
pub use image_loader::PixelSample;

use color::conversion::{rgb_to_lab, to_hex};
use color::matcher::round_distance;
use constants::display::DISTANCE_DECIMALS;

/// Everything known about one picked pixel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelReport {
    pub x: u32,
    pub y: u32,
    pub rgb: [u8; 3],
    /// Lowercase hex without the leading '#'
    pub hex: String,
    /// CIE Lab (D65) of the pixel
    pub lab: Lab,
    pub closest: ColorEntry,
    /// Full-precision distance to `closest`
    pub distance: f64,
    pub metric: DistanceMetric,
}

impl PixelReport {
    /// Build a report for an already-sampled pixel
    pub fn from_sample(sample: PixelSample, table: &ColorTable, matcher: &ColorMatcher) -> Result<Self> {
        let found = matcher.find_closest(sample, table)?;
        let [r, g, b] = sample.rgb();

        Ok(Self {
            x: sample.x,
            y: sample.y,
            rgb: sample.rgb(),
            hex: to_hex(r, g, b),
            lab: rgb_to_lab(sample.into()),
            closest: found.entry.clone(),
            distance: found.distance,
            metric: matcher.metric(),
        })
    }

    pub fn rounded_distance(&self) -> f64 {
        round_distance(self.distance)
    }
}

impl fmt::Display for PixelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.rgb;
        writeln!(f, "Selected Pixel: ({}, {})", self.x, self.y)?;
        writeln!(f, "RGB: ({}, {}, {})", r, g, b)?;
        writeln!(f, "HEX: #{}", self.hex)?;
        write!(
            f,
            "Closest Color: {} (ΔE: {:.*})",
            self.closest.name,
            DISTANCE_DECIMALS,
            self.rounded_distance()
        )
    }
}

/// Closest entry for a bare RGB target, as printed by the `match` command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary<'a> {
    pub target: RgbTriple,
    pub closest: &'a ColorEntry,
    pub distance: f64,
}

impl<'a> From<(RgbTriple, ColorMatch<'a>)> for MatchSummary<'a> {
    fn from((target, found): (RgbTriple, ColorMatch<'a>)) -> Self {
        Self {
            target,
            closest: found.entry,
            distance: found.distance,
        }
    }
}

/// Pretty-print a report or match summary as JSON
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| InspectorError::output("Failed to serialize output", e))
}

/// Sample the pixel at (x, y) and match it against the table
///
/// # Errors
///
/// Returns `InspectorError` if:
/// - The coordinate lies outside the image
/// - The table is empty
pub fn inspect_pixel(
    image: &RgbImage,
    x: u32,
    y: u32,
    table: &ColorTable,
    matcher: &ColorMatcher,
) -> Result<PixelReport> {
    let sample = image_loader::sample_pixel(image, x, y)?;
    PixelReport::from_sample(sample, table, matcher)
}
