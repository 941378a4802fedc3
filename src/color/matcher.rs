//! Nearest named color lookup
//!
//! A linear scan over the reference table. The first entry with the
//! smallest distance wins, so ties resolve to table order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::conversion::{delta_e, rgb_to_lab_f64};
use crate::color::{ColorEntry, ColorTable, RgbTriple};
use crate::constants::display::DISTANCE_DECIMALS;
use crate::error::{InspectorError, Result};

/// How distance between a target and a table entry is measured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Euclidean distance in raw RGB space
    #[default]
    Rgb,
    /// CIE76 ΔE between the Lab (D65) conversions
    Lab,
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DistanceMetric::Rgb => "rgb",
            DistanceMetric::Lab => "lab",
        })
    }
}

impl FromStr for DistanceMetric {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" => Ok(DistanceMetric::Rgb),
            "lab" => Ok(DistanceMetric::Lab),
            other => Err(format!("unknown metric '{}', expected 'rgb' or 'lab'", other)),
        }
    }
}

/// Closest table entry for a target, with its full-precision distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatch<'a> {
    pub entry: &'a ColorEntry,
    pub distance: f64,
}

impl ColorMatch<'_> {
    /// Distance rounded for display
    pub fn rounded_distance(&self) -> f64 {
        round_distance(self.distance)
    }
}

/// Round a distance to the display precision
pub fn round_distance(distance: f64) -> f64 {
    let scale = 10f64.powi(DISTANCE_DECIMALS as i32);
    (distance * scale).round() / scale
}

/// Euclidean distance between two points in RGB space
pub fn rgb_distance(a: RgbTriple, b: RgbTriple) -> f64 {
    a.channels()
        .iter()
        .zip(b.channels())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Stateless matcher parameterized by distance metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorMatcher {
    metric: DistanceMetric,
}

impl ColorMatcher {
    pub fn new(metric: DistanceMetric) -> Self {
        Self { metric }
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Find the entry closest to `target`
    ///
    /// # Errors
    ///
    /// Returns `InspectorError::EmptyTableError` if `table` has no entries
    pub fn find_closest<'t>(
        &self,
        target: impl Into<RgbTriple>,
        table: &'t ColorTable,
    ) -> Result<ColorMatch<'t>> {
        let target = target.into();
        let target_lab = match self.metric {
            DistanceMetric::Rgb => None,
            DistanceMetric::Lab => Some(rgb_to_lab_f64(target)),
        };

        let distance_to = |entry: &ColorEntry| {
            let distance = match target_lab {
                None => rgb_distance(target, entry.into()),
                Some(lab) => delta_e(lab, rgb_to_lab_f64(entry.into())),
            };
            // NaN from non-finite targets ranks behind every real distance
            if distance.is_nan() {
                f64::INFINITY
            } else {
                distance
            }
        };

        let mut entries = table.iter();
        let first = entries.next().ok_or(InspectorError::EmptyTableError)?;
        let mut best = ColorMatch {
            entry: first,
            distance: distance_to(first),
        };

        for entry in entries {
            let distance = distance_to(entry);
            // Strict comparison keeps the earliest entry on ties
            if distance < best.distance {
                best = ColorMatch { entry, distance };
            }
        }

        debug!(
            ?target,
            metric = %self.metric,
            name = %best.entry.name,
            distance = best.distance,
            "matched color"
        );
        Ok(best)
    }
}

/// Find the entry closest to `target` by Euclidean RGB distance
pub fn find_closest(target: impl Into<RgbTriple>, table: &ColorTable) -> Result<ColorMatch<'_>> {
    ColorMatcher::default().find_closest(target, table)
}
