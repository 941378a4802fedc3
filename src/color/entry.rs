//! Named reference colors and lookup targets

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::channel;

/// A named reference color
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorEntry {
    pub name: String,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColorEntry {
    pub fn new(name: impl Into<String>, red: u8, green: u8, blue: u8) -> Self {
        Self {
            name: name.into(),
            red,
            green,
            blue,
        }
    }

    /// Build an entry from raw integer channels, clamping each to [0, 255]
    pub fn from_channels(name: impl Into<String>, red: i64, green: i64, blue: i64) -> Self {
        let name = name.into();
        if [red, green, blue]
            .iter()
            .any(|&value| !(channel::MIN..=channel::MAX).contains(&value))
        {
            warn!(%name, red, green, blue, "clamping out-of-range channel values");
        }

        Self {
            red: clamp_channel(red),
            green: clamp_channel(green),
            blue: clamp_channel(blue),
            name,
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

fn clamp_channel(value: i64) -> u8 {
    value.clamp(channel::MIN, channel::MAX) as u8
}

/// Target of a color lookup.
///
/// Channels are nominally in [0, 255] but are not validated; values outside
/// that range simply land further from every entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbTriple {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl RgbTriple {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    pub fn channels(&self) -> [f64; 3] {
        [self.red, self.green, self.blue]
    }
}

impl From<(u8, u8, u8)> for RgbTriple {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r.into(), g.into(), b.into())
    }
}

impl From<[u8; 3]> for RgbTriple {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r.into(), g.into(), b.into())
    }
}

impl From<[f64; 3]> for RgbTriple {
    fn from([r, g, b]: [f64; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<&ColorEntry> for RgbTriple {
    fn from(entry: &ColorEntry) -> Self {
        entry.rgb().into()
    }
}
