//! Color model, reference table and nearest-color matching
//!
//! This module holds the named reference colors, the CSV table loader,
//! hex/Lab conversions and the nearest-color matcher.

pub mod conversion;
pub mod entry;
pub mod matcher;
pub mod table;

pub use conversion::{parse_hex, to_hex};
pub use entry::{ColorEntry, RgbTriple};
pub use matcher::{find_closest, rgb_distance, ColorMatch, ColorMatcher, DistanceMetric};
pub use table::{load_table, ColorTable, TableCache};
