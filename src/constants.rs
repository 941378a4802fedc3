//! Fixed values shared by the table loader, matcher and report rendering

/// Reference color table layout
pub mod table {
    /// File looked up when neither the CLI nor the config names one
    pub const DEFAULT_COLORS_FILE: &str = "colors.csv";

    /// Header names every reference file must carry (case-insensitive)
    pub const NAME_COLUMN: &str = "name";
    pub const RED_COLUMN: &str = "red";
    pub const GREEN_COLUMN: &str = "green";
    pub const BLUE_COLUMN: &str = "blue";

    pub const REQUIRED_COLUMNS: [&str; 4] = [NAME_COLUMN, RED_COLUMN, GREEN_COLUMN, BLUE_COLUMN];
}

/// 8-bit channel range
pub mod channel {
    pub const MIN: i64 = 0;
    pub const MAX: i64 = 255;
    pub const MAX_F64: f64 = 255.0;
}

/// Presentation settings
pub mod display {
    /// Decimal places shown for match distances
    pub const DISTANCE_DECIMALS: usize = 1;

    /// Hex digits in a formatted color, two per channel
    pub const HEX_DIGITS: usize = 6;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_range() {
        assert!(channel::MIN < channel::MAX);
        assert_eq!(channel::MAX as f64, channel::MAX_F64);
    }

    #[test]
    fn test_required_columns_are_lowercase() {
        for column in table::REQUIRED_COLUMNS {
            assert_eq!(column, column.to_lowercase());
        }
    }
}
