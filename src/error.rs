//! Error types for the pixel_inspector library

use thiserror::Error;

/// Result type alias for pixel_inspector operations
pub type Result<T> = std::result::Result<T, InspectorError>;

/// Error types for table loading, image sampling and color matching
#[derive(Error, Debug)]
pub enum InspectorError {
    /// Reference color table is missing, unreadable or lacks required columns
    #[error("Failed to load color table: {message}")]
    TableLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Lookup attempted against a table with no entries
    #[error("Color table is empty")]
    EmptyTableError,

    /// Image file could not be opened or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Requested pixel lies outside the image
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} image")]
    CoordinateOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Hex color string is not six hex digits
    #[error("Invalid hex color: {value:?}")]
    InvalidHex { value: String },

    /// Configuration file could not be read or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Result could not be rendered for output
    #[error("Output error: {message}")]
    OutputError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl InspectorError {
    /// Create a table load error with context
    pub fn table_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::TableLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a table load error without an underlying cause
    pub fn malformed_table(message: impl Into<String>) -> Self {
        Self::TableLoadError {
            message: message.into(),
            source: None,
        }
    }

    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an output rendering error with context
    pub fn output<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::OutputError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if the caller can retry with different input.
    ///
    /// Table and configuration failures are fatal for the whole feature.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            InspectorError::CoordinateOutOfBounds { .. } | InspectorError::InvalidHex { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            InspectorError::TableLoadError { .. } => {
                "Could not load the reference colors. Check that the CSV exists and has name, red, green and blue columns.".to_string()
            }
            InspectorError::EmptyTableError => {
                "The reference color table has no entries. Add at least one color and restart.".to_string()
            }
            InspectorError::ImageLoadError { .. } => {
                "Could not load the image. Please check the file format and try again.".to_string()
            }
            InspectorError::CoordinateOutOfBounds { width, height, .. } => {
                format!(
                    "Pick a pixel with x below {} and y below {}.",
                    width, height
                )
            }
            InspectorError::InvalidHex { .. } => {
                "Hex colors must be six hex digits, optionally prefixed with '#'.".to_string()
            }
            InspectorError::ConfigError { .. } => {
                "Could not read or write the configuration file.".to_string()
            }
            InspectorError::OutputError { .. } => {
                "Could not format the result for display.".to_string()
            }
        }
    }
}
