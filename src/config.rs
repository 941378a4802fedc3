//! Configuration for the pixel inspector.
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use pixel_inspector::InspectorConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = InspectorConfig::from_json_file(Path::new("inspector.json"))?;
//!
//! // Or use defaults
//! let config = InspectorConfig::default();
//! # Ok::<(), pixel_inspector::InspectorError>(())
//! ```
//!
//! Missing fields fall back to their defaults, so a config file only needs
//! the settings it changes. Command-line flags override file values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::{ColorMatcher, DistanceMetric};
use crate::constants::table::DEFAULT_COLORS_FILE;
use crate::error::{InspectorError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Reference color CSV
    pub colors_path: PathBuf,

    /// Distance used to pick the closest color
    pub metric: DistanceMetric,

    /// Print the report as JSON instead of the text summary
    pub json_output: bool,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            colors_path: PathBuf::from(DEFAULT_COLORS_FILE),
            metric: DistanceMetric::Rgb,
            json_output: false,
        }
    }
}

impl InspectorConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            InspectorError::config(format!("Failed to read {}", path.display()), e)
        })?;
        serde_json::from_str(&content).map_err(|e| {
            InspectorError::config(format!("Failed to parse {}", path.display()), e)
        })
    }

    /// Load from `path` when given, otherwise start from defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_json_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line flags on top of file values
    ///
    /// `json` can only switch JSON output on; a config file asking for JSON
    /// keeps it even without the flag.
    pub fn with_overrides(
        mut self,
        colors_path: Option<PathBuf>,
        metric: Option<DistanceMetric>,
        json: bool,
    ) -> Self {
        if let Some(colors_path) = colors_path {
            self.colors_path = colors_path;
        }
        if let Some(metric) = metric {
            self.metric = metric;
        }
        self.json_output |= json;
        self
    }

    /// Save configuration to JSON file, creating parent directories
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| InspectorError::config("Failed to serialize configuration", e))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                InspectorError::config(format!("Failed to create {}", parent.display()), e)
            })?;
        }
        std::fs::write(path, json).map_err(|e| {
            InspectorError::config(format!("Failed to write {}", path.display()), e)
        })
    }

    pub fn matcher(&self) -> ColorMatcher {
        ColorMatcher::new(self.metric)
    }
}
