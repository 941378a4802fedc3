//! Reference color table loading
//!
//! The table is read once from a CSV file with a header row carrying at
//! least `name`, `red`, `green` and `blue` columns. Header names are matched
//! case-insensitively, column order is free and extra columns are ignored.
//! After loading the table is immutable; [`TableCache`] keeps a single
//! shared copy for the lifetime of the process until explicitly invalidated.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use crate::color::ColorEntry;
use crate::constants::table::REQUIRED_COLUMNS;
use crate::error::{InspectorError, Result};

/// One CSV row before clamping
#[derive(Debug, Deserialize)]
struct TableRow {
    name: String,
    red: i64,
    green: i64,
    blue: i64,
}

/// Ordered, immutable collection of reference colors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    entries: Vec<ColorEntry>,
}

impl ColorTable {
    pub fn new(entries: Vec<ColorEntry>) -> Self {
        Self { entries }
    }

    /// Parse a table from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let headers: StringRecord = csv_reader
            .headers()
            .map_err(|e| InspectorError::table_load("Failed to read header row", e))?
            .iter()
            .map(str::to_lowercase)
            .collect();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|header| header == *column))
            .collect();
        if !missing.is_empty() {
            return Err(InspectorError::malformed_table(format!(
                "missing required columns: {}",
                missing.join(", ")
            )));
        }

        let mut entries = Vec::new();
        for (index, record) in csv_reader.records().enumerate() {
            // Row numbers are 1-based and count the header
            let line = index + 2;
            let record = record
                .map_err(|e| InspectorError::table_load(format!("Failed to read row {}", line), e))?;
            let row: TableRow = record
                .deserialize(Some(&headers))
                .map_err(|e| InspectorError::table_load(format!("Malformed row {}", line), e))?;

            if row.name.is_empty() {
                return Err(InspectorError::malformed_table(format!(
                    "row {} has an empty name",
                    line
                )));
            }

            entries.push(ColorEntry::from_channels(row.name, row.red, row.green, row.blue));
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fail with [`InspectorError::EmptyTableError`] if there is nothing to match against.
    ///
    /// Callers should run this once after loading rather than discover it on
    /// the first lookup.
    pub fn ensure_non_empty(&self) -> Result<()> {
        if self.is_empty() {
            Err(InspectorError::EmptyTableError)
        } else {
            Ok(())
        }
    }
}

impl FromIterator<ColorEntry> for ColorTable {
    fn from_iter<I: IntoIterator<Item = ColorEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ColorTable {
    type Item = &'a ColorEntry;
    type IntoIter = std::slice::Iter<'a, ColorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Load the reference color table from a CSV file
///
/// # Errors
///
/// Returns `InspectorError::TableLoadError` if:
/// - The file cannot be opened
/// - The header lacks any of `name`, `red`, `green`, `blue`
/// - A row has a non-integer channel or an empty name
pub fn load_table(path: &Path) -> Result<ColorTable> {
    let file = File::open(path).map_err(|e| {
        InspectorError::table_load(format!("Failed to open {}", path.display()), e)
    })?;

    let table = ColorTable::from_reader(file).map_err(|e| match e {
        InspectorError::TableLoadError { message, source } => InspectorError::TableLoadError {
            message: format!("{}: {}", path.display(), message),
            source,
        },
        other => other,
    })?;

    info!(path = %path.display(), entries = table.len(), "loaded color table");
    Ok(table)
}

/// Process-wide holder for the loaded table.
///
/// The first [`get_or_load`](Self::get_or_load) reads the file; later calls
/// hand out the same `Arc` (whatever path they pass) until
/// [`invalidate`](Self::invalidate) clears it.
#[derive(Debug, Default)]
pub struct TableCache {
    table: RwLock<Option<Arc<ColorTable>>>,
}

impl TableCache {
    pub const fn new() -> Self {
        Self {
            table: RwLock::new(None),
        }
    }

    pub fn get_or_load(&self, path: &Path) -> Result<Arc<ColorTable>> {
        let cached = self
            .table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(table) = cached {
            return Ok(table);
        }

        let mut slot = self.table.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have loaded it while we waited for the lock
        if let Some(table) = slot.as_ref() {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(load_table(path)?);
        *slot = Some(Arc::clone(&table));
        Ok(table)
    }

    pub fn is_loaded(&self) -> bool {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn invalidate(&self) {
        debug!("invalidating cached color table");
        *self.table.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
