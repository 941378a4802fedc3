//! Integration tests for the load-table / decode-image / inspect-pixel workflow
//!
//! These tests write their CSV and image fixtures into temporary
//! directories and exercise the public API end to end:
//! - Reference table loading and validation
//! - Nearest color scenarios and tie-breaking
//! - Image decoding and pixel inspection
//! - Table cache lifecycle

use image::{Rgb, RgbImage};
use pixel_inspector::color::{load_table, parse_hex, to_hex, TableCache};
use pixel_inspector::image_loader::{center_of, load_image};
use pixel_inspector::{
    find_closest, inspect_pixel, ColorEntry, ColorMatcher, ColorTable, DistanceMetric,
    InspectorError, PixelReport,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn table(entries: &[(&str, u8, u8, u8)]) -> ColorTable {
    entries
        .iter()
        .map(|&(name, r, g, b)| ColorEntry::new(name, r, g, b))
        .collect()
}

// ============================================================================
// Table Loading Tests
// ============================================================================

#[test]
fn test_load_table_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "colors.csv",
        "name,hex,red,green,blue\nForest Green,#228b22,34,139,34\nGold,#ffd700,255,215,0\n",
    );

    let table = load_table(&path).unwrap();

    assert_eq!(
        table.entries(),
        &[
            ColorEntry::new("Forest Green", 34, 139, 34),
            ColorEntry::new("Gold", 255, 215, 0),
        ]
    );
}

#[test]
fn test_load_table_missing_file() {
    let err = load_table(Path::new("nonexistent_colors.csv")).unwrap_err();

    match err {
        InspectorError::TableLoadError { .. } => {}
        other => panic!("Expected TableLoadError, got: {:?}", other),
    }
}

#[test]
fn test_load_table_missing_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "colors.csv", "color,r,g,b\nRed,255,0,0\n");

    let err = load_table(&path).unwrap_err();
    let message = err.to_string();

    assert!(matches!(err, InspectorError::TableLoadError { .. }));
    assert!(message.contains("colors.csv"), "{}", message);
    assert!(message.contains("name"), "{}", message);
}

#[test]
fn test_load_table_ragged_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "colors.csv", "name,red,green,blue\nRed,255,0\n");

    assert!(matches!(
        load_table(&path),
        Err(InspectorError::TableLoadError { .. })
    ));
}

#[test]
fn test_bundled_palette_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("colors.csv");
    let table = load_table(&path).unwrap();

    assert!(!table.is_empty());
    for entry in &table {
        let found = find_closest(entry, &table).unwrap();
        assert_eq!(found.distance, 0.0, "{} should match exactly", entry.name);
    }
}

// ============================================================================
// Matching Scenarios
// ============================================================================

#[test]
fn test_scenario_pure_red() {
    let table = table(&[("Pure Red", 255, 0, 0), ("Pure Blue", 0, 0, 255)]);
    let found = find_closest((250, 10, 5), &table).unwrap();

    assert_eq!(found.entry.name, "Pure Red");
    assert!((found.distance - 12.247).abs() < 1e-3);
}

#[test]
fn test_scenario_black() {
    let table = table(&[("Black", 0, 0, 0)]);
    let found = find_closest((0, 0, 0), &table).unwrap();

    assert_eq!(found.entry.name, "Black");
    assert_eq!(found.distance, 0.0);
}

#[test]
fn test_scenario_empty_table() {
    let empty = ColorTable::default();
    let result = find_closest((0, 0, 0), &empty);

    assert!(matches!(result, Err(InspectorError::EmptyTableError)));
}

#[test]
fn test_scenario_white_over_near_white() {
    let table = table(&[("White", 255, 255, 255), ("Near-White", 250, 250, 250)]);
    let found = find_closest((255, 255, 255), &table).unwrap();

    assert_eq!(found.entry.name, "White");
    assert_eq!(found.distance, 0.0);
}

#[test]
fn test_tie_break_first_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "colors.csv",
        "name,red,green,blue\nUpper,100,0,0\nLower,0,0,0\n",
    );
    let table = load_table(&path).unwrap();

    let found = find_closest((50, 0, 0), &table).unwrap();
    assert_eq!(found.entry.name, "Upper");
    assert_eq!(found.distance, 50.0);
}

#[test]
fn test_never_fails_on_non_empty_table() {
    let table = table(&[("Gray", 128, 128, 128)]);

    for target in [
        [0.0, 0.0, 0.0],
        [255.0, 255.0, 255.0],
        [-1000.0, 12.5, 3e6],
        [127.9, 128.1, 128.0],
    ] {
        let found = find_closest(target, &table).unwrap();
        assert_eq!(found.entry.name, "Gray");
        assert!(found.distance >= 0.0);
    }
}

#[test]
fn test_hex_round_trip_corners() {
    for (r, g, b) in [(0, 0, 0), (255, 255, 255), (255, 0, 17), (1, 16, 254)] {
        let hex = to_hex(r, g, b);
        assert_eq!(hex.len(), 6);
        assert_eq!(hex, hex.to_lowercase());
        assert_eq!(parse_hex(&hex).unwrap(), (r, g, b));
    }
}

// ============================================================================
// Image Inspection Tests
// ============================================================================

#[test]
fn test_inspect_png_file() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("swatch.png");

    // Left half forest green, right half gold
    let image = RgbImage::from_fn(8, 4, |x, _| {
        if x < 4 {
            Rgb([30, 140, 40])
        } else {
            Rgb([250, 210, 10])
        }
    });
    image.save(&image_path).unwrap();

    let palette = table(&[
        ("Black", 0, 0, 0),
        ("Forest Green", 34, 139, 34),
        ("Gold", 255, 215, 0),
    ]);
    let decoded = load_image(&image_path).unwrap();
    assert_eq!(decoded.dimensions(), (8, 4));

    let matcher = ColorMatcher::default();
    let left = inspect_pixel(&decoded, 1, 1, &palette, &matcher).unwrap();
    assert_eq!(left.closest.name, "Forest Green");
    assert_eq!(left.hex, "1e8c28");

    let (cx, cy) = center_of(&decoded);
    let center = inspect_pixel(&decoded, cx, cy, &palette, &matcher).unwrap();
    assert_eq!((center.x, center.y), (4, 2));
    assert_eq!(center.closest.name, "Gold");
    assert_eq!(center.rgb, [250, 210, 10]);
}

#[test]
fn test_inspect_out_of_bounds() {
    let image = RgbImage::new(3, 2);
    let palette = table(&[("Black", 0, 0, 0)]);

    let err = inspect_pixel(&image, 0, 2, &palette, &ColorMatcher::default()).unwrap_err();

    assert!(err.is_recoverable());
    assert!(matches!(
        err,
        InspectorError::CoordinateOutOfBounds {
            x: 0,
            y: 2,
            width: 3,
            height: 2
        }
    ));
}

#[test]
fn test_lab_metric_report() {
    let image = RgbImage::from_pixel(1, 1, Rgb([20, 20, 22]));
    let palette = table(&[("White", 255, 255, 255), ("Black", 0, 0, 0)]);

    let report = inspect_pixel(
        &image,
        0,
        0,
        &palette,
        &ColorMatcher::new(DistanceMetric::Lab),
    )
    .unwrap();

    assert_eq!(report.closest.name, "Black");
    assert_eq!(report.metric, DistanceMetric::Lab);
    assert!(report.lab.l < 10.0);
}

#[test]
fn test_report_json_fields() {
    let image = RgbImage::from_pixel(1, 1, Rgb([255, 0, 17]));
    let palette = table(&[("Red", 255, 0, 0)]);
    let report = inspect_pixel(&image, 0, 0, &palette, &ColorMatcher::default()).unwrap();

    let json = serde_json::to_string(&report).unwrap();
    for field in ["\"rgb\"", "\"hex\":\"ff0011\"", "\"lab\"", "\"closest\"", "\"distance\""] {
        assert!(json.contains(field), "missing {} in {}", field, json);
    }

    let deserialized: PixelReport = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.closest, report.closest);
    assert_eq!(deserialized.distance, 17.0);
}

// ============================================================================
// Table Cache Tests
// ============================================================================

#[test]
fn test_cache_loads_once_until_invalidated() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_file(&dir, "first.csv", "name,red,green,blue\nBlack,0,0,0\n");
    let second = write_file(&dir, "second.csv", "name,red,green,blue\nWhite,255,255,255\n");

    let cache = TableCache::new();
    assert!(!cache.is_loaded());

    let loaded = cache.get_or_load(&first).unwrap();
    let again = cache.get_or_load(&second).unwrap();
    assert!(Arc::ptr_eq(&loaded, &again));
    assert_eq!(again.entries()[0].name, "Black");

    cache.invalidate();
    assert!(!cache.is_loaded());

    let reloaded = cache.get_or_load(&second).unwrap();
    assert_eq!(reloaded.entries()[0].name, "White");
}

#[test]
fn test_cache_load_failure_leaves_cache_empty() {
    let cache = TableCache::new();

    assert!(cache.get_or_load(Path::new("missing.csv")).is_err());
    assert!(!cache.is_loaded());
}

#[test]
fn test_cache_shared_across_threads() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "colors.csv", "name,red,green,blue\nNavy,0,0,128\n");
    let cache = Arc::new(TableCache::new());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let path = path.clone();
            std::thread::spawn(move || {
                let table = cache.get_or_load(&path).unwrap();
                let name = find_closest((0, 0, 120), &table).unwrap().entry.name.clone();
                name
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "Navy");
    }
}
