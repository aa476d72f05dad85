//! Shared test utilities.
//!
//! Fixture setup, listing writers, and lookup helpers that panic with a clear
//! message instead of an opaque `unwrap` on `None`.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let collected = collect(tmp.path()).unwrap();
//!
//! let shop = find_shop(&collected.shops, "aroma-pets");
//! assert_eq!(shop.rating, Some(4.8));
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::ColumnMap;
use crate::types::Shop;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/data/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/data");
    for entry in std::fs::read_dir(&fixtures).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), tmp.path().join(entry.file_name())).unwrap();
    }
    tmp
}

/// Write a minimal `listing.csv` into `dir` using the default column names.
///
/// Each tuple is `(name, map_reference, rating, review_count)`; every other
/// column is left empty.
pub fn write_listing(dir: &Path, rows: &[(&str, &str, &str, &str)]) {
    let columns = ColumnMap::default();
    let mut writer = csv::Writer::from_path(dir.join("listing.csv")).unwrap();
    writer
        .write_record([
            columns.name.as_str(),
            columns.map_reference.as_str(),
            columns.rating.as_str(),
            columns.review_count.as_str(),
            columns.address.as_str(),
        ])
        .unwrap();
    for (name, map_reference, rating, review_count) in rows {
        writer
            .write_record([*name, *map_reference, *rating, *review_count, ""])
            .unwrap();
    }
    writer.flush().unwrap();
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a shop by slug. Panics if not found.
pub fn find_shop<'a>(shops: &'a [Shop], slug: &str) -> &'a Shop {
    shops.iter().find(|s| s.slug == slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = shops.iter().map(|s| s.slug.as_str()).collect();
        panic!("shop '{slug}' not found. Available: {slugs:?}")
    })
}

/// Slugs in order.
pub fn slugs(shops: &[Shop]) -> Vec<&str> {
    shops.iter().map(|s| s.slug.as_str()).collect()
}
