//! Record normalization: listing rows → [`Shop`] records.
//!
//! One pass over the listing in input order. Each row is read through the
//! configured [`ColumnMap`], so the same code handles any export layout.
//!
//! ## Field Rules
//!
//! | Field | Rule |
//! |-------|------|
//! | name, map reference | trimmed; an empty value drops the whole row |
//! | rating | [`parse_rating`]: empty or non-numeric → `None` |
//! | review count | [`parse_review_count`]: `"(1,234)"` → `1234`, anything else → `None` |
//! | text fields | [`clean_field`]: trimmed, separator glyphs stripped at the edges |
//! | features | configured columns in order, cleaned, empties dropped |
//! | image | looked up by map reference |
//! | slug | from the run's [`SlugAllocator`] |
//!
//! Bad numeric fields degrade to `None`; they never fail the run.

use crate::config::ColumnMap;
use crate::images::ImageLookup;
use crate::load::Row;
use crate::slug::SlugAllocator;
use crate::types::Shop;
use serde::Serialize;

/// Separator glyphs scraped map listings put between inline fields
/// (e.g. `"· 123 Main St"`).
const SEPARATOR_GLYPHS: &[char] = &['\u{00B7}', '\u{22C5}', '\u{2022}', '\u{2027}'];

/// Counts from one normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    /// Rows seen.
    pub rows: usize,
    /// Rows that became a `Shop`.
    pub kept: usize,
    pub skipped_missing_name: usize,
    pub skipped_missing_map: usize,
}

impl NormalizeStats {
    pub fn skipped(&self) -> usize {
        self.skipped_missing_name + self.skipped_missing_map
    }
}

/// Parse a rating cell. Non-numeric input degrades to `None`.
pub fn parse_rating(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|r| r.is_finite())
}

/// Parse a review-count cell such as `"(1,234)"`.
pub fn parse_review_count(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .trim()
        .trim_matches(|c: char| c == '(' || c == ')')
        .chars()
        .filter(|&c| c != ',')
        .collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    cleaned.parse().ok()
}

/// Trim whitespace and separator glyphs from both ends of a text cell.
pub fn clean_field(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || SEPARATOR_GLYPHS.contains(&c))
        .to_string()
}

/// Normalize listing rows into shops, discarding the stats.
pub fn normalize(rows: &[Row], columns: &ColumnMap, images: &ImageLookup) -> Vec<Shop> {
    normalize_with_stats(rows, columns, images).0
}

/// Normalize listing rows into shops and report what was skipped.
pub fn normalize_with_stats(
    rows: &[Row],
    columns: &ColumnMap,
    images: &ImageLookup,
) -> (Vec<Shop>, NormalizeStats) {
    let mut slugs = SlugAllocator::new();
    let mut stats = NormalizeStats::default();
    let mut shops = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        stats.rows += 1;

        let name = row.get(&columns.name).trim();
        if name.is_empty() {
            tracing::debug!(row = index + 1, "skipping row without a name");
            stats.skipped_missing_name += 1;
            continue;
        }
        let map_reference = row.get(&columns.map_reference).trim();
        if map_reference.is_empty() {
            tracing::debug!(row = index + 1, name, "skipping row without a map reference");
            stats.skipped_missing_map += 1;
            continue;
        }

        let features = columns
            .features
            .iter()
            .map(|column| clean_field(row.get(column)))
            .filter(|tag| !tag.is_empty())
            .collect();

        shops.push(Shop {
            name: name.to_string(),
            map_reference: map_reference.to_string(),
            rating: parse_rating(row.get(&columns.rating)),
            review_count: parse_review_count(row.get(&columns.review_count)),
            category: clean_field(row.get(&columns.category)),
            address: clean_field(row.get(&columns.address)),
            status: clean_field(row.get(&columns.status)),
            hours: clean_field(row.get(&columns.hours)),
            website: clean_field(row.get(&columns.website)),
            phone: clean_field(row.get(&columns.phone)),
            features,
            image_url: images.get(map_reference).map(str::to_string),
            slug: slugs.allocate(name),
        });
        stats.kept += 1;
    }

    (shops, stats)
}

/// Display order for the index page.
///
/// Listing order by default; case-insensitive name order (stable, with slug
/// as tie-break) when `by_name` is set.
pub fn display_order(shops: &[Shop], by_name: bool) -> Vec<&Shop> {
    let mut ordered: Vec<&Shop> = shops.iter().collect();
    if by_name {
        ordered.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.slug.cmp(&b.slug))
        });
    }
    ordered
}
