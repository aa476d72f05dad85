//! End-to-end build: source directory → normalized shops → static site.
//!
//! ```text
//! 1. Collect   data/config.toml + listing.csv + images.csv  →  Vec<Shop>
//! 2. Generate  Vec<Shop>                                    →  docs/
//! ```
//!
//! The CLI runs the two steps separately so it can report between them and
//! size the rayon pool from config; [`build`] runs both for library callers.

use crate::config::{self, SiteConfig};
use crate::generate::{self, GenerateError, GenerateReport};
use crate::images::ImageLookup;
use crate::load;
use crate::normalize::{self, NormalizeStats};
use crate::types::Shop;
use std::path::Path;

/// Everything read from a source directory.
#[derive(Debug, Clone)]
pub struct Collected {
    pub config: SiteConfig,
    pub shops: Vec<Shop>,
    pub stats: NormalizeStats,
    /// Entries in the image lookup (distinct map references with an image).
    pub image_entries: usize,
}

/// Load config and both CSVs from `source` and normalize the listing.
pub fn collect(source: &Path) -> Result<Collected, GenerateError> {
    let config = config::load_config(source)?;

    let listing_rows = load::load_rows(&source.join(&config.input.listing))?;
    let image_rows = load::load_optional_rows(&source.join(&config.input.images))?;
    let images = ImageLookup::from_rows(&image_rows, &config.image_columns);

    let (shops, stats) =
        normalize::normalize_with_stats(&listing_rows, &config.columns, &images);
    tracing::info!(
        rows = stats.rows,
        kept = stats.kept,
        skipped = stats.skipped(),
        images = images.len(),
        "normalized listing"
    );

    Ok(Collected {
        config,
        shops,
        stats,
        image_entries: images.len(),
    })
}

/// Collect from `source` and write the site into `output`.
pub fn build(source: &Path, output: &Path) -> Result<(Collected, GenerateReport), GenerateError> {
    let collected = collect(source)?;
    let report = generate::generate(&collected.shops, &collected.config, output)?;
    Ok((collected, report))
}
