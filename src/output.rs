//! CLI output formatting for the collect and generate stages.
//!
//! # Information-First Display
//!
//! Every shop is shown by its positional index and name, with secondary
//! details (rating, address, page path) as indented context lines. The output
//! reads as an inventory of the directory, not a list of files.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Shops
//! 001 Aroma Pets
//!     Slug: aroma-pets
//!     Rating: 4.8 (12 reviews)
//!     Address: 12 Harbour Rd
//!     Image: https://images.example/aroma-north.jpg
//! 002 Aroma Pets
//!     Slug: aroma-pets-2
//!     Rating: No rating yet
//!
//! Rows
//!     7 read, 5 kept
//!     1 skipped: no name
//!     1 skipped: no map link
//!     3 image mappings
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → docs/index.html
//! 001 Aroma Pets → stores/aroma-pets/index.html
//! 002 Aroma Pets → stores/aroma-pets-2/index.html
//!
//! Assets → assets/style.css, assets/filter.js
//! 1 of 2 pages with an image, 1 category
//!
//! Generated 2 shop pages.
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::generate::{self, ASSETS_DIR, GenerateReport};
use crate::labels::Labels;
use crate::pipeline::Collected;
use crate::types::Shop;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `"1 category"` / `"3 categories"`.
fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// The final line of every successful build.
pub fn summary_line(detail_pages: usize) -> String {
    format!("Generated {} shop pages.", detail_pages)
}

// ============================================================================
// Check output
// ============================================================================

/// Format the collected records and skip counts.
pub fn format_check_output(collected: &Collected) -> Vec<String> {
    let labels = Labels::for_language(collected.config.site.language);
    let ctx = indent(1);
    let mut lines = vec!["Shops".to_string()];

    for (i, shop) in collected.shops.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), shop.name));
        lines.push(format!("{ctx}Slug: {}", shop.slug));
        lines.push(format!(
            "{ctx}Rating: {}",
            generate::rating_summary(shop, labels)
        ));
        if !shop.address.is_empty() {
            lines.push(format!("{ctx}Address: {}", shop.address));
        }
        if let Some(url) = &shop.image_url {
            lines.push(format!("{ctx}Image: {url}"));
        }
    }
    if collected.shops.is_empty() {
        lines.push(format!("{ctx}(none)"));
    }

    let stats = &collected.stats;
    lines.push(String::new());
    lines.push("Rows".to_string());
    lines.push(format!("{ctx}{} read, {} kept", stats.rows, stats.kept));
    if stats.skipped_missing_name > 0 {
        lines.push(format!("{ctx}{} skipped: no name", stats.skipped_missing_name));
    }
    if stats.skipped_missing_map > 0 {
        lines.push(format!(
            "{ctx}{} skipped: no map link",
            stats.skipped_missing_map
        ));
    }
    lines.push(format!(
        "{ctx}{}",
        plural(collected.image_entries, "image mapping", "image mappings")
    ));

    lines
}

pub fn print_check_output(collected: &Collected) {
    for line in format_check_output(collected) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format the pages a generate run wrote, ending with the summary line.
pub fn format_generate_output(shops: &[Shop], report: &GenerateReport) -> Vec<String> {
    let mut lines = vec![format!("Home → {}", report.index_path.display())];

    for (i, shop) in shops.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}index.html",
            format_index(i + 1),
            shop.name,
            shop.page_path()
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Assets → {ASSETS_DIR}/style.css, {ASSETS_DIR}/filter.js"
    ));
    lines.push(format!(
        "{} of {} with an image, {}",
        report.with_image,
        plural(report.detail_pages, "page", "pages"),
        plural(report.categories, "category", "categories")
    ));
    lines.push(String::new());
    lines.push(summary_line(report.detail_pages));

    lines
}

pub fn print_generate_output(shops: &[Shop], report: &GenerateReport) {
    for line in format_generate_output(shops, report) {
        println!("{}", line);
    }
}
