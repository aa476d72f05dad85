//! # Shop Directory
//!
//! A static site generator for local business directories. The input is a
//! scraped map export (one CSV row per business) plus an optional CSV that
//! maps each business's map link to a photo. The output is a plain HTML site:
//! a searchable index page and one detail page per business.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Collect   data/  →  Vec<Shop>   (config + CSVs → normalized records)
//! 2. Generate  shops  →  docs/       (final HTML site)
//! ```
//!
//! Collection is a single ordered pass: load rows, build the image lookup,
//! normalize each row through the configured column map, and allocate a unique
//! slug per kept row. Generation is a pure function of the records and config;
//! detail pages are independent and written in parallel.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | Runs collect → generate for a source directory |
//! | [`load`] | CSV reading into header-keyed rows; missing-file policy |
//! | [`images`] | Map reference → image URL lookup |
//! | [`normalize`] | Rows → [`types::Shop`] records, with numeric parsing and row skipping |
//! | [`slug`] | URL-safe slugs and the per-run uniqueness allocator |
//! | [`generate`] | Renders index and detail pages with Maud and writes the site |
//! | [`labels`] | Localized UI copy (English, Traditional Chinese) |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | The `Shop` record shared by every stage |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Column Map Over Hard-Coded Headers
//!
//! Map scrapers export obfuscated class names as headers (`qBF1Pd`,
//! `W4Efsd (3)`), and the layout shifts between scrapes. Every header the
//! normalizer reads comes from `[columns]` in config, with defaults matching
//! the common export. A new export layout is a config change, not a code
//! change.
//!
//! ## Degrade, Don't Fail
//!
//! Scraped data is messy. A row missing its name or map link is skipped; a
//! rating that doesn't parse becomes "no rating"; an empty field renders a
//! placeholder. Only a missing listing file or an invalid config stops the
//! build.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), so every value
//! pulled from the CSV is escaped by construction. Business names routinely
//! contain `&`, quotes, and the occasional angle bracket.
//!
//! ## Relative Links Only
//!
//! The site is meant to be dropped into a GitHub Pages `docs/` folder or opened
//! from disk. No page assumes it is served from the domain root.

pub mod config;
pub mod generate;
pub mod images;
pub mod labels;
pub mod load;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod slug;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
