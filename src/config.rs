//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file (if any) is merged on top,
//! so a config file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! Place `config.toml` next to the input CSVs:
//!
//! ```text
//! data/
//! ├── config.toml      # Optional site config
//! ├── listing.csv      # Primary listing (required)
//! └── images.csv       # map reference → image URL (optional)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Shop Directory"
//! heading = "Local shop directory"
//! intro = "Every shop has its own page ..."   # Markdown
//! language = "en"             # "en" or "zh-Hant"
//! sort_by_name = false        # Keep listing order unless true
//! source_note = ""            # Appended to the footer
//!
//! [input]
//! listing = "listing.csv"
//! images = "images.csv"
//!
//! [columns]
//! name = "qBF1Pd"
//! map_reference = "hfpxzc href"
//! rating = "MW4etd"
//! review_count = "UY7F9"
//! category = "W4Efsd"
//! address = "W4Efsd (3)"
//! status = "W4Efsd (4)"
//! hours = "W4Efsd (5)"
//! website = "lcr4fd href"
//! phone = "UsdlK"
//! features = ["ah5Ghc", "ah5Ghc (2)"]
//!
//! [image_columns]
//! map_reference = "hfpxzc href"
//! image_url = "aoRNLd src"
//!
//! [colors]
//! background = "#0b132b"
//! panel = "#1c2541"
//! accent = "#5bc0be"
//! accent_muted = "#3a506b"
//! text = "#f6f8ff"
//! text_muted = "#b8c1ec"
//!
//! [processing]
//! max_processes = 4         # Max parallel page writers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Upper bound on configured feature-tag columns.
pub const MAX_FEATURE_COLUMNS: usize = 8;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults matching the scraped Google Maps export the tool
/// was built for. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page titles, intro copy, and display options.
    pub site: SiteInfo,
    /// Input file names, relative to the source directory.
    pub input: InputConfig,
    /// Which listing columns feed which `Shop` fields.
    pub columns: ColumnMap,
    /// Which image-mapping columns hold the join key and the image URL.
    pub image_columns: ImageColumns,
    /// Palette emitted as CSS custom properties.
    pub colors: ColorConfig,
    /// Parallel page-writing settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.listing.trim().is_empty() {
            return Err(ConfigError::Validation(
                "input.listing must not be empty".into(),
            ));
        }
        if self.input.images.trim().is_empty() {
            return Err(ConfigError::Validation(
                "input.images must not be empty".into(),
            ));
        }
        for (key, value) in self.columns.named_columns() {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "columns.{key} must not be empty"
                )));
            }
        }
        if self.columns.features.len() > MAX_FEATURE_COLUMNS {
            return Err(ConfigError::Validation(format!(
                "columns.features allows at most {MAX_FEATURE_COLUMNS} columns"
            )));
        }
        if self.columns.features.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "columns.features entries must not be empty".into(),
            ));
        }
        if self.image_columns.map_reference.trim().is_empty()
            || self.image_columns.image_url.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "image_columns values must not be empty".into(),
            ));
        }
        if let Some(key) = self.colors.first_empty() {
            return Err(ConfigError::Validation(format!(
                "colors.{key} must not be empty"
            )));
        }
        Ok(())
    }
}

/// UI language for all generated copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh-Hant")]
    TraditionalChinese,
}

impl Language {
    /// Value for the `<html lang>` attribute.
    pub fn html_lang(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::TraditionalChinese => "zh-Hant",
        }
    }
}

/// Page titles, intro copy, and display options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// `<title>` of the index page; detail pages use `"<shop> | <title>"`.
    pub title: String,
    /// Main heading on the index page.
    pub heading: String,
    /// Markdown shown under the heading on the index page.
    pub intro: String,
    pub language: Language,
    /// Sort index cards by shop name instead of listing order.
    pub sort_by_name: bool,
    /// Free text appended to page footers (e.g. data provenance).
    pub source_note: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Shop Directory".to_string(),
            heading: "Local shop directory".to_string(),
            intro: "Every shop has its own page with ratings, address, \
                    opening status and a map link."
                .to_string(),
            language: Language::English,
            sort_by_name: false,
            source_note: String::new(),
        }
    }
}

/// Input file names, resolved against the source directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Primary listing CSV. Required at build time.
    pub listing: String,
    /// Image-mapping CSV. Missing file means no images.
    pub images: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            listing: "listing.csv".to_string(),
            images: "images.csv".to_string(),
        }
    }
}

/// Column-mapping table for the primary listing.
///
/// Defaults are the obfuscated class names a Google Maps scrape produces.
/// `W4Efsd` appears several times in such exports; the `(N)` suffix is how
/// the exporter disambiguates repeats.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnMap {
    pub name: String,
    pub map_reference: String,
    pub rating: String,
    pub review_count: String,
    pub category: String,
    pub address: String,
    pub status: String,
    pub hours: String,
    pub website: String,
    pub phone: String,
    /// Feature-tag columns, in display order.
    pub features: Vec<String>,
}

impl ColumnMap {
    /// Every single-valued column paired with its config key.
    pub fn named_columns(&self) -> [(&'static str, &str); 10] {
        [
            ("name", self.name.as_str()),
            ("map_reference", self.map_reference.as_str()),
            ("rating", self.rating.as_str()),
            ("review_count", self.review_count.as_str()),
            ("category", self.category.as_str()),
            ("address", self.address.as_str()),
            ("status", self.status.as_str()),
            ("hours", self.hours.as_str()),
            ("website", self.website.as_str()),
            ("phone", self.phone.as_str()),
        ]
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            name: "qBF1Pd".to_string(),
            map_reference: "hfpxzc href".to_string(),
            rating: "MW4etd".to_string(),
            review_count: "UY7F9".to_string(),
            category: "W4Efsd".to_string(),
            address: "W4Efsd (3)".to_string(),
            status: "W4Efsd (4)".to_string(),
            hours: "W4Efsd (5)".to_string(),
            website: "lcr4fd href".to_string(),
            phone: "UsdlK".to_string(),
            features: vec!["ah5Ghc".to_string(), "ah5Ghc (2)".to_string()],
        }
    }
}

/// Column-mapping table for the image CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageColumns {
    pub map_reference: String,
    pub image_url: String,
}

impl Default for ImageColumns {
    fn default() -> Self {
        Self {
            map_reference: "hfpxzc href".to_string(),
            image_url: "aoRNLd src".to_string(),
        }
    }
}

/// Site palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Page background.
    pub background: String,
    /// Cards and panels.
    pub panel: String,
    /// Links, primary buttons, chip borders.
    pub accent: String,
    /// Secondary buttons.
    pub accent_muted: String,
    /// Primary text color.
    pub text: String,
    /// Meta lines, footer, back link.
    pub text_muted: String,
}

impl ColorConfig {
    fn first_empty(&self) -> Option<&'static str> {
        [
            ("background", &self.background),
            ("panel", &self.panel),
            ("accent", &self.accent),
            ("accent_muted", &self.accent_muted),
            ("text", &self.text),
            ("text_muted", &self.text_muted),
        ]
        .into_iter()
        .find(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#0b132b".to_string(),
            panel: "#1c2541".to_string(),
            accent: "#5bc0be".to_string(),
            accent_muted: "#3a506b".to_string(),
            text: "#f6f8ff".to_string(),
            text_muted: "#b8c1ec".to_string(),
        }
    }
}

/// Parallel page-writing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel detail-page writers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, never less than one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so a
///   `features` list in the user file replaces the default list.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Shop Directory Configuration
# ============================
# Place this file next to your CSV exports as config.toml.
# All settings are optional. Remove or comment out any you don't need.

# ---------------------------------------------------------------------------
# Site copy and display
# ---------------------------------------------------------------------------
[site]
# <title> of the index page. Detail pages use "<shop name> | <title>".
title = "Shop Directory"

# Main heading on the index page.
heading = "Local shop directory"

# Markdown shown under the heading.
intro = "Every shop has its own page with ratings, address, opening status and a map link."

# UI language for labels and placeholders: "en" or "zh-Hant".
language = "en"

# Sort index cards by name. When false, the listing CSV order is kept.
sort_by_name = false

# Free text appended to every page footer, e.g. where the data came from.
source_note = ""

# ---------------------------------------------------------------------------
# Input files (relative to the source directory)
# ---------------------------------------------------------------------------
[input]
# Primary listing. The build fails if this file is missing.
listing = "listing.csv"

# Image mapping (map link -> image URL). Optional: missing means no images.
images = "images.csv"

# ---------------------------------------------------------------------------
# Listing columns: header name in listing.csv for each field
# ---------------------------------------------------------------------------
[columns]
name = "qBF1Pd"
map_reference = "hfpxzc href"
rating = "MW4etd"
review_count = "UY7F9"
category = "W4Efsd"
address = "W4Efsd (3)"
status = "W4Efsd (4)"
hours = "W4Efsd (5)"
website = "lcr4fd href"
phone = "UsdlK"
# Feature tags, shown as chips in this order. Up to 8 columns.
features = ["ah5Ghc", "ah5Ghc (2)"]

# ---------------------------------------------------------------------------
# Image-mapping columns
# ---------------------------------------------------------------------------
[image_columns]
map_reference = "hfpxzc href"
image_url = "aoRNLd src"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#0b132b"
panel = "#1c2541"
accent = "#5bc0be"
accent_muted = "#3a506b"    # Secondary buttons
text = "#f6f8ff"
text_muted = "#b8c1ec"      # Meta lines, footer, back link

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel detail-page writers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
  --bg: {background};
  --panel: {panel};
  --accent: {accent};
  --accent-2: {accent_muted};
  --text: {text};
  --muted: {text_muted};
}}"#,
        background = colors.background,
        panel = colors.panel,
        accent = colors.accent,
        accent_muted = colors.accent_muted,
        text = colors.text,
        text_muted = colors.text_muted,
    )
}
