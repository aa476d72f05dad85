//! Shared types passed between the normalizer, the renderers, and the CLI.
//!
//! A [`Shop`] is built once per run by [`crate::normalize`] and never mutated
//! afterwards. It serializes to JSON for the `manifest` command.

use crate::generate::STORES_DIR;
use serde::Serialize;

/// One normalized business record.
///
/// `name` and `map_reference` are always non-empty: rows missing either are
/// dropped before a `Shop` is ever constructed. The remaining text fields may
/// be empty, and renderers substitute a localized placeholder for them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shop {
    pub name: String,
    /// External map link; also the join key into the image lookup.
    pub map_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u64>,
    pub category: String,
    pub address: String,
    pub status: String,
    pub hours: String,
    pub website: String,
    pub phone: String,
    /// Non-empty feature tags in source column order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Unique within a run; the detail page lives at `stores/<slug>/`.
    pub slug: String,
}

impl Shop {
    /// Relative URL of the detail page as seen from the site root.
    pub fn page_path(&self) -> String {
        format!("{STORES_DIR}/{}/", self.slug)
    }

    /// Lowercased haystack used by the client-side filter script.
    pub fn search_text(&self) -> String {
        [
            self.name.as_str(),
            self.category.as_str(),
            self.address.as_str(),
            self.status.as_str(),
        ]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }
}
