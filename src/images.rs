//! Map reference → image URL lookup built from the image-mapping CSV.

use crate::config::ImageColumns;
use crate::load::Row;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ImageLookup {
    by_map_reference: HashMap<String, String>,
}

impl ImageLookup {
    /// Build the lookup from image-mapping rows.
    ///
    /// Rows missing either cell are ignored. When a map reference repeats,
    /// the last row wins.
    pub fn from_rows(rows: &[Row], columns: &ImageColumns) -> Self {
        let mut by_map_reference = HashMap::new();
        for row in rows {
            let map_reference = row.get(&columns.map_reference).trim();
            let image_url = row.get(&columns.image_url).trim();
            if !map_reference.is_empty() && !image_url.is_empty() {
                by_map_reference.insert(map_reference.to_string(), image_url.to_string());
            }
        }
        Self { by_map_reference }
    }

    pub fn get(&self, map_reference: &str) -> Option<&str> {
        self.by_map_reference.get(map_reference).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_map_reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_map_reference.is_empty()
    }
}
