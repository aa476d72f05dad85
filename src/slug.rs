//! URL-safe, run-unique identifiers derived from business names.
//!
//! Every shop gets a slug that becomes its output directory
//! (`stores/<slug>/index.html`). Slugs are derived from the display name:
//!
//! - `"Aroma Pets"` → `aroma-pets`
//! - `"Ｐｅｔ　Ｓｐａ"` (full-width) → `pet-spa` (NFKC folds width variants)
//! - `"毛孩美容 Salon"` → `毛孩美容-salon` (Unicode letters are kept)
//! - `"!!!"` → `shop` (nothing usable left)
//!
//! Base slugs are capped at [`MAX_SLUG_BYTES`] so a long name still fits in a
//! single path component once the allocator adds its suffix.
//!
//! ## Uniqueness
//!
//! [`SlugAllocator`] remembers every slug it has issued during one run. A
//! repeated candidate gets the first free numeric suffix starting at 2, so two
//! shops named "Aroma Pets" become `aroma-pets` and `aroma-pets-2` in input
//! order. The allocator is a plain value owned by the normalization pass; a
//! new run starts with a new allocator.

use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// Slug used when a name contains no alphanumeric characters at all.
pub const FALLBACK_SLUG: &str = "shop";

/// Byte budget for a base slug, before any `-N` suffix.
pub const MAX_SLUG_BYTES: usize = 80;

/// Derive the base slug for a name, without any uniqueness suffix.
pub fn slugify(name: &str) -> String {
    let normalized: String = name.nfkc().collect();
    let lowered = normalized.trim().to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut pending_dash = false;
    for c in lowered.chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_dash {
                slug.push('-');
                pending_dash = false;
            }
            slug.push(c);
        } else {
            // '-' and every disallowed run collapse into a single dash
            pending_dash = true;
        }
    }

    let trimmed = trim_separators(&slug);
    let trimmed = trim_separators(truncate_to_boundary(trimmed, MAX_SLUG_BYTES));
    if trimmed.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

fn trim_separators(slug: &str) -> &str {
    slug.trim_matches(|c: char| c == '-' || c == '_')
}

/// Longest prefix of `s` that fits in `max` bytes and ends on a char boundary.
fn truncate_to_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Issues unique slugs for one generation run.
#[derive(Debug, Default)]
pub struct SlugAllocator {
    issued: HashSet<String>,
}

impl SlugAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a slug for `name`, disambiguating against everything issued
    /// so far in this run.
    pub fn allocate(&mut self, name: &str) -> String {
        let base = slugify(name);
        let mut candidate = base.clone();
        let mut suffix = 2u32;
        while self.issued.contains(&candidate) {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }
        self.issued.insert(candidate.clone());
        candidate
    }
}
