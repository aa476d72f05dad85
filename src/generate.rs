//! HTML site generation.
//!
//! Final stage of the build. Takes the normalized shops and writes the static
//! site: one index page listing every shop and one detail page per shop.
//!
//! ## Output Structure
//!
//! ```text
//! docs/
//! ├── index.html                 # Searchable card grid of every shop
//! ├── assets/
//! │   ├── style.css              # Palette from config + compiled-in base styles
//! │   └── filter.js              # Client-side search and category filter
//! └── stores/
//!     ├── aroma-pets/
//!     │   └── index.html         # Detail page
//!     └── aroma-pets-2/
//!         └── index.html
//! ```
//!
//! `stores/` is removed and rebuilt on every run, so a shop that disappeared
//! from the listing never leaves a stale page behind.
//!
//! ## Links
//!
//! All links are relative, so the output works from any base path (GitHub
//! Pages project sites, a local `file://` open). The index links to
//! `assets/…` and `stores/<slug>/`; detail pages sit two levels down and use
//! `../../assets/…` and `../../index.html`.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Every interpolated value is escaped. The only raw markup is the compiled-in
//! assets and the `site.intro` markdown from config.

use crate::config::{self, ConfigError, SiteConfig};
use crate::labels::Labels;
use crate::load::LoadError;
use crate::normalize::display_order;
use crate::types::Shop;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/filter.js");

/// Directory (under the output root) holding the stylesheet and script.
pub const ASSETS_DIR: &str = "assets";
/// Directory (under the output root) holding one subdirectory per shop.
pub const STORES_DIR: &str = "stores";

/// What a [`generate`] run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub index_path: PathBuf,
    /// Number of `stores/<slug>/index.html` files written.
    pub detail_pages: usize,
    /// Shops whose detail page shows an image rather than the placeholder.
    pub with_image: usize,
    /// Distinct non-empty categories offered by the index filter.
    pub categories: usize,
}

/// Write the full site for `shops` into `output_dir`.
///
/// Assets and the index are written first; then the previous `stores/`
/// subtree is removed and every detail page is written in parallel on the
/// current rayon pool.
pub fn generate(
    shops: &[Shop],
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let assets_dir = output_dir.join(ASSETS_DIR);
    fs::create_dir_all(&assets_dir)?;

    // Generate CSS with colors from config
    let color_css = config::generate_color_css(&config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);
    fs::write(assets_dir.join("style.css"), css)?;
    fs::write(assets_dir.join("filter.js"), JS)?;

    let index_path = output_dir.join("index.html");
    fs::write(&index_path, render_index(shops, config).into_string())?;
    tracing::debug!(path = %index_path.display(), shops = shops.len(), "wrote index page");

    let stores_dir = output_dir.join(STORES_DIR);
    if stores_dir.exists() {
        fs::remove_dir_all(&stores_dir)?;
    }
    fs::create_dir_all(&stores_dir)?;

    shops.par_iter().try_for_each(|shop| -> std::io::Result<()> {
        let page_dir = stores_dir.join(&shop.slug);
        fs::create_dir_all(&page_dir)?;
        fs::write(
            page_dir.join("index.html"),
            render_detail(shop, config).into_string(),
        )?;
        tracing::debug!(slug = %shop.slug, "wrote detail page");
        Ok(())
    })?;

    Ok(GenerateReport {
        index_path,
        detail_pages: shops.len(),
        with_image: shops
            .iter()
            .filter(|s| s.image_url.as_deref().and_then(web_url).is_some())
            .count(),
        categories: categories(shops).len(),
    })
}

/// Sorted distinct non-empty categories.
fn categories(shops: &[Shop]) -> BTreeSet<&str> {
    shops
        .iter()
        .map(|s| s.category.as_str())
        .filter(|c| !c.is_empty())
        .collect()
}

/// One-line rating text: `4.8 (12 reviews)`, `4.8`, or the unrated label.
pub fn rating_summary(shop: &Shop, labels: &Labels) -> String {
    match (shop.rating, shop.review_count) {
        (None, _) => labels.unrated.to_string(),
        (Some(rating), Some(count)) => format!("{rating:.1} {}", labels.review_count(count)),
        (Some(rating), None) => format!("{rating:.1}"),
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

/// `raw` when it is an absolute `http`/`https` URL; anything else is never
/// emitted as a link target.
fn web_url(raw: &str) -> Option<&str> {
    let url = raw.trim();
    let scheme_end = url.find("://")?;
    let scheme = &url[..scheme_end];
    (scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")).then_some(url)
}

/// `tel:` target with whitespace removed.
fn tel_href(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    format!("tel:{digits}")
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure.
///
/// `root` is the relative path from the page back to the site root
/// (`""` for the index, `"../../"` for detail pages).
fn base_document(title: &str, config: &SiteConfig, root: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(config.site.language.html_lang()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href={ (root) (ASSETS_DIR) "/style.css" };
            }
            body {
                (content)
            }
        }
    }
}

/// Map, website, and phone buttons. Map and website only for web URLs,
/// phone only when present.
fn action_links(shop: &Shop, labels: &Labels, map_label: &str) -> Markup {
    html! {
        div.cta {
            @if let Some(map) = web_url(&shop.map_reference) {
                a.btn.secondary href=(map) target="_blank" rel="noopener" {
                    (map_label)
                }
            }
            @if let Some(website) = web_url(&shop.website) {
                a.btn href=(website) target="_blank" rel="noopener" {
                    (labels.website_link)
                }
            }
            @if !shop.phone.is_empty() {
                a.btn.secondary href=(tel_href(&shop.phone)) { (labels.call_link) }
            }
        }
    }
}

/// Image block, or an explicit placeholder block when the shop has no image.
fn image_block(shop: &Shop, labels: &Labels) -> Markup {
    html! {
        @if let Some(url) = shop.image_url.as_deref().and_then(web_url) {
            div.gallery {
                img src=(url) alt=(labels.image_alt(&shop.name)) loading="lazy";
            }
        } @else {
            div.gallery.placeholder { (labels.no_image) }
        }
    }
}

fn footer(lines: &[&str]) -> Markup {
    html! {
        footer.footer {
            @for line in lines.iter().filter(|l| !l.is_empty()) {
                p { (line) }
            }
        }
    }
}

/// One info-panel line; empty values show `placeholder`.
fn info_item(icon: &str, label: &str, value: &str, placeholder: &str) -> Markup {
    html! {
        li { (icon) " " span.label { (label) } (or_placeholder(value, placeholder)) }
    }
}

fn render_shop_card(shop: &Shop, labels: &Labels) -> Markup {
    html! {
        article.card data-card data-search=(shop.search_text()) data-category=(shop.category) {
            div.card__body {
                div.chip { (or_placeholder(&shop.category, labels.default_category)) }
                h2.card__title { (shop.name) }
                p.meta.rating { "⭐ " (rating_summary(shop, labels)) }
                p.meta.address {
                    "📍 " (or_placeholder(&shop.address, labels.address_not_provided))
                }
                div.cta {
                    a.btn href=(shop.page_path()) aria-label=(labels.view_shop_aria(&shop.name)) {
                        (labels.view_shop)
                    }
                    @if let Some(map) = web_url(&shop.map_reference) {
                        a.btn.secondary href=(map) target="_blank" rel="noopener" {
                            (labels.map_link)
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the index page: hero with search and category filter, one card
/// per shop, and a footer with the total count.
pub fn render_index(shops: &[Shop], config: &SiteConfig) -> Markup {
    let labels = Labels::for_language(config.site.language);

    let intro_html = if config.site.intro.trim().is_empty() {
        None
    } else {
        let parser = Parser::new(&config.site.intro);
        let mut out = String::new();
        md_html::push_html(&mut out, parser);
        Some(out)
    };
    let total = labels.total_shops(shops.len());

    let content = html! {
        main.page {
            section.hero {
                h1 { (config.site.heading) }
                @if let Some(intro) = &intro_html {
                    div.intro { (PreEscaped(intro)) }
                }
                div.controls {
                    label.search {
                        span role="img" aria-label=(labels.search_aria) { "🔍" }
                        input type="search"
                            placeholder=(labels.search_placeholder)
                            data-search-input;
                    }
                    label.search {
                        span role="img" aria-label=(labels.filter_aria) { "🎯" }
                        select data-category-filter {
                            option value="" { (labels.all_categories) }
                            @for category in categories(shops) {
                                option value=(category) { (category) }
                            }
                        }
                    }
                }
            }
            section.card-grid {
                @for shop in display_order(shops, config.site.sort_by_name) {
                    (render_shop_card(shop, labels))
                }
            }
            (footer(&[total.as_str(), config.site.source_note.as_str()]))
        }
        script src={ (ASSETS_DIR) "/filter.js" } {}
    };

    base_document(&config.site.title, config, "", content)
}

/// Renders one shop's detail page.
pub fn render_detail(shop: &Shop, config: &SiteConfig) -> Markup {
    let labels = Labels::for_language(config.site.language);
    let title = format!("{} | {}", shop.name, config.site.title);
    let root = "../../";

    let content = html! {
        main.page {
            a.back-link href={ (root) "index.html" } { "← " (labels.back_to_list) }
            section.hero {
                h1 { (shop.name) }
                p.category { (or_placeholder(&shop.category, labels.default_category)) }
                div.tag-row {
                    span.chip.rating { "⭐ " (rating_summary(shop, labels)) }
                    @if shop.features.is_empty() {
                        span.chip { (labels.default_category) }
                    } @else {
                        @for feature in &shop.features {
                            span.chip { (feature) }
                        }
                    }
                }
                (action_links(shop, labels, labels.map_link_long))
            }
            div.detail-grid {
                div.panel.info {
                    h2 { (labels.info_heading) }
                    ul.list {
                        (info_item("📍", labels.address_label, &shop.address, labels.not_provided))
                        (info_item("⌚", labels.status_label, &shop.status, labels.status_unknown))
                        (info_item("🗓️", labels.hours_label, &shop.hours, labels.not_provided))
                        (info_item("☎️", labels.phone_label, &shop.phone, labels.not_provided))
                        (info_item("🔗", labels.website_label, &shop.website, labels.not_provided))
                    }
                }
                div.panel.images {
                    h2 { (labels.image_heading) }
                    (image_block(shop, labels))
                }
            }
            div.panel.links {
                h2 { (labels.links_heading) }
                (action_links(shop, labels, labels.map_link))
            }
            (footer(&[config.site.source_note.as_str(), labels.generated_note]))
        }
    };

    base_document(&title, config, root, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;
    use tempfile::TempDir;

    fn test_shop(name: &str, slug: &str) -> Shop {
        Shop {
            name: name.to_string(),
            map_reference: format!("https://maps.example/{slug}"),
            rating: Some(4.8),
            review_count: Some(12),
            category: "Pet groomer".to_string(),
            address: "1 Main St".to_string(),
            status: "Open".to_string(),
            hours: "9-18".to_string(),
            website: "https://aroma.example".to_string(),
            phone: "04 1234 5678".to_string(),
            features: vec!["Cat friendly".to_string()],
            image_url: Some("https://img.example/a.jpg".to_string()),
            slug: slug.to_string(),
        }
    }

    fn bare_shop(name: &str, slug: &str) -> Shop {
        Shop {
            rating: None,
            review_count: None,
            category: String::new(),
            address: String::new(),
            status: String::new(),
            hours: String::new(),
            website: String::new(),
            phone: String::new(),
            features: Vec::new(),
            image_url: None,
            ..test_shop(name, slug)
        }
    }

    fn english() -> &'static Labels {
        Labels::for_language(Language::English)
    }

    // =========================================================================
    // rating_summary
    // =========================================================================

    #[test]
    fn rating_with_reviews() {
        let shop = test_shop("Aroma Pets", "aroma-pets");
        assert_eq!(rating_summary(&shop, english()), "4.8 (12 reviews)");
    }

    #[test]
    fn rating_single_review() {
        let shop = Shop {
            review_count: Some(1),
            rating: Some(5.0),
            ..test_shop("A", "a")
        };
        assert_eq!(rating_summary(&shop, english()), "5.0 (1 review)");
    }

    #[test]
    fn rating_without_review_count() {
        let shop = Shop {
            review_count: None,
            rating: Some(4.56),
            ..test_shop("A", "a")
        };
        assert_eq!(rating_summary(&shop, english()), "4.6");
    }

    #[test]
    fn unrated_uses_label() {
        let shop = bare_shop("A", "a");
        assert_eq!(rating_summary(&shop, english()), "No rating yet");
    }

    #[test]
    fn unrated_ignores_orphan_review_count() {
        let shop = Shop {
            review_count: Some(3),
            ..bare_shop("A", "a")
        };
        assert_eq!(rating_summary(&shop, english()), english().unrated);
    }

    // =========================================================================
    // render_index
    // =========================================================================

    #[test]
    fn index_lists_every_shop_with_relative_links() {
        let shops = vec![
            test_shop("Aroma Pets", "aroma-pets"),
            bare_shop("Aroma Pets", "aroma-pets-2"),
        ];
        let html = render_index(&shops, &SiteConfig::default()).into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"href="stores/aroma-pets/""#));
        assert!(html.contains(r#"href="stores/aroma-pets-2/""#));
        assert!(html.contains(r#"href="assets/style.css""#));
        assert!(html.contains(r#"src="assets/filter.js""#));
        assert!(html.contains("4.8 (12 reviews)"));
        assert!(html.contains("No rating yet"));
        assert!(html.contains("2 shops in total."));
        assert_eq!(html.matches("data-card").count(), 2);
    }

    #[test]
    fn index_card_carries_filter_data() {
        let shops = vec![test_shop("Aroma Pets", "aroma-pets")];
        let html = render_index(&shops, &SiteConfig::default()).into_string();
        assert!(html.contains(r#"data-search="aroma pets pet groomer 1 main st open""#));
        assert!(html.contains(r#"data-category="Pet groomer""#));
    }

    #[test]
    fn index_category_select_sorted_and_distinct() {
        let shops = vec![
            Shop {
                category: "Vet".to_string(),
                ..test_shop("A", "a")
            },
            Shop {
                category: "Groomer".to_string(),
                ..test_shop("B", "b")
            },
            Shop {
                category: "Vet".to_string(),
                ..test_shop("C", "c")
            },
            bare_shop("D", "d"),
        ];
        let html = render_index(&shops, &SiteConfig::default()).into_string();
        assert_eq!(html.matches(r#"<option value="Vet">"#).count(), 1);
        let groomer = html.find(r#"<option value="Groomer">"#).unwrap();
        let vet = html.find(r#"<option value="Vet">"#).unwrap();
        assert!(groomer < vet);
        assert!(html.contains(r#"<option value="">All categories</option>"#));
    }

    #[test]
    fn index_placeholders_for_missing_fields() {
        let shops = vec![bare_shop("Quiet Shop", "quiet-shop")];
        let html = render_index(&shops, &SiteConfig::default()).into_string();
        assert!(html.contains("Address not provided"));
        assert!(html.contains("Pet grooming"));
    }

    #[test]
    fn index_renders_intro_markdown() {
        let mut config = SiteConfig::default();
        config.site.intro = "Data from **2025** exports.".to_string();
        let html = render_index(&[], &config).into_string();
        assert!(html.contains("<strong>2025</strong>"));
        assert!(html.contains("0 shops in total."));
    }

    #[test]
    fn index_sorted_by_name_when_configured() {
        let shops = vec![test_shop("Zen Paws", "zen-paws"), test_shop("alpha", "alpha")];
        let mut config = SiteConfig::default();

        let html = render_index(&shops, &config).into_string();
        assert!(html.find("Zen Paws").unwrap() < html.find("alpha").unwrap());

        config.site.sort_by_name = true;
        let html = render_index(&shops, &config).into_string();
        assert!(html.find("stores/alpha/").unwrap() < html.find("stores/zen-paws/").unwrap());
    }

    #[test]
    fn index_footer_includes_source_note() {
        let mut config = SiteConfig::default();
        config.site.source_note = "Scraped 2025-12-28".to_string();
        let html = render_index(&[], &config).into_string();
        assert!(html.contains("<p>Scraped 2025-12-28</p>"));
    }

    #[test]
    fn index_uses_configured_language() {
        let mut config = SiteConfig::default();
        config.site.language = Language::TraditionalChinese;
        let shops = vec![bare_shop("毛孩美容", "毛孩美容")];
        let html = render_index(&shops, &config).into_string();
        assert!(html.contains(r#"<html lang="zh-Hant">"#));
        assert!(html.contains("暫無評分"));
        assert!(html.contains("共 1 間店家。"));
    }

    // =========================================================================
    // render_detail
    // =========================================================================

    #[test]
    fn detail_links_climb_two_levels() {
        let shop = test_shop("Aroma Pets", "aroma-pets");
        let html = render_detail(&shop, &SiteConfig::default()).into_string();
        assert!(html.contains(r#"href="../../assets/style.css""#));
        assert!(html.contains(r#"href="../../index.html""#));
        assert!(html.contains("<title>Aroma Pets | Shop Directory</title>"));
    }

    #[test]
    fn detail_includes_contact_links() {
        let shop = test_shop("Aroma Pets", "aroma-pets");
        let html = render_detail(&shop, &SiteConfig::default()).into_string();
        assert!(html.contains(r#"href="https://maps.example/aroma-pets""#));
        assert!(html.contains(r#"href="https://aroma.example""#));
        assert!(html.contains(r#"href="tel:0412345678""#));
        assert!(html.contains("Cat friendly"));
        assert!(html.contains(r#"<img src="https://img.example/a.jpg""#));
    }

    #[test]
    fn detail_missing_image_renders_placeholder_block() {
        let shop = bare_shop("Quiet Shop", "quiet-shop");
        let html = render_detail(&shop, &SiteConfig::default()).into_string();
        assert!(html.contains(r#"<div class="gallery placeholder">No image available</div>"#));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn detail_omits_absent_website_and_phone_links() {
        let shop = bare_shop("Quiet Shop", "quiet-shop");
        let html = render_detail(&shop, &SiteConfig::default()).into_string();
        assert!(!html.contains("tel:"));
        assert!(!html.contains("Website / social"));
        assert!(html.contains("Call for details"));
        assert!(html.contains("Not provided"));
    }

    #[test]
    fn detail_fallback_feature_chip() {
        let shop = bare_shop("Quiet Shop", "quiet-shop");
        let html = render_detail(&shop, &SiteConfig::default()).into_string();
        assert!(html.contains(r#"<span class="chip">Pet grooming</span>"#));
    }

    #[test]
    fn non_web_urls_are_not_linked() {
        let shop = Shop {
            website: "javascript:alert(2)".to_string(),
            map_reference: "JavaScript:alert(1)".to_string(),
            image_url: Some("data:image/png;base64,AAAA".to_string()),
            ..test_shop("Aroma Pets", "aroma-pets")
        };
        let index = render_index(std::slice::from_ref(&shop), &SiteConfig::default()).into_string();
        let detail = render_detail(&shop, &SiteConfig::default()).into_string();
        for html in [&index, &detail] {
            assert!(!html.to_lowercase().contains(r#"href="javascript:"#));
        }
        // Shown as text in the info panel, not as a link
        assert!(detail.contains("javascript:alert(2)"));
        assert!(!detail.contains("Website / social"));
        assert!(!detail.contains("<img"));
        assert!(detail.contains("No image available"));
    }

    #[test]
    fn web_url_accepts_http_schemes_only() {
        assert_eq!(web_url(" https://a.example "), Some("https://a.example"));
        assert_eq!(web_url("HTTP://a.example"), Some("HTTP://a.example"));
        assert_eq!(web_url("javascript:alert(1)"), None);
        assert_eq!(web_url("ftp://a.example"), None);
        assert_eq!(web_url("//a.example"), None);
        assert_eq!(web_url(""), None);
    }

    #[test]
    fn markup_in_names_is_escaped() {
        let shop = Shop {
            address: "<script>alert(1)</script>".to_string(),
            ..test_shop(r#"<b>Tom & "Jerry"</b>"#, "tom-jerry")
        };
        let index = render_index(std::slice::from_ref(&shop), &SiteConfig::default()).into_string();
        let detail = render_detail(&shop, &SiteConfig::default()).into_string();
        for html in [&index, &detail] {
            assert!(!html.contains("<b>Tom"));
            assert!(!html.contains("<script>alert"));
            assert!(html.contains("&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;"));
        }
    }

    // =========================================================================
    // generate
    // =========================================================================

    #[test]
    fn generate_writes_site_layout() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("docs");
        let shops = vec![
            test_shop("Aroma Pets", "aroma-pets"),
            bare_shop("Aroma Pets", "aroma-pets-2"),
        ];

        let report = generate(&shops, &SiteConfig::default(), &out).unwrap();

        assert_eq!(report.detail_pages, 2);
        assert_eq!(report.with_image, 1);
        assert_eq!(report.categories, 1);
        assert_eq!(report.index_path, out.join("index.html"));
        assert!(out.join("index.html").is_file());
        assert!(out.join("stores/aroma-pets/index.html").is_file());
        assert!(out.join("stores/aroma-pets-2/index.html").is_file());
        assert!(out.join("assets/filter.js").is_file());

        let css = fs::read_to_string(out.join("assets/style.css")).unwrap();
        assert!(css.starts_with(":root {"));
        assert!(css.contains("--accent: #5bc0be;"));
    }

    #[test]
    fn generate_removes_stale_detail_pages() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().to_path_buf();
        let stale = out.join("stores/gone-shop");
        fs::create_dir_all(&stale).unwrap();
        fs::write(stale.join("index.html"), "old").unwrap();

        generate(&[test_shop("Aroma Pets", "aroma-pets")], &SiteConfig::default(), &out).unwrap();

        assert!(!stale.exists());
        assert!(out.join("stores/aroma-pets/index.html").is_file());
    }

    #[test]
    fn generate_with_no_shops_still_writes_index() {
        let tmp = TempDir::new().unwrap();
        let report = generate(&[], &SiteConfig::default(), tmp.path()).unwrap();
        assert_eq!(report.detail_pages, 0);
        let index = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(index.contains("0 shops in total."));
        assert!(tmp.path().join("stores").is_dir());
    }
}
