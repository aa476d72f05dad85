//! UI copy for generated pages.
//!
//! Every piece of fixed text a renderer emits comes from a [`Labels`] value,
//! selected by `site.language`. Renderers never hard-code copy.

use crate::config::Language;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub language: Language,
    /// Rating slot when a shop has no rating.
    pub unrated: &'static str,
    /// Category chip when a shop has no category; also the fallback feature chip.
    pub default_category: &'static str,
    /// Generic empty-field placeholder (address, hours, phone, website).
    pub not_provided: &'static str,
    /// Address placeholder on index cards.
    pub address_not_provided: &'static str,
    /// Status placeholder.
    pub status_unknown: &'static str,
    /// Body of the image placeholder block.
    pub no_image: &'static str,
    pub view_shop: &'static str,
    pub map_link: &'static str,
    pub map_link_long: &'static str,
    pub website_link: &'static str,
    pub call_link: &'static str,
    pub search_placeholder: &'static str,
    pub search_aria: &'static str,
    pub filter_aria: &'static str,
    pub all_categories: &'static str,
    pub back_to_list: &'static str,
    pub info_heading: &'static str,
    pub image_heading: &'static str,
    pub links_heading: &'static str,
    pub address_label: &'static str,
    pub status_label: &'static str,
    pub hours_label: &'static str,
    pub phone_label: &'static str,
    pub website_label: &'static str,
    pub generated_note: &'static str,
}

static ENGLISH: Labels = Labels {
    language: Language::English,
    unrated: "No rating yet",
    default_category: "Pet grooming",
    not_provided: "Not provided",
    address_not_provided: "Address not provided",
    status_unknown: "Call for details",
    no_image: "No image available",
    view_shop: "View shop",
    map_link: "Google Maps",
    map_link_long: "View on Google Maps",
    website_link: "Website / social",
    call_link: "Call",
    search_placeholder: "Search name, address, status...",
    search_aria: "Search",
    filter_aria: "Filter",
    all_categories: "All categories",
    back_to_list: "Back to all shops",
    info_heading: "About this shop",
    image_heading: "Photos",
    links_heading: "Quick links",
    address_label: "Address",
    status_label: "Status",
    hours_label: "Hours",
    phone_label: "Phone",
    website_label: "Website",
    generated_note: "Pages generated automatically.",
};

static TRADITIONAL_CHINESE: Labels = Labels {
    language: Language::TraditionalChinese,
    unrated: "暫無評分",
    default_category: "寵物美容",
    not_provided: "未提供",
    address_not_provided: "地址未提供",
    status_unknown: "請電洽",
    no_image: "暫無圖片",
    view_shop: "查看店家",
    map_link: "Google 地圖",
    map_link_long: "在 Google 地圖查看",
    website_link: "造訪官網 / 社群",
    call_link: "撥打電話",
    search_placeholder: "搜尋店名、地址、營業狀態...",
    search_aria: "搜尋",
    filter_aria: "篩選",
    all_categories: "全部類別",
    back_to_list: "返回店家清單",
    info_heading: "店家介紹",
    image_heading: "店家圖片",
    links_heading: "快速連結",
    address_label: "地址",
    status_label: "狀態",
    hours_label: "營業時間",
    phone_label: "電話",
    website_label: "網站",
    generated_note: "頁面自動生成。",
};

impl Labels {
    pub fn for_language(language: Language) -> &'static Labels {
        match language {
            Language::English => &ENGLISH,
            Language::TraditionalChinese => &TRADITIONAL_CHINESE,
        }
    }

    /// Review count in parentheses, e.g. `(12 reviews)` / `（12 則評論）`.
    pub fn review_count(&self, count: u64) -> String {
        match (self.language, count) {
            (Language::TraditionalChinese, n) => format!("（{n} 則評論）"),
            (Language::English, 1) => "(1 review)".to_string(),
            (Language::English, n) => format!("({n} reviews)"),
        }
    }

    /// Footer line with the shop total.
    pub fn total_shops(&self, count: usize) -> String {
        match (self.language, count) {
            (Language::TraditionalChinese, n) => format!("共 {n} 間店家。"),
            (Language::English, 1) => "1 shop in total.".to_string(),
            (Language::English, n) => format!("{n} shops in total."),
        }
    }

    /// Accessible label for the link from an index card to its detail page.
    pub fn view_shop_aria(&self, name: &str) -> String {
        match self.language {
            Language::TraditionalChinese => format!("前往 {name} 的獨立頁面"),
            Language::English => format!("Open the page for {name}"),
        }
    }

    /// Alt text for a shop's image.
    pub fn image_alt(&self, name: &str) -> String {
        match self.language {
            Language::TraditionalChinese => format!("{name} 外觀或作品集"),
            Language::English => format!("{name} storefront or portfolio"),
        }
    }
}
