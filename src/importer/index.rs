// src/importer/index.rs

//! Index document parsing.
//!
//! An index document lists the category's module pages as navigation
//! anchors. Only anchors whose resolved URL contains the category's module
//! path segment count; the index's own URL is excluded and duplicates are
//! dropped while preserving first-seen order.

use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::CategoryConfig;
use crate::utils::resolve_url;

/// Navigation anchors inside the page's content container.
const NAV_NODE_SELECTOR: &str = "#content a.NavNode";

/// Extract the ordered, de-duplicated list of module page URLs from an
/// index document.
pub fn parse_index(html: &str, base_url: &Url, category: &CategoryConfig) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let selector = parse_selector(NAV_NODE_SELECTOR)?;

    // Compare against the normalized form so trailing-slash or escaping
    // differences don't let the index link back to itself.
    let index_url = Url::parse(&category.index_url)?.to_string();

    let mut seen = HashSet::new();
    let mut module_urls = Vec::new();

    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let url = resolve_url(base_url, href);
        if !url.contains(&category.module_path_segment) {
            continue;
        }
        if url == index_url {
            continue;
        }
        if seen.insert(url.clone()) {
            module_urls.push(url);
        }
    }

    Ok(module_urls)
}

pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
