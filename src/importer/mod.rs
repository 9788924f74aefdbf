// src/importer/mod.rs

//! ELWIS question catalog importer.
//!
//! Control flow for one category: fetch the index document, extract the
//! module page URLs, fetch and parse each module page in index order, and
//! hand the concatenated question list to the merge step. Fetching is
//! strictly sequential; a failed fetch aborts the run.

pub mod fetcher;
pub mod index;
pub mod merge;
pub mod page;
pub mod signature;

pub use fetcher::{DocumentSource, HttpFetcher};
pub use merge::{Corpus, merge_questions};
pub use signature::Signature;

use std::time::Duration;

use url::Url;

use crate::error::Result;
use crate::models::{CategoryConfig, Config, LocaleConfig, ScrapedQuestion};
use crate::utils::log;

/// Service that scrapes one source category's question catalog.
pub struct ElwisImporter<'a> {
    config: &'a Config,
    locale: &'a LocaleConfig,
    source: &'a dyn DocumentSource,
}

impl<'a> ElwisImporter<'a> {
    /// Create an importer over the given document source.
    pub fn new(config: &'a Config, locale: &'a LocaleConfig, source: &'a dyn DocumentSource) -> Self {
        Self {
            config,
            locale,
            source,
        }
    }

    /// Scrape every question from one category, in document order across
    /// the index's module pages.
    pub async fn scrape_category(
        &self,
        category: &CategoryConfig,
    ) -> Result<Vec<ScrapedQuestion>> {
        let base_url = Url::parse(&self.config.importer.base_url)?;
        let messages = &self.locale.messages;

        log::info(&messages.fetching_index.replace("{url}", &category.index_url));
        let index_html = self.source.fetch(&category.index_url).await?;
        let module_urls = index::parse_index(&index_html, &base_url, category)?;
        log::info(
            &messages
                .modules_found
                .replace("{count}", &module_urls.len().to_string()),
        );

        let delay = Duration::from_millis(self.config.importer.request_delay_ms);
        let mut questions = Vec::new();

        for url in module_urls {
            let page_html = self.source.fetch(&url).await?;
            let page_questions = page::parse_questions(&page_html, &base_url);
            if self.config.logging.show_progress {
                log::sub_item(
                    &messages
                        .page_parsed
                        .replace("{count}", &page_questions.len().to_string())
                        .replace("{url}", &url),
                );
            }
            questions.extend(page_questions);

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::fetcher::FixtureSource;
    use super::*;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.importer.base_url = "https://www.example.de".to_string();
        config.importer.request_delay_ms = 0;
        config.categories = vec![CategoryConfig {
            name: "binnen".to_string(),
            index_url: "https://www.example.de/katalog/index.html".to_string(),
            module_path_segment: "/katalog/".to_string(),
        }];
        config
    }

    fn index_html() -> &'static str {
        r#"<div id="content">
            <a class="NavNode" href="/katalog/basis.html">Basisfragen</a>
            <a class="NavNode" href="/katalog/spezifisch.html">Spezifische Fragen</a>
        </div>"#
    }

    fn module_html(offset: usize) -> String {
        let mut body = String::new();
        for i in 1..=2 {
            let n = offset + i;
            body.push_str(&format!(
                "<p>{n}. Frage Nummer {n}?</p><ol><li>Richtig {n}</li><li>Falsch {n}</li></ol>"
            ));
        }
        format!(r#"<div id="content">{body}</div>"#)
    }

    #[tokio::test]
    async fn scrapes_all_module_pages_in_index_order() {
        let config = test_config();
        let locale = LocaleConfig::default();
        let source = FixtureSource::new()
            .with_page("https://www.example.de/katalog/index.html", index_html())
            .with_page("https://www.example.de/katalog/basis.html", module_html(0))
            .with_page(
                "https://www.example.de/katalog/spezifisch.html",
                module_html(10),
            );

        let importer = ElwisImporter::new(&config, &locale, &source);
        let questions = importer
            .scrape_category(&config.categories[0])
            .await
            .unwrap();

        let texts: Vec<&str> = questions.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Frage Nummer 1?",
                "Frage Nummer 2?",
                "Frage Nummer 11?",
                "Frage Nummer 12?",
            ]
        );
    }

    #[tokio::test]
    async fn missing_module_page_aborts_the_run() {
        let config = test_config();
        let locale = LocaleConfig::default();
        let source = FixtureSource::new()
            .with_page("https://www.example.de/katalog/index.html", index_html())
            .with_page("https://www.example.de/katalog/basis.html", module_html(0));

        let importer = ElwisImporter::new(&config, &locale, &source);
        assert!(
            importer
                .scrape_category(&config.categories[0])
                .await
                .is_err()
        );
    }
}
