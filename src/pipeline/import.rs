// src/pipeline/import.rs

//! Import pipeline.

use crate::error::{AppError, Result};
use crate::importer::{Corpus, DocumentSource, ElwisImporter, merge_questions};
use crate::models::{CategoryConfig, Config, ImportSummary, LocaleConfig};
use crate::storage::CatalogStore;
use crate::utils::log;

/// Run the import pipeline for one named category.
pub async fn run_import(
    config: &Config,
    locale: &LocaleConfig,
    source: &dyn DocumentSource,
    store: &dyn CatalogStore,
    category_name: &str,
) -> Result<ImportSummary> {
    let category = config
        .category(category_name)
        .ok_or_else(|| AppError::config(format!("unknown category '{category_name}'")))?;
    import_category(config, locale, source, store, category).await
}

/// Run the import pipeline for every configured category, in order.
pub async fn run_import_all(
    config: &Config,
    locale: &LocaleConfig,
    source: &dyn DocumentSource,
    store: &dyn CatalogStore,
) -> Result<ImportSummary> {
    let mut total = ImportSummary::default();
    for category in &config.categories {
        let summary = import_category(config, locale, source, store, category).await?;
        total.absorb(&summary);
    }
    Ok(total)
}

async fn import_category(
    config: &Config,
    locale: &LocaleConfig,
    source: &dyn DocumentSource,
    store: &dyn CatalogStore,
    category: &CategoryConfig,
) -> Result<ImportSummary> {
    let messages = &locale.messages;
    log::header(&messages.import_starting.replace("{category}", &category.name));

    let importer = ElwisImporter::new(config, locale, source);
    let scraped = importer.scrape_category(category).await?;

    let corpus = Corpus::load(store).await?;
    log::info(
        &messages
            .corpus_loaded
            .replace("{count}", &corpus.len().to_string()),
    );

    let (summary, _corpus) = merge_questions(store, corpus, scraped).await?;

    log::success(&messages.import_complete.replace("{category}", &category.name));
    log::summary(
        &messages.summary_title,
        &[
            ("Created questions", summary.created_questions.to_string()),
            ("Created answers", summary.created_answers.to_string()),
            ("Skipped questions", summary.skipped_questions.to_string()),
        ],
    );

    Ok(summary)
}
