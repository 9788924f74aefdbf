// src/pipeline/catalog.rs

//! Catalog inspection and module assignment commands.

use crate::error::Result;
use crate::models::{LocaleConfig, PersistedQuestion};
use crate::storage::CatalogStore;
use crate::utils::log;

/// List persisted questions, optionally restricted to unassigned ones.
///
/// With `json` set the questions are printed as a JSON array instead of
/// formatted lines, for piping into other tools.
pub async fn run_list(
    locale: &LocaleConfig,
    store: &dyn CatalogStore,
    unassigned_only: bool,
    json: bool,
) -> Result<Vec<PersistedQuestion>> {
    let questions = if unassigned_only {
        store.load_unassigned().await?
    } else {
        store.load_questions().await?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&questions)?);
        return Ok(questions);
    }

    log::header(
        &locale
            .messages
            .list_header
            .replace("{count}", &questions.len().to_string()),
    );
    for question in &questions {
        let module = match question.module_id {
            Some(id) => format!("module {id}"),
            None => "unassigned".to_string(),
        };
        log::info(&format!("#{} [{}] {}", question.id, module, question.text));
        for (text, correct) in question.answer_pairs() {
            let marker = if correct { "*" } else { " " };
            log::sub_item(&format!("{marker} {text}"));
        }
    }

    Ok(questions)
}

/// Assign a question to a module, or clear the assignment when `module_id`
/// is absent.
pub async fn run_assign(
    locale: &LocaleConfig,
    store: &dyn CatalogStore,
    question_id: u64,
    module_id: Option<u64>,
) -> Result<PersistedQuestion> {
    let updated = store.assign_question(question_id, module_id).await?;

    let messages = &locale.messages;
    match module_id {
        Some(module) => log::success(
            &messages
                .assign_success
                .replace("{id}", &question_id.to_string())
                .replace("{module}", &module.to_string()),
        ),
        None => log::success(
            &messages
                .unassign_success
                .replace("{id}", &question_id.to_string()),
        ),
    }

    Ok(updated)
}
