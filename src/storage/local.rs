//! Local filesystem catalog store.
//!
//! The whole catalog lives in one JSON document:
//!
//! ```text
//! {root}/
//! └── catalog.json     # questions with answer options and links
//! ```
//!
//! Writes go through a temp file and an atomic rename, so a crash mid-run
//! leaves either the previous catalog or a fully written one, never a
//! torn file. Each created question is committed individually; questions
//! persisted before an aborted run stay persisted.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{AnswerLink, AnswerOption, NewQuestion, PersistedQuestion};
use crate::storage::CatalogStore;

const CATALOG_KEY: &str = "catalog.json";

/// On-disk catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    /// Timestamp of the last write
    updated_at: DateTime<Utc>,

    /// Next question id to allocate
    next_question_id: u64,

    /// Next answer option id to allocate
    next_answer_option_id: u64,

    /// All persisted questions
    questions: Vec<PersistedQuestion>,
}

impl Default for CatalogFile {
    fn default() -> Self {
        Self {
            updated_at: Utc::now(),
            next_question_id: 1,
            next_answer_option_id: 1,
            questions: Vec::new(),
        }
    }
}

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root_dir: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    fn path(&self) -> PathBuf {
        self.root_dir.join(CATALOG_KEY)
    }

    /// Read the catalog document, or an empty one if none exists yet.
    async fn read_catalog(&self) -> Result<CatalogFile> {
        match tokio::fs::read(self.path()).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No catalog at {:?}, starting empty", self.path());
                Ok(CatalogFile::default())
            }
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Write the catalog atomically (write to temp, then rename).
    async fn write_catalog(&self, catalog: &CatalogFile) -> Result<()> {
        let path = self.path();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(catalog)?;
        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        log::debug!(
            "Wrote catalog with {} question(s) to {:?}",
            catalog.questions.len(),
            path
        );
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for LocalStore {
    async fn load_questions(&self) -> Result<Vec<PersistedQuestion>> {
        Ok(self.read_catalog().await?.questions)
    }

    async fn create_question(&self, question: NewQuestion) -> Result<PersistedQuestion> {
        let mut catalog = self.read_catalog().await?;

        let id = catalog.next_question_id;
        catalog.next_question_id += 1;

        let mut answer_options = Vec::with_capacity(question.answers.len());
        let mut answer_links = Vec::with_capacity(question.answers.len());
        for answer in &question.answers {
            let option_id = catalog.next_answer_option_id;
            catalog.next_answer_option_id += 1;
            answer_options.push(AnswerOption {
                id: option_id,
                text: answer.text.clone(),
            });
            answer_links.push(AnswerLink {
                answer_option_id: option_id,
                correct: answer.correct,
            });
        }

        let persisted = PersistedQuestion {
            id,
            text: question.text,
            image_url: question.image_url,
            module_id: None,
            answer_options,
            answer_links,
        };
        catalog.questions.push(persisted.clone());
        catalog.updated_at = Utc::now();
        self.write_catalog(&catalog).await?;

        Ok(persisted)
    }

    async fn assign_question(
        &self,
        question_id: u64,
        module_id: Option<u64>,
    ) -> Result<PersistedQuestion> {
        let mut catalog = self.read_catalog().await?;
        let question = catalog
            .questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or_else(|| AppError::storage(format!("question {question_id} not found")))?;
        question.module_id = module_id;
        let updated = question.clone();
        catalog.updated_at = Utc::now();
        self.write_catalog(&catalog).await?;
        Ok(updated)
    }
}
