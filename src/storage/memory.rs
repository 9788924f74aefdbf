//! In-memory catalog store.
//!
//! Backs tests and dry runs with the same contract as the filesystem
//! store, without touching disk.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{AnswerLink, AnswerOption, NewQuestion, PersistedQuestion};
use crate::storage::CatalogStore;

/// In-memory catalog store backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    next_question_id: u64,
    next_answer_option_id: u64,
    questions: Vec<PersistedQuestion>,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            next_question_id: 1,
            next_answer_option_id: 1,
            questions: Vec::new(),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of questions currently held.
    pub fn question_count(&self) -> usize {
        self.lock().map(|inner| inner.questions.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| AppError::storage("memory store lock poisoned"))
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn load_questions(&self) -> Result<Vec<PersistedQuestion>> {
        Ok(self.lock()?.questions.clone())
    }

    async fn create_question(&self, question: NewQuestion) -> Result<PersistedQuestion> {
        let mut inner = self.lock()?;

        let id = inner.next_question_id;
        inner.next_question_id += 1;

        let mut answer_options = Vec::with_capacity(question.answers.len());
        let mut answer_links = Vec::with_capacity(question.answers.len());
        for answer in &question.answers {
            let option_id = inner.next_answer_option_id;
            inner.next_answer_option_id += 1;
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
        inner.questions.push(persisted.clone());
        Ok(persisted)
    }

    async fn assign_question(
        &self,
        question_id: u64,
        module_id: Option<u64>,
    ) -> Result<PersistedQuestion> {
        let mut inner = self.lock()?;
        let question = inner
            .questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or_else(|| AppError::storage(format!("question {question_id} not found")))?;
        question.module_id = module_id;
        Ok(question.clone())
    }
}
