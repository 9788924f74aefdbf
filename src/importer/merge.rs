// src/importer/merge.rs

//! Dedup merge of scraped questions into the persisted catalog.
//!
//! The corpus is snapshotted once per run: every persisted question's
//! signature is computed up front, bounding store round-trips to a single
//! full read at the cost of linear memory. Scraped records are then merged
//! in order, first occurrence wins.
//!
//! Overlapping runs against the same store are not safe: each run works
//! from its own snapshot, so two concurrent runs can both decide a
//! signature is new and insert it twice. Callers must serialize import
//! runs.

use std::collections::HashSet;

use crate::error::Result;
use crate::importer::signature::Signature;
use crate::models::{ImportSummary, NewQuestion, PersistedQuestion, ScrapedQuestion};
use crate::storage::CatalogStore;

/// Snapshot of every signature present in the catalog at the start of a
/// run, extended with the signatures created during the run.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    signatures: HashSet<Signature>,
}

impl Corpus {
    /// Build a corpus from already-loaded questions.
    pub fn from_questions(questions: &[PersistedQuestion]) -> Result<Self> {
        let mut signatures = HashSet::with_capacity(questions.len());
        for question in questions {
            signatures.insert(Signature::of_persisted(question)?);
        }
        Ok(Self { signatures })
    }

    /// Load the full catalog from the store and build its corpus.
    pub async fn load(store: &dyn CatalogStore) -> Result<Self> {
        Self::from_questions(&store.load_questions().await?)
    }

    pub fn contains(&self, signature: &Signature) -> bool {
        self.signatures.contains(signature)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    fn insert(&mut self, signature: Signature) {
        self.signatures.insert(signature);
    }
}

/// Merge scraped questions into the store, skipping any whose signature is
/// already known or was created earlier in this same run.
///
/// Returns the run counters and the corpus extended with the created
/// signatures. A write failure aborts the remaining merges; questions
/// persisted before the failure stay persisted.
pub async fn merge_questions(
    store: &dyn CatalogStore,
    mut corpus: Corpus,
    scraped: Vec<ScrapedQuestion>,
) -> Result<(ImportSummary, Corpus)> {
    let mut summary = ImportSummary::default();

    for question in scraped {
        let signature = Signature::of_scraped(&question)?;
        if corpus.contains(&signature) {
            summary.skipped_questions += 1;
            continue;
        }

        let answer_count = question.answers.len();
        store.create_question(NewQuestion::from(question)).await?;
        summary.created_questions += 1;
        summary.created_answers += answer_count;
        corpus.insert(signature);
    }

    Ok((summary, corpus))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScrapedAnswer;
    use crate::storage::MemoryStore;

    fn question(text: &str, answers: &[(&str, bool)]) -> ScrapedQuestion {
        ScrapedQuestion {
            text: text.to_string(),
            image_url: None,
            answers: answers
                .iter()
                .map(|(text, correct)| ScrapedAnswer {
                    text: text.to_string(),
                    correct: *correct,
                })
                .collect(),
        }
    }

    fn fixture_questions() -> Vec<ScrapedQuestion> {
        vec![
            question("Erste Frage?", &[("Ja", true), ("Nein", false)]),
            question(
                "Zweite Frage?",
                &[("A", true), ("B", false), ("C", false), ("D", false)],
            ),
        ]
    }

    #[tokio::test]
    async fn first_run_creates_everything() {
        let store = MemoryStore::new();
        let corpus = Corpus::load(&store).await.unwrap();
        assert!(corpus.is_empty());

        let (summary, corpus) = merge_questions(&store, corpus, fixture_questions())
            .await
            .unwrap();

        assert_eq!(summary.created_questions, 2);
        assert_eq!(summary.created_answers, 6);
        assert_eq!(summary.skipped_questions, 0);
        assert_eq!(corpus.len(), 2);
        assert_eq!(store.question_count(), 2);
    }

    #[tokio::test]
    async fn second_run_is_idempotent() {
        let store = MemoryStore::new();
        let corpus = Corpus::load(&store).await.unwrap();
        merge_questions(&store, corpus, fixture_questions())
            .await
            .unwrap();

        // Fresh snapshot, same source content.
        let corpus = Corpus::load(&store).await.unwrap();
        let (summary, _) = merge_questions(&store, corpus, fixture_questions())
            .await
            .unwrap();

        assert_eq!(summary.created_questions, 0);
        assert_eq!(summary.created_answers, 0);
        assert_eq!(summary.skipped_questions, 2);
        assert_eq!(store.question_count(), 2);
    }

    #[tokio::test]
    async fn in_run_duplicates_collapse_to_first_occurrence() {
        let store = MemoryStore::new();
        let mut scraped = fixture_questions();
        // Same content as the first record, reworded only by whitespace
        // and answer order.
        scraped.push(question("Erste  Frage?", &[("nein", false), ("JA", true)]));

        let corpus = Corpus::load(&store).await.unwrap();
        let (summary, _) = merge_questions(&store, corpus, scraped).await.unwrap();

        assert_eq!(summary.created_questions, 2);
        assert_eq!(summary.skipped_questions, 1);
        assert_eq!(store.question_count(), 2);
    }

    #[tokio::test]
    async fn changed_correct_answer_is_a_new_question() {
        let store = MemoryStore::new();
        let corpus = Corpus::load(&store).await.unwrap();
        let (_, corpus) = merge_questions(
            &store,
            corpus,
            vec![question("Frage?", &[("Ja", true), ("Nein", false)])],
        )
        .await
        .unwrap();

        let (summary, _) = merge_questions(
            &store,
            corpus,
            vec![question("Frage?", &[("Ja", false), ("Nein", true)])],
        )
        .await
        .unwrap();

        assert_eq!(summary.created_questions, 1);
        assert_eq!(summary.skipped_questions, 0);
        assert_eq!(store.question_count(), 2);
    }
}
