//! Question data structures.
//!
//! `ScrapedQuestion` is the transient record the page parser emits; the
//! persisted shapes mirror the catalog store's question / answer-option /
//! answer-link tables.

use serde::{Deserialize, Serialize};

/// An answer extracted from a module page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedAnswer {
    /// Answer text, whitespace-normalized
    pub text: String,

    /// Whether this is the correct answer (first list item by source convention)
    pub correct: bool,
}

/// A question extracted from a module page.
///
/// Produced by the page parser and consumed once per import run; never
/// persisted in this form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedQuestion {
    /// Question text with the leading number and any caption stripped
    pub text: String,

    /// Absolute URL of the question's illustration, if any
    pub image_url: Option<String>,

    /// Answer choices in document order
    pub answers: Vec<ScrapedAnswer>,
}

/// An answer option owned by the catalog store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Store-assigned identifier
    pub id: u64,

    /// Answer text as scraped
    pub text: String,
}

/// Links a question to one of its answer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerLink {
    /// Identifier of the linked answer option
    pub answer_option_id: u64,

    /// Whether the linked option is the correct answer
    pub correct: bool,
}

/// A question owned by the catalog store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedQuestion {
    /// Store-assigned identifier
    pub id: u64,

    /// Question text
    pub text: String,

    /// Absolute URL of the question's illustration, if any
    #[serde(default)]
    pub image_url: Option<String>,

    /// Curriculum module this question is assigned to; `None` until an
    /// operator assigns it
    #[serde(default)]
    pub module_id: Option<u64>,

    /// Answer options in display order
    pub answer_options: Vec<AnswerOption>,

    /// Correctness links, parallel to the options
    pub answer_links: Vec<AnswerLink>,
}

impl PersistedQuestion {
    /// Join answer links to their options, yielding `(text, correct)` pairs
    /// in link order. Links pointing at a missing option are dropped.
    pub fn answer_pairs(&self) -> Vec<(&str, bool)> {
        self.answer_links
            .iter()
            .filter_map(|link| {
                self.answer_options
                    .iter()
                    .find(|option| option.id == link.answer_option_id)
                    .map(|option| (option.text.as_str(), link.correct))
            })
            .collect()
    }
}

/// Payload for creating a question in the catalog store.
///
/// The store assigns question and answer-option ids; `module_id` always
/// starts out unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub text: String,
    pub image_url: Option<String>,
    pub answers: Vec<ScrapedAnswer>,
}

impl From<ScrapedQuestion> for NewQuestion {
    fn from(question: ScrapedQuestion) -> Self {
        Self {
            text: question.text,
            image_url: question.image_url,
            answers: question.answers,
        }
    }
}

/// Counters returned by one import run.
///
/// Serialized field names are camelCase for downstream JSON consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Questions newly persisted by this run
    pub created_questions: usize,

    /// Answer options created alongside those questions
    pub created_answers: usize,

    /// Scraped records skipped as duplicates
    pub skipped_questions: usize,
}

impl ImportSummary {
    /// Fold another run's counters into this one (used by `import --all`).
    pub fn absorb(&mut self, other: &ImportSummary) {
        self.created_questions += other.created_questions;
        self.created_answers += other.created_answers;
        self.skipped_questions += other.skipped_questions;
    }
}
