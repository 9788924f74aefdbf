// src/importer/signature.rs

//! Canonical content signatures.
//!
//! A signature is the canonical JSON rendering of a question's normalized
//! text, image URL and answer set. Answers are sorted by (correct flag
//! descending, normalized text ascending) so source ordering never affects
//! equality. Key order is fixed (`text`, `imageUrl`, `answers`; per answer
//! `text`, `correct`) and the encoding is compact, so two implementations
//! that normalize the same way produce byte-identical signatures.

use serde::Serialize;

use crate::error::Result;
use crate::models::{PersistedQuestion, ScrapedQuestion};
use crate::utils::normalize_whitespace;

/// Opaque, comparable fingerprint of a question's content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    /// Compute the signature of a scraped record.
    pub fn of_scraped(question: &ScrapedQuestion) -> Result<Self> {
        let answers: Vec<(&str, bool)> = question
            .answers
            .iter()
            .map(|a| (a.text.as_str(), a.correct))
            .collect();
        build_signature(&question.text, question.image_url.as_deref(), &answers)
    }

    /// Compute the signature of a persisted record.
    pub fn of_persisted(question: &PersistedQuestion) -> Result<Self> {
        build_signature(
            &question.text,
            question.image_url.as_deref(),
            &question.answer_pairs(),
        )
    }

    /// The canonical string backing this signature.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Canonical serialization shape. Field order is the wire contract.
#[derive(Serialize)]
struct CanonicalQuestion {
    text: String,
    #[serde(rename = "imageUrl")]
    image_url: String,
    answers: Vec<CanonicalAnswer>,
}

#[derive(Serialize)]
struct CanonicalAnswer {
    text: String,
    correct: bool,
}

/// Lowercase, collapse whitespace runs, trim.
fn normalize(value: &str) -> String {
    normalize_whitespace(value).to_lowercase()
}

/// Build a signature from a question's raw parts. An absent image URL is
/// encoded as the empty string.
pub fn build_signature(
    text: &str,
    image_url: Option<&str>,
    answers: &[(&str, bool)],
) -> Result<Signature> {
    let mut canonical_answers: Vec<CanonicalAnswer> = answers
        .iter()
        .map(|(text, correct)| CanonicalAnswer {
            text: normalize(text),
            correct: *correct,
        })
        .collect();
    canonical_answers.sort_by(|a, b| b.correct.cmp(&a.correct).then_with(|| a.text.cmp(&b.text)));

    let record = CanonicalQuestion {
        text: normalize(text),
        image_url: image_url.map(normalize).unwrap_or_default(),
        answers: canonical_answers,
    };

    Ok(Signature(serde_json::to_string(&record)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerLink, AnswerOption, ScrapedAnswer};

    fn scraped(text: &str, image_url: Option<&str>, answers: &[(&str, bool)]) -> ScrapedQuestion {
        ScrapedQuestion {
            text: text.to_string(),
            image_url: image_url.map(str::to_string),
            answers: answers
                .iter()
                .map(|(text, correct)| ScrapedAnswer {
                    text: text.to_string(),
                    correct: *correct,
                })
                .collect(),
        }
    }

    #[test]
    fn canonical_form_is_stable() {
        let question = scraped(
            "Was  ist \n das?",
            Some("https://example.de/Bild.png"),
            &[("Nein", false), ("Ja", true)],
        );
        let signature = Signature::of_scraped(&question).unwrap();
        assert_eq!(
            signature.as_str(),
            r#"{"text":"was ist das?","imageUrl":"https://example.de/bild.png","answers":[{"text":"ja","correct":true},{"text":"nein","correct":false}]}"#
        );
    }

    #[test]
    fn answer_order_does_not_matter() {
        let a = scraped("Frage?", None, &[("Ja", true), ("Nein", false), ("Vielleicht", false)]);
        let b = scraped("Frage?", None, &[("Vielleicht", false), ("Nein", false), ("Ja", true)]);
        assert_eq!(
            Signature::of_scraped(&a).unwrap(),
            Signature::of_scraped(&b).unwrap()
        );
    }

    #[test]
    fn case_and_whitespace_do_not_matter() {
        let a = scraped("Was  ist   das?", None, &[("Ja", true)]);
        let b = scraped("was ist das?", None, &[("  JA ", true)]);
        assert_eq!(
            Signature::of_scraped(&a).unwrap(),
            Signature::of_scraped(&b).unwrap()
        );
    }

    #[test]
    fn flipping_the_correct_answer_changes_the_signature() {
        let a = scraped("Frage?", None, &[("Ja", true), ("Nein", false)]);
        let b = scraped("Frage?", None, &[("Ja", false), ("Nein", true)]);
        assert_ne!(
            Signature::of_scraped(&a).unwrap(),
            Signature::of_scraped(&b).unwrap()
        );
    }

    #[test]
    fn image_presence_changes_the_signature() {
        let a = scraped("Frage?", None, &[("Ja", true)]);
        let b = scraped("Frage?", Some("https://example.de/b.png"), &[("Ja", true)]);
        assert_ne!(
            Signature::of_scraped(&a).unwrap(),
            Signature::of_scraped(&b).unwrap()
        );
    }

    #[test]
    fn trailing_punctuation_is_significant() {
        let a = scraped("Frage?", None, &[("Ja", true), ("Nein", false)]);
        let b = scraped("Frage?", None, &[("Ja.", true), ("Nein", false)]);
        assert_ne!(
            Signature::of_scraped(&a).unwrap(),
            Signature::of_scraped(&b).unwrap()
        );
    }

    #[test]
    fn persisted_and_scraped_forms_agree() {
        let question = scraped(
            "Welches Zeichen verbietet das Ankern?",
            None,
            &[("Tafel A.6", true), ("Tafel E.5", false)],
        );
        let persisted = PersistedQuestion {
            id: 42,
            text: "Welches  Zeichen verbietet das Ankern?".to_string(),
            image_url: None,
            module_id: Some(7),
            answer_options: vec![
                AnswerOption {
                    id: 1,
                    text: "Tafel E.5".to_string(),
                },
                AnswerOption {
                    id: 2,
                    text: "Tafel A.6".to_string(),
                },
            ],
            answer_links: vec![
                AnswerLink {
                    answer_option_id: 1,
                    correct: false,
                },
                AnswerLink {
                    answer_option_id: 2,
                    correct: true,
                },
            ],
        };
        assert_eq!(
            Signature::of_scraped(&question).unwrap(),
            Signature::of_persisted(&persisted).unwrap()
        );
    }
}
