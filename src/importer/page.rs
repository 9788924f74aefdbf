// src/importer/page.rs

//! Module page parsing.
//!
//! A module page is a flat run of paragraphs, figures and ordered lists
//! under the `#content` container, with no stable ids and no wrapper
//! element per question. Extraction is a single left-to-right scan over
//! the top-level element children with an explicit two-state machine:
//!
//! - `SeekingQuestionStart`: look for a `<p>` whose normalized text starts
//!   with a question number (`"12. ..."`). On match, strip the number and
//!   any caption/image subtree from the body and switch state.
//! - `SeekingAnswerList`: scan following siblings. The first image seen is
//!   captured (later ones are ignored), an `<ol>` closes the question, and
//!   a second numbered paragraph abandons the pending question and starts
//!   a fresh one in its place.
//!
//! A question block without an answer list, or with an empty one, emits
//! nothing. That is a parse skip, not an error.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::models::{ScrapedAnswer, ScrapedQuestion};
use crate::utils::{normalize_whitespace, resolve_url};

/// Scan state for the question extractor.
enum ScanState {
    SeekingQuestionStart,
    SeekingAnswerList(PendingQuestion),
}

/// A question whose answer list has not been found yet.
struct PendingQuestion {
    text: String,
    image_url: Option<String>,
}

fn question_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\s*").expect("question number pattern"))
}

fn content_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("#content").expect("content selector"))
}

fn image_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("img").expect("image selector"))
}

fn list_item_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("li").expect("list item selector"))
}

/// Extract every well-formed question from one module page, in document
/// order. Pages without a `#content` container yield nothing.
pub fn parse_questions(html: &str, base_url: &Url) -> Vec<ScrapedQuestion> {
    let document = Html::parse_document(html);
    let Some(content) = document.select(content_selector()).next() else {
        return Vec::new();
    };

    let mut questions = Vec::new();
    let mut state = ScanState::SeekingQuestionStart;

    for node in content.children().filter_map(ElementRef::wrap) {
        state = match state {
            ScanState::SeekingQuestionStart => begin_question(node, base_url),
            ScanState::SeekingAnswerList(mut pending) => {
                if node.value().name() == "ol" {
                    let answers = parse_answer_list(node);
                    if !answers.is_empty() {
                        questions.push(ScrapedQuestion {
                            text: pending.text,
                            image_url: pending.image_url,
                            answers,
                        });
                    }
                    ScanState::SeekingQuestionStart
                } else if is_question_start(node) {
                    // The pending block never produced an answer list;
                    // drop it and treat this paragraph as a fresh start.
                    begin_question(node, base_url)
                } else {
                    if pending.image_url.is_none() {
                        pending.image_url = extract_image_url(node, base_url);
                    }
                    ScanState::SeekingAnswerList(pending)
                }
            }
        };
    }

    questions
}

/// Whether a node is a paragraph opening a new question block.
fn is_question_start(node: ElementRef) -> bool {
    if node.value().name() != "p" {
        return false;
    }
    let text = normalize_whitespace(&node.text().collect::<String>());
    question_number_re().is_match(&text)
}

/// Start a question from a numbered paragraph, or stay seeking if the
/// node doesn't qualify or its body is empty after stripping.
fn begin_question(node: ElementRef, base_url: &Url) -> ScanState {
    if !is_question_start(node) {
        return ScanState::SeekingQuestionStart;
    }

    let mut raw = String::new();
    collect_body_text(node, &mut raw);
    let normalized = normalize_whitespace(&raw);
    let text = question_number_re().replacen(&normalized, 1, "").to_string();
    if text.is_empty() {
        return ScanState::SeekingQuestionStart;
    }

    ScanState::SeekingAnswerList(PendingQuestion {
        image_url: extract_image_url(node, base_url),
        text,
    })
}

/// Collect a question paragraph's text, skipping caption paragraphs and
/// image elements embedded in it.
fn collect_body_text(element: ElementRef, out: &mut String) {
    for node in element.children() {
        if let Some(child) = ElementRef::wrap(node) {
            if is_caption(child) {
                continue;
            }
            collect_body_text(child, out);
        } else if let Some(text) = node.value().as_text() {
            out.push_str(text);
        }
    }
}

/// Caption subtrees carry the illustration and its label, not question text.
fn is_caption(element: ElementRef) -> bool {
    let value = element.value();
    value.name() == "img" || (value.name() == "p" && value.classes().any(|c| c == "picture"))
}

/// Resolved URL of the first image inside a node, if any.
fn extract_image_url(element: ElementRef, base_url: &Url) -> Option<String> {
    element
        .select(image_selector())
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(|src| resolve_url(base_url, src))
}

/// Extract an ordered list's items as answers. The first non-empty item is
/// the correct answer by source convention; blank items are dropped.
fn parse_answer_list(list: ElementRef) -> Vec<ScrapedAnswer> {
    let mut answers = Vec::new();
    for item in list.select(list_item_selector()) {
        let text = normalize_whitespace(&item.text().collect::<String>());
        if text.is_empty() {
            continue;
        }
        let correct = answers.is_empty();
        answers.push(ScrapedAnswer { text, correct });
    }
    answers
}
