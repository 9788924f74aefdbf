// src/models/mod.rs

//! Domain models for the catalog importer.

mod config;
mod question;

// Re-export all public types
pub use config::{
    CategoryConfig, Config, ImporterConfig, LocaleConfig, LoggingConfig, MessageLocale,
    PathsConfig,
};
pub use question::{
    AnswerLink, AnswerOption, ImportSummary, NewQuestion, PersistedQuestion, ScrapedAnswer,
    ScrapedQuestion,
};
