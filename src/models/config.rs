//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and import behavior settings
    #[serde(default)]
    pub importer: ImporterConfig,

    /// Source catalog categories
    #[serde(default = "defaults::default_categories")]
    pub categories: Vec<CategoryConfig>,

    /// Filesystem locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Logging behavior
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Look up a category by name (case-insensitive).
    pub fn category(&self, name: &str) -> Option<&CategoryConfig> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.importer.user_agent.trim().is_empty() {
            return Err(AppError::validation("importer.user_agent is empty"));
        }
        if self.importer.timeout_secs == 0 {
            return Err(AppError::validation("importer.timeout_secs must be > 0"));
        }
        url::Url::parse(&self.importer.base_url)
            .map_err(|e| AppError::validation(format!("importer.base_url is invalid: {e}")))?;
        if self.categories.is_empty() {
            return Err(AppError::validation("No categories defined"));
        }
        for category in &self.categories {
            category.validate()?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            importer: ImporterConfig::default(),
            categories: defaults::default_categories(),
            paths: PathsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// HTTP client and import behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImporterConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between module page requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Base origin relative links are resolved against
    #[serde(default = "defaults::base_url")]
    pub base_url: String,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            base_url: defaults::base_url(),
        }
    }
}

/// One source catalog category (e.g. the inland or sea question catalog).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Short name used on the command line
    pub name: String,

    /// URL of the category's index document
    pub index_url: String,

    /// Path fragment module page URLs must contain
    pub module_path_segment: String,
}

impl CategoryConfig {
    /// Validate a single category definition.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("category name is empty"));
        }
        url::Url::parse(&self.index_url).map_err(|e| {
            AppError::validation(format!("category '{}' index_url is invalid: {e}", self.name))
        })?;
        if !self.module_path_segment.contains('/') {
            return Err(AppError::validation(format!(
                "category '{}' module_path_segment must be a path fragment",
                self.name
            )));
        }
        Ok(())
    }
}

/// Filesystem locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory the catalog store lives in
    #[serde(default = "defaults::catalog_dir")]
    pub catalog_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            catalog_dir: defaults::catalog_dir(),
        }
    }
}

/// Logging behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level: debug, info, warn, error
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// Whether to print per-page progress lines
    #[serde(default = "defaults::show_progress")]
    pub show_progress: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            show_progress: defaults::show_progress(),
        }
    }
}

/// User-facing message templates.
///
/// Placeholders in `{braces}` are substituted with `.replace()` at the call
/// site, so messages can be reworded or translated without touching code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    #[serde(default)]
    pub messages: MessageLocale,
}

impl LocaleConfig {
    /// Load locale messages from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load locale messages or return defaults if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Locale load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            messages: MessageLocale::default(),
        }
    }
}

/// Message template strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageLocale {
    #[serde(default = "defaults::msg_import_starting")]
    pub import_starting: String,

    #[serde(default = "defaults::msg_fetching_index")]
    pub fetching_index: String,

    #[serde(default = "defaults::msg_modules_found")]
    pub modules_found: String,

    #[serde(default = "defaults::msg_page_parsed")]
    pub page_parsed: String,

    #[serde(default = "defaults::msg_corpus_loaded")]
    pub corpus_loaded: String,

    #[serde(default = "defaults::msg_import_complete")]
    pub import_complete: String,

    #[serde(default = "defaults::msg_summary_title")]
    pub summary_title: String,

    #[serde(default = "defaults::msg_validate_starting")]
    pub validate_starting: String,

    #[serde(default = "defaults::msg_validate_success")]
    pub validate_success: String,

    #[serde(default = "defaults::msg_validate_failed")]
    pub validate_failed: String,

    #[serde(default = "defaults::msg_list_header")]
    pub list_header: String,

    #[serde(default = "defaults::msg_assign_success")]
    pub assign_success: String,

    #[serde(default = "defaults::msg_unassign_success")]
    pub unassign_success: String,
}

impl Default for MessageLocale {
    fn default() -> Self {
        toml::from_str("").expect("default locale messages")
    }
}

mod defaults {
    use super::CategoryConfig;

    // Importer defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; elwis-catalog/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        250
    }
    pub fn base_url() -> String {
        "https://www.elwis.de".into()
    }

    // The two published ELWIS question catalogs.
    pub fn default_categories() -> Vec<CategoryConfig> {
        vec![
            CategoryConfig {
                name: "binnen".to_string(),
                index_url: "https://www.elwis.de/DE/Sportschifffahrt/Sportbootfuehrerscheine/Fragenkatalog-Binnen/Fragenkatalog-Binnen-neu-node.html".to_string(),
                module_path_segment: "/Fragenkatalog-Binnen/".to_string(),
            },
            CategoryConfig {
                name: "see".to_string(),
                index_url: "https://www.elwis.de/DE/Sportschifffahrt/Sportbootfuehrerscheine/Fragenkatalog-See/Fragenkatalog-See-neu-node.html".to_string(),
                module_path_segment: "/Fragenkatalog-See/".to_string(),
            },
        ]
    }

    // Path defaults
    pub fn catalog_dir() -> String {
        "storage".into()
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
    pub fn show_progress() -> bool {
        true
    }

    // Message defaults
    pub fn msg_import_starting() -> String {
        "Importing question catalog '{category}'".into()
    }
    pub fn msg_fetching_index() -> String {
        "Fetching index document {url}".into()
    }
    pub fn msg_modules_found() -> String {
        "Discovered {count} module page(s)".into()
    }
    pub fn msg_page_parsed() -> String {
        "Parsed {count} question(s) from {url}".into()
    }
    pub fn msg_corpus_loaded() -> String {
        "Loaded {count} persisted question(s) into the dedup corpus".into()
    }
    pub fn msg_import_complete() -> String {
        "Import of '{category}' complete".into()
    }
    pub fn msg_summary_title() -> String {
        "Import result".into()
    }
    pub fn msg_validate_starting() -> String {
        "Validating configuration".into()
    }
    pub fn msg_validate_success() -> String {
        "Configuration is valid".into()
    }
    pub fn msg_validate_failed() -> String {
        "Configuration is invalid: {error}".into()
    }
    pub fn msg_list_header() -> String {
        "Catalog questions ({count})".into()
    }
    pub fn msg_assign_success() -> String {
        "Question {id} assigned to module {module}".into()
    }
    pub fn msg_unassign_success() -> String {
        "Question {id} unassigned".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.importer.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_index_url() {
        let mut config = Config::default();
        config.categories[0].index_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_segmentless_category() {
        let mut config = Config::default();
        config.categories[0].module_path_segment = "Fragenkatalog".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn category_lookup_is_case_insensitive() {
        let config = Config::default();
        assert!(config.category("Binnen").is_some());
        assert!(config.category("SEE").is_some());
        assert!(config.category("küste").is_none());
    }

    #[test]
    fn default_categories_point_at_distinct_segments() {
        let config = Config::default();
        let binnen = config.category("binnen").unwrap();
        let see = config.category("see").unwrap();
        assert_ne!(binnen.module_path_segment, see.module_path_segment);
        assert!(binnen.index_url.contains(&*binnen.module_path_segment));
    }

    #[test]
    fn locale_defaults_fill_from_empty_toml() {
        let locale: LocaleConfig = toml::from_str("").unwrap();
        assert!(locale.messages.modules_found.contains("{count}"));
        assert!(locale.messages.import_starting.contains("{category}"));
    }
}
