// src/pipeline/validate.rs

//! Configuration validation command.

use crate::error::Result;
use crate::models::{Config, LocaleConfig};
use crate::utils::log;

/// Validate the loaded configuration and print what would be used.
pub fn run_validate(config: &Config, locale: &LocaleConfig) -> Result<()> {
    let messages = &locale.messages;
    log::header(&messages.validate_starting);

    if let Err(e) = config.validate() {
        log::error(&messages.validate_failed.replace("{error}", &e.to_string()));
        return Err(e);
    }

    log::info(&format!("Base URL: {}", config.importer.base_url));
    log::info(&format!(
        "Request delay: {} ms, timeout: {} s",
        config.importer.request_delay_ms, config.importer.timeout_secs
    ));
    log::info(&format!("Catalog directory: {}", config.paths.catalog_dir));
    log::info(&format!("Categories ({}):", config.categories.len()));
    for category in &config.categories {
        log::sub_item(&format!("{}: {}", category.name, category.index_url));
    }

    log::success(&messages.validate_success);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let locale = LocaleConfig::default();
        assert!(run_validate(&Config::default(), &locale).is_ok());
    }

    #[test]
    fn broken_config_reports_error() {
        let locale = LocaleConfig::default();
        let mut config = Config::default();
        config.categories.clear();
        assert!(run_validate(&config, &locale).is_err());
    }
}
