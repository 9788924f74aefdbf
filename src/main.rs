// src/main.rs

//! elwis-catalog: ELWIS Question Catalog Importer CLI
//!
//! Scrapes the published boat-licence question catalogs and merges them
//! into a local de-duplicated store.

mod error;
mod importer;
mod models;
mod pipeline;
mod storage;
mod utils;

use clap::{Parser, Subcommand};
use env_logger::Env;

use crate::error::Result;
use crate::importer::HttpFetcher;
use crate::models::{Config, LocaleConfig};
use crate::pipeline::{run_assign, run_import, run_import_all, run_list, run_validate};
use crate::storage::LocalStore;
use crate::utils::log;

#[derive(Parser, Debug)]
#[command(
    name = "elwis-catalog",
    version = "0.1.0",
    about = "ELWIS boat-licence question catalog importer"
)]

/// CLI Arguments
struct Cli {
    #[arg(short, long, default_value = "data/config.toml")]
    config: String,

    #[arg(long, default_value = "data/locale.toml")]
    locale: String,

    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

/// CLI Commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Import questions from a source category
    Import {
        /// Category to import (as named in the configuration)
        #[arg(long, conflicts_with = "all")]
        category: Option<String>,
        /// Import every configured category
        #[arg(long)]
        all: bool,
        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// List persisted questions
    List {
        /// Only questions without a module assignment
        #[arg(long)]
        unassigned: bool,
        /// Print questions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Assign a question to a curriculum module
    Assign {
        /// Question id
        question: u64,
        /// Module id; omit to clear the assignment
        #[arg(long)]
        module: Option<u64>,
    },
    /// Validate configuration
    Validate,
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let mut config = Config::load_or_default(&cli.config);
    let locale = LocaleConfig::load_or_default(&cli.locale);

    if cli.quiet {
        config.logging.show_progress = false;
        config.logging.level = "warn".to_string();
    }

    // Initialize logging system
    log::init(&config.logging.level);

    let store = LocalStore::new(&config.paths.catalog_dir);

    match cli.command {
        Command::Import {
            category,
            all,
            json,
        } => {
            config.validate()?;
            let fetcher = HttpFetcher::new(&config.importer)?;
            let summary = if all {
                run_import_all(&config, &locale, &fetcher, &store).await?
            } else {
                // Single-category default matches the configured order.
                let name = match category {
                    Some(name) => name,
                    None => config.categories[0].name.clone(),
                };
                run_import(&config, &locale, &fetcher, &store, &name).await?
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        }
        Command::List { unassigned, json } => {
            run_list(&locale, &store, unassigned, json).await?;
        }
        Command::Assign { question, module } => {
            run_assign(&locale, &store, question, module).await?;
        }
        Command::Validate => run_validate(&config, &locale)?,
    }

    Ok(())
}
