//! CLI module for PMP RAG Router
//!
//! Provides subcommands for:
//! - `serve`: HTTP API server
//! - `ask`: answer one query from the terminal
//! - `cache`: inspect or clear the semantic cache
//! - `migrate`: create the pgvector schema

pub mod ask;
pub mod cache;
pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::config::{AppConfig, Secrets};
use crate::infrastructure::logging;

/// PMP RAG Router - document Q&A with a semantic cache and web search fallback
#[derive(Parser)]
#[command(name = "pmp-rag-router")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Answer a single query and exit
    Ask(ask::AskArgs),

    /// Semantic cache maintenance
    #[command(subcommand)]
    Cache(cache::CacheCommand),

    /// Create the pgvector extension, tables and indexes
    Migrate,
}

/// Environment, configuration and logging shared by every subcommand
pub(crate) fn bootstrap() -> anyhow::Result<(AppConfig, Secrets)> {
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!(error = %e, "Failed to read .env file");
        }
    }

    config.validate()?;

    Ok((config, Secrets::from_env()))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ask_json() {
        let cli = Cli::try_parse_from(["pmp-rag-router", "ask", "--json", "latest NVDA news"]).unwrap();

        match cli.command {
            Command::Ask(args) => {
                assert!(args.json);
                assert_eq!(args.query, "latest NVDA news");
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_parse_cache_clear() {
        let cli = Cli::try_parse_from(["pmp-rag-router", "cache", "clear"]).unwrap();

        assert!(matches!(cli.command, Command::Cache(cache::CacheCommand::Clear)));
    }
}
