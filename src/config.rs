use std::env;
use std::path::Path;

use anyhow::Result;

const DEFAULT_DB_PATH: &str = "./forumrank.db";
const DEFAULT_LIMIT: usize = 20;
const DEFAULT_TRENDING_PAGE_SIZE: usize = 10;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Scoring weights are not
/// configurable; they are the defaults on the weight structs.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database path (FORUMRANK_DB_PATH)
    pub db_path: String,
    /// Result count when a command doesn't pass --limit (FORUMRANK_DEFAULT_LIMIT)
    pub default_limit: usize,
    /// Page size for trending listings (FORUMRANK_TRENDING_PAGE_SIZE)
    pub trending_page_size: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every setting has a default; unparseable numbers fall back to it.
    pub fn load() -> Result<Self> {
        Ok(Self {
            db_path: env::var("FORUMRANK_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string()),
            default_limit: parse_usize("FORUMRANK_DEFAULT_LIMIT", DEFAULT_LIMIT),
            trending_page_size: parse_usize(
                "FORUMRANK_TRENDING_PAGE_SIZE",
                DEFAULT_TRENDING_PAGE_SIZE,
            ),
        })
    }

    /// Check that the database has been initialized.
    /// Call this before any command that reads signals.
    pub fn require_database(&self) -> Result<()> {
        if !Path::new(&self.db_path).exists() {
            anyhow::bail!(
                "No database at {}.\n\
                 Run `forumrank init` and `forumrank import <dataset.json>` first,\n\
                 or set FORUMRANK_DB_PATH to an existing database.",
                self.db_path
            );
        }
        Ok(())
    }
}

fn parse_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
