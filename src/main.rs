use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use forumrank::config::Config;
use forumrank::db::models::Dataset;
use forumrank::db::sqlite::SqliteSource;
use forumrank::output::terminal;
use forumrank::{RecommendationEngine, RecommendationStrategy};

/// forumrank: feed ranking and connection recommendations for a social forum.
///
/// Runs the recommendation engine against a local SQLite snapshot of the
/// forum's posts, likes, comments, friendships, and groups.
#[derive(Parser)]
#[command(name = "forumrank", version, about)]
struct Cli {
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Import a JSON dataset (users, posts, likes, comments, friendships, groups)
    Import {
        /// Path to the dataset file
        path: String,
    },

    /// Show a user's interest topics (authored, interacted, friends)
    Interests {
        user: i64,
    },

    /// Personalized "for you" feed for a user
    Feed {
        user: i64,

        /// Number of posts (default: FORUMRANK_DEFAULT_LIMIT or 20)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Trending posts by engagement, one page at a time
    Trending {
        user: i64,

        /// Page size (default: FORUMRANK_TRENDING_PAGE_SIZE or 10)
        #[arg(long)]
        limit: Option<usize>,

        /// Zero-based page number
        #[arg(long, default_value = "0")]
        page: usize,
    },

    /// Suggest users to connect with
    Users {
        user: i64,

        #[arg(long)]
        limit: Option<usize>,

        /// interest, mutual_friends, recent_interactions (default: all combined)
        #[arg(long)]
        strategy: Option<String>,
    },

    /// Suggest groups to join
    Groups {
        user: i64,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show database status (path, size, row counts)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("forumrank=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing forumrank database...");
            let db = init_database(&config)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nNext step: forumrank import <dataset.json>");
        }

        Commands::Import { path } => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read dataset at {path}"))?;
            let dataset = Dataset::from_json(&json)
                .with_context(|| format!("Failed to parse dataset at {path}"))?;

            let db = init_database(&config)?;
            db.import_dataset(&dataset).await?;

            info!(
                users = dataset.users.len(),
                posts = dataset.posts.len(),
                groups = dataset.groups.len(),
                "Imported dataset"
            );
            println!("{}", "Import complete.".bold());
            for (table, count) in db.row_counts().await? {
                println!("  {table}: {count}");
            }
        }

        Commands::Interests { user } => {
            let engine = open_engine(&config)?;
            let profile = engine.interest_profile(user).await;
            if cli.json {
                print_json(&profile)?;
            } else {
                terminal::display_interests(user, &profile);
            }
        }

        Commands::Feed { user, limit } => {
            let engine = open_engine(&config)?;
            let limit = limit.unwrap_or(config.default_limit);
            let feed = engine.get_personalized_feed(user, limit).await?;
            if cli.json {
                print_json(&feed)?;
            } else {
                terminal::display_posts("For You", &feed, 0);
            }
        }

        Commands::Trending { user, limit, page } => {
            let engine = open_engine(&config)?;
            let limit = limit.unwrap_or(config.trending_page_size);
            let offset = page.saturating_mul(limit);
            let feed = engine.get_trending_feed(user, limit, offset).await?;
            if cli.json {
                print_json(&feed)?;
            } else {
                terminal::display_posts(&format!("Trending, page {page}"), &feed, offset);
            }
        }

        Commands::Users {
            user,
            limit,
            strategy,
        } => {
            let engine = open_engine(&config)?;
            let limit = limit.unwrap_or(config.default_limit);
            let strategy = RecommendationStrategy::from_param(strategy.as_deref());
            let recommendations = engine.recommend_users(user, limit, strategy).await?;
            if cli.json {
                print_json(&recommendations)?;
            } else {
                terminal::display_users(&recommendations);
            }
        }

        Commands::Groups { user, limit } => {
            let engine = open_engine(&config)?;
            let limit = limit.unwrap_or(config.default_limit);
            let recommendations = engine.recommend_groups(user, limit).await?;
            if cli.json {
                print_json(&recommendations)?;
            } else {
                terminal::display_groups(&recommendations);
            }
        }

        Commands::Status => {
            if !Path::new(&config.db_path).exists() {
                println!("Database: not initialized");
                println!("\nRun `forumrank init` to set up the database.");
                return Ok(());
            }

            let file_size = std::fs::metadata(&config.db_path)
                .map(|m| format_bytes(m.len()))
                .unwrap_or_else(|_| "unknown".to_string());
            println!("Database: {} ({})", config.db_path, file_size);

            let db = open_database(&config)?;
            for (table, count) in db.row_counts().await? {
                println!("  {table}: {count}");
            }
        }
    }

    Ok(())
}

fn open_database(config: &Config) -> Result<Arc<SqliteSource>> {
    config.require_database()?;
    let conn = forumrank::db::open(&config.db_path)?;
    Ok(Arc::new(SqliteSource::new(conn)))
}

fn init_database(config: &Config) -> Result<Arc<SqliteSource>> {
    let conn = forumrank::db::initialize(&config.db_path)?;
    Ok(Arc::new(SqliteSource::new(conn)))
}

fn open_engine(config: &Config) -> Result<RecommendationEngine> {
    let db = open_database(config)?;
    Ok(RecommendationEngine::new(db))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
