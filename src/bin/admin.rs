//! CLI administration tool for parcel-tracker.
//!
//! Runs lookups, manages operational key-value entries and checks the
//! database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Look up a package exactly as the service would
//! cargo run --bin admin -- lookup SNO123
//!
//! # Manage key-value entries
//! cargo run --bin admin -- kv put maintenance.banner "Back at 10:00" --ttl 3600
//! cargo run --bin admin -- kv get maintenance.banner
//! cargo run --bin admin -- kv delete maintenance.banner
//! ```
//!
//! # Environment Variables
//!
//! Same as the service (see `parcel_tracker::config`), loaded from `.env` when present.

use parcel_tracker::application::services::{KvService, Lookup, LookupSource};
use parcel_tracker::config::{self, Config};
use parcel_tracker::domain::TrackingError;
use parcel_tracker::domain::repositories::TrackingRepository;
use parcel_tracker::infrastructure::cache::NullCache;
use parcel_tracker::infrastructure::persistence::PgTrackingRepository;
use parcel_tracker::server::{connect_cache, connect_database};
use parcel_tracker::state::AppState;
use parcel_tracker::utils::validation::is_valid_tracking_number;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing parcel-tracker.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Look up a tracking number through the cache-aside path
    Lookup {
        /// Tracking number
        sno: String,
    },

    /// Manage operational key-value entries
    Kv {
        #[command(subcommand)]
        action: KvAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Key-value subcommands.
#[derive(Subcommand)]
enum KvAction {
    /// Read a value
    Get { key: String },

    /// Store a value
    Put {
        key: String,
        value: String,

        /// Expiry in seconds (no expiry if omitted)
        #[arg(long)]
        ttl: Option<u64>,

        /// Overwrite without confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Delete a value
    Delete { key: String },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Lookup { sno } => handle_lookup(&config, &sno).await?,
        Commands::Kv { action } => handle_kv_action(&config, action).await?,
        Commands::Db { action } => handle_db_action(&config, action).await?,
    }

    Ok(())
}

/// Builds the same state the server uses.
async fn build_state(config: &Config) -> Result<AppState> {
    let pool = connect_database(config).await?;
    let cache = connect_cache(config).await;
    let repository = Arc::new(PgTrackingRepository::new(Arc::new(pool)));

    Ok(AppState::new(repository, cache, config.lookup_settings()))
}

/// Runs one lookup and prints the outcome and record.
async fn handle_lookup(config: &Config, sno: &str) -> Result<()> {
    if !is_valid_tracking_number(sno) {
        anyhow::bail!("'{}' is not a valid tracking number", sno);
    }

    let state = build_state(config).await?;

    println!("{} {}", "🔎 Lookup".bright_blue().bold(), sno.cyan());
    println!();

    report_lookup(sno, state.tracking_service.lookup(sno).await)
}

/// Prints a lookup outcome.
///
/// Not-found and lookup failures are returned as errors so the process exits non-zero.
fn report_lookup(sno: &str, result: Result<Lookup, TrackingError>) -> Result<()> {
    match result {
        Ok(lookup) => {
            let outcome = match lookup.source {
                LookupSource::Cache => "served from cache".green(),
                LookupSource::Store => "served from database".yellow(),
            };
            println!("  Outcome:  {}", outcome);
            println!("  Status:   {}", lookup.record.tracking_status.bold());
            println!("  ETA:      {}", lookup.record.estimated_delivery);
            println!("  Events:   {}", lookup.record.details.len());
            match &lookup.record.current_location {
                Some(location) => println!("  Location: {} ({})", location.title, location.city),
                None => println!("  Location: {}", "none yet".dimmed()),
            }
            println!();
            println!("{}", serde_json::to_string_pretty(&lookup.record)?);
            Ok(())
        }
        Err(e @ TrackingError::NotFound(_)) => {
            println!("  Outcome:  {}", "not found".red());
            Err(e.into())
        }
        Err(e) => {
            println!("  Outcome:  {}", "error".red().bold());
            Err(anyhow::Error::new(e).context(format!("Lookup of '{}' failed", sno)))
        }
    }
}

/// Dispatches key-value commands.
async fn handle_kv_action(config: &Config, action: KvAction) -> Result<()> {
    let cache = connect_cache(config).await;
    if !cache.health_check().await || cache.backend() == NullCache::BACKEND {
        anyhow::bail!("Key-value commands require a reachable Redis (set REDIS_URL)");
    }

    let kv = KvService::new(cache, Duration::from_millis(config.cache_timeout_ms));

    match action {
        KvAction::Get { key } => match kv.get(&key).await? {
            Some(value) => println!("{}", value),
            None => println!("{} {}", "Key not found:".yellow(), key),
        },
        KvAction::Put {
            key,
            value,
            ttl,
            yes,
        } => put_value(&kv, &key, &value, ttl, yes).await?,
        KvAction::Delete { key } => {
            if kv.delete(&key).await? {
                println!("{} {}", "✓ Deleted".green(), key);
            } else {
                println!("{} {}", "Key not found:".yellow(), key);
            }
        }
    }

    Ok(())
}

/// Stores a value, asking before overwriting an existing one.
async fn put_value(
    kv: &KvService,
    key: &str,
    value: &str,
    ttl: Option<u64>,
    skip_confirm: bool,
) -> Result<()> {
    if let Some(existing) = kv.get(key).await? {
        println!("{} {}", "Current value:".dimmed(), existing);

        if !skip_confirm
            && !Confirm::new()
                .with_prompt(format!("Overwrite '{}'?", key))
                .default(false)
                .interact()?
        {
            println!("{}", "Cancelled".yellow());
            return Ok(());
        }
    }

    kv.put(key, value, ttl.map(Duration::from_secs)).await?;

    match ttl {
        Some(secs) => println!("{} {} (expires in {}s)", "✓ Stored".green(), key, secs),
        None => println!("{} {}", "✓ Stored".green(), key),
    }

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(config: &Config, action: DbAction) -> Result<()> {
    match action {
        DbAction::Check => {
            let pool = connect_database(config)
                .await
                .context("Failed to connect to database")?;
            let repository = PgTrackingRepository::new(Arc::new(pool));

            match repository.ping().await {
                Ok(()) => println!("{}", "✓ Database connection OK".green()),
                Err(e) => {
                    println!("{} {}", "✗ Database check failed:".red(), e);
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}
