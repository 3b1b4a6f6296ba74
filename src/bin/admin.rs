//! CLI administration tool for shortlink.
//!
//! Drives the same resolution engine as the HTTP service, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a link with a custom slug, expiring at the end of the year
//! cargo run --bin admin -- create https://example.com --slug promo2025 --expiration 2026-12-31T23:59:59Z
//!
//! # Resolve a slug (does not count a click)
//! cargo run --bin admin -- resolve promo2025
//!
//! # Check custom slug availability
//! cargo run --bin admin -- check promo2025
//!
//! # List links created by a user
//! cargo run --bin admin -- list alice --include-expired
//!
//! # Link totals / database connection
//! cargo run --bin admin -- stats
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `shortlink::config`). With `--memory` the commands
//! run against in-process adapters and nothing is persisted.

use shortlink::application::services::ResolutionService;
use shortlink::config::{self, Config};
use shortlink::domain::entities::{CreateLinkRequest, RedirectDecision};
use shortlink::infrastructure::cache::MemoryCache;
use shortlink::infrastructure::persistence::MemoryLinkRepository;
use shortlink::server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Use in-memory store and cache instead of PostgreSQL/Redis
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Create {
        /// Destination URL (http or https)
        url: String,

        /// Custom slug (8-16 alphanumeric characters)
        #[arg(short, long)]
        slug: Option<String>,

        /// Expiration, RFC3339 or YYYY-MM-DDTHH:MM:SS (UTC)
        #[arg(short, long)]
        expiration: Option<String>,

        /// Tracking parameter, repeatable: --utm source=newsletter
        #[arg(long = "utm", value_parser = parse_key_value)]
        utms: Vec<(String, String)>,

        /// Count redirects for this link
        #[arg(short, long)]
        track_clicks: bool,

        /// Owner recorded on the link
        #[arg(long)]
        owner: Option<String>,
    },

    /// Resolve a slug without counting a click
    Resolve { slug: String },

    /// Check whether a custom slug is available
    Check { slug: String },

    /// List links created by a user, newest first
    List {
        owner: String,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 100)]
        size: u32,

        #[arg(long)]
        include_expired: bool,
    },

    /// Show link totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Stats => handle_stats(&connect_pool().await?).await,
        Commands::Db { action } => handle_db_action(action, &connect_pool().await?).await,
        command => {
            let engine = build_engine(cli.memory).await?;
            handle_engine_command(command, &engine).await
        }
    }
}

/// Builds the engine against the configured backends or in-memory adapters.
async fn build_engine(memory: bool) -> Result<Arc<ResolutionService>> {
    if memory {
        println!("{}", "Using in-memory store (nothing is persisted)".yellow());
        return Ok(Arc::new(ResolutionService::new(
            Arc::new(MemoryLinkRepository::new()),
            Arc::new(MemoryCache::new()),
            Default::default(),
        )));
    }

    let config = load_config()?;
    server::build_engine(&config).await
}

fn load_config() -> Result<Config> {
    config::load_from_env().context("Failed to load configuration")
}

async fn connect_pool() -> Result<PgPool> {
    let config = load_config()?;
    PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Dispatches commands served by the resolution engine.
async fn handle_engine_command(command: Commands, engine: &ResolutionService) -> Result<()> {
    match command {
        Commands::Create {
            url,
            slug,
            expiration,
            utms,
            track_clicks,
            owner,
        } => {
            let request = CreateLinkRequest {
                url,
                slug,
                expiration,
                utm: utms.into_iter().collect::<HashMap<_, _>>(),
                track_clicks,
                created_by: owner,
            };
            let created = engine.create(request).await?;

            println!("{}", "✅ Short link created".green().bold());
            println!("  Slug:        {}", created.slug.bright_yellow().bold());
            println!("  Destination: {}", created.destination.cyan());
            match created.expire_at {
                Some(at) => println!("  Expires:     {}", at.to_rfc3339().bright_white()),
                None => println!("  Expires:     {}", "never".bright_black()),
            }
        }
        Commands::Resolve { slug } => {
            let resolution = engine.resolve(&slug).await?;
            let decision = match resolution.decision {
                RedirectDecision::Permanent => "301 PERMANENT".green(),
                RedirectDecision::Temporary => "302 TEMPORARY".green(),
                RedirectDecision::Gone => "410 GONE".red(),
                RedirectDecision::NotFound => "404 NOT FOUND".red(),
            };

            println!("  Slug:     {}", slug.cyan());
            println!("  Decision: {}", decision.bold());
            if let Some(destination) = resolution.destination {
                println!("  Target:   {}", destination.bright_white());
            }
            println!("  Source:   {}", format!("{:?}", resolution.source).bright_black());
        }
        Commands::Check { slug } => {
            let availability = engine.check_availability(&slug).await?;
            if availability.available {
                println!("{} {}", "✅".green(), format!("{slug} is available").green());
            } else {
                println!("{} {}", "❌".red(), availability.message.red());
            }
        }
        Commands::List {
            owner,
            page,
            size,
            include_expired,
        } => {
            let links = engine
                .list_by_owner(&owner, page, size, include_expired)
                .await?;

            if links.is_empty() {
                println!("{}", "  No links found".yellow());
                return Ok(());
            }

            println!(
                "  {:<18} {:<10} {:<22} {}",
                "Slug".bright_white().bold(),
                "Clicks".bright_white().bold(),
                "Expires".bright_white().bold(),
                "Destination".bright_white().bold()
            );
            println!("  {}", "─".repeat(90).bright_black());

            for link in &links {
                let expires = link
                    .expire_at
                    .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "never".to_string());

                println!(
                    "  {:<18} {:<10} {:<22} {}",
                    link.slug.cyan(),
                    link.redirect_count.to_string().bright_green(),
                    expires.bright_black(),
                    link.destination
                );
            }

            println!();
            println!("  Total: {}", links.len().to_string().bright_white().bold());
        }
        Commands::Stats | Commands::Db { .. } => unreachable!("handled before engine construction"),
    }

    Ok(())
}

/// Displays link totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (links, active, redirects): (i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT
            COUNT(*),
            COUNT(*) FILTER (WHERE expire_at IS NULL OR expire_at > NOW()),
            COALESCE(SUM(redirect_count), 0)::BIGINT
        FROM short_links
        "#,
    )
    .fetch_one(pool)
    .await?;

    println!("  Links:     {}", links.to_string().bright_green().bold());
    println!("  Active:    {}", active.to_string().bright_green().bold());
    println!("  Redirects: {}", redirects.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

/// Parses `key=value` pairs for `--utm`.
fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}
