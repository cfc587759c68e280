//! `sylvan` - command-line front end for the card search core.
//!
//! Usage:
//!   sylvan parse 'power>=3 -c:r'
//!   sylvan sql 't:goblin sort:-power'
//!   sylvan search 'o:"draw a card"' --page 1 --page-size 20 [--set m10] [--json]
//!   sylvan migrate

mod config;
mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use sylvan_cardsearch::db::query_builder::{build_card_sql, BindValue};
use sylvan_cardsearch::sort::with_name_tiebreak;
use sylvan_cardsearch::{parse_query, CardQuery, CardSearch, PgCardStore, SearchService};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "sylvan")]
#[command(about = "Search a trading-card catalogue with the Sylvan query language")]
struct Args {
    /// Configuration file (defaults to ./sylvan.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a query and print what it matches
    Parse { query: String },

    /// Print the SQL a query compiles to. Set names are not resolved.
    Sql { query: String },

    /// Run a query against the database
    Search {
        query: String,

        /// 1-based page number
        #[arg(long)]
        page: Option<u32>,

        /// Results per page (defaults to search.default_page_size)
        #[arg(long)]
        page_size: Option<u32>,

        /// Prefer printings from this set
        #[arg(long)]
        set: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply the database schema
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;
    logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    match args.command {
        Command::Parse { query } => parse(&query),
        Command::Sql { query } => sql(&query),
        Command::Search {
            query,
            page,
            page_size,
            set,
            json,
        } => search(&config, query, page, page_size, set, json).await,
        Command::Migrate => migrate(&config).await,
    }
}

fn parse(query: &str) -> Result<()> {
    let parsed = parse_query(query).map_err(|e| anyhow::anyhow!("{e}"))?;
    println!("{}", parsed.root.describe());
    let sort = with_name_tiebreak(parsed.sort);
    let sort: Vec<String> = sort.iter().map(ToString::to_string).collect();
    println!("sort: {}", sort.join(", "));
    Ok(())
}

fn sql(query: &str) -> Result<()> {
    let parsed = parse_query(query).map_err(|e| anyhow::anyhow!("{e}"))?;
    let card_query = CardQuery::new(parsed.root.to_filter(), with_name_tiebreak(parsed.sort));
    let (sql, binds) = build_card_sql(&card_query);
    println!("{sql}");
    for (i, bind) in binds.iter().enumerate() {
        let value = match bind {
            BindValue::Text(v) => format!("{v:?}"),
            BindValue::TextArray(vs) => format!("{vs:?}"),
            BindValue::Float(v) => v.to_string(),
            BindValue::Int(v) => v.to_string(),
            BindValue::BigInt(v) => v.to_string(),
            BindValue::Date(v) => v.to_string(),
        };
        println!("${} = {}", i + 1, value);
    }
    Ok(())
}

async fn connect(config: &Config) -> Result<PgCardStore> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database.pool_max_size)
        .min_connections(config.database.pool_min_size)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    Ok(PgCardStore::new(pool))
}

async fn search(
    config: &Config,
    query: String,
    page: Option<u32>,
    page_size: Option<u32>,
    set: Option<String>,
    json: bool,
) -> Result<()> {
    let store = connect(config).await?;
    let service = SearchService::new(Arc::new(store)).with_page_limits(config.page_limits());

    let mut search = CardSearch::from_query(query);
    if let Some(page) = page {
        search = search.with_page(page, page_size);
    } else if page_size.is_some() {
        search = search.with_page(1, page_size);
    }
    if let Some(set) = set {
        search = search.with_preferred_set(set);
    }

    let results = search.execute(&service).await.map_err(|e| match e {
        sylvan_cardsearch::Error::Parse(parse) => anyhow::anyhow!("{parse}"),
        other => anyhow::Error::new(other).context("Search failed"),
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }
    for result in &results {
        let set = result
            .selected_printing
            .as_ref()
            .map(|p| p.set_code.to_uppercase())
            .unwrap_or_default();
        println!("{:<40} {:<6} {}", result.card.name, set, result.card.type_line);
    }
    tracing::info!(results = results.len(), "Done");
    Ok(())
}

async fn migrate(config: &Config) -> Result<()> {
    let store = connect(config).await?;
    store.migrate().await.context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");
    Ok(())
}
