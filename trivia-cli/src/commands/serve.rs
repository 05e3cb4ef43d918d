//! HTTP server command
//!
//! Runs the trivia API against PostgreSQL, or against an in-memory store
//! seeded with the default categories.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use trivia_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use trivia_server::db::{create_pool_with_options, schema};
use trivia_server::http::{run_server, ServerConfig};
use trivia_server::seed::seed_categories;
use trivia_server::{MemoryStore, PgStore, TriviaStore};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Allow any CORS origin. By default only http://localhost and
    /// http://127.0.0.1 on ports 3000 and 5000 are allowed
    #[arg(long)]
    pub cors_permissive: bool,

    /// Additional allowed CORS origin, e.g. https://quiz.example.com
    /// (repeatable, or comma-separated in TRIVIA_CORS_ORIGINS)
    #[arg(
        long = "cors-origin",
        value_name = "ORIGIN",
        env = "TRIVIA_CORS_ORIGINS",
        value_delimiter = ','
    )]
    pub cors_origins: Vec<String>,

    /// Database URL (overrides ~/.trivia/.env)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum connections in the database pool
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Serve from an in-memory store instead of PostgreSQL (ignores --database-url)
    #[arg(long)]
    pub in_memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store = open_store(&args).await?;

    tracing::info!("Starting trivia server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        cors_origins: args.cors_origins,
    };

    // Blocks until shutdown
    run_server(store, config).await.context("Server error")?;

    Ok(())
}

async fn open_store(args: &ServeArgs) -> Result<Arc<dyn TriviaStore>> {
    if args.in_memory {
        let store = MemoryStore::new();
        seed_categories(&store)
            .await
            .context("Failed to seed in-memory categories")?;
        return Ok(Arc::new(store));
    }

    let database_url = args.database_url.as_deref().context(
        "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.trivia/.env (or pass --in-memory)",
    )?;

    let pool = create_pool_with_options(database_url, args.max_connections)
        .await
        .context("Failed to create database pool")?;
    schema::run(&pool)
        .await
        .context("Failed to prepare database schema")?;

    Ok(Arc::new(PgStore::new(pool)))
}
