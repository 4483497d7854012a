//! Pokedex CLI
//!
//! Interactive explorer for the PokeAPI creature catalog.

mod commands;
mod config;
mod repl;
mod session;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pokedex_api::ClientConfig;
use pokedex_core::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_CACHE_INTERVAL_SECONDS, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECONDS,
};

use crate::config::Settings;
use crate::session::Session;

/// Pokedex - explore the PokeAPI world from your terminal
#[derive(Parser)]
#[command(name = "pokedex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// PokeAPI root URL
    #[arg(long, env = "POKEAPI_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    base_url: String,

    /// Seconds a response stays cached (also the reaper period)
    #[arg(long, env = "POKEDEX_CACHE_INTERVAL", default_value_t = DEFAULT_CACHE_INTERVAL_SECONDS)]
    cache_interval: u64,

    /// Location areas per map page
    #[arg(long, env = "POKEDEX_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// HTTP request timeout in seconds
    #[arg(long, env = "POKEDEX_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    timeout: u64,

    /// Disable the response cache
    #[arg(long)]
    no_cache: bool,

    /// Run a single command (e.g. `explore canalave-city-area`) instead of the REPL
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

impl Cli {
    fn settings(&self) -> Settings {
        let client = ClientConfig {
            base_url: self.base_url.clone(),
            page_size: self.page_size,
            timeout_seconds: self.timeout,
        };
        let settings = Settings {
            cache_interval: Duration::from_secs(self.cache_interval),
            ..Settings::with_client(client)
        };
        if self.no_cache {
            settings.no_cache()
        } else {
            settings
        }
    }
}

/// Default `EnvFilter` directives when `RUST_LOG` is unset.
fn log_filter(verbose: bool) -> &'static str {
    if verbose {
        "pokedex=debug,info"
    } else {
        "warn"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| log_filter(cli.verbose).into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = cli.settings();
    info!(
        base_url = %settings.client.base_url,
        cache = settings.enable_cache,
        interval = ?settings.cache_interval,
        "Starting Pokedex"
    );

    let mut session = Session::new(&settings).context("Failed to start Pokedex session")?;

    if !cli.command.is_empty() {
        let line = cli.command.join(" ");
        let result = repl::run_line(&mut session, &line).await;
        session.close();
        return result.map(|_| ()).with_context(|| format!("'{}' failed", line));
    }

    println!("{}", "Pokedex running... type 'help' for commands".cyan().bold());
    repl::run(&mut session).await.context("REPL terminated")?;

    Ok(())
}
