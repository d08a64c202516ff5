//! Command-line client for the shortening service.
//!
//! Runs the same workflows as the web front-end, one per invocation.
//!
//! # Usage
//!
//! ```bash
//! # List all mappings
//! cargo run --bin shortlink-cli -- list
//!
//! # Shorten a URL (prompts when the URL is omitted)
//! cargo run --bin shortlink-cli -- shorten https://example.com/a/long/path
//!
//! # Look up the original URL or the statistics of a short code
//! cargo run --bin shortlink-cli -- decode abc123
//! cargo run --bin shortlink-cli -- stats abc123
//!
//! # Show where /abc123 would redirect to
//! cargo run --bin shortlink-cli -- resolve abc123
//! ```
//!
//! # Environment Variables
//!
//! - `API_BASE_URL` (optional): shortening service base URL, overridden by `--api-base-url`

use shortlink::application::{
    DecodeWorkflow, MappingListCache, Navigation, RedirectResolver, ShortenWorkflow,
    StatisticsWorkflow, WorkflowState,
};
use shortlink::config::{DEFAULT_API_BASE_URL, parse_base_url};
use shortlink::domain::ShortenerGateway;
use shortlink::domain::entities::Mapping;
use shortlink::infrastructure::http::HttpGateway;
use shortlink::web::view::MappingRow;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use std::process::ExitCode;
use std::sync::Arc;

/// Command-line client for a ShortLink service.
#[derive(Parser)]
#[command(name = "shortlink-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the shortening service
    #[arg(long, env = "API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// List all shortened URLs
    List,

    /// Shorten a URL
    Shorten {
        /// URL to shorten (prompted for when omitted)
        url: Option<String>,
    },

    /// Show the original URL behind a short code
    Decode {
        /// Short code or short URL
        code: String,
    },

    /// Show visit statistics of a short code
    Stats {
        /// Short code or short URL (at least 3 characters)
        code: String,
    },

    /// Show where a short link would redirect to
    Resolve {
        /// Short code
        code: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let base_url = parse_base_url(&cli.api_base_url)?;
    let gateway: Arc<dyn ShortenerGateway> =
        Arc::new(HttpGateway::new(base_url).context("Failed to create HTTP client")?);
    let cache = Arc::new(MappingListCache::new(gateway.clone()));

    let succeeded = match cli.command {
        Commands::List => list(&cache).await,
        Commands::Shorten { url } => {
            let url = match url {
                Some(url) => url,
                None => Input::<String>::new()
                    .with_prompt("URL to shorten")
                    .allow_empty(true)
                    .interact_text()?,
            };
            let workflow = ShortenWorkflow::new(gateway, cache);
            report_url(workflow.dispatch(url).await, "Short URL")
        }
        Commands::Decode { code } => {
            let workflow = DecodeWorkflow::new(gateway, cache);
            report_url(workflow.dispatch(code).await, "Original URL")
        }
        Commands::Stats { code } => {
            let workflow = StatisticsWorkflow::new(gateway);
            report_statistics(workflow.dispatch(code).await)
        }
        Commands::Resolve { code } => resolve(gateway, &code).await,
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn list(cache: &MappingListCache) -> bool {
    if let Err(e) = cache.refresh().await {
        eprintln!("{} {}", "✗".red().bold(), e);
        return false;
    }

    let snapshot = cache.snapshot();
    if snapshot.mappings.is_empty() {
        println!("{}", "No URLs have been shortened yet.".yellow());
        return true;
    }

    println!("{}", format!("{} URLs", snapshot.mappings.len()).bold());
    println!();
    for mapping in &snapshot.mappings {
        print_mapping(mapping);
        println!();
    }
    true
}

fn report_url(state: WorkflowState<String>, label: &str) -> bool {
    match (state.result, state.error) {
        (Some(url), _) => {
            println!("{} {}: {}", "✓".green().bold(), label, url.cyan());
            true
        }
        (None, Some(error)) => {
            eprintln!("{} {}", "✗".red().bold(), error);
            false
        }
        (None, None) => false,
    }
}

fn report_statistics(state: WorkflowState<Mapping>) -> bool {
    match (state.result, state.error) {
        (Some(mapping), _) => {
            print_mapping(&mapping);
            true
        }
        (None, Some(error)) => {
            eprintln!("{} {}", "✗".red().bold(), error);
            false
        }
        (None, None) => false,
    }
}

async fn resolve(gateway: Arc<dyn ShortenerGateway>, code: &str) -> bool {
    let mut resolver = RedirectResolver::new(gateway);

    match resolver.activate(Some(code)).await {
        Some(Navigation::External(url)) => {
            println!("{} /{} → {}", "✓".green().bold(), code, url.cyan());
            true
        }
        Some(Navigation::Home) => {
            println!(
                "{} /{} cannot be resolved, the browser would return to /",
                "✗".red().bold(),
                code
            );
            false
        }
        None => {
            eprintln!("{}", "No short code given".red());
            false
        }
    }
}

fn print_mapping(mapping: &Mapping) {
    let row = MappingRow::from(mapping);
    println!("  {} {}", "Original URL:".bold(), row.original_url);
    println!("  {}    {}", "Short URL:".bold(), row.short_url.cyan());
    println!(
        "  {} {}  {} {}  {} {}",
        "Created:".dimmed(),
        row.created_at,
        "Visits:".dimmed(),
        row.visits,
        "Last visited:".dimmed(),
        row.last_visited
    );
}
