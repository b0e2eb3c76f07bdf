use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use yansi::Paint;

use grocer::api::{self, ApiError};
use grocer::config::{self, ApiConfig};
use grocer::services::{read_grocery_list, run_shopping_list, run_single_search, RunOptions};
use grocer::{GrocerError, ProductSelector, SelectionStrategy};

#[derive(Parser)]
#[command(
    name = "grocer",
    author,
    version,
    about = "Search a grocery list against the Kroger product API",
    long_about = r#"grocer — find a product for every line of a grocery list.

Each non-empty, non-comment line of the list is searched at the configured
store and one product is picked with the selected strategy. Lines may carry
a brand hint after an em dash or hyphen:

    2% milk — Organic Valley
    eggs - Vital Farms
    # comments and blank lines are ignored

Credentials come from KROGER_CLIENT_ID and KROGER_CLIENT_SECRET, either in
the environment or in a .env file (see `--env-file`).

Examples:
  grocer list.md
  grocer --strategy lowest-price --show-candidates list.md
  grocer search "peanut butter"
"#,
    after_help = "Use `grocer <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Grocery list file (plain text or markdown, one item per line)
    list: Option<PathBuf>,
    /// How to pick a product from the search results
    #[arg(long, default_value_t = SelectionStrategy::default())]
    strategy: SelectionStrategy,
    /// Number of search results to request per item (1-50)
    #[arg(long)]
    limit: Option<u32>,
    /// Print every search result before the selected product
    #[arg(long)]
    show_candidates: bool,
    /// Skip the summary table at the end of the run
    #[arg(long)]
    no_summary: bool,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a single term and list every result
    #[command(about = "Search a single term", long_about = "Acquire a token, run one product search and print all returned products as a table.")]
    Search {
        term: String,
        /// Number of search results to request (1-50)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Validate configuration and acquire a token
    #[command(about = "Validate configuration and API credentials.", long_about = "Check that the required environment variables are present and that the token endpoint accepts the configured client credentials.")]
    CheckConfig,
}

fn report_error(err: &GrocerError) {
    tracing::debug!(error = %err, "grocer failed");
    match err {
        GrocerError::Api(ApiError::TokenRequest { status, body }) => {
            eprintln!("{}", Paint::new("Failed to retrieve access token").red());
            eprintln!("Status: {}", status.as_u16());
            eprintln!("Response: {}", body);
        }
        GrocerError::Api(ApiError::MissingAccessToken { body }) => {
            eprintln!("{}", Paint::new("No access token in response").red());
            eprintln!("{}", body);
        }
        other => eprintln!("{}", Paint::new(other.to_string()).red()),
    }
}

fn fail(err: impl Into<GrocerError>) -> ! {
    report_error(&err.into());
    process::exit(1);
}

fn load_config(limit: Option<u32>) -> ApiConfig {
    let config = ApiConfig::from_env().unwrap_or_else(|e| fail(e));
    match limit {
        Some(n) => config.with_search_limit(n).unwrap_or_else(|e| fail(e)),
        None => config,
    }
}

fn http_client(config: &ApiConfig) -> reqwest::Client {
    api::build_http_client(config.timeout).unwrap_or_else(|e| fail(e))
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        api::set_silent(true);
    }

    config::load_env_file(cli.env_file.as_deref());

    let mut out = io::stdout();
    match cli.command {
        Some(Commands::Search { term, limit }) => {
            let config = load_config(limit);
            let client = http_client(&config);
            if let Err(e) = run_single_search(&client, &config, &term, &mut out).await {
                fail(e);
            }
        }
        Some(Commands::CheckConfig) => {
            let config = load_config(None);
            let client = http_client(&config);
            match api::fetch_bearer_token(&client, &config).await {
                Ok(_) => println!(
                    "{} ({}, location {})",
                    Paint::new("Configuration looks valid, token acquired").green(),
                    config.base_url,
                    config.location_id
                ),
                Err(e) => fail(e),
            }
        }
        None => {
            let Some(path) = cli.list else {
                println!("Usage: grocer <grocery_list.md>");
                process::exit(1);
            };
            let entries = read_grocery_list(&path).unwrap_or_else(|e| fail(e));
            let config = load_config(cli.limit);
            let client = http_client(&config);
            let selector = ProductSelector::new(cli.strategy, &config.preferred_brand);
            let options = RunOptions {
                show_candidates: cli.show_candidates,
                summary: !cli.no_summary,
            };
            if let Err(e) = run_shopping_list(&client, &config, &selector, &entries, &options, &mut out).await {
                fail(e);
            }
        }
    }
}
