#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod balance;
mod client;
mod error;
mod monitoring;
mod output;
mod prelude;
mod search;
mod whois;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Command line interface for the DeHashed v2 breach-data and WHOIS API"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// DeHashed API key
    #[clap(long, env = "DEHASHED_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// DeHashed API base URL
    #[clap(long, env = "DEHASHED_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[clap(long, env = "DEHASHED_TIMEOUT", global = true)]
    timeout: Option<u64>,

    /// Whether to display additional information.
    #[clap(long, env = "DEHASHED_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Search breach records with a field:value query
    Search(crate::search::SearchOptions),

    /// Search records by password hash (free, consumes no credits)
    SearchPassword(crate::search::PasswordOptions),

    /// Monitoring tasks, reports, and notification channels
    Monitoring(crate::monitoring::App),

    /// WHOIS lookups, reverse searches, and subdomain scans
    Whois(crate::whois::App),

    /// Show remaining account credits
    Balance(crate::balance::BalanceOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Search(options) => crate::search::run(options, app.global).await,
        SubCommands::SearchPassword(options) => {
            crate::search::run_password(options, app.global).await
        }
        SubCommands::Monitoring(sub_app) => crate::monitoring::run(sub_app, app.global).await,
        SubCommands::Whois(sub_app) => crate::whois::run(sub_app, app.global).await,
        SubCommands::Balance(options) => crate::balance::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
