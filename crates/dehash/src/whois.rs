use crate::client::{DehashedClient, DehashedConfig};
use crate::output::save_json;
use crate::prelude::{println, *};
use serde::{Deserialize, Serialize};

use dehash_core::whois::{ReverseWhoisParams, WhoisRequest};

/// WHOIS module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "whois")]
#[command(about = "WHOIS lookups, reverse searches, and subdomain scans")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Look up the current WHOIS record for a domain
    Lookup(DomainOptions),

    /// Look up historical WHOIS records for a domain
    History(DomainOptions),

    /// Find domains by registrant name, organization, or email
    Reverse(ReverseOptions),

    /// Find domains hosted on an IP address
    Ip(DomainOptions),

    /// Find domains using an MX server
    Mx(DomainOptions),

    /// Find domains using a nameserver
    Ns(DomainOptions),

    /// Scan for subdomains of a base domain
    Subdomain(DomainOptions),
}

/// Options shared by the domain-keyed WHOIS operations
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct DomainOptions {
    /// Domain, IP address, or server name to look up
    pub domain: String,

    /// Save results to a file instead of printing them
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Options for reverse WHOIS lookups
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ReverseOptions {
    /// Registrant name
    #[arg(long)]
    pub name: Option<String>,

    /// Organization name
    #[arg(long)]
    pub organization: Option<String>,

    /// Registrant email
    #[arg(long)]
    pub email: Option<String>,

    /// Require these strings to appear in results (can be repeated)
    #[arg(long)]
    pub include: Option<Vec<String>>,

    /// Exclude results containing these strings (can be repeated)
    #[arg(long)]
    pub exclude: Option<Vec<String>>,

    /// Save results to a file instead of printing them
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Run a WHOIS search and print or save the raw response.
///
/// WHOIS responses vary per search type, so they are passed through as
/// opaque JSON rather than forced into a schema.
pub async fn whois_data(
    request: &WhoisRequest,
    global: &crate::Global,
) -> Result<serde_json::Value> {
    let config = DehashedConfig::from_global(global)?;
    let client = DehashedClient::new(&config)?;

    Ok(client.whois(request).await?)
}

async fn handle(request: WhoisRequest, output: Option<String>, global: crate::Global) -> Result<()> {
    let results = whois_data(&request, &global).await?;

    if let Some(ref path) = output {
        return save_json(&results, path);
    }

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Running WHOIS module...");
    }

    match app.command {
        Commands::Lookup(options) => {
            handle(WhoisRequest::lookup(options.domain), options.output, global).await
        }
        Commands::History(options) => {
            handle(WhoisRequest::history(options.domain), options.output, global).await
        }
        Commands::Reverse(options) => {
            let request = WhoisRequest::reverse(ReverseWhoisParams {
                name: options.name,
                organization: options.organization,
                email: options.email,
                include: options.include,
                exclude: options.exclude,
            })
            .map_err(|e| eyre!("{}", e))?;
            handle(request, options.output, global).await
        }
        Commands::Ip(options) => {
            handle(WhoisRequest::reverse_ip(options.domain), options.output, global).await
        }
        Commands::Mx(options) => {
            handle(WhoisRequest::reverse_mx(options.domain), options.output, global).await
        }
        Commands::Ns(options) => {
            handle(WhoisRequest::reverse_ns(options.domain), options.output, global).await
        }
        Commands::Subdomain(options) => {
            handle(
                WhoisRequest::subdomain_scan(options.domain),
                options.output,
                global,
            )
            .await
        }
    }
}
