use crate::client::{DehashedClient, DehashedConfig};
use crate::output::save_json;
use crate::prelude::{println, *};
use serde::{Deserialize, Serialize};

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ListOptions {
    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Save results to a file instead of printing them
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct GetOptions {
    /// Report ID to show
    pub report_id: String,
}

fn client(global: &crate::Global) -> Result<DehashedClient> {
    let config = DehashedConfig::from_global(global)?;
    Ok(DehashedClient::new(&config)?)
}

pub async fn list(options: ListOptions, global: crate::Global) -> Result<()> {
    let reports = client(&global)?.monitoring_get_reports(options.page).await?;

    if let Some(ref path) = options.output {
        return save_json(&reports, path);
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

pub async fn get(options: GetOptions, global: crate::Global) -> Result<()> {
    let report = client(&global)?
        .monitoring_get_report(&options.report_id)
        .await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
