use crate::client::{DehashedClient, DehashedConfig};
use crate::prelude::{println, *};
use serde::{Deserialize, Serialize};

/// Options for the balance command
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct BalanceOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Handle the balance command.
///
/// The API has no dedicated balance endpoint; the balance rides along on
/// search responses, so this issues a minimal single-record probe search.
pub async fn run(options: BalanceOptions, global: crate::Global) -> Result<()> {
    let config = DehashedConfig::from_global(&global)?;
    let client = DehashedClient::new(&config)?;

    let balance = client.balance().await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "balance": balance }))?);
        return Ok(());
    }

    match balance {
        Some(credits) => println!("Account balance: {} credits", credits),
        None => println!("Account balance not reported by the API."),
    }

    Ok(())
}
