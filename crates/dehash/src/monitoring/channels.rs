use crate::client::{DehashedClient, DehashedConfig};
use crate::prelude::{println, *};
use serde::{Deserialize, Serialize};

use dehash_core::monitoring::{
    validate_channel_type, DeleteChannelRequest, UpdateChannelRequest,
};

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct ListOptions {}

/// Options for setting a channel's target
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct UpdateOptions {
    /// Channel type (email or webhook)
    pub channel_type: String,

    /// Channel target: an email address or a webhook URL
    pub value: String,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct DeleteOptions {
    /// Channel type to delete (email or webhook)
    pub channel_type: String,
}

fn client(global: &crate::Global) -> Result<DehashedClient> {
    let config = DehashedConfig::from_global(global)?;
    Ok(DehashedClient::new(&config)?)
}

pub async fn list(_options: ListOptions, global: crate::Global) -> Result<()> {
    let channels = client(&global)?.monitoring_get_channels().await?;
    println!("{}", serde_json::to_string_pretty(&channels)?);
    Ok(())
}

pub async fn update(options: UpdateOptions, global: crate::Global) -> Result<()> {
    validate_channel_type(&options.channel_type).map_err(|e| eyre!("{}", e))?;

    let request = UpdateChannelRequest {
        channel_type: options.channel_type,
        value: options.value,
    };

    let channel = client(&global)?.monitoring_update_channel(&request).await?;
    println!("{}", serde_json::to_string_pretty(&channel)?);
    Ok(())
}

pub async fn delete(options: DeleteOptions, global: crate::Global) -> Result<()> {
    validate_channel_type(&options.channel_type).map_err(|e| eyre!("{}", e))?;

    let request = DeleteChannelRequest {
        channel: options.channel_type,
    };

    let result = client(&global)?.monitoring_delete_channel(&request).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
