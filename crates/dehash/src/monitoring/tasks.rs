use crate::client::{DehashedClient, DehashedConfig};
use crate::output::save_json;
use crate::prelude::{println, *};
use serde::{Deserialize, Serialize};

use dehash_core::monitoring::{
    validate_task_type, CreateTaskRequest, TaskStatusRequest, UpdateTaskRequest,
};

/// Options for creating a monitoring task
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct CreateOptions {
    /// Task type (email, username, phone, ip_address, address, name, vin, domain, password)
    pub task_type: String,

    /// Value to monitor
    pub value: String,

    /// Notification channels, comma-separated (email,webhook)
    #[arg(long)]
    pub channels: Option<String>,
}

/// Options for updating a monitoring task
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct UpdateOptions {
    /// Task ID to update
    pub task_id: String,

    /// Task type
    pub task_type: String,

    /// New value to monitor
    pub value: String,

    /// Notification channels, comma-separated (email,webhook)
    #[arg(long)]
    pub channels: Option<String>,
}

/// Options for toggling a task's active flag
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct StatusOptions {
    /// Task ID to update
    pub task_id: String,

    /// Whether the task should be active
    #[arg(long)]
    pub active: bool,
}

#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
pub struct DeleteOptions {
    /// Task ID to delete
    pub task_id: String,
}

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
    /// Task ID to show
    pub task_id: String,
}

fn client(global: &crate::Global) -> Result<DehashedClient> {
    let config = DehashedConfig::from_global(global)?;
    Ok(DehashedClient::new(&config)?)
}

pub async fn create(options: CreateOptions, global: crate::Global) -> Result<()> {
    validate_task_type(&options.task_type).map_err(|e| eyre!("{}", e))?;

    let request = CreateTaskRequest {
        task_type: options.task_type,
        value: options.value,
        channels: super::split_channels(options.channels),
    };

    let task = client(&global)?.monitoring_create_task(&request).await?;
    println!("{}", serde_json::to_string_pretty(&task)?);
    Ok(())
}

pub async fn update(options: UpdateOptions, global: crate::Global) -> Result<()> {
    validate_task_type(&options.task_type).map_err(|e| eyre!("{}", e))?;

    let request = UpdateTaskRequest {
        id: options.task_id,
        task_type: options.task_type,
        value: options.value,
        channels: super::split_channels(options.channels),
    };

    let task = client(&global)?.monitoring_update_task(&request).await?;
    println!("{}", serde_json::to_string_pretty(&task)?);
    Ok(())
}

pub async fn set_status(options: StatusOptions, global: crate::Global) -> Result<()> {
    let request = TaskStatusRequest {
        id: options.task_id,
        active: options.active,
    };

    let task = client(&global)?.monitoring_set_task_status(&request).await?;
    println!("{}", serde_json::to_string_pretty(&task)?);
    Ok(())
}

pub async fn delete(options: DeleteOptions, global: crate::Global) -> Result<()> {
    let result = client(&global)?
        .monitoring_delete_task(&options.task_id)
        .await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub async fn list(options: ListOptions, global: crate::Global) -> Result<()> {
    let tasks = client(&global)?.monitoring_get_tasks(options.page).await?;

    if let Some(ref path) = options.output {
        return save_json(&tasks, path);
    }

    println!("{}", serde_json::to_string_pretty(&tasks)?);
    Ok(())
}

pub async fn get(options: GetOptions, global: crate::Global) -> Result<()> {
    let task = client(&global)?.monitoring_get_task(&options.task_id).await?;
    println!("{}", serde_json::to_string_pretty(&task)?);
    Ok(())
}
