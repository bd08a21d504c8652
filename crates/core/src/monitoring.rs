//! Monitoring task, report, and channel request models
//!
//! Request bodies for the monitoring endpoints. Monitoring responses are
//! passed through as opaque JSON by the shell, matching the API's loosely
//! documented response shapes, so only the request side is typed here.

use serde::{Deserialize, Serialize};

/// Task types accepted by the monitoring API.
pub const VALID_TASK_TYPES: &[&str] = &[
    "email",
    "username",
    "phone",
    "ip_address",
    "address",
    "name",
    "vin",
    "domain",
    "password",
];

/// Channel types accepted by the monitoring API.
pub const VALID_CHANNEL_TYPES: &[&str] = &["email", "webhook"];

/// Error type for monitoring request construction
#[derive(Debug, thiserror::Error)]
pub enum MonitoringError {
    #[error("Invalid task type: {0}. Valid types: email, username, phone, ip_address, address, name, vin, domain, password")]
    InvalidTaskType(String),

    #[error("Invalid channel type: {0}. Valid types: email, webhook")]
    InvalidChannelType(String),
}

/// Reject task types the API does not accept before spending a request on them.
pub fn validate_task_type(task_type: &str) -> Result<(), MonitoringError> {
    if VALID_TASK_TYPES.contains(&task_type) {
        Ok(())
    } else {
        Err(MonitoringError::InvalidTaskType(task_type.to_string()))
    }
}

pub fn validate_channel_type(channel_type: &str) -> Result<(), MonitoringError> {
    if VALID_CHANNEL_TYPES.contains(&channel_type) {
        Ok(())
    } else {
        Err(MonitoringError::InvalidChannelType(channel_type.to_string()))
    }
}

/// Body of POST /monitoring/create-task.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateTaskRequest {
    #[serde(rename = "type")]
    pub task_type: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<String>>,
}

/// Body of POST /monitoring/update-task when changing type or value.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateTaskRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub task_type: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<String>>,
}

/// Body of POST /monitoring/update-task when toggling the active flag.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TaskStatusRequest {
    pub id: String,
    pub active: bool,
}

/// Body of the get-task, delete-task, and get-report endpoints.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IdRequest {
    pub id: String,
}

/// Body of the paginated get-tasks and get-reports endpoints.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PageRequest {
    pub page: usize,
}

/// Body of POST /monitoring/update-channel.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateChannelRequest {
    #[serde(rename = "type")]
    pub channel_type: String,
    pub value: String,
}

/// Body of POST /monitoring/delete-channel.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeleteChannelRequest {
    pub channel: String,
}
