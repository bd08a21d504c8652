use crate::prelude::{println, *};

pub mod channels;
pub mod reports;
pub mod tasks;

/// Monitoring module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "monitoring")]
#[command(about = "Monitoring tasks, reports, and notification channels")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Create a monitoring task
    CreateTask(tasks::CreateOptions),

    /// Update a monitoring task's type or value
    UpdateTask(tasks::UpdateOptions),

    /// Activate or deactivate a monitoring task
    SetStatus(tasks::StatusOptions),

    /// Delete a monitoring task
    DeleteTask(tasks::DeleteOptions),

    /// List monitoring tasks
    GetTasks(tasks::ListOptions),

    /// Show one monitoring task
    GetTask(tasks::GetOptions),

    /// List monitoring reports
    GetReports(reports::ListOptions),

    /// Show one monitoring report
    GetReport(reports::GetOptions),

    /// List notification channels
    GetChannels(channels::ListOptions),

    /// Set a notification channel's target
    UpdateChannel(channels::UpdateOptions),

    /// Delete a notification channel
    DeleteChannel(channels::DeleteOptions),
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Running monitoring module...");
    }

    match app.command {
        Commands::CreateTask(options) => tasks::create(options, global).await,
        Commands::UpdateTask(options) => tasks::update(options, global).await,
        Commands::SetStatus(options) => tasks::set_status(options, global).await,
        Commands::DeleteTask(options) => tasks::delete(options, global).await,
        Commands::GetTasks(options) => tasks::list(options, global).await,
        Commands::GetTask(options) => tasks::get(options, global).await,
        Commands::GetReports(options) => reports::list(options, global).await,
        Commands::GetReport(options) => reports::get(options, global).await,
        Commands::GetChannels(options) => channels::list(options, global).await,
        Commands::UpdateChannel(options) => channels::update(options, global).await,
        Commands::DeleteChannel(options) => channels::delete(options, global).await,
    }
}

/// Parse the comma-separated --channels flag into the API's list form.
pub(crate) fn split_channels(channels: Option<String>) -> Option<Vec<String>> {
    channels.map(|list| {
        list.split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_channels_none() {
        assert_eq!(split_channels(None), None);
    }

    #[test]
    fn test_split_channels_single() {
        assert_eq!(
            split_channels(Some("email".to_string())),
            Some(vec!["email".to_string()])
        );
    }

    #[test]
    fn test_split_channels_trims_and_drops_empties() {
        assert_eq!(
            split_channels(Some("email, webhook,".to_string())),
            Some(vec!["email".to_string(), "webhook".to_string()])
        );
    }
}
