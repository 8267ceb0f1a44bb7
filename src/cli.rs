use clap::{Parser, Subcommand};
use eyre::{Context, Result};

use crate::config::{Configuration, load_configuration, lookup_config_path};
use crate::models::Status;

#[derive(Debug, Parser)]
#[command(
    version,
    about,
    long_about = r#"A terminal client for a remote prioritized task list

Default configuration file location looks up in the following order:
    * $XDG_CONFIG_HOME/prio/config.toml
    * $HOME/.config/prio/config.toml
    * $HOME/.prio.toml
"#
)]
pub struct Command {
    /// Configuration file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
pub enum Action {
    /// Print the task list
    List {
        /// Only show tasks with this priority (case-insensitive)
        #[arg(short, long)]
        priority: Option<String>,
    },
    /// Add a task and print the refreshed list
    Add {
        name: String,

        #[arg(short, long)]
        priority: String,
    },
    /// Delete a task by id
    Remove { id: u64 },
    /// Advance a task one step in the status cycle
    /// (in-progress -> done -> cancelled)
    Toggle { id: u64 },
    /// Replace a task entirely
    Update {
        id: u64,

        #[arg(long)]
        name: String,

        #[arg(short, long)]
        priority: String,

        #[arg(short, long)]
        status: Status,
    },
}

impl Command {
    pub fn new() -> Command {
        Self::parse()
    }

    pub fn get_config(&self) -> Result<Configuration> {
        let config_path = self
            .config
            .clone()
            .unwrap_or_else(|| lookup_config_path().unwrap_or_default());

        if config_path.is_empty() {
            // No config path is specified just use the default config
            return Ok(Configuration::default());
        }
        load_configuration(config_path.as_str()).wrap_err("loading configuration")
    }

    pub fn action(&self) -> &Action {
        &self.action
    }
}
