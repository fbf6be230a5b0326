//! Command line and configuration loading
//!
//! Settings come from an optional YAML file, then `FWGROUP_*` environment
//! variables, then command line flags. Later sources win.

use std::path::{Path, PathBuf};

use anyhow::bail;
use clap::{Parser, Subcommand};
use config::{Config, Environment};
use serde::Deserialize;

use fwgroup_client::GroupClientConfig;

pub const DEFAULT_CONFIG_FILE: &str = "conf/fwgroup.yml";
pub const ENV_PREFIX: &str = "FWGROUP";

#[derive(Debug, Parser)]
#[command(name = "fwgroup", version, about = "Reconcile firewall group membership through change tickets")]
pub struct Cli {
    /// Path to the YAML settings file
    #[arg(short = 'c', long = "config", env = "FWGROUP_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    #[arg(long = "changedesk-host", env = "FWGROUP_CHANGEDESK_HOST")]
    pub changedesk_host: Option<String>,
    #[arg(long = "inventory-host", env = "FWGROUP_INVENTORY_HOST")]
    pub inventory_host: Option<String>,
    #[arg(short = 'u', long = "user", env = "FWGROUP_USER")]
    pub user: Option<String>,
    #[arg(long = "password", env = "FWGROUP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    /// Skip TLS certificate validation
    #[arg(long = "allow-insecure")]
    pub allow_insecure: bool,
    /// Log request and response bodies
    #[arg(long = "debug")]
    pub debug: bool,
    /// Also write logs to this file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Make an IP address a member of a group on every device carrying it
    Add {
        #[arg(long)]
        ip: String,
        #[arg(long)]
        group: String,
    },
    /// Remove an IP address from a group on every device carrying it
    Remove {
        #[arg(long)]
        ip: String,
        #[arg(long)]
        group: String,
    },
    /// Open a ticket creating a group on one device
    CreateGroup {
        #[arg(long)]
        name: String,
        #[arg(long = "management-id")]
        management_id: i64,
    },
    /// List devices known to the inventory
    Devices,
    /// Look up one device by IP address or name
    Device { ip_or_name: String },
    /// Search network objects by name
    Objects {
        name: String,
        #[arg(long = "device-id")]
        device_id: Option<String>,
        #[arg(long = "case-insensitive")]
        case_insensitive: bool,
    },
}

/// Effective settings for one invocation
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub changedesk_host: String,
    pub inventory_host: String,
    pub user: String,
    pub password: String,
    pub allow_insecure: bool,
    pub debug: bool,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
    pub workflow_id: i64,
    pub workflow_name: String,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        let client = GroupClientConfig::default();
        Self {
            changedesk_host: client.change_desk_host,
            inventory_host: client.inventory_host,
            user: client.username,
            password: client.password,
            allow_insecure: client.allow_insecure,
            debug: client.debug,
            connect_timeout_ms: client.connect_timeout_ms,
            read_timeout_ms: client.read_timeout_ms,
            workflow_id: client.workflow.id,
            workflow_name: client.workflow.name,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Settings {
    /// Load from `path` (if it exists) and the environment.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config = Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Overlay command line flags
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(host) = &cli.changedesk_host {
            self.changedesk_host = host.clone();
        }
        if let Some(host) = &cli.inventory_host {
            self.inventory_host = host.clone();
        }
        if let Some(user) = &cli.user {
            self.user = user.clone();
        }
        if let Some(password) = &cli.password {
            self.password = password.clone();
        }
        if cli.log_file.is_some() {
            self.log_file = cli.log_file.clone();
        }
        self.allow_insecure |= cli.allow_insecure;
        self.debug |= cli.debug;
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let required = [
            ("changedesk_host", &self.changedesk_host),
            ("inventory_host", &self.inventory_host),
            ("user", &self.user),
            ("password", &self.password),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                bail!(
                    "Missing setting `{}` (set it in the config file or {}_{})",
                    key,
                    ENV_PREFIX,
                    key.to_uppercase()
                );
            }
        }
        Ok(())
    }

    pub fn client_config(&self) -> GroupClientConfig {
        GroupClientConfig::new(&self.changedesk_host, &self.inventory_host)
            .with_auth(&self.user, &self.password)
            .with_timeouts(self.connect_timeout_ms, self.read_timeout_ms)
            .with_allow_insecure(self.allow_insecure)
            .with_debug(self.debug)
            .with_workflow(self.workflow_id, &self.workflow_name)
    }
}
