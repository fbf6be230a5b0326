// Configuration for GroupMembershipClient

use crate::constants::{api_path, ticket};
use crate::error::{GroupClientError, Result};

/// Workflow stamped into every submitted ticket
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub id: i64,
    pub name: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            id: ticket::DEFAULT_WORKFLOW_ID,
            name: ticket::DEFAULT_WORKFLOW_NAME.to_string(),
        }
    }
}

/// Configuration for the group membership client
#[derive(Clone, Debug)]
pub struct GroupClientConfig {
    /// ChangeDesk host, either `host[:port]` or a full `http(s)://` origin
    pub change_desk_host: String,
    /// Inventory host, either `host[:port]` or a full `http(s)://` origin
    pub inventory_host: String,
    /// Username for Basic authentication (shared by both services)
    pub username: String,
    /// Password for Basic authentication
    pub password: String,
    /// Skip TLS certificate validation
    pub allow_insecure: bool,
    /// Trace request and response bodies at debug level
    pub debug: bool,
    /// Connection timeout in milliseconds (default: 5000)
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds (default: 30000)
    pub read_timeout_ms: u64,
    /// Ticket workflow
    pub workflow: WorkflowConfig,
}

impl Default for GroupClientConfig {
    fn default() -> Self {
        Self {
            change_desk_host: String::new(),
            inventory_host: String::new(),
            username: String::new(),
            password: String::new(),
            allow_insecure: false,
            debug: false,
            connect_timeout_ms: 5000,
            read_timeout_ms: 30000,
            workflow: WorkflowConfig::default(),
        }
    }
}

impl GroupClientConfig {
    /// Create a config for the given ChangeDesk and Inventory hosts
    pub fn new(change_desk_host: &str, inventory_host: &str) -> Self {
        Self {
            change_desk_host: change_desk_host.to_string(),
            inventory_host: inventory_host.to_string(),
            ..Default::default()
        }
    }

    /// Set authentication credentials
    pub fn with_auth(mut self, username: &str, password: &str) -> Self {
        self.username = username.to_string();
        self.password = password.to_string();
        self
    }

    /// Set timeouts
    pub fn with_timeouts(mut self, connect_ms: u64, read_ms: u64) -> Self {
        self.connect_timeout_ms = connect_ms;
        self.read_timeout_ms = read_ms;
        self
    }

    pub fn with_allow_insecure(mut self, allow_insecure: bool) -> Self {
        self.allow_insecure = allow_insecure;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_workflow(mut self, id: i64, name: &str) -> Self {
        self.workflow = WorkflowConfig {
            id,
            name: name.to_string(),
        };
        self
    }

    /// Base URL of the Inventory API
    pub fn inventory_base_url(&self) -> Result<String> {
        base_url(&self.inventory_host, api_path::INVENTORY_CONTEXT)
    }

    /// Base URL of the ChangeDesk API
    pub fn change_desk_base_url(&self) -> Result<String> {
        base_url(&self.change_desk_host, api_path::CHANGE_DESK_CONTEXT)
    }
}

/// Build `<origin><context>` from a bare host or a full origin
fn base_url(host: &str, context_path: &str) -> Result<String> {
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() {
        return Err(GroupClientError::InvalidConfig(format!(
            "no host configured for {}",
            context_path
        )));
    }

    let origin = if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    };

    Ok(format!("{}{}", origin, context_path))
}
