//! Error types for the group membership client

use reqwest::StatusCode;

/// Errors that can occur while talking to Inventory or ChangeDesk
#[derive(Debug, thiserror::Error)]
pub enum GroupClientError {
    #[error("Unauthorized request. API returned: {0}")]
    Authentication(String),

    #[error("Multiple {kind} objects found for {name} ({count} matches)")]
    AmbiguousMatch {
        kind: &'static str,
        name: String,
        count: usize,
    },

    #[error("Ticket rejected with status {status}: {body}")]
    TicketRejected { status: StatusCode, body: String },

    #[error("Unexpected response with status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GroupClientError {
    /// The raw remote body carried by the error, if any
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Authentication(body)
            | Self::TicketRejected { body, .. }
            | Self::UnexpectedStatus { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Whether the request never produced an HTTP response
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, GroupClientError>;

/// Failure of a reconciliation call.
///
/// `changed` reports whether any ticket was accepted before the failure.
/// Already-submitted tickets are not rolled back.
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct GroupMembershipError {
    pub changed: bool,
    #[source]
    pub source: GroupClientError,
}

impl GroupMembershipError {
    pub fn new(changed: bool, source: GroupClientError) -> Self {
        Self { changed, source }
    }
}
