//! fwgroup client - firewall network-object group membership over Inventory and ChangeDesk
//!
//! This crate provides:
//! - HTTP transport with Basic authentication, optional TLS bypass and timeouts
//! - Inventory lookups for network objects and devices
//! - ChangeDesk ticket construction, submission and response classification
//! - A membership reconciler that turns `(ip, group)` intents into tickets

pub mod change_desk;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod inventory;
pub mod model;
pub mod reconciler;

pub use change_desk::{ChangeDeskClient, SubmitOutcome, TicketKind, TicketOperation};
pub use client::{GroupMembershipClient, MembershipManager};
pub use config::{GroupClientConfig, WorkflowConfig};
pub use error::{GroupClientError, GroupMembershipError, Result};
pub use http::{ApiHttpClient, RawResponse};
pub use inventory::InventoryClient;
pub use model::*;
