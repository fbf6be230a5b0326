//! fwgroup CLI - configuration, logging and the group-member resource lifecycle
//!
//! The binary wires these pieces around `fwgroup_client::GroupMembershipClient`.

pub mod commands;
pub mod logging;
pub mod resource;
pub mod settings;

pub use resource::{GroupMemberResource, ResourceError};
pub use settings::{Cli, Command, Settings};
