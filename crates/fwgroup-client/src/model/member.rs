// Caller-facing membership pair

use serde::{Deserialize, Serialize};

/// One `(group, ip)` membership intent
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupMember {
    pub group_name: String,
    pub ip_address: String,
}

impl GroupMember {
    pub fn new(group_name: &str, ip_address: &str) -> Self {
        Self {
            group_name: group_name.to_string(),
            ip_address: ip_address.to_string(),
        }
    }
}

impl std::fmt::Display for GroupMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} in {}", self.ip_address, self.group_name)
    }
}
