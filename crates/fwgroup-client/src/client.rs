// GroupMembershipClient - handle over the Inventory and ChangeDesk services

use async_trait::async_trait;

use crate::change_desk::{ChangeDeskClient, SubmitOutcome};
use crate::config::GroupClientConfig;
use crate::error::{GroupMembershipError, Result};
use crate::inventory::InventoryClient;

/// Membership operations the lifecycle layer depends on
#[async_trait]
pub trait MembershipManager: Send + Sync {
    /// Ensure `ip` is a member of every device group named exactly `group`.
    ///
    /// `Ok(false)` means no such group exists.
    async fn add_member(
        &self,
        ip: &str,
        group: &str,
    ) -> std::result::Result<bool, GroupMembershipError>;

    /// Ensure `ip` is not a member of any device group named exactly `group`.
    ///
    /// `Ok(false)` means the group does not exist or has no member displayed as `ip`.
    async fn remove_member(
        &self,
        ip: &str,
        group: &str,
    ) -> std::result::Result<bool, GroupMembershipError>;
}

/// Client handle for group membership reconciliation.
///
/// Holds no state between calls; clones share the underlying connection pools.
#[derive(Clone, Debug)]
pub struct GroupMembershipClient {
    inventory: InventoryClient,
    change_desk: ChangeDeskClient,
}

impl GroupMembershipClient {
    /// Create a client from hosts, shared credentials and TLS/debug flags
    pub fn new(
        change_desk_host: &str,
        inventory_host: &str,
        username: &str,
        password: &str,
        allow_insecure: bool,
        debug: bool,
    ) -> Result<Self> {
        let config = GroupClientConfig::new(change_desk_host, inventory_host)
            .with_auth(username, password)
            .with_allow_insecure(allow_insecure)
            .with_debug(debug);
        Self::with_config(config)
    }

    /// Create a client with the given configuration
    pub fn with_config(config: GroupClientConfig) -> Result<Self> {
        Ok(Self {
            inventory: InventoryClient::new(&config)?,
            change_desk: ChangeDeskClient::new(&config)?,
        })
    }

    pub fn from_parts(inventory: InventoryClient, change_desk: ChangeDeskClient) -> Self {
        Self {
            inventory,
            change_desk,
        }
    }

    pub fn inventory(&self) -> &InventoryClient {
        &self.inventory
    }

    pub fn change_desk(&self) -> &ChangeDeskClient {
        &self.change_desk
    }

    /// Create a group on the device identified by `management_id`.
    ///
    /// Not used by membership reconciliation; the group is seeded with a
    /// placeholder host since ChangeDesk refuses empty groups.
    pub async fn create_group(&self, name: &str, management_id: i64) -> Result<SubmitOutcome> {
        self.change_desk
            .submit_create_group(name, management_id)
            .await
    }
}

#[async_trait]
impl MembershipManager for GroupMembershipClient {
    async fn add_member(
        &self,
        ip: &str,
        group: &str,
    ) -> std::result::Result<bool, GroupMembershipError> {
        GroupMembershipClient::add_member(self, ip, group).await
    }

    async fn remove_member(
        &self,
        ip: &str,
        group: &str,
    ) -> std::result::Result<bool, GroupMembershipError> {
        GroupMembershipClient::remove_member(self, ip, group).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GroupClientError;

    #[test]
    fn test_new_requires_hosts() {
        let result = GroupMembershipClient::new("", "st.example.com", "admin", "secret", false, false);
        assert!(matches!(result, Err(GroupClientError::InvalidConfig(_))));

        let result = GroupMembershipClient::new("sc.example.com", "", "admin", "secret", false, false);
        assert!(matches!(result, Err(GroupClientError::InvalidConfig(_))));
    }

    #[test]
    fn test_new_with_hosts() {
        let client =
            GroupMembershipClient::new("sc.example.com", "st.example.com", "admin", "secret", true, false)
                .unwrap();
        let _cloned = client.clone();
    }

    #[test]
    fn test_client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GroupMembershipClient>();
    }
}
