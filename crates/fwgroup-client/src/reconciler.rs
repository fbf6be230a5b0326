//! Membership reconciliation
//!
//! Turns an `(ip, group)` intent into ChangeDesk tickets using Inventory state.
//! Each call is a single pass: tickets are submitted one after another and the
//! first failure stops the pass. Tickets already accepted stay accepted.
//!
//! Add and remove deliberately look at different member fields. Add asks
//! whether the IP is already present by canonical `name`; remove selects
//! members by `display_name`.

use tracing::{debug, info};

use crate::client::GroupMembershipClient;
use crate::error::GroupMembershipError;
use crate::model::{NetworkObject, TicketMember};

type MembershipResult = std::result::Result<bool, GroupMembershipError>;

impl GroupMembershipClient {
    /// Add `ip` to every device group whose display name is exactly `group`.
    ///
    /// At most one ticket is submitted per matching group, and none when the
    /// group already lists `ip` as a member. Returns `Ok(false)` when no such
    /// group exists.
    pub async fn add_member(&self, ip: &str, group: &str) -> MembershipResult {
        let candidates = self
            .inventory()
            .find_objects_by_name(group)
            .await
            .map_err(|e| GroupMembershipError::new(false, e))?;
        if candidates.is_empty() {
            info!(group, ip, "Group not found, nothing to add");
            return Ok(false);
        }

        let mut added = false;
        for candidate in exact_matches(&candidates, group) {
            if candidate.has_member_named(ip) {
                debug!(group, ip, device_id = candidate.device_id, "Already a member");
                added = true;
                continue;
            }

            let device_id = candidate.device_id.to_string();
            let existing = self
                .inventory()
                .find_device_object_by_name(ip, &device_id, true)
                .await
                .map_err(|e| GroupMembershipError::new(added, e))?;

            let member = member_for_addition(ip, existing.as_ref());
            self.change_desk()
                .submit_add_member(&member, group, candidate.device_id)
                .await
                .map_err(|e| GroupMembershipError::new(added, e))?;
            added = true;
        }

        Ok(added)
    }

    /// Remove `ip` from every device group whose display name is exactly `group`.
    ///
    /// One ticket is submitted per member displayed as `ip`.
    pub async fn remove_member(&self, ip: &str, group: &str) -> MembershipResult {
        let candidates = self
            .inventory()
            .find_objects_by_name(group)
            .await
            .map_err(|e| GroupMembershipError::new(false, e))?;
        if candidates.is_empty() {
            info!(group, ip, "Group not found, nothing to remove");
            return Ok(false);
        }

        let mut removed = false;
        for candidate in exact_matches(&candidates, group) {
            for member in members_for_removal(ip, candidate) {
                self.change_desk()
                    .submit_remove_member(&member, group, candidate.device_id)
                    .await
                    .map_err(|e| GroupMembershipError::new(removed, e))?;
                removed = true;
            }
        }

        Ok(removed)
    }
}

/// Search results whose display name matches `group` exactly
pub fn exact_matches<'a>(
    candidates: &'a [NetworkObject],
    group: &'a str,
) -> impl Iterator<Item = &'a NetworkObject> + 'a {
    candidates.iter().filter(move |c| c.display_name == group)
}

/// Member to add, given what the owning device already knows about `ip`
pub fn member_for_addition(ip: &str, existing: Option<&NetworkObject>) -> TicketMember {
    match existing {
        None => TicketMember::new_host(ip),
        Some(object) => TicketMember::existing_host(ip, object.device_id),
    }
}

/// One removal member per entry of `candidate` displayed as `ip`
pub fn members_for_removal(ip: &str, candidate: &NetworkObject) -> Vec<TicketMember> {
    candidate
        .members_displayed_as(ip)
        .map(|_| TicketMember::removal(ip, candidate.device_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MemberStatus, MemberType, NetworkObjectMember, ObjectUpdatedStatus};

    fn group(display_name: &str, device_id: i64, members: &[(&str, &str)]) -> NetworkObject {
        NetworkObject {
            display_name: display_name.to_string(),
            name: display_name.to_string(),
            device_id,
            member: members
                .iter()
                .map(|(name, display_name)| NetworkObjectMember {
                    name: name.to_string(),
                    display_name: display_name.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_exact_matches_is_case_sensitive() {
        let candidates = vec![
            group("app_servers", 500, &[]),
            group("APP_SERVERS", 501, &[]),
            group("App_Servers", 502, &[]),
        ];
        let matched: Vec<i64> = exact_matches(&candidates, "APP_SERVERS")
            .map(|c| c.device_id)
            .collect();
        assert_eq!(matched, vec![501]);
    }

    #[test]
    fn test_member_for_addition_new_host() {
        let member = member_for_addition("10.0.0.5", None);
        assert_eq!(member.type_, MemberType::Host);
        assert_eq!(member.object_updated_status, Some(ObjectUpdatedStatus::New));
        assert_eq!(member.management_id, None);
        assert_eq!(member.object_details.as_deref(), Some("10.0.0.5/255.255.255.255"));
        assert_eq!(member.status, MemberStatus::Added);
    }

    #[test]
    fn test_member_for_addition_existing_object() {
        let existing = NetworkObject {
            display_name: "10.0.0.5".to_string(),
            device_id: 612,
            ..Default::default()
        };
        let member = member_for_addition("10.0.0.5", Some(&existing));
        assert_eq!(member.type_, MemberType::Object);
        assert_eq!(
            member.object_updated_status,
            Some(ObjectUpdatedStatus::ExistingNotEdited)
        );
        assert_eq!(member.management_id, Some(612));
        assert_eq!(member.status, MemberStatus::Added);
    }

    #[test]
    fn test_members_for_removal_uses_display_name() {
        let candidate = group(
            "APP_SERVERS",
            501,
            &[("host_10.0.0.9", "10.0.0.9"), ("10.0.0.7", "web-7")],
        );

        let members = members_for_removal("10.0.0.9", &candidate);
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "10.0.0.9");
        assert_eq!(members[0].management_id, Some(501));
        assert_eq!(members[0].status, MemberStatus::Deleted);
        assert_eq!(members[0].type_, MemberType::Object);

        // Canonical name alone does not select a member for removal
        assert!(members_for_removal("10.0.0.7", &candidate).is_empty());
    }
}
