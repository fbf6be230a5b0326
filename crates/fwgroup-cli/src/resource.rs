//! Lifecycle adapter for a single `(group, ip)` membership.
//!
//! Maps create/read/update/delete onto [`MembershipManager`]. Reads are
//! local: the stored pair is trusted, no remote lookup is made.

use std::net::Ipv4Addr;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use fwgroup_client::{GroupMember, GroupMembershipError, MembershipManager};

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("Invalid {field} '{value}': {reason}")]
    Invalid {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Group {group} does not exist or IP {ip} is not a viable member.")]
    NotAdded { group: String, ip: String },

    #[error("Failed to remove {ip} IP from {group} Group")]
    NotRemoved { group: String, ip: String },

    #[error(transparent)]
    Membership(#[from] GroupMembershipError),
}

/// A managed membership and its generated identifier
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupMemberResource {
    pub id: String,
    #[serde(flatten)]
    pub member: GroupMember,
}

/// Check the pair before any remote call
pub fn validate(member: &GroupMember) -> Result<(), ResourceError> {
    if member.group_name.trim().is_empty() {
        return Err(ResourceError::Invalid {
            field: "group_name",
            value: member.group_name.clone(),
            reason: "must not be empty",
        });
    }
    if member.group_name.chars().any(char::is_whitespace) {
        return Err(ResourceError::Invalid {
            field: "group_name",
            value: member.group_name.clone(),
            reason: "must not contain whitespace",
        });
    }
    if member.ip_address.parse::<Ipv4Addr>().is_err() {
        return Err(ResourceError::Invalid {
            field: "ip_address",
            value: member.ip_address.clone(),
            reason: "must be an IPv4 address",
        });
    }
    Ok(())
}

impl GroupMemberResource {
    /// Ensure membership and assign a fresh id
    pub async fn create<M>(manager: &M, member: GroupMember) -> Result<Self, ResourceError>
    where
        M: MembershipManager + ?Sized,
    {
        validate(&member)?;
        add(manager, &member).await?;

        let resource = Self {
            id: Uuid::new_v4().to_string(),
            member,
        };
        info!(id = %resource.id, member = %resource.member, "Group member created");
        Ok(resource)
    }

    pub fn read(&self) -> &GroupMember {
        &self.member
    }

    /// Remove the membership
    pub async fn delete<M>(&self, manager: &M) -> Result<(), ResourceError>
    where
        M: MembershipManager + ?Sized,
    {
        remove(manager, &self.member).await?;
        info!(id = %self.id, member = %self.member, "Group member deleted");
        Ok(())
    }

    /// Move the membership to `member`, removing the old pair first.
    ///
    /// The id is kept. If the add fails after the removal succeeded the old
    /// membership is gone and the error is returned.
    pub async fn replace<M>(&mut self, manager: &M, member: GroupMember) -> Result<(), ResourceError>
    where
        M: MembershipManager + ?Sized,
    {
        validate(&member)?;
        if member == self.member {
            return Ok(());
        }

        remove(manager, &self.member).await?;
        add(manager, &member).await?;

        info!(id = %self.id, from = %self.member, to = %member, "Group member replaced");
        self.member = member;
        Ok(())
    }
}

/// Add without tracking state, as the `add` command does
pub async fn add<M>(manager: &M, member: &GroupMember) -> Result<(), ResourceError>
where
    M: MembershipManager + ?Sized,
{
    if manager
        .add_member(&member.ip_address, &member.group_name)
        .await?
    {
        Ok(())
    } else {
        Err(ResourceError::NotAdded {
            group: member.group_name.clone(),
            ip: member.ip_address.clone(),
        })
    }
}

/// Remove without tracking state, as the `remove` command does
pub async fn remove<M>(manager: &M, member: &GroupMember) -> Result<(), ResourceError>
where
    M: MembershipManager + ?Sized,
{
    if manager
        .remove_member(&member.ip_address, &member.group_name)
        .await?
    {
        Ok(())
    } else {
        Err(ResourceError::NotRemoved {
            group: member.group_name.clone(),
            ip: member.ip_address.clone(),
        })
    }
}
