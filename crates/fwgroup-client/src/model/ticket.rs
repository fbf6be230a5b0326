//! ChangeDesk ticket document
//!
//! A ticket nests seven levels deep:
//! `Ticket -> Steps -> Step -> Tasks -> Task -> Fields -> Field -> GroupChange -> Members -> Member`.
//! Every submission in this crate uses a single step, task and field carrying a
//! single group change, so [`Ticket::group_change`] builds the whole chain.

use serde::{Deserialize, Serialize};

use crate::config::WorkflowConfig;
use crate::constants::ticket;

/// Body of `POST /securechange/tickets.json`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TicketEnvelope {
    pub ticket: Ticket,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ticket {
    pub priority: String,
    pub steps: Steps,
    pub subject: String,
    pub workflow: Workflow,
}

impl Ticket {
    /// Build a single-step ticket around one group change
    pub fn group_change(subject: String, workflow: &WorkflowConfig, change: GroupChange) -> Self {
        Self {
            priority: ticket::PRIORITY_NORMAL.to_string(),
            subject,
            workflow: Workflow {
                id: workflow.id,
                name: workflow.name.clone(),
            },
            steps: Steps {
                step: vec![Step {
                    name: ticket::STEP_NAME.to_string(),
                    tasks: Tasks {
                        task: vec![Task {
                            fields: Fields {
                                field: vec![Field {
                                    xsi_type: ticket::FIELD_XSI_TYPE.to_string(),
                                    name: ticket::FIELD_NAME.to_string(),
                                    group_change: vec![change],
                                }],
                            },
                        }],
                    },
                }],
            },
        }
    }

    /// Iterate over every group change in the ticket
    pub fn group_changes(&self) -> impl Iterator<Item = &GroupChange> {
        self.steps
            .step
            .iter()
            .flat_map(|s| s.tasks.task.iter())
            .flat_map(|t| t.fields.field.iter())
            .flat_map(|f| f.group_change.iter())
    }

    pub fn into_envelope(self) -> TicketEnvelope {
        TicketEnvelope { ticket: self }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Steps {
    pub step: Vec<Step>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    pub tasks: Tasks,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tasks {
    pub task: Vec<Task>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub fields: Fields,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Fields {
    pub field: Vec<Field>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Field {
    #[serde(rename = "@xsi.type")]
    pub xsi_type: String,
    pub group_change: Vec<GroupChange>,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroupChange {
    #[serde(rename = "@xsi.type")]
    pub xsi_type: String,
    pub change_action: ChangeAction,
    pub management_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_name: Option<String>,
    pub members: Members,
    pub name: String,
}

impl GroupChange {
    pub fn new(
        action: ChangeAction,
        group: &str,
        management_id: i64,
        members: Vec<TicketMember>,
    ) -> Self {
        Self {
            xsi_type: ticket::GROUP_CHANGE_XSI_TYPE.to_string(),
            change_action: action,
            management_id,
            management_name: None,
            members: Members { member: members },
            name: group.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Members {
    pub member: Vec<TicketMember>,
}

/// One member entry of a group change
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketMember {
    #[serde(rename = "@type")]
    pub type_: MemberType,
    #[serde(rename = "@xsi.type")]
    pub xsi_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management_name: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_details: Option<String>,
    pub object_type: String,
    /// Set only on additions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_updated_status: Option<ObjectUpdatedStatus>,
    pub status: MemberStatus,
}

impl TicketMember {
    /// A host member that does not exist yet on the device
    pub fn new_host(ip: &str) -> Self {
        Self {
            type_: MemberType::Host,
            xsi_type: ticket::MEMBER_XSI_TYPE.to_string(),
            management_id: None,
            management_name: None,
            name: ip.to_string(),
            object_details: Some(host_details(ip)),
            object_type: ticket::OBJECT_TYPE_HOST.to_string(),
            object_updated_status: Some(ObjectUpdatedStatus::New),
            status: MemberStatus::Added,
        }
    }

    /// A host member referencing an object the device already knows
    pub fn existing_host(ip: &str, management_id: i64) -> Self {
        Self {
            type_: MemberType::Object,
            management_id: Some(management_id),
            object_updated_status: Some(ObjectUpdatedStatus::ExistingNotEdited),
            ..Self::new_host(ip)
        }
    }

    /// A member to drop from a group
    pub fn removal(ip: &str, management_id: i64) -> Self {
        Self {
            type_: MemberType::Object,
            xsi_type: ticket::MEMBER_XSI_TYPE.to_string(),
            management_id: Some(management_id),
            management_name: None,
            name: ip.to_string(),
            object_details: None,
            object_type: ticket::OBJECT_TYPE_HOST.to_string(),
            object_updated_status: None,
            status: MemberStatus::Deleted,
        }
    }

    /// The placeholder host used to seed a new group
    pub fn placeholder() -> Self {
        Self {
            object_updated_status: None,
            ..Self::new_host(ticket::PLACEHOLDER_MEMBER)
        }
    }
}

fn host_details(ip: &str) -> String {
    format!("{}/{}", ip, ticket::HOST_NETMASK)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    Create,
    Update,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemberStatus {
    Added,
    Deleted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectUpdatedStatus {
    New,
    ExistingNotEdited,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberType {
    Host,
    Object,
}
