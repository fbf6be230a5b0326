//! ChangeDesk ticket submission
//!
//! ChangeDesk has no machine-readable idempotency signal. When a requested
//! change already holds it answers `400` with a sentence describing why, so
//! [`classify_response`] looks the operation up in [`ALREADY_SATISFIED`] and
//! checks the body for the expected phrase.

use reqwest::StatusCode;
use tracing::{info, warn};

use crate::config::{GroupClientConfig, WorkflowConfig};
use crate::constants::api_path;
use crate::error::{GroupClientError, Result};
use crate::http::ApiHttpClient;
use crate::model::{ChangeAction, GroupChange, Ticket, TicketMember};

/// The three group-membership mutations ChangeDesk is asked to perform
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TicketKind {
    CreateGroup,
    AddMember,
    RemoveMember,
}

/// Phrase templates for "this change already holds", keyed by operation.
///
/// `{name}` is the member (or new group) name, `{group}` the target group.
pub const ALREADY_SATISFIED: &[(TicketKind, &str)] = &[
    (
        TicketKind::CreateGroup,
        "object with name {name} already exists",
    ),
    (
        TicketKind::AddMember,
        "object with name {name} in group {group} already exists",
    ),
    (TicketKind::RemoveMember, "in group {group} does not exist"),
];

/// A single mutation: what is being done, to which object, in which group
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketOperation {
    pub kind: TicketKind,
    pub name: String,
    pub group: String,
}

impl TicketOperation {
    pub fn create_group(name: &str) -> Self {
        Self {
            kind: TicketKind::CreateGroup,
            name: name.to_string(),
            group: name.to_string(),
        }
    }

    pub fn add_member(member: &str, group: &str) -> Self {
        Self {
            kind: TicketKind::AddMember,
            name: member.to_string(),
            group: group.to_string(),
        }
    }

    pub fn remove_member(member: &str, group: &str) -> Self {
        Self {
            kind: TicketKind::RemoveMember,
            name: member.to_string(),
            group: group.to_string(),
        }
    }

    /// Ticket subject line
    pub fn subject(&self) -> String {
        match self.kind {
            TicketKind::CreateGroup => format!("Create Group {}", self.group),
            TicketKind::AddMember => format!("Add member {} to Group {}", self.name, self.group),
            TicketKind::RemoveMember => {
                format!("Remove Member {} from Group {}", self.name, self.group)
            }
        }
    }

    pub fn change_action(&self) -> ChangeAction {
        match self.kind {
            TicketKind::CreateGroup => ChangeAction::Create,
            TicketKind::AddMember | TicketKind::RemoveMember => ChangeAction::Update,
        }
    }

    /// The phrase a 400 body carries when this operation is a no-op
    pub fn already_satisfied_phrase(&self) -> Option<String> {
        ALREADY_SATISFIED
            .iter()
            .find(|(kind, _)| *kind == self.kind)
            .map(|(_, template)| {
                template
                    .replace("{name}", &self.name)
                    .replace("{group}", &self.group)
            })
    }
}

/// Successful result of a submission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// `201`: ChangeDesk opened the ticket
    Accepted,
    /// `400` whose body says the change already holds
    AlreadySatisfied,
}

/// Classify a ChangeDesk response for `operation`
pub fn classify_response(
    operation: &TicketOperation,
    status: StatusCode,
    body: &str,
) -> Result<SubmitOutcome> {
    match status {
        StatusCode::CREATED => Ok(SubmitOutcome::Accepted),
        StatusCode::UNAUTHORIZED => Err(GroupClientError::Authentication(body.to_string())),
        StatusCode::BAD_REQUEST
            if operation
                .already_satisfied_phrase()
                .is_some_and(|phrase| body.contains(&phrase)) =>
        {
            Ok(SubmitOutcome::AlreadySatisfied)
        }
        status => Err(GroupClientError::TicketRejected {
            status,
            body: body.to_string(),
        }),
    }
}

/// Client for the ChangeDesk ticket API
#[derive(Clone, Debug)]
pub struct ChangeDeskClient {
    http_client: ApiHttpClient,
    workflow: WorkflowConfig,
}

impl ChangeDeskClient {
    pub fn new(config: &GroupClientConfig) -> Result<Self> {
        let http_client = ApiHttpClient::new(config.change_desk_base_url()?, config)?;
        Ok(Self::with_http_client(http_client, config.workflow.clone()))
    }

    pub fn with_http_client(http_client: ApiHttpClient, workflow: WorkflowConfig) -> Self {
        Self {
            http_client,
            workflow,
        }
    }

    /// Create a group on a device, seeded with the placeholder host
    pub async fn submit_create_group(&self, name: &str, management_id: i64) -> Result<SubmitOutcome> {
        let operation = TicketOperation::create_group(name);
        let ticket = self.build_ticket(&operation, management_id, TicketMember::placeholder());
        self.submit(&operation, ticket).await
    }

    /// Add one member to an existing group
    pub async fn submit_add_member(
        &self,
        member: &TicketMember,
        group: &str,
        management_id: i64,
    ) -> Result<SubmitOutcome> {
        let operation = TicketOperation::add_member(&member.name, group);
        let ticket = self.build_ticket(&operation, management_id, member.clone());
        self.submit(&operation, ticket).await
    }

    /// Remove one member from an existing group
    pub async fn submit_remove_member(
        &self,
        member: &TicketMember,
        group: &str,
        management_id: i64,
    ) -> Result<SubmitOutcome> {
        let operation = TicketOperation::remove_member(&member.name, group);
        let ticket = self.build_ticket(&operation, management_id, member.clone());
        self.submit(&operation, ticket).await
    }

    /// Build the ticket for `operation` carrying exactly one member
    pub fn build_ticket(
        &self,
        operation: &TicketOperation,
        management_id: i64,
        member: TicketMember,
    ) -> Ticket {
        let change = GroupChange::new(
            operation.change_action(),
            &operation.group,
            management_id,
            vec![member],
        );
        Ticket::group_change(operation.subject(), &self.workflow, change)
    }

    async fn submit(&self, operation: &TicketOperation, ticket: Ticket) -> Result<SubmitOutcome> {
        let response = self
            .http_client
            .post_json(api_path::TICKETS, &ticket.into_envelope())
            .await?;

        match classify_response(operation, response.status, &response.body) {
            Ok(outcome) => {
                info!(
                    kind = ?operation.kind,
                    name = %operation.name,
                    group = %operation.group,
                    outcome = ?outcome,
                    "Ticket submitted"
                );
                Ok(outcome)
            }
            Err(e) => {
                warn!(
                    kind = ?operation.kind,
                    name = %operation.name,
                    group = %operation.group,
                    status = response.status.as_u16(),
                    "Ticket submission failed: {}",
                    e
                );
                Err(e)
            }
        }
    }
}
