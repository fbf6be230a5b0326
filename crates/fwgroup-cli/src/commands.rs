// Subcommand dispatch; every command yields a JSON document for stdout

use serde_json::{Value, json};

use fwgroup_client::{GroupMember, GroupMembershipClient, SubmitOutcome};

use crate::resource::{self, GroupMemberResource};
use crate::settings::Command;

pub async fn run(command: Command, client: &GroupMembershipClient) -> anyhow::Result<Value> {
    let output = match command {
        Command::Add { ip, group } => {
            let resource = GroupMemberResource::create(client, GroupMember::new(&group, &ip)).await?;
            serde_json::to_value(resource)?
        }
        Command::Remove { ip, group } => {
            let member = GroupMember::new(&group, &ip);
            resource::validate(&member)?;
            resource::remove(client, &member).await?;
            json!({
                "group_name": member.group_name,
                "ip_address": member.ip_address,
                "removed": true,
            })
        }
        Command::CreateGroup {
            name,
            management_id,
        } => {
            let outcome = client.create_group(&name, management_id).await?;
            json!({
                "name": name,
                "management_id": management_id,
                "outcome": outcome_label(outcome),
            })
        }
        Command::Devices => serde_json::to_value(client.inventory().list_devices().await?)?,
        Command::Device { ip_or_name } => {
            serde_json::to_value(client.inventory().get_device(&ip_or_name).await?)?
        }
        Command::Objects {
            name,
            device_id,
            case_insensitive,
        } => {
            let objects: Vec<_> = match device_id {
                Some(device_id) => client
                    .inventory()
                    .find_device_object_by_name(&name, &device_id, !case_insensitive)
                    .await?
                    .into_iter()
                    .collect(),
                None => client.inventory().find_objects_by_name(&name).await?,
            };
            serde_json::to_value(objects)?
        }
    };

    Ok(output)
}

fn outcome_label(outcome: SubmitOutcome) -> &'static str {
    match outcome {
        SubmitOutcome::Accepted => "accepted",
        SubmitOutcome::AlreadySatisfied => "already_satisfied",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_label() {
        assert_eq!(outcome_label(SubmitOutcome::Accepted), "accepted");
        assert_eq!(
            outcome_label(SubmitOutcome::AlreadySatisfied),
            "already_satisfied"
        );
    }
}
