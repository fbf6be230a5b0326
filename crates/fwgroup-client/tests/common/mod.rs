//! Mock Inventory/ChangeDesk platform using wiremock.
//!
//! A single `MockServer` serves both APIs; they are told apart by their
//! context paths, exactly as two hosts would be.

#![allow(dead_code)]

use fwgroup_client::{GroupClientConfig, GroupMembershipClient};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const SEARCH_PATH: &str = "/securetrack/api/network_objects/search.json";
pub const DEVICES_PATH: &str = "/securetrack/api/devices.json";
pub const TICKETS_PATH: &str = "/securechangeworkflow/api/securechange/tickets.json";

pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "secret";

pub struct MockPlatform {
    pub server: MockServer,
}

impl MockPlatform {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn config(&self) -> GroupClientConfig {
        GroupClientConfig::new(&self.server.uri(), &self.server.uri())
            .with_auth(TEST_USERNAME, TEST_PASSWORD)
            .with_timeouts(1000, 2000)
    }

    pub fn client(&self) -> GroupMembershipClient {
        GroupMembershipClient::with_config(self.config()).expect("client should build")
    }

    /// Mount the cross-device search for `name`
    pub async fn mock_group_search(&self, name: &str, objects: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .and(query_param("name", name))
            .and(query_param_is_missing("device_id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(network_objects(objects)))
            .mount(&self.server)
            .await;
    }

    /// Mount the device-scoped search for `name` on `device_id`
    pub async fn mock_device_object_search(&self, name: &str, device_id: i64, objects: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .and(query_param("name", name))
            .and(query_param("device_id", device_id.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(network_objects(objects)))
            .mount(&self.server)
            .await;
    }

    /// Mount a ticket endpoint answering every submission with `status`/`body`
    pub async fn mock_tickets(&self, status: u16, body: &str) {
        Mock::given(method("POST"))
            .and(path(TICKETS_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a ticket endpoint answering only the next `times` submissions
    pub async fn mock_tickets_times(&self, status: u16, body: &str, times: u64) {
        Mock::given(method("POST"))
            .and(path(TICKETS_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .up_to_n_times(times)
            .mount(&self.server)
            .await;
    }

    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Tickets posted so far, as JSON, in arrival order
    pub async fn submitted_tickets(&self) -> Vec<Value> {
        self.requests()
            .await
            .iter()
            .filter(|r| r.method.as_str() == "POST" && r.url.path() == TICKETS_PATH)
            .map(|r| r.body_json::<Value>().expect("ticket body should be JSON"))
            .collect()
    }
}

pub fn network_objects(objects: Vec<Value>) -> Value {
    let count = objects.len();
    if count == 0 {
        return json!({"network_objects": {"count": 0, "total": 0}});
    }
    json!({
        "network_objects": {
            "count": count,
            "total": count,
            "network_object": objects,
        }
    })
}

/// A group object; `members` are `(name, display_name)` pairs
pub fn group_object(display_name: &str, device_id: i64, members: &[(&str, &str)]) -> Value {
    let member: Vec<Value> = members
        .iter()
        .enumerate()
        .map(|(i, (name, display_name))| {
            json!({
                "display_name": display_name,
                "id": format!("{}", 100 + i),
                "name": name,
                "uid": format!("{{member-{}}}", i),
            })
        })
        .collect();

    json!({
        "@xsi.type": "networkObjectGroupDTO",
        "class_name": "network_object_group",
        "device_id": device_id,
        "display_name": display_name,
        "id": format!("g{}", device_id),
        "name": display_name,
        "type": "group",
        "member": member,
    })
}

pub fn host_object(display_name: &str, device_id: i64) -> Value {
    json!({
        "@xsi.type": "hostNetworkObjectDTO",
        "class_name": "host_plain",
        "device_id": device_id,
        "display_name": display_name,
        "id": format!("h{}", device_id),
        "ip": display_name,
        "name": display_name,
        "netmask": "255.255.255.255",
        "type": "host",
    })
}

pub fn device(id: &str, name: &str, ip: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "ip": ip,
        "vendor": "Checkpoint",
        "model": "module",
        "offline": false,
    })
}

pub fn devices(list: Vec<Value>) -> Value {
    let count = list.len();
    json!({"devices": {"count": count, "total": count, "device": list}})
}

/// The single group change of a submitted ticket
pub fn group_change(ticket: &Value) -> &Value {
    &ticket["ticket"]["steps"]["step"][0]["tasks"]["task"][0]["fields"]["field"][0]["group_change"][0]
}

/// The single member of a submitted ticket
pub fn ticket_member(ticket: &Value) -> &Value {
    &group_change(ticket)["members"]["member"][0]
}
