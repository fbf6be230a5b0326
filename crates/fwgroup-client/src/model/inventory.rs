// Inventory model types

use serde::{Deserialize, Serialize};

/// Envelope of `GET /network_objects/search.json`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NetworkObjectsResult {
    #[serde(default)]
    pub network_objects: NetworkObjectList,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NetworkObjectList {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub network_object: Vec<NetworkObject>,
}

/// A named, device-scoped network object (host, subnet or group)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkObject {
    #[serde(rename = "@xsi.type")]
    pub xsi_type: String,
    pub class_name: String,
    pub comment: String,
    pub device_id: i64,
    /// Exact-case name; search matches this case-insensitively
    pub display_name: String,
    pub global: bool,
    pub id: String,
    pub implicit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    pub ip_type: String,
    pub name: String,
    /// Populated only when the object is a group
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub member: Vec<NetworkObjectMember>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,
    pub overrides: bool,
    #[serde(rename = "type")]
    pub type_: String,
    pub uid: String,
}

impl NetworkObject {
    /// Whether any existing member carries `name` as its canonical name
    pub fn has_member_named(&self, name: &str) -> bool {
        self.member.iter().any(|m| m.name == name)
    }

    /// Members whose display name equals `display_name` exactly
    pub fn members_displayed_as<'a>(
        &'a self,
        display_name: &'a str,
    ) -> impl Iterator<Item = &'a NetworkObjectMember> + 'a {
        self.member
            .iter()
            .filter(move |m| m.display_name == display_name)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkObjectMember {
    pub display_name: String,
    pub id: String,
    pub name: String,
    pub uid: String,
}

/// Envelope of `GET /devices.json`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DevicesResult {
    #[serde(default)]
    pub devices: DeviceList,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DeviceList {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub device: Vec<Device>,
}

/// A managed enforcement point
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    pub context_name: String,
    pub domain_id: String,
    pub domain_name: String,
    pub id: String,
    pub ip: String,
    pub latest_revision: String,
    pub model: String,
    pub module_uid: String,
    pub name: String,
    pub offline: bool,
    pub topology: bool,
    pub vendor: String,
    pub virtual_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_objects_deserialization() {
        let json = r#"{
            "network_objects": {
                "count": 1,
                "total": 1,
                "network_object": [{
                    "@xsi.type": "networkObjectGroupDTO",
                    "class_name": "network_object_group",
                    "device_id": 501,
                    "display_name": "APP_SERVERS",
                    "id": "9001",
                    "name": "APP_SERVERS",
                    "type": "group",
                    "member": [
                        {"display_name": "10.0.0.9", "id": "77", "name": "host_10.0.0.9", "uid": "{abc}"}
                    ]
                }]
            }
        }"#;

        let result: NetworkObjectsResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.network_objects.count, 1);
        let obj = &result.network_objects.network_object[0];
        assert_eq!(obj.device_id, 501);
        assert_eq!(obj.xsi_type, "networkObjectGroupDTO");
        assert_eq!(obj.type_, "group");
        assert!(obj.has_member_named("host_10.0.0.9"));
        assert!(!obj.has_member_named("10.0.0.9"));
        assert_eq!(obj.members_displayed_as("10.0.0.9").count(), 1);
        assert!(obj.ip.is_none());
    }

    #[test]
    fn test_empty_search_result() {
        let json = r#"{"network_objects": {"count": 0, "total": 0}}"#;
        let result: NetworkObjectsResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.network_objects.count, 0);
        assert!(result.network_objects.network_object.is_empty());
    }

    #[test]
    fn test_devices_deserialization() {
        let json = r#"{
            "devices": {
                "count": 1,
                "total": 1,
                "device": [{
                    "id": "501",
                    "name": "fw-edge-01",
                    "ip": "192.0.2.10",
                    "vendor": "Checkpoint",
                    "model": "module",
                    "offline": false
                }]
            }
        }"#;

        let result: DevicesResult = serde_json::from_str(json).unwrap();
        let device = &result.devices.device[0];
        assert_eq!(device.id, "501");
        assert_eq!(device.vendor, "Checkpoint");
        assert!(!device.offline);
    }
}
