//! Read-only Inventory lookups
//!
//! The search backend matches names case-insensitively. Callers that care about
//! case (all of them, in this crate) must compare `display_name` themselves or
//! ask [`InventoryClient::find_device_object_by_name`] to do it.

use std::net::IpAddr;

use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::GroupClientConfig;
use crate::constants::api_path;
use crate::error::{GroupClientError, Result};
use crate::http::{ApiHttpClient, RawResponse};
use crate::model::{Device, DevicesResult, NetworkObject, NetworkObjectsResult};

/// Client for the Inventory REST API
#[derive(Clone, Debug)]
pub struct InventoryClient {
    http_client: ApiHttpClient,
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    filter: &'a str,
    exact_match: bool,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_id: Option<&'a str>,
}

impl<'a> SearchQuery<'a> {
    fn exact(name: &'a str, device_id: Option<&'a str>) -> Self {
        Self {
            filter: "text",
            exact_match: true,
            name,
            device_id,
        }
    }
}

impl InventoryClient {
    pub fn new(config: &GroupClientConfig) -> Result<Self> {
        let http_client = ApiHttpClient::new(config.inventory_base_url()?, config)?;
        Ok(Self { http_client })
    }

    pub fn with_http_client(http_client: ApiHttpClient) -> Self {
        Self { http_client }
    }

    /// Search network objects by exact name across all devices.
    ///
    /// An empty result means the object does not exist; it is not an error.
    pub async fn find_objects_by_name(&self, name: &str) -> Result<Vec<NetworkObject>> {
        let response = self
            .http_client
            .get_with_query(
                api_path::NETWORK_OBJECT_SEARCH,
                &SearchQuery::exact(name, None),
            )
            .await?;

        let result: NetworkObjectsResult = expect_ok(response)?;
        if result.network_objects.count == 0 {
            debug!(name, "No network objects found");
            return Ok(Vec::new());
        }
        Ok(result.network_objects.network_object)
    }

    /// Search one device for a network object by exact name.
    ///
    /// Returns `None` when nothing matches, or when `case_sensitive` is set and
    /// the single match differs from `name` in letter case. More than one match
    /// is an [`GroupClientError::AmbiguousMatch`].
    pub async fn find_device_object_by_name(
        &self,
        name: &str,
        device_id: &str,
        case_sensitive: bool,
    ) -> Result<Option<NetworkObject>> {
        let response = self
            .http_client
            .get_with_query(
                api_path::NETWORK_OBJECT_SEARCH,
                &SearchQuery::exact(name, Some(device_id)),
            )
            .await?;

        let result: NetworkObjectsResult = expect_ok(response)?;
        if result.network_objects.count == 0 {
            return Ok(None);
        }

        let mut objects = result.network_objects.network_object;
        match objects.len() {
            0 => Ok(None),
            1 => {
                let object = objects.remove(0);
                if case_sensitive && object.display_name != name {
                    debug!(
                        name,
                        device_id,
                        display_name = %object.display_name,
                        "Discarding case-insensitive match"
                    );
                    return Ok(None);
                }
                Ok(Some(object))
            }
            count => {
                warn!(name, device_id, count, "Ambiguous network object lookup");
                Err(GroupClientError::AmbiguousMatch {
                    kind: "network",
                    name: name.to_string(),
                    count,
                })
            }
        }
    }

    /// List managed devices
    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        let response = self
            .http_client
            .get_with_query(api_path::DEVICES, &[("start", "0"), ("name", "999")])
            .await?;

        let result: DevicesResult = expect_ok(response)?;
        Ok(result.devices.device)
    }

    /// Look up a device by IP address or, failing that, by name
    pub async fn get_device(&self, ip_or_name: &str) -> Result<Option<Device>> {
        let key = if ip_or_name.parse::<IpAddr>().is_ok() {
            "ip"
        } else {
            "name"
        };

        let response = self
            .http_client
            .get_with_query(api_path::DEVICES, &[(key, ip_or_name)])
            .await?;

        let result: DevicesResult = expect_ok(response)?;
        if result.devices.count == 0 {
            return Ok(None);
        }

        let mut devices = result.devices.device;
        match devices.len() {
            0 => Ok(None),
            1 => Ok(Some(devices.remove(0))),
            count => {
                warn!(device = ip_or_name, count, "Ambiguous device lookup");
                Err(GroupClientError::AmbiguousMatch {
                    kind: "device",
                    name: ip_or_name.to_string(),
                    count,
                })
            }
        }
    }
}

/// Decode a 200 response; map 401 and anything else to errors carrying the body
fn expect_ok<T: serde::de::DeserializeOwned>(response: RawResponse) -> Result<T> {
    match response.status {
        StatusCode::OK => response.json(),
        StatusCode::UNAUTHORIZED => Err(GroupClientError::Authentication(response.body)),
        status => Err(GroupClientError::UnexpectedStatus {
            status,
            body: response.body,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_ok_maps_unauthorized() {
        let response = RawResponse {
            status: StatusCode::UNAUTHORIZED,
            body: "Bad credentials".to_string(),
        };
        let result: Result<DevicesResult> = expect_ok(response);
        match result {
            Err(GroupClientError::Authentication(body)) => assert_eq!(body, "Bad credentials"),
            other => panic!("expected authentication error, got {:?}", other),
        }
    }

    #[test]
    fn test_expect_ok_maps_other_status() {
        let response = RawResponse {
            status: StatusCode::NOT_FOUND,
            body: "no such endpoint".to_string(),
        };
        let result: Result<DevicesResult> = expect_ok(response);
        assert!(matches!(
            result,
            Err(GroupClientError::UnexpectedStatus { status: StatusCode::NOT_FOUND, .. })
        ));
    }
}
