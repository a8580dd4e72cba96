use super::ComputeClient;
use crate::commands::helpers::single_match;
use crate::error::{ComputectlError, ResourceKind, Result};
use crate::model::{
    FlavorSummary, ImageSummary, Reference, Server, ServerCreateRequest, ServerFilter,
    ServerResizeRequest,
};
use base64::prelude::*;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};

const AUTH_HEADER: &str = "X-Auth-Token";

/// Blocking client for an OpenStack-style compute endpoint
/// (e.g. `https://compute.example.com/v2.1/<project>`).
pub struct HttpCompute {
    base_url: String,
    client: Client,
}

impl HttpCompute {
    pub fn new(endpoint: &str, token: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTH_HEADER,
            HeaderValue::from_str(token)
                .map_err(|e| ComputectlError::Config(format!("Invalid API token: {}", e)))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            base_url: endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, request: RequestBuilder) -> Result<reqwest::blocking::Response> {
        let response = request.send().map_err(transport_error)?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "compute API response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(ComputectlError::Upstream(format!(
            "HTTP {}: {}",
            status,
            api_error_message(&body)
        )))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let response = self.send(self.client.get(self.url(path)).query(query))?;
        response.json().map_err(transport_error)
    }

    fn resolve_reference<F>(
        &self,
        reference: &Reference,
        kind: ResourceKind,
        list: F,
    ) -> Result<Option<String>>
    where
        F: FnOnce(&Self) -> Result<Vec<(String, String)>>,
    {
        match reference {
            Reference::Explicit(id) => Ok(Some(id.clone())),
            Reference::Omitted => Ok(None),
            Reference::ByName(name) => {
                let candidates = list(self)?;
                let id = single_match(
                    kind,
                    name,
                    candidates.iter().map(|(id, n)| (id.as_str(), n.as_str())),
                )?;
                Ok(Some(id))
            }
        }
    }
}

impl ComputeClient for HttpCompute {
    fn create_server(&mut self, request: &ServerCreateRequest) -> Result<Server> {
        let image_id = self.resolve_reference(&request.image, ResourceKind::Image, |c| {
            Ok(c.list_images()?.into_iter().map(|i| (i.id, i.name)).collect())
        })?;
        let flavor_id = self.resolve_reference(&request.flavor, ResourceKind::Flavor, |c| {
            Ok(c.list_flavors()?.into_iter().map(|f| (f.id, f.name)).collect())
        })?;

        let body = CreateServerBody::new(request, image_id, flavor_id);
        info!(name = %request.name, "submitting create request");
        let response = self.send(self.client.post(self.url("/servers")).json(&body))?;
        let envelope: ServerEnvelope = response.json().map_err(transport_error)?;

        // The create response only echoes id, links and adminPass.
        let mut server = envelope.server;
        if server.name.is_empty() {
            server.name = request.name.clone();
        }
        Ok(server)
    }

    fn resize_server(&mut self, request: &ServerResizeRequest) -> Result<()> {
        let body = ResizeBody {
            resize: ResizeAction {
                flavor_ref: &request.flavor_id,
            },
        };
        info!(server = %request.server_id, flavor = %request.flavor_id, "submitting resize");
        let path = format!("/servers/{}/action", request.server_id);
        self.send(self.client.post(self.url(&path)).json(&body))?;
        Ok(())
    }

    fn list_servers(&self, filter: &ServerFilter) -> Result<Vec<Server>> {
        let pattern = filter.name.as_deref().map(name_filter_pattern);
        let mut query = Vec::new();
        if let Some(pattern) = &pattern {
            query.push(("name", pattern.as_str()));
        }
        let list: ServerList = self.get_json("/servers/detail", &query)?;
        Ok(list.servers)
    }

    fn list_images(&self) -> Result<Vec<ImageSummary>> {
        let list: ImageList = self.get_json("/images/detail", &[])?;
        Ok(list.images)
    }

    fn list_flavors(&self) -> Result<Vec<FlavorSummary>> {
        let list: FlavorList = self.get_json("/flavors/detail", &[])?;
        Ok(list.flavors)
    }
}

/// The API reads the `name` filter as a regular expression, so the name is
/// escaped and anchored to select only servers with exactly that name.
fn name_filter_pattern(name: &str) -> String {
    format!("^{}$", regex::escape(name))
}

fn transport_error(e: reqwest::Error) -> ComputectlError {
    ComputectlError::Upstream(e.to_string())
}

/// Fault bodies look like `{"itemNotFound": {"message": "...", "code": 404}}`.
/// Falls back to the raw body when that shape is not found.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.as_object()?
                .values()
                .find_map(|fault| fault.get("message")?.as_str().map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

// --- Wire types ---

#[derive(Debug, Serialize)]
struct CreateServerBody<'a> {
    server: CreateServer<'a>,
}

#[derive(Debug, Serialize)]
struct CreateServer<'a> {
    name: &'a str,
    #[serde(rename = "imageRef", skip_serializing_if = "Option::is_none")]
    image_ref: Option<String>,
    #[serde(rename = "flavorRef", skip_serializing_if = "Option::is_none")]
    flavor_ref: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    security_groups: Vec<SecurityGroup<'a>>,
    #[serde(rename = "adminPass", skip_serializing_if = "Option::is_none")]
    admin_pass: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    networks: Option<&'a [crate::model::NetworkAttachment]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    block_device_mapping_v2: Vec<BlockDevice<'a>>,
}

#[derive(Debug, Serialize)]
struct SecurityGroup<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct BlockDevice<'a> {
    boot_index: u32,
    uuid: &'a str,
    source_type: &'static str,
    destination_type: &'static str,
    delete_on_termination: bool,
}

impl<'a> CreateServerBody<'a> {
    fn new(
        request: &'a ServerCreateRequest,
        image_ref: Option<String>,
        flavor_ref: Option<String>,
    ) -> Self {
        let block_device_mapping_v2 = request
            .boot_volume
            .as_deref()
            .map(|uuid| BlockDevice {
                boot_index: 0,
                uuid,
                source_type: "volume",
                destination_type: "volume",
                delete_on_termination: false,
            })
            .into_iter()
            .collect();

        Self {
            server: CreateServer {
                name: &request.name,
                image_ref,
                flavor_ref,
                security_groups: request
                    .security_groups
                    .iter()
                    .map(|name| SecurityGroup {
                        name: name.as_str(),
                    })
                    .collect(),
                admin_pass: request.admin_pass.as_deref(),
                key_name: request.key_pair.as_deref(),
                user_data: request
                    .user_data
                    .as_ref()
                    .map(|bytes| BASE64_STANDARD.encode(bytes)),
                networks: request.networks.as_deref(),
                metadata: request.metadata.as_ref(),
                block_device_mapping_v2,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ResizeBody<'a> {
    resize: ResizeAction<'a>,
}

#[derive(Debug, Serialize)]
struct ResizeAction<'a> {
    #[serde(rename = "flavorRef")]
    flavor_ref: &'a str,
}

#[derive(Debug, Deserialize)]
struct ServerEnvelope {
    server: Server,
}

#[derive(Debug, Deserialize)]
struct ServerList {
    servers: Vec<Server>,
}

#[derive(Debug, Deserialize)]
struct ImageList {
    images: Vec<ImageSummary>,
}

#[derive(Debug, Deserialize)]
struct FlavorList {
    flavors: Vec<FlavorSummary>,
}
