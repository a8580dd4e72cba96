use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// How a request refers to an image or a flavor.
///
/// The CLI exposes two optional flags per resource (`--imageRef` / `--imageName`);
/// this type collapses them into one value so precedence lives in a single place
/// ([`Reference::from_flags`]) instead of in the order fields happen to be checked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Reference {
    /// A canonical ID, sent as-is.
    Explicit(String),
    /// A display name that must be turned into an ID before the API sees it.
    ByName(String),
    /// Neither was given.
    #[default]
    Omitted,
}

impl Reference {
    /// ID wins over name. Empty strings count as not given.
    pub fn from_flags(id: Option<&str>, name: Option<&str>) -> Self {
        let id = id.filter(|s| !s.is_empty());
        let name = name.filter(|s| !s.is_empty());
        match (id, name) {
            (Some(id), _) => Reference::Explicit(id.to_string()),
            (None, Some(name)) => Reference::ByName(name.to_string()),
            (None, None) => Reference::Omitted,
        }
    }

    pub fn is_omitted(&self) -> bool {
        matches!(self, Reference::Omitted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkAttachment {
    pub uuid: String,
}

impl NetworkAttachment {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self { uuid: uuid.into() }
    }
}

/// A fully built create request. Only constructed by `commands::create::build`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerCreateRequest {
    pub name: String,
    pub image: Reference,
    pub flavor: Reference,
    /// Volume to boot from instead of an image.
    pub boot_volume: Option<String>,
    pub security_groups: Vec<String>,
    pub admin_pass: Option<String>,
    pub key_pair: Option<String>,
    pub user_data: Option<Vec<u8>>,
    /// `None` leaves network selection to the API.
    pub networks: Option<Vec<NetworkAttachment>>,
    pub metadata: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerResizeRequest {
    pub server_id: String,
    pub flavor_id: String,
}

/// How the user addressed an existing server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerIdentity {
    ById(String),
    ByName(String),
}

impl ServerIdentity {
    /// The text the user typed, for error messages.
    pub fn as_str(&self) -> &str {
        match self {
            ServerIdentity::ById(s) | ServerIdentity::ByName(s) => s,
        }
    }
}

/// Filter passed to `ComputeClient::list_servers`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerFilter {
    pub name: Option<String>,
}

impl ServerFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// `{ "id": ... }` link object the API nests inside server records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub id: String,
}

/// A server record as returned by the compute API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "adminPass", default, skip_serializing_if = "Option::is_none")]
    pub admin_pass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "link_or_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub flavor: Option<ResourceLink>,
    #[serde(
        default,
        deserialize_with = "link_or_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<ResourceLink>,
    #[serde(rename = "key_name", default, skip_serializing_if = "Option::is_none")]
    pub key_pair: Option<String>,
    #[serde(rename = "accessIPv4", default, skip_serializing_if = "Option::is_none")]
    pub access_ipv4: Option<String>,
    #[serde(rename = "accessIPv6", default, skip_serializing_if = "Option::is_none")]
    pub access_ipv6: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

// Servers booted from a volume report `"image": ""` rather than a link.
fn link_or_empty<'de, D>(deserializer: D) -> std::result::Result<Option<ResourceLink>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LinkOrOther {
        Link(ResourceLink),
        Other(serde_json::Value),
    }

    Ok(match Option::<LinkOrOther>::deserialize(deserializer)? {
        Some(LinkOrOther::Link(link)) => Some(link),
        Some(LinkOrOther::Other(_)) | None => None,
    })
}

impl Server {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: None,
            admin_pass: None,
            created: None,
            flavor: None,
            image: None,
            key_pair: None,
            access_ipv4: None,
            access_ipv6: None,
            metadata: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorSummary {
    pub id: String,
    pub name: String,
}
