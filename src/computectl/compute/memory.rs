use super::ComputeClient;
use crate::commands::helpers::single_match;
use crate::error::{ComputectlError, ResourceKind, Result};
use crate::model::{
    FlavorSummary, ImageSummary, Reference, ResourceLink, Server, ServerCreateRequest,
    ServerFilter, ServerResizeRequest,
};
use std::cell::Cell;

/// In-memory compute backend for testing and development.
/// Records every create and resize it receives.
#[derive(Default)]
pub struct InMemoryCompute {
    servers: Vec<Server>,
    images: Vec<ImageSummary>,
    flavors: Vec<FlavorSummary>,
    pub created: Vec<ServerCreateRequest>,
    pub resized: Vec<ServerResizeRequest>,
    list_calls: Cell<usize>,
    fail_listing: bool,
}

impl InMemoryCompute {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `list_*` calls served so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }

    fn record_list(&self) -> Result<()> {
        self.list_calls.set(self.list_calls.get() + 1);
        if self.fail_listing {
            return Err(ComputectlError::Upstream(
                "listing unavailable: 503 Service Unavailable".into(),
            ));
        }
        Ok(())
    }

    fn resolve_name<T>(
        kind: ResourceKind,
        items: &[T],
        reference: &Reference,
        id_and_name: impl Fn(&T) -> (&str, &str),
    ) -> Result<Option<String>> {
        match reference {
            Reference::Explicit(id) => Ok(Some(id.clone())),
            Reference::Omitted => Ok(None),
            Reference::ByName(name) => {
                single_match(kind, name, items.iter().map(id_and_name)).map(Some)
            }
        }
    }
}

impl ComputeClient for InMemoryCompute {
    fn create_server(&mut self, request: &ServerCreateRequest) -> Result<Server> {
        let image_id =
            Self::resolve_name(ResourceKind::Image, &self.images, &request.image, |i| {
                (i.id.as_str(), i.name.as_str())
            })?;
        let flavor_id =
            Self::resolve_name(ResourceKind::Flavor, &self.flavors, &request.flavor, |f| {
                (f.id.as_str(), f.name.as_str())
            })?;

        let id = format!("srv-{}", self.servers.len() + 1);
        let mut server = Server::new(&id, &request.name);
        server.status = Some("BUILD".to_string());
        server.admin_pass = Some(
            request
                .admin_pass
                .clone()
                .unwrap_or_else(|| format!("generated-{}", id)),
        );
        server.image = image_id.map(|id| ResourceLink { id });
        server.flavor = flavor_id.map(|id| ResourceLink { id });
        server.key_pair = request.key_pair.clone();
        server.metadata = request.metadata.clone().unwrap_or_default();

        self.created.push(request.clone());
        self.servers.push(server.clone());
        Ok(server)
    }

    fn resize_server(&mut self, request: &ServerResizeRequest) -> Result<()> {
        let server = self
            .servers
            .iter_mut()
            .find(|s| s.id == request.server_id)
            .ok_or_else(|| {
                ComputectlError::Upstream(format!(
                    "HTTP 404 Not Found: server {} does not exist",
                    request.server_id
                ))
            })?;
        server.status = Some("RESIZE".to_string());
        server.flavor = Some(ResourceLink {
            id: request.flavor_id.clone(),
        });
        self.resized.push(request.clone());
        Ok(())
    }

    fn list_servers(&self, filter: &ServerFilter) -> Result<Vec<Server>> {
        self.record_list()?;
        // Like the real API, the name filter is a substring match.
        Ok(self
            .servers
            .iter()
            .filter(|s| match &filter.name {
                Some(name) => s.name.contains(name.as_str()),
                None => true,
            })
            .cloned()
            .collect())
    }

    fn list_images(&self) -> Result<Vec<ImageSummary>> {
        self.record_list()?;
        Ok(self.images.clone())
    }

    fn list_flavors(&self) -> Result<Vec<FlavorSummary>> {
        self.record_list()?;
        Ok(self.flavors.clone())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct ComputeFixture {
        pub compute: InMemoryCompute,
    }

    impl Default for ComputeFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ComputeFixture {
        pub fn new() -> Self {
            Self {
                compute: InMemoryCompute::new(),
            }
        }

        pub fn with_server(mut self, id: &str, name: &str) -> Self {
            let mut server = Server::new(id, name);
            server.status = Some("ACTIVE".to_string());
            self.compute.servers.push(server);
            self
        }

        pub fn with_image(mut self, id: &str, name: &str) -> Self {
            self.compute.images.push(ImageSummary {
                id: id.to_string(),
                name: name.to_string(),
            });
            self
        }

        pub fn with_flavor(mut self, id: &str, name: &str) -> Self {
            self.compute.flavors.push(FlavorSummary {
                id: id.to_string(),
                name: name.to_string(),
            });
            self
        }

        pub fn with_failing_listing(mut self) -> Self {
            self.compute.fail_listing = true;
            self
        }
    }
}
