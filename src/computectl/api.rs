//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every operation, whatever UI sits on top.
//!
//! It dispatches to `commands/*.rs`, carries the per-session settings those
//! commands need (the compute client and the name-resolution policy) and
//! returns `Result<CmdResult>`. It prints nothing and never exits the process.
//!
//! Building a create request needs no client, so [`build_create_request`] and
//! [`required_flavor`] are exported for UIs that want to reject bad input
//! before connecting to anything.
//!
//! ## Generic Over ComputeClient
//!
//! `ComputeApi<C: ComputeClient>`:
//! - Production: `ComputeApi<HttpCompute>`
//! - Testing: `ComputeApi<InMemoryCompute>`
//!
//! API tests check that calls reach the right command with the right
//! arguments. The logic itself is tested in the command modules.

use crate::commands;
use crate::compute::ComputeClient;
use crate::error::Result;
use crate::model::{ServerCreateRequest, ServerIdentity};
use crate::resolve::NameResolution;

pub struct ComputeApi<C: ComputeClient> {
    client: C,
    name_resolution: NameResolution,
}

impl<C: ComputeClient> ComputeApi<C> {
    pub fn new(client: C, name_resolution: NameResolution) -> Self {
        Self {
            client,
            name_resolution,
        }
    }

    /// Submits a request built by [`build_create_request`].
    pub fn create_server(&mut self, request: ServerCreateRequest) -> Result<CmdResult> {
        commands::create::run(&mut self.client, self.name_resolution, request)
    }

    pub fn resize_server(
        &mut self,
        identity: &ServerIdentity,
        flavor_id: Option<&str>,
    ) -> Result<CmdResult> {
        commands::resize::run(&mut self.client, identity, flavor_id)
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

pub use commands::create::{build as build_create_request, CreateServerFlags};
pub use commands::resize::required_flavor;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
