//! # Compute Client Layer
//!
//! The remote compute API sits behind the [`ComputeClient`] trait so the
//! request-building and resolution logic can run against something other
//! than a live endpoint.
//!
//! ## Implementations
//!
//! - [`http::HttpCompute`]: talks to an OpenStack-style compute endpoint over
//!   blocking HTTP with a pre-issued token.
//! - [`memory::InMemoryCompute`]: keeps servers, images and flavors in memory
//!   and records every mutating call, for tests.
//!
//! ## Name references
//!
//! A [`ServerCreateRequest`] may still carry `Reference::ByName` for the image
//! or flavor when names are passed through rather than pre-resolved (see
//! `resolve.rs`). Implementations must turn such names into IDs themselves,
//! with the same exact-match rule as `commands::helpers::single_match`.

use crate::error::Result;
use crate::model::{
    FlavorSummary, ImageSummary, Server, ServerCreateRequest, ServerFilter, ServerResizeRequest,
};

pub mod http;
pub mod memory;

pub trait ComputeClient {
    /// Submit a create request and return the new server record.
    fn create_server(&mut self, request: &ServerCreateRequest) -> Result<Server>;

    /// Ask the API to move a server to another flavor.
    fn resize_server(&mut self, request: &ServerResizeRequest) -> Result<()>;

    /// List servers. A name filter may be applied loosely by the API, callers
    /// must still compare names exactly.
    fn list_servers(&self, filter: &ServerFilter) -> Result<Vec<Server>>;

    fn list_images(&self) -> Result<Vec<ImageSummary>>;

    fn list_flavors(&self) -> Result<Vec<FlavorSummary>>;
}
