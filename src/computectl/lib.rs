//! # Computectl Architecture
//!
//! Computectl creates and resizes servers on an OpenStack-style compute API.
//! The interesting part is not the HTTP call but everything before it: turning
//! loose, overlapping flags (image by ID *or* name, `k=v` metadata strings, a
//! user-data value that may be a path, comma lists) into one well-formed
//! request, and turning a server name into the ID the API wants.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders results, prints errors         │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Holds the compute client and name-resolution policy      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, params.rs, resolve.rs)       │
//! │  - Flag parsing, request building, ID resolution            │
//! │  - Returns Rust types, never prints                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Compute Layer (compute/)                                   │
//! │  - Abstract ComputeClient trait                             │
//! │  - HttpCompute (production), InMemoryCompute (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Errors Are Values
//!
//! From `api.rs` inward, code returns `Result<T, ComputectlError>` and
//! **never** writes to stdout/stderr or calls `std::process::exit`. The binary's
//! `main` is the one place an error becomes an exit status, which is what lets
//! the whole request pipeline be tested against [`compute::memory::InMemoryCompute`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: `create` / `resize` request building and dispatch
//! - [`params`]: Flag-string parsing (comma lists, metadata, user data)
//! - [`resolve`]: Image/flavor name resolution policies
//! - [`compute`]: Compute client trait and implementations
//! - [`model`]: Request and response types
//! - [`config`]: Configuration file and environment overrides
//! - [`init`]: Builds a ready-to-use API from configuration
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod compute;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod params;
pub mod resolve;
