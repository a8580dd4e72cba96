//! # CLI Layer
//!
//! This is **one possible UI client** for computectl, not the application
//! itself. It is the only place that knows about terminal I/O, exit codes and
//! output formatting.
//!
//! ## Flow per command
//!
//! 1. clap parses and checks argument counts (`setup`); `create` takes exactly
//!    one positional name, `resize` none plus exactly one of `--id`/`--name`.
//! 2. Flags are copied into library types without interpretation (`commands`).
//! 3. The request is built and checked; only then is the config read and the
//!    API facade created, which resolves names and calls the compute API.
//! 4. Failures become `Error <verb>ing server (<id-or-name>): <cause>`;
//!    success is rendered as a table or JSON (`render`).
//!
//! Flag names are camelCase (`--imageRef`, `--flavorID`) to match the compute
//! API's own field names.
//!
//! ## Module Structure
//!
//! - `commands`: dispatch, logging setup and per-command handlers
//! - `render`: table/JSON output and messages
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styling

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
