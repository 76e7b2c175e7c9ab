//! Core library for swagger2sqlmap
//!
//! Turns Swagger 2 / OpenAPI 3 documents into concrete HTTP requests and
//! sqlmap command lines:
//!
//! - [`openapi`] parses a document into [`Endpoint`]s with example bodies
//! - [`request`] reconstructs an [`HttpRequest`] for an endpoint
//! - [`sqlmap`] builds sqlmap invocations and exports attack scripts
//! - [`config`] resolves defaults from TOML files, env vars and flags

pub mod auth;
pub mod config;
pub mod filter;
pub mod home;
pub mod logging;
pub mod model;
pub mod openapi;
pub mod request;
pub mod sqlmap;

pub use model::{Endpoint, ParseResult};
pub use request::{HttpRequest, RequestContext};
pub use sqlmap::{HeadersMode, SqlmapCommand, SqlmapOptions};

/// Human-readable product name reported by the CLI.
pub const IMPLEMENTATION_TITLE: &str = "Swagger2Sqlmap";

/// Package version of the core library.
pub const IMPLEMENTATION_VERSION: &str = env!("CARGO_PKG_VERSION");
