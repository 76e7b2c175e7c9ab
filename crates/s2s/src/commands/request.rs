//! Request command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use swagger2sqlmap_core::openapi::parse_file;
use swagger2sqlmap_core::request::build_request;

use super::args::{request_context, TargetArgs};
use super::error::CommandError;

/// Print the raw HTTP request for one endpoint
#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Swagger 2 / OpenAPI 3 document (JSON or YAML)
    #[arg(value_name = "SPEC")]
    spec: PathBuf,

    /// HTTP method (case-insensitive)
    #[arg(value_name = "METHOD")]
    method: String,

    /// Path template exactly as in the document (e.g. /users/{id})
    #[arg(value_name = "PATH")]
    path: String,

    #[command(flatten)]
    target: TargetArgs,
}

/// Execute the request command
pub fn execute(args: RequestArgs) -> Result<()> {
    let parsed = parse_file(&args.spec)?;
    let endpoint = parsed
        .endpoints
        .iter()
        .find(|e| e.method.eq_ignore_ascii_case(&args.method) && e.path == args.path)
        .ok_or_else(|| CommandError::EndpointNotFound {
            method: args.method.to_uppercase(),
            path: args.path.clone(),
        })?;

    let config = args.target.resolve(None)?;
    let context = request_context(&config, &parsed.base_url);
    let request = build_request(endpoint, &context);

    println!("{}", request.to_raw());
    Ok(())
}
