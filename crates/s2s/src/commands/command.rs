//! Command command implementation - print sqlmap commands

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use swagger2sqlmap_core::openapi::parse_file;
use swagger2sqlmap_core::request::build_request;
use swagger2sqlmap_core::sqlmap::build_command;
use tracing::info;

use super::args::{request_context, FilterArgs, SqlmapArgs, TargetArgs};
use super::error::CommandError;

/// Print a sqlmap command for each matching endpoint
#[derive(Args, Debug)]
pub struct CommandArgs {
    /// Swagger 2 / OpenAPI 3 document (JSON or YAML)
    #[arg(value_name = "SPEC")]
    spec: PathBuf,

    #[command(flatten)]
    filter: FilterArgs,

    #[command(flatten)]
    target: TargetArgs,

    #[command(flatten)]
    sqlmap: SqlmapArgs,
}

/// Execute the command command
pub fn execute(args: CommandArgs) -> Result<()> {
    let parsed = parse_file(&args.spec)?;
    let selected = args.filter.to_filter().apply(&parsed.endpoints);
    if selected.is_empty() {
        return Err(CommandError::NoMatchingEndpoints.into());
    }

    let config = args.target.resolve(args.sqlmap.executable.clone())?;
    let options = args.sqlmap.apply(config.sqlmap.clone())?;
    let context = request_context(&config, &parsed.base_url);

    for endpoint in &selected {
        let request = build_request(endpoint, &context);
        println!("{}", build_command(&request, &options).to_shell_command());
    }
    info!("Generated {} sqlmap command(s)", selected.len());

    Ok(())
}
