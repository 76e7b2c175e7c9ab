//! Export command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use swagger2sqlmap_core::openapi::parse_file;
use swagger2sqlmap_core::sqlmap::{ScriptExporter, ScriptKind};
use swagger2sqlmap_core::Endpoint;

use super::args::{request_context, FilterArgs, SqlmapArgs, TargetArgs};
use super::error::CommandError;

/// Write sqlmap commands into a script
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Swagger 2 / OpenAPI 3 document (JSON or YAML)
    #[arg(value_name = "SPEC")]
    spec: PathBuf,

    /// Script format: sh, py or ps1
    #[arg(long, value_name = "FORMAT")]
    format: ScriptKind,

    /// Output file (default: swagger2sqlmap.<format> in the current directory)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[command(flatten)]
    filter: FilterArgs,

    #[command(flatten)]
    target: TargetArgs,

    #[command(flatten)]
    sqlmap: SqlmapArgs,
}

/// Execute the export command
pub fn execute(args: ExportArgs) -> Result<()> {
    let parsed = parse_file(&args.spec)?;
    let selected: Vec<Endpoint> = args
        .filter
        .to_filter()
        .apply(&parsed.endpoints)
        .into_iter()
        .cloned()
        .collect();
    if selected.is_empty() {
        return Err(CommandError::NoMatchingEndpoints.into());
    }

    let config = args.target.resolve(args.sqlmap.executable.clone())?;
    let options = args.sqlmap.apply(config.sqlmap.clone())?;
    let context = request_context(&config, &parsed.base_url);

    let output = match args.output {
        Some(path) => path,
        None => std::env::current_dir()?.join(args.format.default_file_name()),
    };

    let written = ScriptExporter::new(&selected, &context, &options).save(args.format, &output)?;
    println!("{}", written.display());

    Ok(())
}
