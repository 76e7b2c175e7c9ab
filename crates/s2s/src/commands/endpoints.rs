//! Endpoints command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use swagger2sqlmap_core::openapi::parse_file;
use swagger2sqlmap_core::{Endpoint, ParseResult};

use super::args::FilterArgs;

/// List endpoints found in the document
#[derive(Args, Debug)]
pub struct EndpointsArgs {
    /// Swagger 2 / OpenAPI 3 document (JSON or YAML)
    #[arg(value_name = "SPEC")]
    spec: PathBuf,

    #[command(flatten)]
    filter: FilterArgs,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

const HEADERS: [&str; 6] = [
    "Method",
    "Path",
    "OperationId",
    "Summary",
    "Content-Type",
    "Has Body",
];

/// Execute the endpoints command
pub fn execute(args: EndpointsArgs) -> Result<()> {
    let parsed = parse_file(&args.spec)?;
    let selected: Vec<Endpoint> = args
        .filter
        .to_filter()
        .apply(&parsed.endpoints)
        .into_iter()
        .cloned()
        .collect();

    if args.json {
        let output = ParseResult {
            base_url: parsed.base_url,
            endpoints: selected,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let base_url = if parsed.base_url.is_empty() {
        "(none)"
    } else {
        parsed.base_url.as_str()
    };
    println!("Base URL: {base_url}");
    println!();

    if selected.is_empty() {
        println!("No endpoints found");
        return Ok(());
    }

    let rows: Vec<[String; 6]> = selected.iter().map(row).collect();
    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    println!("{}", format_row(&HEADERS.map(String::from), &widths));
    println!("{}", format_row(&widths.map(|w| "-".repeat(w)), &widths));
    for row in &rows {
        println!("{}", format_row(row, &widths));
    }
    println!();
    println!("{} endpoint(s)", rows.len());

    Ok(())
}

fn row(endpoint: &Endpoint) -> [String; 6] {
    [
        endpoint.method.clone(),
        endpoint.path.clone(),
        endpoint.operation_id.clone().unwrap_or_default(),
        endpoint.summary.clone().unwrap_or_default().replace('\n', " "),
        endpoint.content_type.clone().unwrap_or_default(),
        if endpoint.has_body() { "yes" } else { "no" }.to_string(),
    ]
}

fn format_row(cells: &[String; 6], widths: &[usize; 6]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    format!("  {}", line.trim_end())
}
