//! CLI command dispatch and execution

use anyhow::Result;
use clap::{Parser, Subcommand};

mod args;
mod command;
mod config_cmd;
mod endpoints;
mod error;
mod export;
mod request;

/// swagger2sqlmap - Turn Swagger/OpenAPI documents into sqlmap targets
#[derive(Parser, Debug)]
#[command(
    name = "swagger2sqlmap",
    version,
    about = "Turn Swagger/OpenAPI documents into sqlmap commands",
    long_about = "Lists the endpoints of a Swagger 2 / OpenAPI 3 document (JSON or YAML), \
                  reconstructs example requests and prints or exports sqlmap commands for them"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List endpoints found in the document
    Endpoints(endpoints::EndpointsArgs),

    /// Print the raw HTTP request for one endpoint
    Request(request::RequestArgs),

    /// Print a sqlmap command for each matching endpoint
    Command(command::CommandArgs),

    /// Write sqlmap commands into a .sh, .py or .ps1 script
    Export(export::ExportArgs),

    /// Show effective configuration
    Config(config_cmd::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Endpoints(args) => endpoints::execute(args),
            Commands::Request(args) => request::execute(args),
            Commands::Command(args) => command::execute(args),
            Commands::Export(args) => export::execute(args),
            Commands::Config(args) => config_cmd::execute(args),
        }
    }
}
