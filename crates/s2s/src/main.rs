//! swagger2sqlmap - Turn Swagger/OpenAPI documents into sqlmap targets
//!
//! Lists the endpoints of an API description, reconstructs example HTTP
//! requests for them and prints or exports the matching sqlmap commands.

use clap::Parser;

mod commands;

use commands::Cli;

fn main() {
    swagger2sqlmap_core::logging::init();

    let cli = Cli::parse();

    if let Err(e) = cli.execute() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
