//! Config command implementation

use anyhow::Result;
use clap::Args;
use serde_json::json;
use std::path::PathBuf;
use swagger2sqlmap_core::auth::normalize_token;
use swagger2sqlmap_core::config::{
    config_sources, resolve_config, ConfigOverrides, GLOBAL_CONFIG_PATH,
};
use swagger2sqlmap_core::home::get_home_dir;
use swagger2sqlmap_core::{IMPLEMENTATION_TITLE, IMPLEMENTATION_VERSION};

/// Show effective configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Read configuration from this file instead of .swagger2sqlmap.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Execute the config command
pub fn execute(args: ConfigArgs) -> Result<()> {
    let home_dir = get_home_dir()?;
    let current_dir = std::env::current_dir()?;

    let overrides = ConfigOverrides {
        config_path: args.config,
        ..Default::default()
    };
    let config = resolve_config(&overrides, &current_dir, &home_dir)?;
    let sources = config_sources(&overrides, &current_dir, &home_dir);

    let global_config_path = home_dir.join(GLOBAL_CONFIG_PATH);
    let global_exists = global_config_path.exists();
    let token = config.target.token.as_deref().and_then(display_token);

    if args.json {
        let output = json!({
            "implementation": {
                "title": IMPLEMENTATION_TITLE,
                "version": IMPLEMENTATION_VERSION,
            },
            "target": {
                "baseUrl": config.target.base_url,
                "token": token,
            },
            "sqlmap": config.sqlmap,
            "configFiles": {
                "global": {
                    "path": global_config_path.display().to_string(),
                    "exists": global_exists,
                },
                "loaded": sources
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>(),
            }
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{IMPLEMENTATION_TITLE} {IMPLEMENTATION_VERSION}");
    println!();
    println!("Target:");
    let base_url = config
        .target
        .base_url
        .as_deref()
        .unwrap_or("(detected from document)");
    println!("  base_url: {base_url}");
    println!("  token: {}", token.as_deref().unwrap_or("(not set)"));
    println!();
    println!("sqlmap:");
    for line in toml::to_string(&config.sqlmap)?.lines() {
        println!("  {line}");
    }
    println!();
    println!("Config files:");
    let global_status = if global_exists { "(found)" } else { "(not found)" };
    println!("  Global: {} {global_status}", global_config_path.display());
    if sources.is_empty() {
        println!("  Loaded: none");
    } else {
        for source in &sources {
            println!("  Loaded: {}", source.display());
        }
    }

    Ok(())
}

/// Token as shown to the user: normalized, then masked.
fn display_token(raw: &str) -> Option<String> {
    let token = normalize_token(raw);
    (!token.is_empty()).then(|| mask_token(&token))
}

/// Keep only the first four characters of a token.
fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    if visible.len() == token.len() {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
