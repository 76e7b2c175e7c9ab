//! Configuration discovery and resolution

use super::types::{Config, ConfigFile};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Repo-local config file name
pub const REPO_CONFIG_FILE: &str = ".swagger2sqlmap.toml";

/// Global config location relative to the home directory
pub const GLOBAL_CONFIG_PATH: &str = ".config/swagger2sqlmap/config.toml";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Explicit config file does not exist
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Command-line overrides for configuration
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Override target base URL
    pub base_url: Option<String>,
    /// Override bearer token
    pub token: Option<String>,
    /// Override sqlmap executable
    pub executable: Option<String>,
    /// Path to config file override
    pub config_path: Option<PathBuf>,
}

/// Resolve configuration from all sources
///
/// Priority (highest to lowest):
/// 1. Command-line overrides
/// 2. Environment variables (`S2S_BASE_URL`, `S2S_TOKEN`, `S2S_SQLMAP`)
/// 3. Explicit `--config` file, or repo-local `.swagger2sqlmap.toml`
///    (current dir up to git root)
/// 4. Global config (`~/.config/swagger2sqlmap/config.toml`)
/// 5. Defaults
///
/// Unreadable discovered files are skipped with a warning. An explicit
/// config file that is missing or malformed is an error.
pub fn resolve_config(
    overrides: &ConfigOverrides,
    current_dir: &Path,
    home_dir: &Path,
) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    let global_config_path = home_dir.join(GLOBAL_CONFIG_PATH);
    if global_config_path.exists() {
        match load_config_file(&global_config_path) {
            Ok(file_config) => merge_config(&mut config, file_config),
            Err(e) => warn!("Failed to parse global config at {global_config_path:?}: {e}"),
        }
    }

    if let Some(ref explicit) = overrides.config_path {
        if !explicit.exists() {
            return Err(ConfigError::NotFound(explicit.clone()));
        }
        merge_config(&mut config, load_config_file(explicit)?);
    } else if let Some(repo_config) = find_repo_local_config(current_dir) {
        match load_config_file(&repo_config) {
            Ok(file_config) => merge_config(&mut config, file_config),
            Err(e) => warn!("Failed to parse repo config at {repo_config:?}: {e}"),
        }
    }

    apply_env_overrides(&mut config);
    apply_cli_overrides(&mut config, overrides);

    Ok(config)
}

/// Config files that `resolve_config` would read, lowest priority first.
pub fn config_sources(
    overrides: &ConfigOverrides,
    current_dir: &Path,
    home_dir: &Path,
) -> Vec<PathBuf> {
    let mut sources = Vec::new();
    let global_config_path = home_dir.join(GLOBAL_CONFIG_PATH);
    if global_config_path.exists() {
        sources.push(global_config_path);
    }
    match overrides.config_path {
        Some(ref explicit) if explicit.exists() => sources.push(explicit.clone()),
        Some(_) => {}
        None => sources.extend(find_repo_local_config(current_dir)),
    }
    sources
}

/// Find repo-local config file
///
/// Searches current directory and parent directories up to git root
fn find_repo_local_config(current_dir: &Path) -> Option<PathBuf> {
    let mut dir = current_dir;

    loop {
        let config_path = dir.join(REPO_CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if dir.join(".git").exists() {
            break;
        }

        dir = dir.parent()?;
    }

    None
}

fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let file: ConfigFile = toml::from_str(&contents)?;
    debug!("Loaded config from {}", path.display());
    Ok(file)
}

/// A section present in a later file replaces the earlier one wholesale.
fn merge_config(base: &mut Config, file: ConfigFile) {
    if let Some(target) = file.target {
        base.target = target;
    }
    if let Some(sqlmap) = file.sqlmap {
        base.sqlmap = sqlmap;
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn apply_env_overrides(config: &mut Config) {
    if let Some(base_url) = env_value("S2S_BASE_URL") {
        config.target.base_url = Some(base_url);
    }

    if let Some(token) = env_value("S2S_TOKEN") {
        config.target.token = Some(token);
    }

    if let Some(executable) = env_value("S2S_SQLMAP") {
        config.sqlmap.executable = executable;
    }
}

fn apply_cli_overrides(config: &mut Config, overrides: &ConfigOverrides) {
    if let Some(ref base_url) = overrides.base_url {
        config.target.base_url = Some(base_url.clone());
    }

    if let Some(ref token) = overrides.token {
        config.target.token = Some(token.clone());
    }

    if let Some(ref executable) = overrides.executable {
        config.sqlmap.executable = executable.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlmap::HeadersMode;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn clear_env() {
        // SAFETY: tests touching the environment are #[serial]
        unsafe {
            std::env::remove_var("S2S_BASE_URL");
            std::env::remove_var("S2S_TOKEN");
            std::env::remove_var("S2S_SQLMAP");
        }
    }

    fn write_global(home: &Path, contents: &str) {
        let path = home.join(GLOBAL_CONFIG_PATH);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    #[serial]
    fn test_resolve_defaults() {
        clear_env();
        let home = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();

        let config = resolve_config(&ConfigOverrides::default(), cwd.path(), home.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_repo_config_overrides_global_section() {
        clear_env();
        let home = TempDir::new().unwrap();
        let repo = TempDir::new().unwrap();
        write_global(
            home.path(),
            r#"
[target]
base_url = "https://global.example.com"
token = "global-token"

[sqlmap]
level = 5
"#,
        );
        fs::write(
            repo.path().join(REPO_CONFIG_FILE),
            r#"
[target]
base_url = "https://repo.example.com"
"#,
        )
        .unwrap();

        let config = resolve_config(&ConfigOverrides::default(), repo.path(), home.path()).unwrap();
        assert_eq!(config.target.base_url.as_deref(), Some("https://repo.example.com"));
        assert_eq!(config.target.token, None);
        assert_eq!(config.sqlmap.level, Some(5));
    }

    #[test]
    #[serial]
    fn test_repo_config_found_in_parent_up_to_git_root() {
        clear_env();
        let home = TempDir::new().unwrap();
        let repo = TempDir::new().unwrap();
        fs::create_dir(repo.path().join(".git")).unwrap();
        fs::write(
            repo.path().join(REPO_CONFIG_FILE),
            "[sqlmap]\nheaders_mode = \"all\"\n",
        )
        .unwrap();
        let nested = repo.path().join("api/specs");
        fs::create_dir_all(&nested).unwrap();

        let config = resolve_config(&ConfigOverrides::default(), &nested, home.path()).unwrap();
        assert_eq!(config.sqlmap.headers_mode, HeadersMode::All);

        let sources = config_sources(&ConfigOverrides::default(), &nested, home.path());
        assert_eq!(sources, vec![repo.path().join(REPO_CONFIG_FILE)]);
    }

    #[test]
    #[serial]
    fn test_search_stops_at_git_root() {
        clear_env();
        let home = TempDir::new().unwrap();
        let outer = TempDir::new().unwrap();
        fs::write(
            outer.path().join(REPO_CONFIG_FILE),
            "[target]\nbase_url = \"https://outer.example.com\"\n",
        )
        .unwrap();
        let repo = outer.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();

        let config = resolve_config(&ConfigOverrides::default(), &repo, home.path()).unwrap();
        assert_eq!(config.target.base_url, None);
    }

    #[test]
    #[serial]
    fn test_invalid_discovered_config_is_skipped() {
        clear_env();
        let home = TempDir::new().unwrap();
        let repo = TempDir::new().unwrap();
        write_global(home.path(), "[target\nbroken");
        fs::write(repo.path().join(REPO_CONFIG_FILE), "[sqlmap]\nthreads = 4\n").unwrap();

        let config = resolve_config(&ConfigOverrides::default(), repo.path(), home.path()).unwrap();
        assert_eq!(config.target, Default::default());
        assert_eq!(config.sqlmap.threads, Some(4));
    }

    #[test]
    #[serial]
    fn test_explicit_config_path() {
        clear_env();
        let home = TempDir::new().unwrap();
        let repo = TempDir::new().unwrap();
        fs::write(
            repo.path().join(REPO_CONFIG_FILE),
            "[target]\nbase_url = \"https://repo.example.com\"\n",
        )
        .unwrap();
        let explicit = repo.path().join("custom.toml");
        fs::write(&explicit, "[target]\ntoken = \"from-file\"\n").unwrap();

        let overrides = ConfigOverrides {
            config_path: Some(explicit.clone()),
            ..Default::default()
        };
        let config = resolve_config(&overrides, repo.path(), home.path()).unwrap();
        assert_eq!(config.target.base_url, None);
        assert_eq!(config.target.token.as_deref(), Some("from-file"));

        let sources = config_sources(&overrides, repo.path(), home.path());
        assert_eq!(sources, vec![explicit]);
    }

    #[test]
    #[serial]
    fn test_explicit_config_errors() {
        clear_env();
        let home = TempDir::new().unwrap();
        let dir = TempDir::new().unwrap();

        let missing = ConfigOverrides {
            config_path: Some(dir.path().join("missing.toml")),
            ..Default::default()
        };
        assert!(matches!(
            resolve_config(&missing, dir.path(), home.path()),
            Err(ConfigError::NotFound(_))
        ));

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "level = ").unwrap();
        let broken = ConfigOverrides {
            config_path: Some(bad),
            ..Default::default()
        };
        assert!(matches!(
            resolve_config(&broken, dir.path(), home.path()),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    #[serial]
    fn test_env_and_cli_precedence() {
        clear_env();
        let home = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        write_global(
            home.path(),
            "[target]\nbase_url = \"https://file.example.com\"\ntoken = \"file\"\n",
        );

        // SAFETY: serial test
        unsafe {
            std::env::set_var("S2S_BASE_URL", "https://env.example.com");
            std::env::set_var("S2S_TOKEN", "env-token");
            std::env::set_var("S2S_SQLMAP", "  ");
        }

        let config = resolve_config(&ConfigOverrides::default(), cwd.path(), home.path()).unwrap();
        assert_eq!(config.target.base_url.as_deref(), Some("https://env.example.com"));
        assert_eq!(config.target.token.as_deref(), Some("env-token"));
        assert_eq!(config.sqlmap.executable, "sqlmap");

        let overrides = ConfigOverrides {
            base_url: Some("https://cli.example.com".to_string()),
            executable: Some("sqlmap.py".to_string()),
            ..Default::default()
        };
        let config = resolve_config(&overrides, cwd.path(), home.path()).unwrap();
        assert_eq!(config.target.base_url.as_deref(), Some("https://cli.example.com"));
        assert_eq!(config.target.token.as_deref(), Some("env-token"));
        assert_eq!(config.sqlmap.executable, "sqlmap.py");

        clear_env();
    }
}
