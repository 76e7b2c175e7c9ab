//! Attack script export (.sh / .py / .ps1)

use super::command::build_command;
use super::options::SqlmapOptions;
use crate::model::Endpoint;
use crate::request::{build_request, RequestContext};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while exporting a script
#[derive(Error, Debug)]
pub enum ExportError {
    /// Nothing to export
    #[error("No endpoints to export")]
    NoEndpoints,

    /// File I/O error
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unknown script format '{0}' (expected sh, py or ps1)")]
    UnknownFormat(String),
}

/// Script flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    /// Bash script
    Sh,
    /// Python 3 script driving `subprocess`
    Py,
    /// PowerShell script
    Ps1,
}

impl ScriptKind {
    pub fn extension(self) -> &'static str {
        match self {
            ScriptKind::Sh => "sh",
            ScriptKind::Py => "py",
            ScriptKind::Ps1 => "ps1",
        }
    }

    /// File name used when no output path is given.
    pub fn default_file_name(self) -> String {
        format!("swagger2sqlmap.{}", self.extension())
    }

    fn is_executable(self) -> bool {
        matches!(self, ScriptKind::Sh | ScriptKind::Py)
    }
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ScriptKind {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "sh" | "bash" => Ok(ScriptKind::Sh),
            "py" | "python" => Ok(ScriptKind::Py),
            "ps1" | "powershell" => Ok(ScriptKind::Ps1),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Renders one sqlmap command per endpoint into a runnable script
pub struct ScriptExporter<'a> {
    endpoints: &'a [Endpoint],
    context: &'a RequestContext,
    options: &'a SqlmapOptions,
}

impl<'a> ScriptExporter<'a> {
    pub fn new(
        endpoints: &'a [Endpoint],
        context: &'a RequestContext,
        options: &'a SqlmapOptions,
    ) -> Self {
        Self {
            endpoints,
            context,
            options,
        }
    }

    /// Render the script text.
    pub fn render(&self, kind: ScriptKind) -> String {
        match kind {
            ScriptKind::Sh => self.render_sh(),
            ScriptKind::Py => self.render_py(),
            ScriptKind::Ps1 => self.render_ps1(),
        }
    }

    /// Write the script to `path` via a temporary sibling file and rename.
    ///
    /// On Unix, `.sh` and `.py` scripts are marked executable.
    pub fn save(&self, kind: ScriptKind, path: &Path) -> Result<PathBuf, ExportError> {
        if self.endpoints.is_empty() {
            return Err(ExportError::NoEndpoints);
        }

        let contents = self.render(kind);
        let tmp_path = path.with_extension(format!("{}.tmp", kind.extension()));

        write_atomically(path, &tmp_path, |file| {
            file.write_all(contents.as_bytes())?;
            #[cfg(unix)]
            if kind.is_executable() {
                use std::os::unix::fs::PermissionsExt;
                file.set_permissions(fs::Permissions::from_mode(0o755))?;
            }
            #[cfg(not(unix))]
            let _ = kind.is_executable();
            Ok(())
        })?;

        info!(
            "Saved .{kind} script with {} commands: {}",
            self.endpoints.len(),
            path.display()
        );
        Ok(path.to_path_buf())
    }

    fn shell_command_for(&self, endpoint: &Endpoint) -> String {
        let request = build_request(endpoint, self.context);
        build_command(&request, self.options).to_shell_command()
    }

    fn banner(endpoint: &Endpoint) -> String {
        format!("=== {} {} ===", endpoint.method, endpoint.path)
    }

    fn render_sh(&self) -> String {
        let mut out = String::from("#!/bin/bash\nset -e\n\n");
        for endpoint in self.endpoints {
            out.push_str(&format!("echo {}\n", sh_quote(&Self::banner(endpoint))));
            out.push_str(&self.shell_command_for(endpoint));
            out.push_str("\n\n");
        }
        out
    }

    fn render_py(&self) -> String {
        let mut out = String::from("#!/usr/bin/env python3\nimport subprocess\n\n");
        out.push_str("commands = [\n");
        for endpoint in self.endpoints {
            out.push_str(&format!("  {},\n", py_quote(&self.shell_command_for(endpoint))));
        }
        out.push_str("]\n\n");
        out.push_str("for c in commands:\n");
        out.push_str("  print('RUN:', c)\n");
        out.push_str("  subprocess.call(c, shell=True)\n");
        out
    }

    fn render_ps1(&self) -> String {
        let mut out = String::from("$ErrorActionPreference = 'Stop'\n\n");
        for endpoint in self.endpoints {
            out.push_str(&format!("Write-Host {}\n", ps_quote(&Self::banner(endpoint))));
            out.push_str(&self.shell_command_for(endpoint));
            out.push_str("\n\n");
        }
        out
    }
}

/// Write through `tmp_path`, fsync, then rename over `path`.
///
/// The temporary file is removed on any failure.
fn write_atomically<F>(path: &Path, tmp_path: &Path, write: F) -> Result<(), ExportError>
where
    F: FnOnce(&mut fs::File) -> std::io::Result<()>,
{
    let written = fs::File::create(tmp_path).and_then(|mut file| {
        write(&mut file)?;
        file.sync_all()
    });
    if let Err(source) = written {
        let _ = fs::remove_file(tmp_path);
        return Err(ExportError::Io {
            path: tmp_path.to_path_buf(),
            source,
        });
    }

    fs::rename(tmp_path, path).map_err(|source| {
        let _ = fs::remove_file(tmp_path);
        ExportError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Always single-quote, unlike the argument quoting in commands.
fn sh_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r#"'"'"'"#))
}

fn py_quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', r"\\").replace('\'', r"\'"))
}

fn ps_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
