//! sqlmap command line construction

use super::options::{HeadersMode, SqlmapOptions};
use crate::request::HttpRequest;

/// Headers that describe the connection rather than the application
const SKIPPED_HEADERS: [&str; 6] = [
    "host",
    "content-length",
    "connection",
    "accept-encoding",
    "user-agent",
    "proxy-connection",
];

const IMPORTANT_HEADERS: [&str; 4] = ["authorization", "cookie", "content-type", "x-csrf-token"];

const BODY_METHODS: [&str; 4] = ["POST", "PUT", "PATCH", "DELETE"];

/// A sqlmap invocation as an argument vector (executable first)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlmapCommand {
    pub args: Vec<String>,
}

impl SqlmapCommand {
    /// Single-line POSIX shell rendering of the command.
    pub fn to_shell_command(&self) -> String {
        self.args
            .iter()
            .map(|a| shell_quote(a))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Build the sqlmap invocation that targets `request`.
pub fn build_command(request: &HttpRequest, options: &SqlmapOptions) -> SqlmapCommand {
    let method = request.method.to_uppercase();
    let mut args = vec![options.executable.clone(), "-u".to_string(), request.url.clone()];

    if !method.is_empty() && method != "GET" {
        args.push("--method".to_string());
        args.push(method.clone());
    }

    if options.include_headers {
        for (name, value) in &request.headers {
            if name.is_empty() || should_skip_header(name) {
                continue;
            }
            if options.headers_mode == HeadersMode::ImportantOnly && !is_important_header(name) {
                continue;
            }
            args.push("-H".to_string());
            args.push(format!("{name}: {value}"));
        }
    }

    if let Some(body) = request.body.as_deref()
        && !body.trim().is_empty()
        && BODY_METHODS.contains(&method.as_str())
    {
        args.push("--data".to_string());
        args.push(body.to_string());
    }

    if options.batch {
        args.push("--batch".to_string());
    }
    if options.random_agent {
        args.push("--random-agent".to_string());
    }

    for (flag, value) in [
        ("--level", options.level),
        ("--risk", options.risk),
        ("--threads", options.threads),
    ] {
        if let Some(value) = value {
            args.push(flag.to_string());
            args.push(value.to_string());
        }
    }

    if options.force_ssl {
        args.push("--force-ssl".to_string());
    }

    for (flag, value) in [
        ("--tamper", options.tamper.as_deref()),
        ("--technique", options.technique.as_deref()),
    ] {
        if let Some(value) = value.map(str::trim)
            && !value.is_empty()
        {
            args.push(flag.to_string());
            args.push(value.to_string());
        }
    }

    args.extend(split_extra_args(&options.extra_args));

    SqlmapCommand { args }
}

fn should_skip_header(name: &str) -> bool {
    let lowered = name.to_ascii_lowercase();
    SKIPPED_HEADERS.contains(&lowered.as_str())
}

fn is_important_header(name: &str) -> bool {
    let lowered = name.to_ascii_lowercase();
    IMPORTANT_HEADERS.contains(&lowered.as_str()) || lowered.starts_with("x-")
}

/// Quote an argument for a POSIX shell.
///
/// Arguments made only of `[A-Za-z0-9_./:@%+=,-]` are left bare; anything
/// else is single-quoted with embedded `'` written as `'"'"'`.
pub fn shell_quote(arg: &str) -> String {
    let is_safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_./:@%+=,-".contains(c));
    if is_safe {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', r#"'"'"'"#))
}

/// Split free-form extra arguments on whitespace outside quotes.
///
/// Single and double quotes group words and are removed; there is no
/// escape character.
pub fn split_extra_args(raw: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_single = false;
    let mut in_double = false;

    for ch in raw.trim().chars() {
        match ch {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            c if c.is_whitespace() && !in_single && !in_double => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}
