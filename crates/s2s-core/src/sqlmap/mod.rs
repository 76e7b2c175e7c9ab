//! sqlmap command building and script export

pub mod command;
pub mod export;
pub mod options;

pub use command::{build_command, shell_quote, split_extra_args, SqlmapCommand};
pub use export::{ExportError, ScriptExporter, ScriptKind};
pub use options::{HeadersMode, OptionsError, SqlmapOptions};
