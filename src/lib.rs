//! allman-fmt - Allman-style brace formatter for HTML templates
//!
//! Re-indents templates that mix markup with `@if`/`@for`/`@switch` control-flow
//! blocks so every directive head and block brace sits on its own line.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod inline_config;
pub mod parser;
pub mod process;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use error::Result;
pub use inline_config::{find_inline_config, parse_inline_config, InlineOverrides};
pub use process::{format_file, format_if_changed, format_template};
