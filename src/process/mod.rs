//! Document reformatting pipeline.
//!
//! This module drives the line-by-line reformatting of a whole template:
//!
//! - Blank lines are kept as empty lines
//! - Multi-line `<!-- ... -->` comments are copied verbatim, suspending depth tracking
//! - Control-flow lines are expanded one directive/brace per line
//!   (see [`crate::format::expander`])
//! - A lone `}` closes a block; every other line is re-indented as a unit
//!
//! The main entry point is [`format_template`]; [`format_file`] wraps it for
//! buffered readers and writers.

pub mod pipeline;

pub use pipeline::{format_file, format_if_changed, format_template};
