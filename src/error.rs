//! Error types and result aliases for allman-fmt.
//!
//! The reformatting engine itself cannot fail; errors only arise from I/O,
//! configuration loading and argument validation:
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used throughout the crate

use anyhow::Result as AnyhowResult;

pub type Result<T> = AnyhowResult<T>;
