//! Template reformatting.
//!
//! This module contains the core re-indentation logic organized into submodules:
//! - [`indenter`]: Tracks directive-block depth and renders indented output lines
//! - [`expander`]: Splits a control-flow line into one directive or brace per line
//!   (Allman style) while keeping interpolations and comments intact

pub mod expander;
pub mod indenter;

pub use expander::expand_line;
pub use indenter::{BlockIndenter, IndentUnit, DEFAULT_INDENT_WIDTH};
