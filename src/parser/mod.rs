//! Template source scanning utilities.
//!
//! This module provides the lexical building blocks the reformatter works with:
//! - [`line`]: Splits a document into [`TemplateLine`]s (original indent + trimmed content)
//! - [`patterns`]: Precompiled regex patterns that route lines to the expansion path
//! - [`directive`]: Recognizes control-flow directives (`@if`, `@for`, ...) and extracts
//!   their head text, balanced parenthesized condition included
//! - [`spans`]: Locates interpolation (`{{ }}`) and comment (`<!-- -->`) spans and tracks
//!   multi-line comment state
//!
//! Nothing here allocates state beyond a single line; depth tracking lives in
//! [`crate::format`].

pub mod directive;
pub mod line;
pub mod patterns;
pub mod spans;

pub use directive::{directive_keyword, extract_directive, is_control_flow_directive};
pub use line::{split_lines, LineEnding, TemplateLine};
pub use patterns::is_control_flow_line;
pub use spans::{comment_end, comment_state_after, interpolation_end};
