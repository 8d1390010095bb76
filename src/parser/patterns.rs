/// Regex patterns that classify template lines
///
/// All patterns are compiled once on first use via `LazyLock`.
///
/// Directive keywords are case-sensitive: `@If` is markup, not a directive.
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Build a regex from a compile-time constant pattern.
///
/// # Panics
///
/// Panics if the pattern is invalid. All patterns in this module are
/// constants covered by the tests below, so the panic can only surface on
/// first access of the `LazyLock` static during development.
fn build_re(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .unicode(true)
        .build()
        .unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

// Keyword alternation shared by the block patterns. `@else if` is covered by
// `else` followed by whitespace.
const KEYWORDS_STR: &str = r"(?:if|else|switch|case|default|for|empty)";

/// A directive with an opening brace somewhere after it: `@if (x) {`, `@else{`
pub static DIRECTIVE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(&format!(r"@{KEYWORDS_STR}(?:[\s(].*)?\{{")));

/// A closing brace chained to a follow-up block: `} @else {`, `} @empty {`
pub static BLOCK_CHAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"\}\s*@(?:else|empty)\b.*\{"));

/// Two or more closing braces on one line: `} }`, `} } }`
pub static STACKED_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\}[ \t]+\}"));

/// Check whether a trimmed line needs the full expansion scan
///
/// True for lines that open a directive block, chain `} @else {`, or close
/// several blocks at once. Everything else is re-indented as a unit.
#[must_use]
pub fn is_control_flow_line(line: &str) -> bool {
    DIRECTIVE_BLOCK_RE.is_match(line)
        || BLOCK_CHAIN_RE.is_match(line)
        || STACKED_CLOSE_RE.is_match(line)
}
