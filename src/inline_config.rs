//! Inline configuration parsing for `<!-- allman-fmt: ... -->` comments
//!
//! Supports in-file configuration overrides via special comments:
//! `<!-- allman-fmt: --indent 2 -->` or `<!-- allman-fmt: off -->`

use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;

/// Pattern to match allman-fmt configuration comments
static INLINE_CONFIG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*<!--\s*allman-fmt:\s*(.*?)\s*-->\s*$")
        .unwrap_or_else(|e| panic!("Invalid inline config pattern: {e}"))
});

/// Parsed inline options that can override config
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InlineOverrides {
    pub indent: Option<usize>,
    pub use_tabs: Option<bool>,
    pub impose_allman: Option<bool>,
}

impl InlineOverrides {
    /// Check if any overrides are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indent.is_none() && self.use_tabs.is_none() && self.impose_allman.is_none()
    }

    /// Apply the overrides to `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(indent) = self.indent {
            config.indent = indent;
        }
        if let Some(use_tabs) = self.use_tabs {
            config.use_tabs = use_tabs;
        }
        if let Some(impose_allman) = self.impose_allman {
            config.impose_allman = impose_allman;
        }
    }
}

/// Parse a configuration comment line and return option overrides
///
/// # Returns
/// * `Some(InlineOverrides)` if the line is a comment with at least one known option
/// * `None` otherwise
#[must_use]
pub fn parse_inline_config(line: &str) -> Option<InlineOverrides> {
    let caps = INLINE_CONFIG_RE.captures(line)?;
    let args_str = caps.get(1)?.as_str();

    parse_inline_args(args_str)
}

/// Parse option tokens into overrides
fn parse_inline_args(args_str: &str) -> Option<InlineOverrides> {
    let mut overrides = InlineOverrides::default();
    let mut tokens = args_str.split_whitespace();

    while let Some(token) = tokens.next() {
        match token {
            "-i" | "--indent" => {
                overrides.indent = tokens.next().and_then(|value| value.parse().ok());
            }
            "-t" | "--use-tabs" => overrides.use_tabs = Some(true),
            "--use-spaces" => overrides.use_tabs = Some(false),
            "off" | "--disable" => overrides.impose_allman = Some(false),
            "on" | "--enable" => overrides.impose_allman = Some(true),
            _ => {
                // Unknown option, skip
            }
        }
    }

    if overrides.is_empty() {
        None
    } else {
        Some(overrides)
    }
}

/// Scan a document for the first configuration comment carrying a known option
///
/// Markers with no recognised option are skipped; later usable ones are ignored.
#[must_use]
pub fn find_inline_config(content: &str) -> Option<InlineOverrides> {
    content.lines().find_map(parse_inline_config)
}
