//! Configuration management for allman-fmt.
//!
//! This module provides the [`Config`] struct which controls formatting behavior.
//! Configuration can be loaded from:
//! - TOML files (`allman-fmt.toml`)
//! - CLI arguments (which override file settings)
//! - In-file comments (`<!-- allman-fmt: --indent 2 -->`)
//!
//! Config files are auto-discovered by searching parent directories from the file
//! being formatted up to the filesystem root, plus the user's home directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::format::{IndentUnit, DEFAULT_INDENT_WIDTH};

/// File name looked up in the home directory and every ancestor directory
pub const CONFIG_FILE_NAME: &str = "allman-fmt.toml";

/// Home directory from `HOME`, or `USERPROFILE` on Windows
fn home_dir() -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .into_iter()
        .find_map(std::env::var_os)
        .map(PathBuf::from)
}

// Serde default functions
fn default_indent() -> usize {
    DEFAULT_INDENT_WIDTH
}
fn default_true() -> bool {
    true
}
fn default_extensions() -> Vec<String> {
    vec!["html".to_string()]
}

/// Main configuration struct for allman-fmt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of spaces per block level (default: 4)
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Indent with one tab per block level instead of spaces (default: false)
    #[serde(default)]
    pub use_tabs: bool,

    /// Apply Allman brace placement and block indentation (default: true)
    #[serde(default = "default_true")]
    pub impose_allman: bool,

    /// File extensions routed to the formatter, without leading dot (default: `["html"]`)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    pub indent: Option<usize>,
    pub use_tabs: Option<bool>,
    pub impose_allman: Option<bool>,
    pub extensions: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            indent: DEFAULT_INDENT_WIDTH,
            use_tabs: false,
            impose_allman: true,
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Maximum reasonable indent width
    const MAX_INDENT: usize = 16;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.indent == 0 {
            return Some("indent must be at least 1".to_string());
        }
        if self.indent > Self::MAX_INDENT {
            return Some(format!(
                "indent {} exceeds maximum of {}",
                self.indent,
                Self::MAX_INDENT
            ));
        }
        if self
            .extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.').is_empty())
        {
            return Some("extensions must not be empty".to_string());
        }
        None
    }

    /// The whitespace added per open block
    #[must_use]
    pub fn indent_unit(&self) -> IndentUnit {
        if self.use_tabs {
            IndentUnit::tab()
        } else {
            IndentUnit::spaces(self.indent)
        }
    }

    /// Check whether `path` has one of the configured extensions
    ///
    /// Comparison ignores ASCII case and an optional leading dot in the
    /// configured value.
    #[must_use]
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|configured| configured.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let partial: PartialConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.indent {
            self.indent = v;
        }
        if let Some(v) = partial.use_tabs {
            self.use_tabs = v;
        }
        if let Some(v) = partial.impose_allman {
            self.impose_allman = v;
        }
        if let Some(v) = &partial.extensions {
            self.extensions.clone_from(v);
        }
    }

    /// Config files that apply to `start_path`, least specific first
    ///
    /// The home directory file comes first, then one file per ancestor of
    /// the starting directory from the root down. A path that does not exist
    /// is resolved against the current directory.
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            std::env::current_dir().ok()
        };

        let home_file = home_dir().map(|home| home.join(CONFIG_FILE_NAME));
        let ancestor_files: Vec<PathBuf> = start_dir
            .iter()
            .flat_map(|dir| dir.ancestors())
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .collect();

        let mut found: Vec<PathBuf> = Vec::new();
        for candidate in home_file.into_iter().chain(ancestor_files.into_iter().rev()) {
            if candidate.is_file() && !found.contains(&candidate) {
                found.push(candidate);
            }
        }
        found
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let config_files = Self::discover_config_files(start_path);
        let mut config = Self::default();

        for path in &config_files {
            debug!(path = %path.display(), "merging config file");
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => warn!("failed to parse {}: {e}", path.display()),
                },
                Err(e) => warn!("failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.indent, 4);
        assert!(!config.use_tabs);
        assert!(config.impose_allman);
        assert_eq!(config.extensions, vec!["html"]);
    }

    #[test]
    fn test_indent_unit() {
        let config = Config {
            indent: 2,
            ..Default::default()
        };
        assert_eq!(config.indent_unit().as_str(), "  ");

        let config = Config {
            use_tabs: true,
            ..Default::default()
        };
        assert_eq!(config.indent_unit().as_str(), "\t");
    }

    #[test]
    fn test_matches_extension() {
        let config = Config {
            extensions: vec!["html".to_string(), ".htm".to_string()],
            ..Default::default()
        };
        assert!(config.matches_extension(Path::new("src/app/app.component.html")));
        assert!(config.matches_extension(Path::new("INDEX.HTML")));
        assert!(config.matches_extension(Path::new("legacy.htm")));
        assert!(!config.matches_extension(Path::new("main.ts")));
        assert!(!config.matches_extension(Path::new("Makefile")));
    }

    #[test]
    fn test_config_apply_partial() {
        let mut base = Config::default();

        let partial = PartialConfig {
            indent: Some(2),
            ..Default::default()
        };

        base.apply_partial(&partial);
        assert_eq!(base.indent, 2);
        assert!(base.impose_allman);
        assert_eq!(base.extensions, vec!["html"]);
    }

    #[test]
    fn test_config_apply_partial_preserves_unset() {
        let mut base = Config::default();
        base.indent = 8;

        let partial = PartialConfig {
            use_tabs: Some(true),
            extensions: Some(vec!["htm".to_string(), "html".to_string()]),
            ..Default::default()
        };

        base.apply_partial(&partial);
        assert_eq!(base.indent, 8);
        assert!(base.use_tabs);
        assert_eq!(base.extensions, vec!["htm", "html"]);
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("allman-fmt.toml");
        std::fs::write(&path, "indent = 2\nextensions = [\"html\", \"htm\"]\n").unwrap();

        let config = Config::from_toml_file(&path).unwrap();
        assert_eq!(config.indent, 2);
        assert_eq!(config.extensions, vec!["html", "htm"]);
        assert!(config.impose_allman);
    }

    #[test]
    fn test_from_toml_file_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("allman-fmt.toml");
        std::fs::write(&path, "indnet = 2\n").unwrap();

        assert!(Config::from_toml_file(&path).is_err());
    }

    #[test]
    fn test_discovered_files_closest_wins() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("app").join("views");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("allman-fmt.toml"), "indent = 2\nuse_tabs = true\n")
            .unwrap();
        std::fs::write(nested.join("allman-fmt.toml"), "indent = 3\n").unwrap();
        let file = nested.join("page.html");
        std::fs::write(&file, "<p></p>\n").unwrap();

        let discovered = Config::discover_config_files(&file);
        let local: Vec<_> = discovered
            .iter()
            .filter(|p| p.starts_with(dir.path()))
            .collect();
        assert_eq!(local.len(), 2);
        assert!(local[1].starts_with(&nested));

        let config = Config::from_discovered_files(&file);
        assert_eq!(config.indent, 3);
        assert!(config.use_tabs);
    }

    #[test]
    fn test_discover_without_local_config() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.html");
        std::fs::write(&file, "<p></p>\n").unwrap();

        let discovered = Config::discover_config_files(&file);
        assert!(discovered.iter().all(|p| !p.starts_with(dir.path())));
    }

    #[test]
    fn test_validate_default_config() {
        assert!(Config::default().validate().is_none());
    }

    #[test]
    fn test_validate_indent_zero() {
        let config = Config {
            indent: 0,
            ..Default::default()
        };
        assert!(config.validate().unwrap().contains("indent"));
    }

    #[test]
    fn test_validate_indent_too_large() {
        let config = Config {
            indent: 100,
            ..Default::default()
        };
        assert!(config.validate().is_some());
    }

    #[test]
    fn test_validate_empty_extension() {
        let config = Config {
            extensions: vec![".".to_string()],
            ..Default::default()
        };
        assert!(config.validate().unwrap().contains("extensions"));
    }
}
