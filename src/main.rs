//! allman-fmt - Allman-style brace formatter for HTML templates

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::{self, IsTerminal, Read, Write};
use std::path::{Component, Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::{AtomicUsize, Ordering};

use allman_fmt::{find_inline_config, format_if_changed, format_template};
use allman_fmt::{parse_args, CliArgs, Config, Result};
use anyhow::Context;
use glob::Pattern;
use rayon::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// What happened to a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileOutcome {
    /// Already formatted, nothing written
    Unchanged,
    /// Rewritten in place
    Reformatted,
    /// Would be rewritten (`--check`)
    WouldReformat,
    /// Result written to stdout
    Printed,
    /// Skipped by a size or line limit
    Skipped,
}

/// Per-run counters shared across worker threads
#[derive(Debug, Default)]
struct RunTally {
    changed: AtomicUsize,
    unchanged: AtomicUsize,
    skipped: AtomicUsize,
    errors: AtomicUsize,
}

impl RunTally {
    fn record(&self, outcome: &Result<FileOutcome>) {
        let counter = match outcome {
            Ok(FileOutcome::Reformatted | FileOutcome::WouldReformat) => &self.changed,
            Ok(FileOutcome::Unchanged | FileOutcome::Printed) => &self.unchanged,
            Ok(FileOutcome::Skipped) => &self.skipped,
            Err(_) => &self.errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn changed(&self) -> usize {
        self.changed.load(Ordering::Relaxed)
    }

    fn errors(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }
}

fn main() -> Result<ExitCode> {
    let args = parse_args();
    init_tracing(&args);

    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // If no inputs and running interactively, print usage; otherwise read from stdin
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        print_usage();
        return Ok(ExitCode::SUCCESS);
    }

    if use_stdin {
        let config = build_config(&args, None)?;
        return process_stdin(&config, &args);
    }

    // An explicit config file applies to every input; otherwise each file
    // discovers its own
    let base_config = match &args.config {
        Some(_) => Some(build_config(&args, None)?),
        None => None,
    };

    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                tracing::warn!("failed to configure thread pool: {e}");
            }
        }
    }

    let files = collect_files(&args, base_config.as_ref())?;

    if files.is_empty() {
        if !args.silent {
            eprintln!("No template files found to format.");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let tally = RunTally::default();
    let use_sequential = args.stdout || args.jobs == Some(1);
    if use_sequential {
        files
            .iter()
            .for_each(|path| process_and_record(path, base_config.as_ref(), &args, &tally));
    } else {
        files
            .par_iter()
            .for_each(|path| process_and_record(path, base_config.as_ref(), &args, &tally));
    }

    if !args.silent && !args.stdout {
        print_summary(&tally, &args);
    }

    let failed = tally.errors() > 0 || (args.check && tally.changed() > 0);
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Initialize the tracing subscriber on stderr
///
/// `--debug` wins over `--silent`; without either, `RUST_LOG` is honored.
fn init_tracing(args: &CliArgs) {
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else if args.silent {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(args.debug)
        .without_time()
        .init();
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        debug!("using explicit config file: {}", config_path.display());
        Config::from_toml_file(config_path)?
    } else {
        let cwd;
        let start = match for_path {
            Some(path) => path,
            None => {
                cwd = std::env::current_dir().unwrap_or_default();
                cwd.as_path()
            }
        };
        let discovered = Config::discover_config_files(start);
        if discovered.is_empty() {
            debug!("no config files discovered for {}", start.display());
        }
        Config::from_discovered_files(start)
    };

    // Override with CLI arguments
    if let Some(indent) = args.indent {
        config.indent = indent;
    }
    if args.use_tabs {
        config.use_tabs = true;
    }
    if args.no_allman {
        config.impose_allman = false;
    }
    for ext in &args.extensions {
        let ext = ext.trim_start_matches('.');
        if !config
            .extensions
            .iter()
            .any(|known| known.trim_start_matches('.').eq_ignore_ascii_case(ext))
        {
            config.extensions.push(ext.to_string());
        }
    }

    debug!(?config, "resolved configuration");

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Collect all files to process, handling directories and recursive flag
///
/// Explicit file arguments are always kept; directory entries must carry one
/// of the configured template extensions.
fn collect_files(args: &CliArgs, base_config: Option<&Config>) -> Result<Vec<PathBuf>> {
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            let selection = match base_config {
                Some(config) => config.clone(),
                None => build_config(args, Some(input))?,
            };
            let wanted = |path: &Path| {
                path.is_file()
                    && selection.matches_extension(path)
                    && !is_excluded(path, &exclude_patterns)
            };

            if args.recursive {
                // WalkDir reports symlink loops as errors, which are skipped
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_entry(|entry| {
                        entry.depth() == 0 || !is_excluded(entry.path(), &exclude_patterns)
                    })
                    .filter_map(std::result::Result::ok)
                {
                    if wanted(entry.path()) {
                        files.push(entry.path().to_path_buf());
                    }
                }
            } else if let Ok(entries) = std::fs::read_dir(input) {
                for entry in entries.filter_map(std::result::Result::ok) {
                    let path = entry.path();
                    if wanted(&path) {
                        files.push(path);
                    }
                }
            }
        } else {
            tracing::warn!("{} does not exist, skipping", input.display());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Whether `path` is hit by any `--exclude` glob
///
/// A pattern is tried against the whole path and then against each named
/// component, so `node_modules` or `*.stories.html` work without `**/`.
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let full = path.to_string_lossy();
    let names: Vec<_> = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect();

    patterns
        .iter()
        .any(|pattern| pattern.matches(&full) || names.iter().any(|name| pattern.matches(name)))
}

/// Count the number of lines in a document
fn count_lines(contents: &str) -> usize {
    contents.lines().count()
}

/// Resolve the config for `path` and process it, recording the outcome
fn process_and_record(
    path: &Path,
    base_config: Option<&Config>,
    args: &CliArgs,
    tally: &RunTally,
) {
    let result = match base_config {
        Some(config) => process_single_file(path, config, args),
        None => build_config(args, Some(path))
            .and_then(|config| process_single_file(path, &config, args)),
    };

    if let Err(e) = &result {
        eprintln!("Error formatting {}: {e:#}", path.display());
    }
    tally.record(&result);
}

/// Apply inline configuration comments from file contents to a configuration
///
/// Fails when the overrides leave the configuration invalid, so a bad
/// comment is reported against its own file only.
fn apply_inline_overrides(
    config: &mut Config,
    contents: &str,
    source_name: &str,
) -> Result<()> {
    if let Some(overrides) = find_inline_config(contents) {
        debug!(?overrides, "inline configuration in {source_name}");
        overrides.apply(config);
        if let Some(error) = config.validate() {
            anyhow::bail!("invalid inline configuration in {source_name}: {error}");
        }
    }
    Ok(())
}

/// Process a single file
fn process_single_file(path: &Path, config: &Config, args: &CliArgs) -> Result<FileOutcome> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let file_size = std::fs::metadata(path)
        .with_context(|| format!("cannot stat {}", path.display()))?
        .len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        info!(
            "skipping {} ({} MB exceeds limit of {} MB)",
            path.display(),
            file_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
        return Ok(FileOutcome::Skipped);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;

    if let Some(max_lines) = args.exclude_max_lines {
        let line_count = count_lines(&contents);
        if line_count > max_lines {
            info!(
                "skipping {} ({line_count} lines exceeds limit of {max_lines})",
                path.display()
            );
            return Ok(FileOutcome::Skipped);
        }
    }

    // Per-file copy of config that inline comments can override
    let mut file_config = config.clone();
    apply_inline_overrides(&mut file_config, &contents, &path.to_string_lossy())?;

    if args.stdout {
        let output = format_template(&contents, &file_config);
        io::stdout().write_all(output.as_bytes())?;
        return Ok(FileOutcome::Printed);
    }

    let Some(formatted) = format_if_changed(&contents, &file_config) else {
        debug!("{} already formatted", path.display());
        return Ok(FileOutcome::Unchanged);
    };

    if args.check {
        println!("{}", path.display());
        return Ok(FileOutcome::WouldReformat);
    }

    std::fs::write(path, formatted)
        .with_context(|| format!("cannot write {}", path.display()))?;
    info!("formatted {}", path.display());
    Ok(FileOutcome::Reformatted)
}

/// Process input from stdin, output to stdout
fn process_stdin(config: &Config, args: &CliArgs) -> Result<ExitCode> {
    let mut stdin_contents = String::new();
    io::stdin()
        .read_to_string(&mut stdin_contents)
        .context("cannot read stdin")?;

    let stdin_size = stdin_contents.len() as u64;
    if stdin_size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            stdin_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    let mut file_config = config.clone();
    apply_inline_overrides(&mut file_config, &stdin_contents, "stdin")?;

    let output = format_template(&stdin_contents, &file_config);
    if args.check {
        return Ok(if output == stdin_contents {
            ExitCode::SUCCESS
        } else {
            println!("stdin");
            ExitCode::FAILURE
        });
    }

    io::stdout().write_all(output.as_bytes())?;
    debug!("formatted stdin");
    Ok(ExitCode::SUCCESS)
}

/// Print the end-of-run summary to stderr
fn print_summary(tally: &RunTally, args: &CliArgs) {
    let changed = tally.changed();
    let unchanged = tally.unchanged.load(Ordering::Relaxed);
    let skipped = tally.skipped.load(Ordering::Relaxed);
    let errors = tally.errors();

    let mut summary = if args.check {
        format!("{changed} files would be reformatted, {unchanged} already formatted")
    } else {
        format!("Formatted {changed} files, {unchanged} unchanged")
    };
    if skipped > 0 {
        summary.push_str(&format!(", {skipped} skipped"));
    }
    if errors > 0 {
        summary.push_str(&format!(", {errors} errors"));
    }
    eprintln!("{summary}.");
}

fn print_usage() {
    println!(
        "allman-fmt v{} - Allman-style brace formatter for HTML templates",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Usage:");
    println!("  allman-fmt [OPTIONS] <FILE>...");
    println!("  allman-fmt [OPTIONS] -r <DIRECTORY>");
    println!("  allman-fmt [OPTIONS] -              # Read from stdin");
    println!("  cat page.html | allman-fmt          # Pipe input");
    println!();
    println!("Examples:");
    println!("  allman-fmt page.html               # Format single file in-place");
    println!("  allman-fmt -r src/app              # Recursively format directory");
    println!("  allman-fmt --check -r src/         # Report files that need formatting");
    println!("  allman-fmt --stdout page.html      # Output to stdout");
    println!("  allman-fmt -i 2 page.html          # Use 2-space block indent");
    println!();
    println!("Run 'allman-fmt --help' for all options.");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for allman-fmt.toml in parent directories");
    println!("  starting from the file being formatted up to the root directory.");
    println!("  Also checks allman-fmt.toml in the home directory.");
    println!("  More specific configs (closer to file) override less specific ones.");
}
