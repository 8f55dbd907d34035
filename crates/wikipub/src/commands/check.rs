//! `wikipub check` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use wikipub_filter::SkipFilter;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Markdown files or directories to check (default: docs source directory).
    paths: Vec<PathBuf>,

    /// Leave skip markers inside fenced code blocks untouched (overrides config).
    #[arg(long)]
    respect_code_fences: bool,

    /// Path to configuration file (default: auto-discover wikipub.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Outcome of checking a set of files.
#[derive(Debug, Default, PartialEq, Eq)]
struct CheckSummary {
    total: usize,
    failed: usize,
    spans: usize,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if config loading fails, no input can be found, or
    /// any file has malformed skip markers.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = super::load_config(self.config.as_deref(), self.respect_code_fences, None)?;

        if !config.filter.enabled {
            output.notice("Skip filtering is disabled in config; checking markers anyway.");
        }

        let roots = if self.paths.is_empty() {
            vec![config.docs_resolved.source_dir.clone()]
        } else {
            self.paths
        };

        let mut files = Vec::new();
        for root in &roots {
            if root.is_dir() {
                collect_markdown_files(root, &mut files);
            } else if root.is_file() {
                files.push(root.clone());
            } else {
                return Err(CliError::Validation(format!(
                    "path not found: {}",
                    root.display()
                )));
            }
        }

        let filter = SkipFilter::new(config.filter.options());
        let summary = check_files(&filter, &files, &output);

        if summary.failed > 0 {
            return Err(CliError::Check {
                failed: summary.failed,
                total: summary.total,
            });
        }

        output.done(&format!(
            "Checked {} file(s), {} skip span(s): all markers well-formed.",
            summary.total, summary.spans
        ));
        Ok(())
    }
}

/// Validate markers in each file, reporting failures as they are found.
fn check_files(filter: &SkipFilter, files: &[PathBuf], output: &Output) -> CheckSummary {
    let mut summary = CheckSummary::default();

    for path in files {
        summary.total += 1;
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                output.file_failure(path, &e);
                summary.failed += 1;
                continue;
            }
        };

        match filter.spans(&text) {
            Ok(spans) => {
                tracing::debug!(path = %path.display(), spans = spans.len(), "Markers well-formed");
                summary.spans += spans.len();
            }
            Err(e) => {
                output.file_failure(path, &e);
                summary.failed += 1;
            }
        }
    }

    summary
}

/// Recursively collect `.md` files under `dir`, skipping hidden entries.
///
/// Files are returned in sorted path order for stable output.
fn collect_markdown_files(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "Cannot read directory, skipping");
        return;
    };

    let mut entries: Vec<_> = entries
        .filter_map(Result::ok)
        .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
        .map(|e| {
            let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
            (e.path(), is_dir)
        })
        .collect();
    entries.sort();

    for (path, is_dir) in entries {
        if is_dir {
            collect_markdown_files(&path, files);
        } else if path.extension().is_some_and(|e| e == "md") {
            files.push(path);
        }
    }
}
