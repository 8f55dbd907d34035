//! `wikipub filter` command implementation.

use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use wikipub_config::FilterConfig;
use wikipub_filter::{FilterError, SkipFilter};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the filter command.
#[derive(Args)]
pub(crate) struct FilterArgs {
    /// Path to the markdown file.
    markdown_file: PathBuf,

    /// Write the filtered document to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Leave skip markers inside fenced code blocks untouched (overrides config).
    #[arg(long)]
    respect_code_fences: bool,

    /// Copy the document unchanged, without removing skip spans.
    #[arg(long)]
    no_filter: bool,

    /// Path to configuration file (default: auto-discover wikipub.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl FilterArgs {
    /// Execute the filter command.
    ///
    /// # Errors
    ///
    /// Returns an error if config loading, reading, filtering, or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = super::load_config(
            self.config.as_deref(),
            self.respect_code_fences,
            self.no_filter.then_some(false),
        )?;

        let markdown_text = std::fs::read_to_string(&self.markdown_file)?;
        let filtered = filter_document(&config.filter, &markdown_text).map_err(|source| {
            CliError::Filter {
                path: self.markdown_file.clone(),
                source,
            }
        })?;

        match &self.output {
            Some(path) => {
                write_output(path, &filtered)?;
                Output::new().done(&format!(
                    "Filtered {} -> {}",
                    self.markdown_file.display(),
                    path.display()
                ));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(filtered.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}

/// Apply the configured skip filter, or pass the document through when disabled.
pub(crate) fn filter_document<'a>(
    config: &FilterConfig,
    text: &'a str,
) -> Result<Cow<'a, str>, FilterError> {
    if !config.enabled {
        tracing::info!("Skip filtering disabled, passing document through");
        return Ok(Cow::Borrowed(text));
    }

    let filter = SkipFilter::new(config.options());
    let filtered = filter.apply(text)?;
    tracing::info!(
        input_bytes = text.len(),
        output_bytes = filtered.len(),
        "Filtered document"
    );
    Ok(filtered)
}

/// Write output, creating parent directories as needed.
fn write_output(path: &Path, content: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
