//! CLI error types.

use std::path::PathBuf;

use wikipub_config::ConfigError;
use wikipub_filter::FilterError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", path.display())]
    Filter {
        path: PathBuf,
        source: FilterError,
    },

    #[error("{failed} of {total} file(s) have malformed skip markers")]
    Check { failed: usize, total: usize },

    #[error("{0}")]
    Validation(String),
}
