//! CLI error types.

use xmdoc_config::ConfigError;
use xmdoc_gen::GenerateError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Generate(#[from] GenerateError),
}
