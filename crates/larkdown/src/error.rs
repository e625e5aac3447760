//! CLI error types.

use larkdown_config::ConfigError;
use larkdown_lark::LarkError;
use larkdown_renderer::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Lark(#[from] LarkError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
}
