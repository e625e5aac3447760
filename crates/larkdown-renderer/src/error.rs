//! Fatal render errors.

use crate::media::BoxError;

/// Error that aborts a whole render. No partial output is returned.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The block source failed before it was exhausted.
    #[error("failed to fetch document blocks: {0}")]
    Fetch(#[source] BoxError),

    /// The render was cancelled or its deadline passed.
    #[error("render cancelled")]
    Cancelled,
}
