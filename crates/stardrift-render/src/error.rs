//! Render error types

use thiserror::Error;

/// Errors raised while mutating a page
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no window available")]
    NoWindow,

    #[error("no document available")]
    NoDocument,

    #[error("DOM operation failed: {0}")]
    Dom(String),
}
