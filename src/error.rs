use thiserror::Error;

pub type Result<T> = std::result::Result<T, CanvasError>;

/// Errors surfaced while driving a drawing surface.
///
/// The TikZ backend never fails on its own; every variant carries an error
/// raised by a collaborator (text measurement, output sink, clipboard).
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("text measurement failed")]
    Measure(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "clipboard")]
    #[error("clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("drawing surface error")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CanvasError {
    /// Wraps an error raised by a text measurer.
    pub fn measure(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        CanvasError::Measure(err.into())
    }
}
