//! Error types.

use thiserror::Error;

/// Reasons a pointer-move tick is skipped.
///
/// None of these are fatal. The controller logs them and keeps the last
/// committed position; the next tick retries from fresh measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TickError {
    #[error("drag surface is not measurable")]
    SurfaceUnavailable,
    #[error("dragged element is not measurable")]
    DraggedUnavailable,
    #[error("dragged element has zero size")]
    DegenerateDragged,
    #[error("no drag in progress")]
    NotDragging,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid snap threshold: {0} (must be finite and non-negative)")]
    InvalidThreshold(f64),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
