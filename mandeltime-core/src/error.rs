use thiserror::Error;

/// Errors originating from the core escape-time engine.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("invalid plane window: {reason}")]
    InvalidWindow { reason: String },
}
