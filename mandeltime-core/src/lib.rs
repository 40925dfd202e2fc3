pub mod complex;
pub mod error;
pub mod escape;
pub mod iteration;
pub mod window;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use escape::{evaluate, EscapeEvaluator};
pub use iteration::{IterationBound, IterationResult, BOUNDED_SENTINEL, MAX_STORED_ESCAPE};
pub use window::{PixelMapping, PlaneWindow};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
