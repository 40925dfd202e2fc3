use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Value reported for a point that never escaped within the iteration bound.
///
/// Fixed at 255 regardless of the bound so downstream colouring always sees
/// the same range.
pub const BOUNDED_SENTINEL: u8 = 255;

/// Largest escape count a `u8` pixel can hold without colliding with
/// [`BOUNDED_SENTINEL`].
pub const MAX_STORED_ESCAPE: u8 = BOUNDED_SENTINEL - 1;

/// The result of iterating a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationResult {
    /// `|z|²` reached 4 on iteration index `iterations` (0-based).
    Escaped { iterations: u32 },

    /// The orbit stayed inside radius 2 for every allowed iteration.
    Bounded,
}

impl IterationResult {
    /// Integer form: the escape index, or 255 for bounded points.
    ///
    /// Escape indices are never clamped, so with a bound above 255 a point
    /// may legitimately report 255 or more while having escaped.
    #[inline]
    pub fn value(self) -> u32 {
        match self {
            Self::Escaped { iterations } => iterations,
            Self::Bounded => BOUNDED_SENTINEL as u32,
        }
    }

    /// Pixel form for 8-bit grids.
    ///
    /// Escape indices of 255 and above saturate to [`MAX_STORED_ESCAPE`];
    /// a stored 255 always means bounded.
    #[inline]
    pub fn pixel(self) -> u8 {
        match self {
            Self::Escaped { iterations } => iterations.min(MAX_STORED_ESCAPE as u32) as u8,
            Self::Bounded => BOUNDED_SENTINEL,
        }
    }

    #[inline]
    pub fn escaped(self) -> bool {
        matches!(self, Self::Escaped { .. })
    }
}

/// Cap on recurrence iterations. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct IterationBound(u32);

impl IterationBound {
    pub const DEFAULT: Self = Self(100);

    pub fn new(max_iterations: u32) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        Ok(Self(max_iterations))
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for IterationBound {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for IterationBound {
    type Error = CoreError;

    fn try_from(value: u32) -> crate::Result<Self> {
        Self::new(value)
    }
}

impl From<IterationBound> for u32 {
    fn from(bound: IterationBound) -> u32 {
        bound.0
    }
}

impl std::fmt::Display for IterationBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
