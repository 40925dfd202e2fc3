use crate::complex::Complex;
use crate::iteration::{IterationBound, IterationResult};

/// Squared escape radius. `|z| ≥ 2` is tested as `|z|² ≥ 4` to skip the root.
const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Escape-time evaluator for `z_{n+1} = z_n² + c`, starting from `z₀ = 0`.
///
/// Stateless apart from the iteration bound; one instance can be shared by
/// any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapeEvaluator {
    bound: IterationBound,
}

impl EscapeEvaluator {
    pub fn new(bound: IterationBound) -> Self {
        Self { bound }
    }

    pub fn bound(&self) -> IterationBound {
        self.bound
    }

    #[inline]
    pub fn iterate(&self, c: Complex) -> IterationResult {
        escape_time(c, self.bound.get())
    }
}

/// Iterate `c` and return the 0-based index of the first iteration whose
/// result has `|z|² ≥ 4`, or 255 if none does within `max_iters` steps.
///
/// The sentinel stays 255 when `max_iters` exceeds 255, and escape indices
/// of 255 or more are returned as-is. With `max_iters == 0` the loop never
/// runs and the sentinel is returned.
///
/// Non-finite input is not rejected: NaN never passes the escape test and so
/// reports 255, while infinite components usually escape at index 0.
#[inline]
pub fn evaluate(re: f64, im: f64, max_iters: u32) -> u32 {
    escape_time(Complex::new(re, im), max_iters).value()
}

#[inline]
fn escape_time(c: Complex, max_iters: u32) -> IterationResult {
    let mut z = Complex::ZERO;
    for n in 0..max_iters {
        z = z.square() + c;
        if z.norm_sq() >= ESCAPE_RADIUS_SQ {
            return IterationResult::Escaped { iterations: n };
        }
    }
    IterationResult::Bounded
}
