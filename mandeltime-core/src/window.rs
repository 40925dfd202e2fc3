use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::complex::Complex;
use crate::error::CoreError;

/// Rectangular region of the complex plane mapped onto the image.
///
/// Columns run along the real axis from `min_x` to `max_x`; rows run along
/// the imaginary axis from `min_y` to `max_y`, so row 0 sits at `min_y`.
/// Bounds are finite with `min_x < max_x` and `min_y < max_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct PlaneWindow {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl PlaneWindow {
    /// The full set: `[-2, 1] × [-1, 1]`.
    pub const REFERENCE: Self = Self {
        min_x: -2.0,
        max_x: 1.0,
        min_y: -1.0,
        max_y: 1.0,
    };

    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> crate::Result<Self> {
        let bounds = [min_x, max_x, min_y, max_y];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(invalid(format!(
                "bounds must be finite, got x: [{min_x}, {max_x}], y: [{min_y}, {max_y}]"
            )));
        }
        if min_x >= max_x {
            return Err(invalid(format!("min_x ({min_x}) must be < max_x ({max_x})")));
        }
        if min_y >= max_y {
            return Err(invalid(format!("min_y ({min_y}) must be < max_y ({max_y})")));
        }
        Ok(Self {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Extent along the real axis.
    pub fn span_x(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along the imaginary axis.
    pub fn span_y(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Pixel-to-plane mapping for a `width × height` grid.
    ///
    /// Each pixel spans `span / size` plane units and is sampled at its
    /// lower-left corner, so the far edges `max_x` and `max_y` are never hit.
    pub fn mapping(&self, width: u32, height: u32) -> PixelMapping {
        PixelMapping {
            min_x: self.min_x,
            min_y: self.min_y,
            pixel_size_x: self.span_x() / width as f64,
            pixel_size_y: self.span_y() / height as f64,
        }
    }
}

impl Default for PlaneWindow {
    fn default() -> Self {
        Self::REFERENCE
    }
}

impl std::fmt::Display for PlaneWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}] × [{}, {}]",
            self.min_x, self.max_x, self.min_y, self.max_y
        )
    }
}

fn invalid(reason: String) -> CoreError {
    debug!(%reason, "Rejected plane window");
    CoreError::InvalidWindow { reason }
}

/// Unvalidated form used only for deserialization.
#[derive(Deserialize)]
struct RawWindow {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl TryFrom<RawWindow> for PlaneWindow {
    type Error = CoreError;

    fn try_from(raw: RawWindow) -> crate::Result<Self> {
        Self::new(raw.min_x, raw.max_x, raw.min_y, raw.max_y)
    }
}

/// Precomputed per-axis steps for one grid size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelMapping {
    pub min_x: f64,
    pub min_y: f64,
    pub pixel_size_x: f64,
    pub pixel_size_y: f64,
}

impl PixelMapping {
    /// Real coordinate of column `col`.
    #[inline]
    pub fn re(&self, col: u32) -> f64 {
        self.min_x + col as f64 * self.pixel_size_x
    }

    /// Imaginary coordinate of row `row`.
    #[inline]
    pub fn im(&self, row: u32) -> f64 {
        self.min_y + row as f64 * self.pixel_size_y
    }

    #[inline]
    pub fn point(&self, col: u32, row: u32) -> Complex {
        Complex::new(self.re(col), self.im(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn reference_window() {
        let w = PlaneWindow::default();
        assert_eq!(w, PlaneWindow::new(-2.0, 1.0, -1.0, 1.0).unwrap());
        assert!((w.span_x() - 3.0).abs() < EPSILON);
        assert!((w.span_y() - 2.0).abs() < EPSILON);
    }

    #[test]
    fn inverted_bounds_rejected() {
        assert!(PlaneWindow::new(1.0, -2.0, -1.0, 1.0).is_err());
        assert!(PlaneWindow::new(-2.0, 1.0, 1.0, -1.0).is_err());
    }

    #[test]
    fn degenerate_bounds_rejected() {
        assert!(PlaneWindow::new(0.5, 0.5, -1.0, 1.0).is_err());
        assert!(PlaneWindow::new(-2.0, 1.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn non_finite_bounds_rejected() {
        assert!(PlaneWindow::new(f64::NAN, 1.0, -1.0, 1.0).is_err());
        assert!(PlaneWindow::new(-2.0, f64::INFINITY, -1.0, 1.0).is_err());
        assert!(PlaneWindow::new(-2.0, 1.0, f64::NEG_INFINITY, 1.0).is_err());
    }

    #[test]
    fn mapping_steps_and_origin() {
        let m = PlaneWindow::REFERENCE.mapping(1500, 1000);
        assert!((m.pixel_size_x - 0.002).abs() < EPSILON);
        assert!((m.pixel_size_y - 0.002).abs() < EPSILON);

        let tl = m.point(0, 0);
        assert_eq!(tl, Complex::new(-2.0, -1.0));
    }

    #[test]
    fn columns_follow_real_axis_rows_follow_imaginary_axis() {
        let m = PlaneWindow::REFERENCE.mapping(4, 4);
        // Column 2 of 4 over [-2, 1] → -2 + 2·0.75 = -0.5
        assert!((m.re(2) - (-0.5)).abs() < EPSILON);
        // Row 2 of 4 over [-1, 1] → -1 + 2·0.5 = 0
        assert!(m.im(2).abs() < EPSILON);
        // Last column/row stop one pixel short of the far bound.
        assert!((m.re(3) - 0.25).abs() < EPSILON);
        assert!((m.im(3) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn deserialization_validates() {
        let ok: PlaneWindow =
            serde_json::from_str(r#"{"min_x":-1.5,"max_x":0.5,"min_y":-1.0,"max_y":1.0}"#)
                .unwrap();
        assert_eq!(ok.min_x(), -1.5);
        assert_eq!(ok.max_y(), 1.0);

        let bad = serde_json::from_str::<PlaneWindow>(
            r#"{"min_x":1.0,"max_x":-1.0,"min_y":-1.0,"max_y":1.0}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn display() {
        assert_eq!(PlaneWindow::REFERENCE.to_string(), "[-2, 1] × [-1, 1]");
    }
}
