use rayon::prelude::*;

use crate::buffer::RgbBuffer;
use crate::error::RenderError;
use crate::grid::PixelGrid;

const LUT_SIZE: usize = 256;

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// How grid values are stretched onto the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Use the grid's own smallest and largest value as the palette ends.
    #[default]
    Auto,
    /// Map `lo` to the first palette entry and `hi` to the last; values
    /// outside the range are clamped.
    Fixed { lo: u8, hi: u8 },
}

impl Normalization {
    fn range(self, grid: &PixelGrid) -> (u8, u8) {
        match self {
            Self::Auto => grid.value_range(),
            Self::Fixed { lo, hi } => (lo, hi),
        }
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// A colour map backed by a gradient lookup table.
#[derive(Debug, Clone)]
pub struct Palette {
    pub name: &'static str,
    colors: Vec<[u8; 3]>,
}

impl Palette {
    /// `colors` must be non-empty; only the builtin gradients call this.
    pub(crate) fn new(name: &'static str, colors: Vec<[u8; 3]>) -> Self {
        debug_assert!(!colors.is_empty());
        Self { name, colors }
    }

    /// Look up a builtin palette, ignoring case.
    pub fn by_name(name: &str) -> crate::Result<Self> {
        builtin_palettes()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| RenderError::UnknownPalette(name.to_string()))
    }

    /// Colour for a normalized position `t` in `[0, 1]`.
    pub fn sample(&self, t: f64) -> [u8; 3] {
        let n = self.colors.len();
        let idx = (t.clamp(0.0, 1.0) * n as f64) as usize;
        self.colors[idx.min(n - 1)]
    }

    /// Colourise every grid cell after stretching values per `norm`.
    pub fn colorize(&self, grid: &PixelGrid, norm: Normalization) -> RgbBuffer {
        let (lo, hi) = norm.range(grid);
        // Only 256 possible inputs, so resolve each once up front.
        let table: Vec<[u8; 3]> = (0..=u8::MAX)
            .map(|v| {
                let t = if hi <= lo {
                    0.0
                } else {
                    (v as f64 - lo as f64) / (hi as f64 - lo as f64)
                };
                self.sample(t)
            })
            .collect();

        let mut out = RgbBuffer::new(grid.width(), grid.height());
        out.pixels
            .par_chunks_mut(3)
            .zip(grid.as_slice().par_iter())
            .for_each(|(pixel, &value)| {
                pixel.copy_from_slice(&table[value as usize]);
            });
        out
    }
}

impl Default for Palette {
    fn default() -> Self {
        viridis()
    }
}

// ---------------------------------------------------------------------------
// Builtin palettes
// ---------------------------------------------------------------------------

pub fn builtin_palettes() -> Vec<Palette> {
    vec![viridis(), inferno(), grayscale()]
}

/// Build a gradient LUT by interpolating between color stops.
fn gradient_lut(stops: &[(f64, [u8; 3])]) -> Vec<[u8; 3]> {
    (0..LUT_SIZE)
        .map(|i| {
            let t = i as f64 / (LUT_SIZE - 1) as f64;
            let mut lo = 0;
            for (j, &(pos, _)) in stops.iter().enumerate() {
                if pos <= t {
                    lo = j;
                }
            }
            let hi = (lo + 1).min(stops.len() - 1);
            let (lo_t, lo_c) = stops[lo];
            let (hi_t, hi_c) = stops[hi];
            let frac = if (hi_t - lo_t).abs() < 1e-10 {
                0.0
            } else {
                ((t - lo_t) / (hi_t - lo_t)).clamp(0.0, 1.0)
            };
            let inv = 1.0 - frac;
            [
                (lo_c[0] as f64 * inv + hi_c[0] as f64 * frac).round() as u8,
                (lo_c[1] as f64 * inv + hi_c[1] as f64 * frac).round() as u8,
                (lo_c[2] as f64 * inv + hi_c[2] as f64 * frac).round() as u8,
            ]
        })
        .collect()
}

fn viridis() -> Palette {
    let stops = &[
        (0.0, [68, 1, 84]),
        (0.125, [71, 45, 123]),
        (0.25, [59, 82, 139]),
        (0.375, [44, 114, 142]),
        (0.5, [33, 145, 140]),
        (0.625, [40, 174, 128]),
        (0.75, [94, 201, 98]),
        (0.875, [173, 220, 48]),
        (1.0, [253, 231, 37]),
    ];
    Palette::new("viridis", gradient_lut(stops))
}

fn inferno() -> Palette {
    let stops = &[
        (0.0, [0, 0, 4]),
        (0.25, [87, 16, 110]),
        (0.5, [188, 55, 84]),
        (0.75, [249, 142, 9]),
        (1.0, [252, 255, 164]),
    ];
    Palette::new("inferno", gradient_lut(stops))
}

fn grayscale() -> Palette {
    let stops = &[(0.0, [0, 0, 0]), (1.0, [255, 255, 255])];
    Palette::new("grayscale", gradient_lut(stops))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
