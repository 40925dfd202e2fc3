use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::debug;

use mandeltime_core::{Complex, EscapeEvaluator, IterationBound, PlaneWindow};

use crate::grid::PixelGrid;

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Summary of one full-grid render. The pixel data itself lives in the
/// caller's [`PixelGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub elapsed: Duration,
    /// Cells written; always `width × height`.
    pub pixels: usize,
    /// Cells whose orbit escaped within the bound.
    pub escaped: usize,
}

impl RenderStats {
    /// Cells that hold the bounded sentinel.
    pub fn bounded(&self) -> usize {
        self.pixels - self.escaped
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Which traversal fills the grid. Both produce identical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Single thread, column by column.
    #[default]
    Sequential,
    /// Rows split across the rayon pool.
    Parallel,
}

impl RenderMode {
    pub fn render(
        self,
        window: &PlaneWindow,
        grid: &mut PixelGrid,
        bound: IterationBound,
    ) -> RenderStats {
        match self {
            Self::Sequential => render(window, grid, bound),
            Self::Parallel => render_parallel(window, grid, bound),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
        }
    }
}

// ---------------------------------------------------------------------------
// Full-grid render
// ---------------------------------------------------------------------------

/// Fill every cell of `grid` with the escape value of its pixel.
///
/// Column `x` samples `min_x + x·(span_x / width)` and row `y` samples
/// `min_y + y·(span_y / height)`. Columns are walked outermost so the real
/// coordinate is computed once per column.
pub fn render(window: &PlaneWindow, grid: &mut PixelGrid, bound: IterationBound) -> RenderStats {
    let start = Instant::now();
    let (width, height) = (grid.width(), grid.height());
    let mapping = window.mapping(width, height);
    let evaluator = EscapeEvaluator::new(bound);
    let mut escaped = 0;

    for x in 0..width {
        let real = mapping.re(x);
        for y in 0..height {
            let imag = mapping.im(y);
            let result = evaluator.iterate(Complex::new(real, imag));
            if result.escaped() {
                escaped += 1;
            }
            grid.set(y, x, result.pixel());
        }
    }

    finish(start, width, height, escaped, RenderMode::Sequential)
}

/// Parallel variant of [`render`]: each rayon task owns one row slice of the
/// grid, so writes never overlap and no locking is needed.
pub fn render_parallel(
    window: &PlaneWindow,
    grid: &mut PixelGrid,
    bound: IterationBound,
) -> RenderStats {
    let start = Instant::now();
    let (width, height) = (grid.width(), grid.height());
    let mapping = window.mapping(width, height);
    let evaluator = EscapeEvaluator::new(bound);

    let escaped: usize = grid
        .as_mut_slice()
        .par_chunks_mut(width as usize)
        .enumerate()
        .map(|(y, row)| {
            let imag = mapping.im(y as u32);
            let mut escaped = 0;
            for (x, cell) in row.iter_mut().enumerate() {
                let result = evaluator.iterate(Complex::new(mapping.re(x as u32), imag));
                if result.escaped() {
                    escaped += 1;
                }
                *cell = result.pixel();
            }
            escaped
        })
        .sum();

    finish(start, width, height, escaped, RenderMode::Parallel)
}

fn finish(
    start: Instant,
    width: u32,
    height: u32,
    escaped: usize,
    mode: RenderMode,
) -> RenderStats {
    let elapsed = start.elapsed();
    let pixels = width as usize * height as usize;
    debug!(
        mode = mode.label(),
        width,
        height,
        escaped,
        elapsed_us = elapsed.as_micros() as u64,
        "Render complete"
    );
    RenderStats {
        elapsed,
        pixels,
        escaped,
    }
}
