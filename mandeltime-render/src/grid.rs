use crate::error::RenderError;

/// Per-pixel escape values for one frame, stored row-major.
///
/// Rows follow the imaginary axis and columns the real axis of the window
/// being rendered. The caller owns the grid and may reuse it across renders;
/// the renderer overwrites every cell and never resizes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelGrid {
    /// Allocate a zeroed `width × height` grid.
    pub fn new(width: u32, height: u32) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, row: u32, col: u32) -> u8 {
        self.data[self.index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: u32, col: u32, value: u8) {
        let idx = self.index(row, col);
        self.data[idx] = value;
    }

    /// Reset every cell to zero, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Fill every cell with `value`. Mostly useful for detecting unwritten
    /// cells in tests.
    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }

    /// Raw row-major cells.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn row(&self, row: u32) -> &[u8] {
        let start = self.index(row, 0);
        &self.data[start..start + self.width as usize]
    }

    /// Smallest and largest stored values.
    pub fn value_range(&self) -> (u8, u8) {
        self.data
            .iter()
            .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    #[inline]
    fn index(&self, row: u32, col: u32) -> usize {
        debug_assert!(row < self.height && col < self.width);
        row as usize * self.width as usize + col as usize
    }
}
