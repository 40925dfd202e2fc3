use crate::error::RenderError;

/// An RGB pixel buffer representing a colourised frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    pub width: u32,
    pub height: u32,
    /// RGB pixel data, 3 bytes per pixel, row-major order.
    pub pixels: Vec<u8>,
}

impl RgbBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 3],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// Nearest-neighbour enlargement: every pixel becomes a
    /// `factor × factor` block.
    pub fn upscaled(&self, factor: u32) -> crate::Result<Self> {
        let (width, height) = Self::scaled_size(self.width, self.height, factor)
            .ok_or(RenderError::InvalidScale(factor))?;
        if factor == 1 {
            return Ok(self.clone());
        }
        let f = factor as usize;
        let src_stride = self.width as usize * 3;
        let mut out = Self::new(width, height);
        let dst_stride = out.width as usize * 3;

        for (y, src_row) in self.pixels.chunks_exact(src_stride).enumerate() {
            // Widen the source row once, then copy it into `f` output rows.
            let mut wide = Vec::with_capacity(dst_stride);
            for px in src_row.chunks_exact(3) {
                for _ in 0..f {
                    wide.extend_from_slice(px);
                }
            }
            for dy in 0..f {
                let start = (y * f + dy) * dst_stride;
                out.pixels[start..start + dst_stride].copy_from_slice(&wide);
            }
        }
        Ok(out)
    }

    /// Output size for `upscaled(factor)`, or `None` if `factor` is zero or
    /// the enlarged frame (including its byte length) does not fit.
    pub fn scaled_size(width: u32, height: u32, factor: u32) -> Option<(u32, u32)> {
        if factor == 0 {
            return None;
        }
        let w = width.checked_mul(factor)?;
        let h = height.checked_mul(factor)?;
        (w as usize).checked_mul(h as usize)?.checked_mul(3)?;
        Some((w, h))
    }
}
