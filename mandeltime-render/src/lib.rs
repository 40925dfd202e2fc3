pub mod buffer;
pub mod error;
pub mod export;
pub mod grid;
pub mod palette;
pub mod renderer;
pub mod timing;

pub use buffer::RgbBuffer;
pub use error::RenderError;
pub use export::{export_png, ExportMetadata};
pub use grid::PixelGrid;
pub use palette::{builtin_palettes, Normalization, Palette};
pub use renderer::{render, render_parallel, RenderMode, RenderStats};
pub use timing::{time_renders, TimedRun};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
