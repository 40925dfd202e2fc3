use std::path::PathBuf;

use clap::Parser;

use crate::config::RunConfig;

/// Time repeated Mandelbrot escape-time renders and save the image as PNG.
#[derive(Parser, Debug)]
#[command(name = "time-mandelbrot", author, version, about)]
pub struct Args {
    /// JSON file with run settings; flags given here override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Grid width in pixels (real axis)
    #[arg(long)]
    pub width: Option<u32>,

    /// Grid height in pixels (imaginary axis)
    #[arg(long)]
    pub height: Option<u32>,

    /// Maximum iterations per point
    #[arg(short = 'i', long)]
    pub iterations: Option<u32>,

    /// Number of timed renders
    #[arg(short, long)]
    pub runs: Option<usize>,

    /// Left edge of the plane window
    #[arg(long, allow_hyphen_values = true)]
    pub min_x: Option<f64>,

    /// Right edge of the plane window
    #[arg(long, allow_hyphen_values = true)]
    pub max_x: Option<f64>,

    /// Bottom edge of the plane window
    #[arg(long, allow_hyphen_values = true)]
    pub min_y: Option<f64>,

    /// Top edge of the plane window
    #[arg(long, allow_hyphen_values = true)]
    pub max_y: Option<f64>,

    /// Split rows across all cores
    #[arg(short, long)]
    pub parallel: bool,

    /// Colour map: viridis, inferno or grayscale
    #[arg(long)]
    pub palette: Option<String>,

    /// Integer upscale of the saved image
    #[arg(long)]
    pub scale: Option<u32>,

    /// Title stored in the PNG metadata
    #[arg(long)]
    pub title: Option<String>,

    /// Output PNG path (defaults to ~/mandelbrot_plot.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only time the renders; do not write an image
    #[arg(long)]
    pub no_save: bool,
}

impl Args {
    /// Overlay every flag that was given onto `config`.
    pub fn apply(&self, config: &mut RunConfig) {
        if let Some(v) = self.width {
            config.width = v;
        }
        if let Some(v) = self.height {
            config.height = v;
        }
        if let Some(v) = self.iterations {
            config.max_iterations = v;
        }
        if let Some(v) = self.runs {
            config.runs = v;
        }
        if let Some(v) = self.min_x {
            config.min_x = v;
        }
        if let Some(v) = self.max_x {
            config.max_x = v;
        }
        if let Some(v) = self.min_y {
            config.min_y = v;
        }
        if let Some(v) = self.max_y {
            config.max_y = v;
        }
        if self.parallel {
            config.parallel = true;
        }
        if let Some(v) = &self.palette {
            config.palette = v.clone();
        }
        if let Some(v) = self.scale {
            config.scale = v;
        }
        if let Some(v) = &self.title {
            config.title = v.clone();
        }
        if let Some(v) = &self.output {
            config.output = Some(v.clone());
        }
        if self.no_save {
            config.save = false;
        }
    }
}
