use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use mandeltime_core::{IterationBound, PlaneWindow};
use mandeltime_render::{Palette, PixelGrid, RenderMode, RgbBuffer};

/// File name used when no explicit output path is configured.
pub const DEFAULT_FILE_NAME: &str = "mandelbrot_plot.png";

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Everything the driver needs, as read from JSON and the command line.
///
/// Values here are unchecked; [`RunConfig::validate`] turns them into a
/// [`RunPlan`] or reports the first bad setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default = "default_min_x")]
    pub min_x: f64,
    #[serde(default = "default_max_x")]
    pub max_x: f64,
    #[serde(default = "default_min_y")]
    pub min_y: f64,
    #[serde(default = "default_max_y")]
    pub max_y: f64,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Number of back-to-back timed renders.
    #[serde(default = "default_runs")]
    pub runs: usize,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default = "default_palette")]
    pub palette: String,
    /// Integer upscale applied to the saved image.
    #[serde(default = "default_scale")]
    pub scale: u32,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_true")]
    pub save: bool,
    /// Where to write the PNG. Defaults to the home directory.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

fn default_min_x() -> f64 {
    PlaneWindow::REFERENCE.min_x()
}
fn default_max_x() -> f64 {
    PlaneWindow::REFERENCE.max_x()
}
fn default_min_y() -> f64 {
    PlaneWindow::REFERENCE.min_y()
}
fn default_max_y() -> f64 {
    PlaneWindow::REFERENCE.max_y()
}
fn default_width() -> u32 {
    1500
}
fn default_height() -> u32 {
    1000
}
fn default_max_iterations() -> u32 {
    IterationBound::DEFAULT.get()
}
fn default_runs() -> usize {
    3
}
fn default_palette() -> String {
    Palette::default().name.to_string()
}
fn default_scale() -> u32 {
    1
}
fn default_title() -> String {
    "Mandelbrot fractal".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            min_x: default_min_x(),
            max_x: default_max_x(),
            min_y: default_min_y(),
            max_y: default_max_y(),
            width: default_width(),
            height: default_height(),
            max_iterations: default_max_iterations(),
            runs: default_runs(),
            parallel: false,
            palette: default_palette(),
            scale: default_scale(),
            title: default_title(),
            save: true,
            output: None,
        }
    }
}

impl RunConfig {
    /// Read a JSON config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = serde_json::from_str::<RunConfig>(&json)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check every setting and build the objects the driver works with.
    ///
    /// The output grid is allocated here, so nothing is rendered unless the
    /// whole configuration is usable.
    pub fn validate(&self) -> Result<RunPlan> {
        let window = PlaneWindow::new(self.min_x, self.max_x, self.min_y, self.max_y)?;
        let bound = IterationBound::new(self.max_iterations)?;
        if self.runs == 0 {
            bail!("runs must be >= 1");
        }
        if RgbBuffer::scaled_size(self.width, self.height, self.scale).is_none() {
            bail!(
                "scale {} is not usable for a {}x{} grid",
                self.scale,
                self.width,
                self.height
            );
        }
        let palette = Palette::by_name(&self.palette)?;
        let output = if self.save {
            Some(match &self.output {
                Some(path) => path.clone(),
                None => default_output_path()?,
            })
        } else {
            None
        };
        let grid = PixelGrid::new(self.width, self.height)?;
        let mode = if self.parallel {
            RenderMode::Parallel
        } else {
            RenderMode::Sequential
        };

        debug!(?window, %bound, width = self.width, height = self.height, "Validated config");
        Ok(RunPlan {
            window,
            bound,
            grid,
            runs: self.runs,
            mode,
            palette,
            scale: self.scale,
            title: self.title.clone(),
            output,
        })
    }
}

/// `~/mandelbrot_plot.png`
fn default_output_path() -> Result<PathBuf> {
    let dirs = directories::UserDirs::new().context("could not determine the home directory")?;
    Ok(dirs.home_dir().join(DEFAULT_FILE_NAME))
}

// ---------------------------------------------------------------------------
// Validated plan
// ---------------------------------------------------------------------------

/// A checked configuration, ready to run.
#[derive(Debug)]
pub struct RunPlan {
    pub window: PlaneWindow,
    pub bound: IterationBound,
    pub grid: PixelGrid,
    pub runs: usize,
    pub mode: RenderMode,
    pub palette: Palette,
    pub scale: u32,
    pub title: String,
    /// `None` when saving is disabled.
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_save() -> RunConfig {
        RunConfig {
            save: false,
            ..RunConfig::default()
        }
    }

    #[test]
    fn defaults_match_reference_run() {
        let c = RunConfig::default();
        assert_eq!((c.min_x, c.max_x, c.min_y, c.max_y), (-2.0, 1.0, -1.0, 1.0));
        assert_eq!((c.width, c.height), (1500, 1000));
        assert_eq!(c.max_iterations, 100);
        assert_eq!(c.runs, 3);
        assert!(!c.parallel);
        assert_eq!(c.palette, "viridis");
        assert!(c.save);
    }

    #[test]
    fn empty_json_gives_defaults() {
        let c: RunConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(c, RunConfig::default());
    }

    #[test]
    fn partial_json_overrides_only_named_keys() {
        let c: RunConfig =
            serde_json::from_str(r#"{"width": 300, "parallel": true, "palette": "inferno"}"#)
                .unwrap();
        assert_eq!(c.width, 300);
        assert_eq!(c.height, 1000);
        assert!(c.parallel);
        assert_eq!(c.palette, "inferno");
    }

    #[test]
    fn unknown_json_key_rejected() {
        let err = serde_json::from_str::<RunConfig>(r#"{"max_iter": 500}"#).unwrap_err();
        assert!(err.to_string().contains("max_iter"), "{err}");
    }

    #[test]
    fn validate_builds_plan() {
        let plan = no_save().validate().unwrap();
        assert_eq!(plan.window, PlaneWindow::REFERENCE);
        assert_eq!(plan.bound.get(), 100);
        assert_eq!((plan.grid.width(), plan.grid.height()), (1500, 1000));
        assert_eq!(plan.mode, RenderMode::Sequential);
        assert!(plan.output.is_none());
    }

    #[test]
    fn validate_keeps_explicit_output() {
        let c = RunConfig {
            output: Some(PathBuf::from("/tmp/out.png")),
            ..RunConfig::default()
        };
        assert_eq!(c.validate().unwrap().output, Some(PathBuf::from("/tmp/out.png")));
    }

    #[test]
    fn validate_rejects_bad_settings() {
        let cases = [
            RunConfig { width: 0, ..no_save() },
            RunConfig { height: 0, ..no_save() },
            RunConfig { max_iterations: 0, ..no_save() },
            RunConfig { min_x: 1.0, max_x: -2.0, ..no_save() },
            RunConfig { min_y: 0.5, max_y: 0.5, ..no_save() },
            RunConfig { runs: 0, ..no_save() },
            RunConfig { scale: 0, ..no_save() },
            RunConfig { scale: 3_000_000, ..no_save() },
            RunConfig { palette: "rainbow".into(), ..no_save() },
        ];
        for c in cases {
            assert!(c.validate().is_err(), "{c:?} should be rejected");
        }
    }

    #[test]
    fn from_file_round_trip() {
        let dir = std::env::temp_dir().join("mandeltime_test_config");
        let _ = fs::create_dir_all(&dir);
        let path = dir.join("run.json");
        fs::write(&path, r#"{"max_iterations": 250, "runs": 5}"#).unwrap();

        let c = RunConfig::from_file(&path).unwrap();
        assert_eq!(c.max_iterations, 250);
        assert_eq!(c.runs, 5);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn from_file_missing_is_error() {
        let path = std::env::temp_dir().join("mandeltime_missing_config.json");
        assert!(RunConfig::from_file(&path).is_err());
    }
}
