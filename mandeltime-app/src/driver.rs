use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use mandeltime_render::{export_png, time_renders, ExportMetadata, Normalization, TimedRun};

use crate::config::RunPlan;

/// What a completed run produced.
#[derive(Debug)]
pub struct RunReport {
    pub timings: Vec<TimedRun>,
    pub saved_to: Option<PathBuf>,
}

/// Time the configured renders, report each call on `out`, then save the
/// last frame if an output path is set.
pub fn run(plan: &mut RunPlan, out: &mut impl Write) -> Result<RunReport> {
    info!(
        window = %plan.window,
        width = plan.grid.width(),
        height = plan.grid.height(),
        iterations = plan.bound.get(),
        runs = plan.runs,
        mode = plan.mode.label(),
        "Starting timed renders"
    );

    let timings = time_renders(&plan.window, &mut plan.grid, plan.bound, plan.runs, plan.mode);
    writeln!(out)?;
    for t in &timings {
        writeln!(
            out,
            "Time {} function call : {:.6}",
            t.ordinal(),
            t.elapsed().as_secs_f64()
        )?;
    }

    if let (Some(first), Some(last)) = (timings.first(), timings.last()) {
        info!(
            first_ms = first.elapsed().as_secs_f64() * 1e3,
            last_ms = last.elapsed().as_secs_f64() * 1e3,
            escaped = last.stats.escaped,
            bounded = last.stats.bounded(),
            "Timed renders finished"
        );
    }

    let saved_to = match &plan.output {
        Some(path) => {
            writeln!(out, "Saving figure to {}", path.display())?;
            save(plan, path)?;
            Some(path.clone())
        }
        None => None,
    };

    Ok(RunReport { timings, saved_to })
}

fn save(plan: &RunPlan, path: &Path) -> Result<()> {
    let image = plan
        .palette
        .colorize(&plan.grid, Normalization::Auto)
        .upscaled(plan.scale)?;
    let metadata = ExportMetadata {
        title: plan.title.clone(),
        window: plan.window,
        max_iterations: plan.bound,
        grid_width: plan.grid.width(),
        grid_height: plan.grid.height(),
        palette_name: plan.palette.name.to_string(),
        scale: plan.scale,
    };
    export_png(&image, path, &metadata)
        .with_context(|| format!("failed to save figure to {}", path.display()))?;
    info!("Saved figure to {}", path.display());
    Ok(())
}
