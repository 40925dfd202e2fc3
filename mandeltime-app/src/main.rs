mod cli;
mod config;
mod driver;
mod environment;

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cli::Args;
use config::RunConfig;

fn main() -> Result<()> {
    // Logs go to stderr so the timing report on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };
    args.apply(&mut config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in environment::banner() {
        writeln!(out, "{line}")?;
    }

    let mut plan = config.validate()?;
    info!("Starting time-mandelbrot");
    let report = driver::run(&mut plan, &mut out)?;
    info!(
        runs = report.timings.len(),
        saved = report.saved_to.is_some(),
        "Finished"
    );
    Ok(())
}
