use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use color_wars::{Replay, Scenario};
use cw_canvas::DrawConfiguration;
use simplelog::{LevelFilter, WriteLogger};

/// Replays a recorded color wars game and prints the draw commands each tick
/// produces, one JSON object per line.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (JSON)
    scenario: PathBuf,
    /// Draw configuration (TOML). Defaults to the game's own look.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Write debug logs to debug.log
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.debug {
        setup_logging()?;
    }
    let config = match &args.config {
        Some(path) => DrawConfiguration::load(path)
            .with_context(|| format!("loading draw configuration {:?}", path))?,
        None => DrawConfiguration::default(),
    };
    let scenario = Scenario::load(&args.scenario)
        .with_context(|| format!("loading scenario {:?}", args.scenario))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    Replay::new(config).run(&scenario, &mut out)
}

fn setup_logging() -> anyhow::Result<()> {
    WriteLogger::init(
        LevelFilter::Debug,
        simplelog::ConfigBuilder::new()
            .set_target_level(LevelFilter::Error)
            .build(),
        File::create("debug.log")?,
    )?;
    Ok(())
}
