//! drumgrid - terminal step sequencer
//!
//! Run with: cargo run -- --demo

mod audio;
mod ui;

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use std::{fs::File, path::PathBuf, sync::Mutex, time::Duration};

use drumgrid::{Config, Drumgrid};

#[derive(Parser, Debug)]
#[command(name = "drumgrid", about = "16-step drum machine in the terminal")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting tempo, overrides the configuration
    #[arg(long)]
    bpm: Option<f64>,

    /// Start with the demo groove loaded
    #[arg(long)]
    demo: bool,

    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Some(path) = &args.log {
        init_logging(path)?;
    }

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .wrap_err_with(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(bpm) = args.bpm {
        config.transport.tempo = bpm;
    }

    let frame_interval = Duration::from_millis(config.scope.frame_interval_ms.max(1));
    let mut grid = Drumgrid::new(&config, audio::opener(config.audio.clone()));
    if args.demo {
        grid.load_demo();
    }

    let mut terminal = ratatui::init();
    let result = ui::UiApp::new(grid, frame_interval).run(&mut terminal);
    ratatui::restore();
    result
}

fn init_logging(path: &PathBuf) -> EyreResult<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
