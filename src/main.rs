//! Terminal Flappy runner (default binary).
//!
//! Configuration comes from the environment (see `GameConfig::from_env`).
//! Logs go to the file named by `FLAPPY_LOG_PATH`, since the terminal itself
//! is busy showing the game; `RUST_LOG` sets the level (default `info`).

use std::fs::File;

use anyhow::{Context, Result};
use env_logger::{Env, Target};
use log::info;

use tui_flappy::core::GameConfig;
use tui_flappy::engine::Engine;
use tui_flappy::input::TerminalHost;
use tui_flappy::term::TerminalPresenter;

const LOG_PATH_VAR: &str = "FLAPPY_LOG_PATH";

fn main() -> Result<()> {
    init_logging()?;

    let config = GameConfig::from_env().context("loading game configuration")?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!("starting with seed {seed}");

    let mut presenter = TerminalPresenter::stdout(config.field);
    presenter.enter()?;

    let result = run(config, seed, &mut presenter);

    // Always try to restore terminal state.
    let _ = presenter.exit();
    result
}

fn run(config: GameConfig, seed: u64, presenter: &mut TerminalPresenter) -> Result<()> {
    let mut engine = Engine::with_seed(config, seed);
    let mut host = TerminalHost::new();
    engine.run(&mut host, presenter)?;
    info!("exited with score {}", engine.score());
    Ok(())
}

fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os(LOG_PATH_VAR) else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("creating log file {}", path.to_string_lossy()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;
    Ok(())
}
