//! Simulation engine - owns all mutable game state and the phase machine
//!
//! Per-frame order during `Playing`:
//!
//! 1. jump on input edge
//! 2. integrate player
//! 3. integrate obstacles, then recycle the ones that left the field
//! 4. obstacle collision (any overlap ends the run)
//! 5. scoring
//! 6. floor check (stops the player and ends the run)
//!
//! `advance` always completes (including phase changes) before `render` reads
//! the state, so a frame that ends the run draws the game-over screen.

use anyhow::{Context, Result};
use log::{debug, info};
use rand_pcg::Pcg32;

use crate::core::{
    first_collision, rng, score_frame, GameConfig, Obstacle, ObstacleField, Player, RangeSource,
    ScoreTimer,
};
use crate::ports::{AssetLoader, FrameClock, InputSource, PresentationSink};
use crate::types::Phase;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Overlapped the obstacle at this pool index
    Obstacle(usize),
    /// Fell to the floor line
    Floor,
}

/// The game simulation
#[derive(Debug, Clone)]
pub struct Engine<R = Pcg32> {
    config: GameConfig,
    rng: R,
    phase: Phase,
    player: Player,
    field: ObstacleField,
    score: u32,
    score_timer: ScoreTimer,
    debug_overlay: bool,
    last_game_over: Option<GameOverCause>,
}

impl Engine<Pcg32> {
    /// Engine with a seeded PCG32 generator
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(config, rng::seeded(seed))
    }
}

impl<R: RangeSource> Engine<R> {
    /// Create an engine on the title screen.
    pub fn new(config: GameConfig, rng: R) -> Self {
        let player = spawn_player(&config);
        let field = ObstacleField::new(&config);
        let score_timer = ScoreTimer::new(config.scoring.debounce_secs);
        Self {
            config,
            rng,
            phase: Phase::Title,
            player,
            field,
            score: 0,
            score_timer,
            debug_overlay: false,
            last_game_over: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.field.as_slice()
    }

    pub fn score_timer(&self) -> &ScoreTimer {
        &self.score_timer
    }

    pub fn debug_overlay_enabled(&self) -> bool {
        self.debug_overlay
    }

    /// Cause of the most recent game over, cleared on restart
    pub fn last_game_over(&self) -> Option<GameOverCause> {
        self.last_game_over
    }

    /// Advance the simulation by `dt` seconds (`dt >= 0`).
    pub fn advance<I: InputSource + ?Sized>(&mut self, dt: f32, input: &mut I) {
        if input.debug_pressed() {
            self.debug_overlay = !self.debug_overlay;
            debug!("debug overlay {}", if self.debug_overlay { "on" } else { "off" });
        }

        match self.phase {
            Phase::Title => self.update_title(input),
            Phase::Playing => self.update_playing(dt, input),
            Phase::GameOver => self.update_game_over(input),
        }
    }

    fn update_title<I: InputSource + ?Sized>(&mut self, input: &mut I) {
        if !input.start_pressed() {
            return;
        }
        self.field.spawn(&mut self.rng);
        self.phase = self.phase.next();
        info!("run started");
    }

    fn update_playing<I: InputSource + ?Sized>(&mut self, dt: f32, input: &mut I) {
        if input.jump_pressed() {
            self.player.jump();
        }

        self.player.integrate(dt);

        self.field.integrate(dt, &self.config.physics);
        self.field.recycle(&mut self.rng);

        if let Some(idx) = first_collision(&self.player.bounds(), self.field.iter()) {
            self.end_run(GameOverCause::Obstacle(idx));
        }

        self.score += score_frame(
            &mut self.score_timer,
            self.player.position().x,
            self.field.as_slice(),
            dt,
        );

        if self.player.position().y >= self.config.field.floor_y {
            self.player.stop();
            self.end_run(GameOverCause::Floor);
        }
    }

    fn update_game_over<I: InputSource + ?Sized>(&mut self, input: &mut I) {
        if !input.restart_pressed() {
            return;
        }
        self.score = 0;
        self.score_timer.reset();
        self.player = spawn_player(&self.config);
        self.field.clear();
        self.last_game_over = None;
        self.phase = self.phase.next();
        debug!("back to title");
    }

    /// The first cause within a frame wins; later ones are ignored.
    fn end_run(&mut self, cause: GameOverCause) {
        if self.phase != Phase::Playing {
            return;
        }
        self.phase = self.phase.next();
        self.last_game_over = Some(cause);
        info!("game over ({cause:?}), score {}", self.score);
    }

    /// Draw the current phase.
    pub fn render<P: PresentationSink + ?Sized>(&self, sink: &mut P) -> Result<()> {
        sink.begin_frame()?;
        sink.draw_background();

        match self.phase {
            Phase::Title => sink.draw_title(),
            Phase::Playing => {
                for obstacle in self.field.iter() {
                    sink.draw_obstacle(obstacle);
                }
                sink.draw_player(&self.player);
                sink.draw_score(self.score);
                if self.debug_overlay {
                    sink.draw_debug(&self.player, self.field.as_slice());
                }
            }
            Phase::GameOver => sink.draw_game_over(self.score),
        }

        sink.end_frame()
    }

    /// Host loop: load assets once, then advance and render every frame until
    /// the clock asks to close.
    pub fn run<H, P>(&mut self, host: &mut H, presenter: &mut P) -> Result<()>
    where
        H: FrameClock + InputSource + ?Sized,
        P: PresentationSink + AssetLoader + ?Sized,
    {
        presenter.load_assets().context("loading assets")?;

        while !host.should_close()? {
            let dt = host.delta_time();
            self.advance(dt, &mut *host);
            self.render(&mut *presenter)?;
        }

        info!("closing, final phase {}", self.phase.as_str());
        Ok(())
    }
}

fn spawn_player(config: &GameConfig) -> Player {
    Player::new(config.player.spawn, config.physics)
        .with_size(config.player.width, config.player.height)
}
