//! TerminalPresenter: a [`GameView`] flushed through a [`TerminalRenderer`].

use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::core::{FieldConfig, Obstacle, Player};
use crate::engine::{AssetLoader, PresentationSink};
use crate::game_view::{GameView, Viewport};
use crate::renderer::TerminalRenderer;

/// Fallback when the terminal size cannot be queried.
const FALLBACK_VIEWPORT: Viewport = Viewport {
    width: 80,
    height: 24,
};

pub struct TerminalPresenter<W: Write = io::Stdout> {
    view: GameView,
    renderer: TerminalRenderer<W>,
    fixed: Option<Viewport>,
}

impl TerminalPresenter<io::Stdout> {
    /// Presenter on stdout that follows the terminal size every frame.
    pub fn stdout(field: FieldConfig) -> Self {
        Self {
            view: GameView::new(field, FALLBACK_VIEWPORT),
            renderer: TerminalRenderer::new(),
            fixed: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter().context("entering terminal game mode")
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit().context("restoring terminal")
    }
}

impl<W: Write> TerminalPresenter<W> {
    /// Presenter on any writer with a fixed viewport.
    pub fn with_writer(field: FieldConfig, viewport: Viewport, out: W) -> Self {
        Self {
            view: GameView::new(field, viewport),
            renderer: TerminalRenderer::with_writer(out),
            fixed: Some(viewport),
        }
    }

    pub fn view(&self) -> &GameView {
        &self.view
    }

    pub fn renderer(&self) -> &TerminalRenderer<W> {
        &self.renderer
    }

    fn current_viewport(&self) -> Viewport {
        if let Some(viewport) = self.fixed {
            return viewport;
        }
        crossterm::terminal::size()
            .map(|(w, h)| Viewport::new(w, h))
            .unwrap_or(FALLBACK_VIEWPORT)
    }
}

impl<W: Write> PresentationSink for TerminalPresenter<W> {
    fn begin_frame(&mut self) -> Result<()> {
        let viewport = self.current_viewport();
        self.view.set_viewport(viewport);
        self.view.begin_frame()
    }

    fn end_frame(&mut self) -> Result<()> {
        self.view.end_frame()?;
        self.renderer
            .draw_swap(self.view.framebuffer_mut())
            .context("flushing frame")
    }

    fn draw_background(&mut self) {
        self.view.draw_background();
    }

    fn draw_title(&mut self) {
        self.view.draw_title();
    }

    fn draw_obstacle(&mut self, obstacle: &Obstacle) {
        self.view.draw_obstacle(obstacle);
    }

    fn draw_player(&mut self, player: &Player) {
        self.view.draw_player(player);
    }

    fn draw_score(&mut self, score: u32) {
        self.view.draw_score(score);
    }

    fn draw_game_over(&mut self, score: u32) {
        self.view.draw_game_over(score);
    }

    fn draw_debug(&mut self, player: &Player, obstacles: &[Obstacle]) {
        self.view.draw_debug(player, obstacles);
    }
}

impl<W: Write> AssetLoader for TerminalPresenter<W> {
    fn load_assets(&mut self) -> Result<()> {
        self.view.load_assets()
    }
}
