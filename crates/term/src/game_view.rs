//! GameView: maps world state into a terminal framebuffer.
//!
//! This module is pure (no I/O). The world is drawn as half-block pixels,
//! scaled to fit the viewport while keeping its aspect ratio and centered.
//! Everything is clipped to the field rectangle; text (score, banners, hints)
//! is overlaid on cells on top of the pixels.

use anyhow::Result;
use log::info;

use crate::assets::{Banner, TermAssets};
use crate::core::{FieldConfig, Obstacle, Player, Rect};
use crate::engine::{AssetLoader, PresentationSink};
use crate::fb::{digit_count, Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{ObstacleKind, PlayerState, GOLD_MEDAL_SCORE};

const SKY: Rgb = Rgb::new(78, 192, 202);
const GROUND: Rgb = Rgb::new(222, 216, 149);
const GRASS: Rgb = Rgb::new(115, 191, 46);
const PIPE: Rgb = Rgb::new(84, 168, 56);
const PIPE_CAP: Rgb = Rgb::new(56, 120, 36);
const TEXT: Rgb = Rgb::new(255, 255, 255);
const HINT: Rgb = Rgb::new(250, 250, 210);
const SILVER: Rgb = Rgb::new(200, 200, 210);
const GOLD: Rgb = Rgb::new(250, 200, 40);
const DEBUG: Rgb = Rgb::new(255, 0, 0);

/// Grass strip height in world units
const GRASS_HEIGHT: f32 = 4.0;
/// Pipe cap height and overhang in world units
const CAP_HEIGHT: f32 = 6.0;
const CAP_OVERHANG: f32 = 2.0;

// Row anchors in world units.
const BANNER_Y: f32 = 50.0;
const HINT_Y: f32 = 110.0;
const SCORE_Y: f32 = 10.0;
const FINAL_SCORE_Y: f32 = 116.0;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Medal awarded on the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Silver,
    Gold,
}

impl Medal {
    pub fn for_score(score: u32) -> Self {
        if score < GOLD_MEDAL_SCORE {
            Medal::Silver
        } else {
            Medal::Gold
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Medal::Silver => "SILVER MEDAL",
            Medal::Gold => "GOLD MEDAL",
        }
    }

    fn color(&self) -> Rgb {
        match self {
            Medal::Silver => SILVER,
            Medal::Gold => GOLD,
        }
    }
}

/// World units to pixels: `px = origin + world * scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PixelMap {
    scale: f32,
    origin_x: f32,
    origin_y: f32,
}

impl PixelMap {
    fn fit(viewport: Viewport, field: &FieldConfig) -> Self {
        let pw = f32::from(viewport.width);
        let ph = f32::from(viewport.height) * 2.0;
        let scale = (pw / field.width).min(ph / field.height).max(0.0);
        Self {
            scale,
            origin_x: ((pw - field.width * scale) / 2.0).floor(),
            origin_y: ((ph - field.height * scale) / 2.0).floor(),
        }
    }

    fn x(&self, world: f32) -> i32 {
        (self.origin_x + world * self.scale).floor() as i32
    }

    fn y(&self, world: f32) -> i32 {
        (self.origin_y + world * self.scale).floor() as i32
    }

    /// Pixel rect `(x, y, w, h)` covering `rect`, at least one pixel.
    fn rect(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let x = self.x(rect.x);
        let y = self.y(rect.y);
        let w = (self.x(rect.right()) - x).max(1);
        let h = (self.y(rect.bottom()) - y).max(1);
        (x, y, w, h)
    }

    /// Cell column for world x
    fn col(&self, world: f32) -> i32 {
        self.x(world)
    }

    /// Cell row for world y
    fn row(&self, world: f32) -> i32 {
        self.y(world).div_euclid(2)
    }
}

/// Terminal view of the game; implements the engine's presentation port.
#[derive(Debug, Clone)]
pub struct GameView {
    fb: FrameBuffer,
    viewport: Viewport,
    field: FieldConfig,
    assets: Option<TermAssets>,
    map: PixelMap,
}

impl GameView {
    pub fn new(field: FieldConfig, viewport: Viewport) -> Self {
        Self {
            fb: FrameBuffer::new(viewport.width, viewport.height),
            viewport,
            field,
            assets: None,
            map: PixelMap::fit(viewport, &field),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Takes effect at the next `begin_frame`.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn assets_loaded(&self) -> bool {
        self.assets.is_some()
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.fb
    }

    /// Pixels per world unit for the current frame
    pub fn scale(&self) -> f32 {
        self.map.scale
    }

    fn field_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.field.width, self.field.height)
    }

    /// Fill `rect` clipped to the field and to `y < max_y`.
    fn fill_world(&mut self, rect: Rect, max_y: f32, color: Rgb) {
        let Some(clipped) = clip(&rect, &self.field_rect(), max_y) else {
            return;
        };
        let (x, y, w, h) = self.map.rect(&clipped);
        self.fb.fill_pixels(x, y, w, h, color);
    }

    fn stroke_world(&mut self, rect: Rect, color: Rgb) {
        let Some(clipped) = clip(&rect, &self.field_rect(), self.field.height) else {
            return;
        };
        let (x, y, w, h) = self.map.rect(&clipped);
        self.fb.stroke_pixels(x, y, w, h, color);
    }

    /// Column where text of `len` cells is centered on the field.
    fn centered_col(&self, len: u16) -> u16 {
        let center = self.map.col(self.field.width / 2.0);
        to_cell(center - i32::from(len) / 2)
    }

    fn text_centered(&mut self, row: u16, text: &str, fg: Rgb, bold: bool) {
        let col = self.centered_col(text.chars().count() as u16);
        self.fb.overlay_str(col, row, text, fg, bold);
    }

    /// `label` followed by `value`, centered as one string.
    fn number_centered(&mut self, row: u16, label: &str, value: u32) {
        let label_len = label.chars().count() as u16;
        let col = self.centered_col(label_len + digit_count(value));
        self.fb.overlay_str(col, row, label, TEXT, true);

        let at = col.saturating_add(label_len);
        let bg = self
            .fb
            .get(at, row)
            .map_or(Cell::default().style.bg, |cell| cell.style.bg);
        let style = CellStyle {
            bold: true,
            ..CellStyle::colors(TEXT, bg)
        };
        self.fb.put_u32(at, row, value, style);
    }

    /// Draw a banner with its top line at `world_y`; returns the row below it.
    fn banner(&mut self, world_y: f32, pick: fn(&TermAssets) -> &Banner) -> u16 {
        let top = to_cell(self.map.row(world_y));
        let Some(assets) = self.assets.as_ref() else {
            return top;
        };
        let banner = pick(assets);
        let col = self.centered_col(banner.width());
        for (i, line) in banner.lines().iter().enumerate() {
            self.fb
                .overlay_str(col, top.saturating_add(i as u16), line, TEXT, true);
        }
        top.saturating_add(banner.height())
    }
}

impl PresentationSink for GameView {
    fn begin_frame(&mut self) -> Result<()> {
        self.fb.resize(self.viewport.width, self.viewport.height);
        self.fb.clear(Cell::default());
        self.map = PixelMap::fit(self.viewport, &self.field);
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        Ok(())
    }

    fn draw_background(&mut self) {
        let floor = self.field.floor_y;
        let (width, height) = (self.field.width, self.field.height);
        self.fill_world(Rect::new(0.0, 0.0, width, floor), height, SKY);
        self.fill_world(Rect::new(0.0, floor, width, height - floor), height, GROUND);
        self.fill_world(Rect::new(0.0, floor, width, GRASS_HEIGHT), height, GRASS);
    }

    fn draw_title(&mut self) {
        let below = self.banner(BANNER_Y, |assets| &assets.title);
        let hint_row = to_cell(self.map.row(HINT_Y)).max(below.saturating_add(1));
        self.text_centered(hint_row, HINT_TEXT, HINT, false);
    }

    fn draw_obstacle(&mut self, obstacle: &Obstacle) {
        let body = obstacle.bounds();
        let floor = self.field.floor_y;
        self.fill_world(body, floor, PIPE);

        let cap_y = match obstacle.kind() {
            ObstacleKind::Upper => body.bottom() - CAP_HEIGHT,
            ObstacleKind::Lower => body.y,
        };
        let cap = Rect::new(
            body.x - CAP_OVERHANG,
            cap_y,
            body.w + CAP_OVERHANG * 2.0,
            CAP_HEIGHT,
        );
        self.fill_world(cap, floor, PIPE_CAP);
    }

    fn draw_player(&mut self, player: &Player) {
        let color = player_color(player.state());
        self.fill_world(player.bounds(), self.field.height, color);
    }

    fn draw_score(&mut self, score: u32) {
        let row = to_cell(self.map.row(SCORE_Y));
        self.number_centered(row, "", score);
    }

    fn draw_game_over(&mut self, score: u32) {
        let below = self.banner(BANNER_Y, |assets| &assets.game_over);
        let row = to_cell(self.map.row(FINAL_SCORE_Y)).max(below.saturating_add(1));

        self.number_centered(row, "SCORE ", score);
        let medal = Medal::for_score(score);
        self.text_centered(row.saturating_add(1), medal.as_str(), medal.color(), true);
        self.text_centered(row.saturating_add(3), HINT_TEXT, HINT, false);
    }

    fn draw_debug(&mut self, player: &Player, obstacles: &[Obstacle]) {
        self.stroke_world(player.bounds(), DEBUG);
        for obstacle in obstacles {
            self.stroke_world(obstacle.bounds(), DEBUG);
        }
    }
}

impl AssetLoader for GameView {
    fn load_assets(&mut self) -> Result<()> {
        let assets = TermAssets::load()?;
        info!(
            "loaded banners: title {}x{}, game over {}x{}",
            assets.title.width(),
            assets.title.height(),
            assets.game_over.width(),
            assets.game_over.height()
        );
        self.assets = Some(assets);
        Ok(())
    }
}

const HINT_TEXT: &str = "press SPACE";

fn player_color(state: PlayerState) -> Rgb {
    match state {
        PlayerState::Idle => Rgb::new(250, 210, 40),
        PlayerState::Flying => Rgb::new(255, 236, 120),
        PlayerState::Falling => Rgb::new(240, 130, 30),
    }
}

/// Intersect `rect` with `bounds`, also cutting everything at or below `max_y`.
fn clip(rect: &Rect, bounds: &Rect, max_y: f32) -> Option<Rect> {
    let x0 = rect.x.max(bounds.x);
    let y0 = rect.y.max(bounds.y);
    let x1 = rect.right().min(bounds.right());
    let y1 = rect.bottom().min(bounds.bottom()).min(max_y);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
}

fn to_cell(v: i32) -> u16 {
    v.clamp(0, i32::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, Physics};
    use crate::fb::HALF_BLOCK;
    use glam::Vec2;

    /// 144 columns by 156 rows: exactly one pixel per world unit.
    fn unit_view() -> GameView {
        let mut view = GameView::new(FieldConfig::default(), Viewport::new(144, 156));
        view.begin_frame().unwrap();
        view
    }

    fn row_text(fb: &FrameBuffer, row: u16) -> String {
        (0..fb.width())
            .filter_map(|x| fb.get(x, row))
            .map(|c| c.ch)
            .collect()
    }

    fn all_text(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|row| row_text(fb, row))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_unit_viewport_maps_one_to_one() {
        let view = unit_view();
        assert_eq!(view.scale(), 1.0);
        assert_eq!(view.map.x(10.0), 10);
        assert_eq!(view.map.y(255.0), 255);
    }

    #[test]
    fn test_wide_viewport_is_centered_horizontally() {
        let mut view = GameView::new(FieldConfig::default(), Viewport::new(200, 156));
        view.begin_frame().unwrap();
        assert_eq!(view.scale(), 1.0);
        assert_eq!(view.map.x(0.0), 28);

        view.draw_background();
        assert_eq!(view.framebuffer().get(0, 0), Some(Cell::default()));
        assert_eq!(view.framebuffer().pixel(28, 0), Some(SKY));
    }

    #[test]
    fn test_background_has_sky_grass_and_ground() {
        let mut view = unit_view();
        view.draw_background();
        let fb = view.framebuffer();
        assert_eq!(fb.pixel(0, 0), Some(SKY));
        assert_eq!(fb.pixel(70, 255), Some(SKY));
        assert_eq!(fb.pixel(70, 256), Some(GRASS));
        assert_eq!(fb.pixel(70, 300), Some(GROUND));
    }

    #[test]
    fn test_obstacle_is_clipped_at_floor_and_field_edge() {
        let mut view = unit_view();
        view.draw_background();
        let lower = Obstacle::new(Vec2::new(130.0, 200.0), ObstacleKind::Lower);
        view.draw_obstacle(&lower);

        let fb = view.framebuffer();
        assert_eq!(fb.pixel(135, 230), Some(PIPE));
        assert_eq!(fb.pixel(135, 200), Some(PIPE_CAP));
        assert_eq!(fb.pixel(135, 256), Some(GRASS));
        assert_eq!(fb.width(), 144);
    }

    #[test]
    fn test_upper_cap_faces_the_gap() {
        let mut view = unit_view();
        let upper = Obstacle::new(Vec2::new(40.0, -60.0), ObstacleKind::Upper);
        view.draw_obstacle(&upper);

        let fb = view.framebuffer();
        // Body spans y -60..100, cap 94..100.
        assert_eq!(fb.pixel(50, 10), Some(PIPE));
        assert_eq!(fb.pixel(50, 96), Some(PIPE_CAP));
        assert_eq!(fb.pixel(39, 96), Some(PIPE_CAP));
    }

    #[test]
    fn test_offscreen_obstacle_draws_nothing() {
        let mut view = unit_view();
        let before = view.framebuffer().clone();
        view.draw_obstacle(&Obstacle::new(Vec2::new(400.0, 190.0), ObstacleKind::Lower));
        assert_eq!(view.framebuffer(), &before);
    }

    #[test]
    fn test_player_color_follows_state() {
        let config = GameConfig::default();
        let mut player = Player::new(config.player.spawn, Physics::default());
        let mut view = unit_view();
        view.draw_player(&player);
        assert_eq!(
            view.framebuffer().pixel(70, 155),
            Some(player_color(PlayerState::Idle))
        );

        player.jump();
        view.draw_player(&player);
        assert_eq!(
            view.framebuffer().pixel(70, 155),
            Some(player_color(PlayerState::Flying))
        );
    }

    #[test]
    fn test_score_is_centered_near_top() {
        let mut view = unit_view();
        view.draw_background();
        view.draw_score(42);
        let row = view.map.row(SCORE_Y) as u16;
        let text = row_text(view.framebuffer(), row);
        assert!(text.contains("42"), "{text:?}");
        let cell = view.framebuffer().get(71, row).unwrap();
        assert_eq!(cell.ch, '4');
        assert_eq!(cell.style.bg, SKY);
    }

    #[test]
    fn test_title_before_assets_only_shows_hint() {
        let mut view = unit_view();
        view.draw_title();
        let text = all_text(view.framebuffer());
        assert!(text.contains(HINT_TEXT));
        assert!(!text.contains("__"));
    }

    #[test]
    fn test_title_after_assets_shows_banner() {
        let mut view = unit_view();
        view.load_assets().unwrap();
        assert!(view.assets_loaded());
        view.draw_title();
        let title = TermAssets::load().unwrap().title;
        let text = all_text(view.framebuffer());
        assert!(text.contains(title.lines()[0].trim()));
        assert!(text.contains(HINT_TEXT));
    }

    #[test]
    fn test_game_over_shows_score_and_medal() {
        let mut view = unit_view();
        view.load_assets().unwrap();
        view.draw_game_over(7);
        let text = all_text(view.framebuffer());
        assert!(text.contains("SCORE 7"));
        assert!(text.contains("SILVER MEDAL"));

        view.begin_frame().unwrap();
        view.draw_game_over(100);
        let text = all_text(view.framebuffer());
        assert!(text.contains("SCORE 100"));
        assert!(text.contains("GOLD MEDAL"));
    }

    #[test]
    fn test_medal_threshold() {
        assert_eq!(Medal::for_score(0), Medal::Silver);
        assert_eq!(Medal::for_score(99), Medal::Silver);
        assert_eq!(Medal::for_score(100), Medal::Gold);
    }

    #[test]
    fn test_debug_outlines_player_box() {
        let config = GameConfig::default();
        let player = Player::new(config.player.spawn, Physics::default());
        let mut view = unit_view();
        view.draw_background();
        view.draw_debug(&player, &[]);

        let fb = view.framebuffer();
        // Player box 64..81 x 150..162.
        assert_eq!(fb.pixel(64, 150), Some(DEBUG));
        assert_eq!(fb.pixel(80, 161), Some(DEBUG));
        assert_eq!(fb.pixel(70, 155), Some(SKY));
    }

    #[test]
    fn test_begin_frame_follows_viewport_changes() {
        let mut view = unit_view();
        view.set_viewport(Viewport::new(20, 10));
        view.begin_frame().unwrap();
        assert_eq!(view.framebuffer().width(), 20);
        assert_eq!(view.framebuffer().height(), 10);
        assert!(view.scale() < 1.0);
        assert!(view
            .framebuffer()
            .cells()
            .iter()
            .all(|cell| cell.ch != HALF_BLOCK));
    }

    #[test]
    fn test_zero_viewport_does_not_panic() {
        let mut view = GameView::new(FieldConfig::default(), Viewport::new(0, 0));
        view.begin_frame().unwrap();
        view.draw_background();
        view.draw_title();
        view.draw_score(3);
    }
}
