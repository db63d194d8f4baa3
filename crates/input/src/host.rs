//! Terminal host: frame pacing, close signal and key edges on a real TTY.
//!
//! Each frame starts with [`FrameClock::should_close`], which drops the
//! previous frame's unconsumed edges and then pumps crossterm events until the
//! frame deadline. Edges that arrive during the wait are what the engine sees
//! in the following `advance`.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent};

use crate::engine::{FrameClock, FrameInput, InputSource};
use crate::map::{actions_for_key, should_quit};

/// Target frame period (about 60 fps).
pub const DEFAULT_FRAME_MS: u64 = 16;

#[derive(Debug, Clone)]
pub struct TerminalHost {
    edges: FrameInput,
    frame: Duration,
    next_frame: Option<Instant>,
    last_delta: Option<Instant>,
    quit: bool,
}

impl Default for TerminalHost {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalHost {
    pub fn new() -> Self {
        Self {
            edges: FrameInput::none(),
            frame: Duration::from_millis(DEFAULT_FRAME_MS),
            next_frame: None,
            last_delta: None,
            quit: false,
        }
    }

    pub fn with_frame_ms(mut self, frame_ms: u64) -> Self {
        self.frame = Duration::from_millis(frame_ms);
        self
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// Edges recorded since the last `should_close`
    pub fn pending(&self) -> FrameInput {
        self.edges
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Ask the loop to stop at the next frame boundary.
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Record one key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if should_quit(key) {
            self.quit = true;
            return;
        }
        for action in actions_for_key(key) {
            self.edges.press(action);
        }
    }

    /// Read terminal events until `deadline` or a quit key.
    fn pump_until(&mut self, deadline: Instant) -> Result<()> {
        loop {
            let timeout = deadline
                .checked_duration_since(Instant::now())
                .unwrap_or(Duration::ZERO);

            if !event::poll(timeout).context("polling terminal events")? {
                return Ok(());
            }
            if let Event::Key(key) = event::read().context("reading terminal event")? {
                self.handle_key(key);
            }
            if self.quit {
                return Ok(());
            }
        }
    }
}

impl FrameClock for TerminalHost {
    fn should_close(&mut self) -> Result<bool> {
        self.edges.clear();
        if self.quit {
            return Ok(true);
        }

        let now = Instant::now();
        let deadline = self.next_frame.unwrap_or(now);
        self.pump_until(deadline)?;
        self.next_frame = Some(deadline.max(now) + self.frame);

        Ok(self.quit)
    }

    fn delta_time(&mut self) -> f32 {
        let now = Instant::now();
        let dt = self
            .last_delta
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());
        self.last_delta = Some(now);
        dt
    }
}

impl InputSource for TerminalHost {
    fn jump_pressed(&mut self) -> bool {
        self.edges.jump_pressed()
    }

    fn start_pressed(&mut self) -> bool {
        self.edges.start_pressed()
    }

    fn restart_pressed(&mut self) -> bool {
        self.edges.restart_pressed()
    }

    fn debug_pressed(&mut self) -> bool {
        self.edges.debug_pressed()
    }
}
