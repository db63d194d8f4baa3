//! Text banners embedded in the binary.

use anyhow::{bail, Result};

const TITLE: &str = include_str!("../assets/title.txt");
const GAME_OVER: &str = include_str!("../assets/game_over.txt");

/// Maximum banner height in rows
pub const MAX_BANNER_LINES: usize = 8;

/// A multi-line text banner, stored as borrowed lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    lines: Vec<&'static str>,
    width: u16,
}

impl Banner {
    /// Parse `text`, dropping trailing blank lines and trailing whitespace.
    pub fn parse(name: &str, text: &'static str) -> Result<Self> {
        let mut lines: Vec<&'static str> = text.lines().map(str::trim_end).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        if lines.is_empty() {
            bail!("banner {name:?} is empty");
        }
        if lines.len() > MAX_BANNER_LINES {
            bail!(
                "banner {name:?} has {} lines (max {MAX_BANNER_LINES})",
                lines.len()
            );
        }

        let width = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        Ok(Self {
            lines,
            width: u16::try_from(width).unwrap_or(u16::MAX),
        })
    }

    pub fn lines(&self) -> &[&'static str] {
        &self.lines
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.lines.len() as u16
    }
}

/// Every banner the terminal view draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermAssets {
    pub title: Banner,
    pub game_over: Banner,
}

impl TermAssets {
    /// Parse the embedded banners.
    pub fn load() -> Result<Self> {
        Self::from_sources(TITLE, GAME_OVER)
    }

    pub fn from_sources(title: &'static str, game_over: &'static str) -> Result<Self> {
        Ok(Self {
            title: Banner::parse("title", title)?,
            game_over: Banner::parse("game_over", game_over)?,
        })
    }
}
