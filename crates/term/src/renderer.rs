//! Frame output for the half-block game view.
//!
//! Each frame is compared against the one flushed before it and only the
//! row spans that differ are sent. Scrolling obstacles touch a few columns
//! per row, so steady-state frames stay small. A missing previous frame or a
//! viewport change repaints everything.
//!
//! Output goes through a reusable byte buffer and a single `write_all` per
//! frame; the writer is generic so tests can capture the escape stream.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    shown: Option<FrameBuffer>,
    bytes: Vec<u8>,
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Switch the tty into game mode: raw input, alternate screen, no cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        self.bytes.queue(terminal::EnterAlternateScreen)?;
        self.bytes.queue(cursor::Hide)?;
        self.bytes.queue(terminal::DisableLineWrap)?;
        self.send()
    }

    /// Undo [`enter`](Self::enter). Safe to call after a failed run.
    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        queue_reset(&mut self.bytes)?;
        self.bytes.queue(terminal::EnableLineWrap)?;
        self.bytes.queue(cursor::Show)?;
        self.bytes.queue(terminal::LeaveAlternateScreen)?;
        self.send()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            shown: None,
            bytes: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    /// Forget what is on screen; the next frame repaints everything.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Flush `fb`, then hand the previously shown buffer back through it.
    ///
    /// After the call `fb` holds stale content of the right size; the view
    /// repaints it completely each frame, so no clone is ever needed.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.bytes.clear();
        let mut spare = match self.shown.take() {
            Some(shown) if same_size(&shown, fb) => {
                encode_diff_into(&shown, fb, &mut self.bytes)?;
                shown
            }
            Some(mut stale) => {
                encode_full_into(fb, &mut self.bytes)?;
                stale.resize(fb.width(), fb.height());
                stale
            }
            None => {
                encode_full_into(fb, &mut self.bytes)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.send()?;

        std::mem::swap(&mut spare, fb);
        self.shown = Some(spare);
        Ok(())
    }

    fn send(&mut self) -> Result<()> {
        self.out.write_all(&self.bytes)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Clear the screen and queue every row of `fb`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut spans = SpanWriter::new(out);
    for y in 0..fb.height() {
        spans.write(fb, 0, y, fb.width())?;
    }
    spans.finish()
}

/// Queue only the spans of `next` that differ from `prev`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut spans = SpanWriter::new(out);
    for_each_changed_run(prev, next, |x, y, len| spans.write(next, x, y, len))?;
    spans.finish()
}

/// Call `f(x, y, len)` for every horizontal run of cells that differ.
///
/// Buffers of different sizes report every row as one full-width run.
pub fn for_each_changed_run(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let width = next.width();
    if !same_size(prev, next) {
        for y in 0..next.height() {
            f(0, y, width)?;
        }
        return Ok(());
    }
    if width == 0 {
        return Ok(());
    }

    let rows = prev
        .cells()
        .chunks(width as usize)
        .zip(next.cells().chunks(width as usize));
    for (y, (old, new)) in (0u16..).zip(rows) {
        let mut start: Option<u16> = None;
        for (x, (a, b)) in (0u16..).zip(old.iter().zip(new)) {
            match (a == b, start) {
                (false, None) => start = Some(x),
                (true, Some(from)) => {
                    f(from, y, x - from)?;
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(from) = start {
            f(from, y, width - from)?;
        }
    }
    Ok(())
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Queues cell spans, emitting style commands only when the style changes.
struct SpanWriter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> SpanWriter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn write(&mut self, fb: &FrameBuffer, x: u16, y: u16, len: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let Cell { ch, style } = fb.get(x + dx, y).unwrap_or_default();
            if self.style != Some(style) {
                queue_style(self.out, style)?;
                self.style = Some(style);
            }
            self.out.queue(Print(ch))?;
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        queue_reset(self.out)
    }
}

fn queue_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(color(style.fg)))?;
    out.queue(SetBackgroundColor(color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn queue_reset(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
