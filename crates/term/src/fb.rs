//! Framebuffer and style types for terminal rendering.
//!
//! Besides plain character cells the framebuffer supports a half-block pixel
//! mode: a cell showing `▀` carries two vertical pixels, the top one in the
//! foreground color and the bottom one in the background color. Pixel row
//! `py` therefore lives in cell row `py / 2`.

/// Upper half block, the glyph behind every pixel cell.
pub const HALF_BLOCK: char = '\u{2580}';

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        }
    }
}

impl CellStyle {
    pub const fn colors(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Height in half-block pixels
    pub fn pixel_height(&self) -> u32 {
        u32::from(self.height) * 2
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
    }

    /// Write a decimal number without allocating. Returns the digit count.
    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: CellStyle) -> u16 {
        let len = digit_count(value);
        let mut rest = value;
        for i in (0..len).rev() {
            let digit = (rest % 10) as u8;
            self.put_char(x.saturating_add(i), y, char::from(b'0' + digit), style);
            rest /= 10;
        }
        len
    }

    /// Write text in `fg`, keeping each cell's background so text sits on
    /// whatever was drawn below it.
    pub fn overlay_str(&mut self, x: u16, y: u16, s: &str, fg: Rgb, bold: bool) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            if let Some(i) = self.idx(cx, y) {
                let bg = self.cells[i].style.bg;
                self.cells[i] = CellStyle {
                    bold,
                    ..CellStyle::colors(fg, bg)
                }
                .into_cell(ch);
            }
            cx += 1;
        }
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Color one half-block pixel; off-screen pixels are ignored.
    ///
    /// A cell that is not yet a pixel cell is converted with both halves set
    /// to its current background, so text cells turn into solid blocks.
    pub fn put_pixel(&mut self, px: i32, py: i32, color: Rgb) {
        if px < 0 || py < 0 || px > i32::from(u16::MAX) || py / 2 > i32::from(u16::MAX) {
            return;
        }
        let Some(i) = self.idx(px as u16, (py / 2) as u16) else {
            return;
        };

        let cell = &mut self.cells[i];
        if cell.ch != HALF_BLOCK {
            *cell = CellStyle::colors(cell.style.bg, cell.style.bg).into_cell(HALF_BLOCK);
        }
        if py % 2 == 0 {
            cell.style.fg = color;
        } else {
            cell.style.bg = color;
        }
    }

    /// Fill a pixel rectangle, clipped to the buffer.
    pub fn fill_pixels(&mut self, px: i32, py: i32, w: i32, h: i32, color: Rgb) {
        let x0 = px.max(0);
        let y0 = py.max(0);
        let x1 = px.saturating_add(w).min(i32::from(self.width));
        let y1 = py
            .saturating_add(h)
            .min(i32::try_from(self.pixel_height()).unwrap_or(i32::MAX));
        for y in y0..y1 {
            for x in x0..x1 {
                self.put_pixel(x, y, color);
            }
        }
    }

    /// Outline a pixel rectangle one pixel thick.
    pub fn stroke_pixels(&mut self, px: i32, py: i32, w: i32, h: i32, color: Rgb) {
        if w <= 0 || h <= 0 {
            return;
        }
        let right = px + w - 1;
        let bottom = py + h - 1;
        for x in px..=right {
            self.put_pixel(x, py, color);
            self.put_pixel(x, bottom, color);
        }
        for y in py..=bottom {
            self.put_pixel(px, y, color);
            self.put_pixel(right, y, color);
        }
    }

    /// Color of the pixel at `(px, py)`, if that cell is a pixel cell.
    pub fn pixel(&self, px: u16, py: u32) -> Option<Rgb> {
        let row = u16::try_from(py / 2).ok()?;
        let cell = self.get(px, row)?;
        if cell.ch != HALF_BLOCK {
            return None;
        }
        Some(if py % 2 == 0 { cell.style.fg } else { cell.style.bg })
    }
}

/// Decimal digits in `value`
pub fn digit_count(mut value: u32) -> u16 {
    let mut len = 1;
    while value >= 10 {
        value /= 10;
        len += 1;
    }
    len
}
