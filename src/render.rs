//! Drawing positioned segments.
//!
//! [`render`] walks the segments produced by
//! [`position_segments`](crate::layout::position_segments) and hands each one
//! to a [`Surface`]. Backgrounds come first, text second. A background that
//! cannot be drawn is skipped with a warning; the text is still drawn.
//!
//! [`CellCanvas`] is the terminal surface: a grid of styled cells that is
//! turned into a lipgloss-styled string.

use crate::error::{CountdownError, Result};
use crate::layout::{Rect, Segment, SegmentKind};
use crate::style::{Background, CountdownStyle, SegmentStyle};
use lipgloss_extras::lipgloss::{Color, Style};
use std::collections::HashMap;
use unicode_width::UnicodeWidthChar;

/// Something segments can be drawn on.
pub trait Surface {
    /// Fills `rect` with `background`.
    ///
    /// # Errors
    ///
    /// [`CountdownError::MissingResource`] when a named background is not
    /// known to the surface.
    fn draw_background(
        &mut self,
        rect: Rect,
        background: &Background,
        style: &SegmentStyle,
    ) -> Result<()>;

    /// Draws `text` starting at `x` with its baseline at `baseline`.
    fn draw_text(&mut self, text: &str, x: f64, baseline: f64, style: &SegmentStyle);
}

/// Draws `segments` on `surface` using the segment styles in `style`.
pub fn render<S: Surface + ?Sized>(segments: &[Segment], style: &CountdownStyle, surface: &mut S) {
    for segment in segments {
        let segment_style = match segment.kind {
            SegmentKind::Time => &style.time,
            SegmentKind::Suffix => &style.suffix,
        };

        if let Some(background) = &segment_style.background {
            if let Err(err) = surface.draw_background(segment.rect, background, segment_style) {
                tracing::warn!(%err, unit = %segment.unit, "drawing segment without background");
            }
        }
        surface.draw_text(&segment.text, segment.text_x, segment.baseline, segment_style);
    }
}

/// A named background for terminal cells: a fill character and an
/// optional fill color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fill {
    /// Character drawn in every cell of the box before text is drawn.
    pub ch: char,
    /// Background color of the box.
    pub color: Option<String>,
}

impl Fill {
    /// A fill of `ch` with no color.
    pub fn new(ch: char) -> Self {
        Self { ch, color: None }
    }

    /// Sets the fill color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Option<String>,
    bg: Option<String>,
    bold: bool,
    // Right half of a double-width character.
    continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
            bold: false,
            continuation: false,
        }
    }
}

impl Cell {
    fn same_style(&self, other: &Cell) -> bool {
        self.fg == other.fg && self.bg == other.bg && self.bold == other.bold
    }

    fn style(&self) -> Option<Style> {
        if self.fg.is_none() && self.bg.is_none() && !self.bold {
            return None;
        }
        let mut style = Style::new();
        if let Some(fg) = &self.fg {
            style = style.foreground(Color::from(fg.as_str()));
        }
        if let Some(bg) = &self.bg {
            style = style.background(Color::from(bg.as_str()));
        }
        if self.bold {
            style = style.bold(true);
        }
        Some(style)
    }
}

/// A terminal cell grid.
///
/// Coordinates map to cells by flooring. Text occupies the row directly
/// above its baseline, matching [`CellMeasure`](crate::measure::CellMeasure).
/// Anything drawn outside the grid is clipped.
///
/// ```rust
/// use bubbletea_countdown::layout::Rect;
/// use bubbletea_countdown::render::{CellCanvas, Fill, Surface};
/// use bubbletea_countdown::style::{Background, SegmentStyle};
///
/// let mut canvas = CellCanvas::new(4, 1).with_resource("card", Fill::new('.'));
/// let style = SegmentStyle::default();
/// let rect = Rect { left: 0.0, top: 0.0, width: 4.0, height: 1.0 };
/// canvas
///     .draw_background(rect, &Background::Resource("card".to_string()), &style)
///     .unwrap();
/// canvas.draw_text("12", 1.0, 1.0, &style);
/// assert_eq!(canvas.plain_lines(), vec![".12.".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CellCanvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    resources: HashMap<String, Fill>,
}

impl CellCanvas {
    /// A blank canvas of `width` columns and `height` rows.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
            resources: HashMap::new(),
        }
    }

    /// Registers a named background and returns the canvas.
    pub fn with_resource(mut self, name: impl Into<String>, fill: Fill) -> Self {
        self.register(name, fill);
        self
    }

    /// Registers a named background.
    pub fn register(&mut self, name: impl Into<String>, fill: Fill) {
        self.resources.insert(name.into(), fill);
    }

    /// Copies every registered background from `resources`.
    pub fn register_all<'a>(&mut self, resources: impl IntoIterator<Item = (&'a String, &'a Fill)>) {
        for (name, fill) in resources {
            self.resources.insert(name.clone(), fill.clone());
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Clears every cell, keeping the registered backgrounds.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    fn cell_mut(&mut self, col: i64, row: i64) -> Option<&mut Cell> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells.get_mut(row * self.width + col)
    }

    fn span(start: f64, len: f64) -> std::ops::Range<i64> {
        start.floor() as i64..(start + len).ceil() as i64
    }

    fn fill_rect(&mut self, rect: Rect, ch: Option<char>, bg: Option<&str>) {
        for row in Self::span(rect.top, rect.height) {
            for col in Self::span(rect.left, rect.width) {
                if let Some(cell) = self.cell_mut(col, row) {
                    if let Some(ch) = ch {
                        cell.ch = ch;
                        cell.continuation = false;
                    }
                    if let Some(bg) = bg {
                        cell.bg = Some(bg.to_string());
                    }
                }
            }
        }
    }

    /// Rows as plain text, without styling.
    pub fn plain_lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                row.iter()
                    .filter(|cell| !cell.continuation)
                    .map(|cell| cell.ch)
                    .collect()
            })
            .collect()
    }

    /// Rows styled with lipgloss and joined with newlines.
    pub fn to_styled_string(&self) -> String {
        self.rows()
            .map(Self::styled_row)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks panics on zero; an empty grid has no rows either way.
        self.cells.chunks(self.width.max(1))
    }

    fn styled_row(row: &[Cell]) -> String {
        let mut out = String::new();
        let mut cells = row.iter().filter(|cell| !cell.continuation).peekable();
        while let Some(first) = cells.next() {
            let mut text = String::from(first.ch);
            while let Some(next) = cells.next_if(|next| next.same_style(first)) {
                text.push(next.ch);
            }
            match first.style() {
                Some(style) => out.push_str(&style.render(&text)),
                None => out.push_str(&text),
            }
        }
        out
    }
}

impl Surface for CellCanvas {
    fn draw_background(
        &mut self,
        rect: Rect,
        background: &Background,
        _style: &SegmentStyle,
    ) -> Result<()> {
        match background {
            Background::Color(color) => {
                self.fill_rect(rect, None, Some(color.as_str()));
                Ok(())
            }
            Background::Resource(name) => {
                let fill = self
                    .resources
                    .get(name)
                    .cloned()
                    .ok_or_else(|| CountdownError::MissingResource { name: name.clone() })?;
                self.fill_rect(rect, Some(fill.ch), fill.color.as_deref());
                Ok(())
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f64, baseline: f64, style: &SegmentStyle) {
        let row = (baseline - 1.0).floor() as i64;
        let mut col = x.floor() as i64;
        for ch in text.chars() {
            let width = UnicodeWidthChar::width(ch).unwrap_or(0) as i64;
            if width == 0 {
                continue;
            }
            if let Some(cell) = self.cell_mut(col, row) {
                cell.ch = ch;
                cell.fg = style.text.color.clone();
                cell.bold = style.text.bold;
                cell.continuation = false;
            }
            for tail in 1..width {
                if let Some(cell) = self.cell_mut(col + tail, row) {
                    cell.continuation = true;
                }
            }
            col += width;
        }
    }
}
