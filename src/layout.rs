//! Layout engine: turns a parsed template and measured glyphs into box
//! geometry.
//!
//! Layout is split into two pure steps. [`measure`] computes the
//! size-affecting [`LayoutMetrics`]; it only needs to run again when the
//! format, the style, the glyph metrics or the number of visible day digits
//! changes. [`position_segments`] then places the current digits and suffix
//! labels left to right and is cheap enough to run on every repaint.
//!
//! ```rust
//! use bubbletea_countdown::format::parse;
//! use bubbletea_countdown::layout::{measure, position_segments, visible_day_digits, SegmentKind};
//! use bubbletea_countdown::measure::{CellMeasure, GlyphMetrics};
//! use bubbletea_countdown::remaining::Remaining;
//! use bubbletea_countdown::style::CountdownStyle;
//!
//! let format = parse("hh:mm:ss").unwrap();
//! let style = CountdownStyle::default();
//! let glyphs = GlyphMetrics::collect(&CellMeasure, &format, &style);
//! let remaining = Remaining::from_secs(5);
//!
//! let metrics = measure(&format, visible_day_digits(&format, &remaining), &glyphs, &style);
//! assert_eq!(metrics.content_width, 8.0);
//! assert_eq!(metrics.content_height, 1.0);
//!
//! let segments = position_segments(&metrics, &remaining);
//! let text: String = segments.iter().map(|segment| segment.text.as_str()).collect();
//! assert_eq!(text, "00:00:05");
//! assert_eq!(segments[2].kind, SegmentKind::Suffix);
//! ```

use crate::format::{TimeFormat, Unit};
use crate::measure::GlyphMetrics;
use crate::remaining::{day_digit_count, Remaining};
use crate::style::{CountdownStyle, Edges, SegmentStyle};

/// An axis-aligned rectangle in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Size and effective padding of a background box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxMetrics {
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
    /// Padding after reconciliation with the minimum background size.
    pub padding: Edges,
}

impl BoxMetrics {
    fn inner_height(&self) -> f64 {
        self.height - self.padding.vertical()
    }
}

/// A suffix label and its box.
#[derive(Debug, Clone, PartialEq)]
pub struct SuffixMetrics {
    /// Label text.
    pub text: String,
    /// Measured text width.
    pub text_width: f64,
    /// Background box.
    pub frame: BoxMetrics,
}

/// One unit's digit run plus its optional suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockMetrics {
    /// The unit shown by this block.
    pub unit: Unit,
    /// Number of digit cells.
    pub digits: usize,
    /// Width of the digit run including inter-digit spacing.
    pub run_width: f64,
    /// Suffix label, if the template gives one.
    pub suffix: Option<SuffixMetrics>,
    /// Total width including the spacing around the suffix.
    pub width: f64,
}

/// Size-affecting layout results.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutMetrics {
    /// Overall content width.
    pub content_width: f64,
    /// Overall content height.
    pub content_height: f64,
    /// Advance of a single digit glyph.
    pub digit_width: f64,
    /// The box each digit is drawn in.
    pub cell: BoxMetrics,
    /// Gap between adjacent digit cells.
    pub digit_spacing: f64,
    /// Gap on each side of a suffix label.
    pub suffix_spacing: f64,
    /// Baseline adjustment for digits, from the time font.
    pub time_center_offset: f64,
    /// Baseline adjustment for suffixes, from the suffix font.
    pub suffix_center_offset: f64,
    /// Visible blocks in display order.
    pub blocks: Vec<BlockMetrics>,
}

impl LayoutMetrics {
    /// True when nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// What a segment displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// A single digit.
    Time,
    /// A suffix label.
    Suffix,
}

/// One positioned, drawable piece of the countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Digit or suffix.
    pub kind: SegmentKind,
    /// The unit the segment belongs to.
    pub unit: Unit,
    /// Text to draw.
    pub text: String,
    /// Background box.
    pub rect: Rect,
    /// Left edge of the text.
    pub text_x: f64,
    /// Text baseline.
    pub baseline: f64,
}

/// Number of day digits to lay out: zero hides the day block.
///
/// The day block is only shown when the template has `dd` and at least one
/// whole day remains.
pub fn visible_day_digits(format: &TimeFormat, remaining: &Remaining) -> usize {
    if format.show_days() && remaining.days > 0 {
        day_digit_count(remaining.days)
    } else {
        0
    }
}

// Reconciles one axis against an optional minimum size. A minimum larger
// than the natural size replaces the padding with symmetric padding.
fn fit_axis(content: f64, before: f64, after: f64, minimum: Option<f64>) -> (f64, f64, f64) {
    let natural = before + content + after;
    match minimum {
        Some(min) if min > natural => {
            let pad = (min - content) / 2.0;
            (min, pad, pad)
        }
        _ => (natural, before, after),
    }
}

fn fit_box(content_width: f64, content_height: f64, style: &SegmentStyle) -> BoxMetrics {
    let padding = style.padding.resolve();
    let (width, left, right) =
        fit_axis(content_width, padding.left, padding.right, style.background_width);
    let (height, top, bottom) =
        fit_axis(content_height, padding.top, padding.bottom, style.background_height);
    BoxMetrics {
        width,
        height,
        padding: Edges {
            left,
            right,
            top,
            bottom,
        },
    }
}

/// Computes the size-affecting layout.
///
/// `day_digits` is the digit count of the day block, usually from
/// [`visible_day_digits`]; zero leaves the day block out.
pub fn measure(
    format: &TimeFormat,
    day_digits: usize,
    glyphs: &GlyphMetrics,
    style: &CountdownStyle,
) -> LayoutMetrics {
    let cell = fit_box(glyphs.digit.width, glyphs.digit.height, &style.time);
    let digit_spacing = style.time.spacing.max(0.0);
    let suffix_spacing = style.suffix.spacing.max(0.0);
    let suffix_height = glyphs.suffix_height();

    let mut blocks = Vec::with_capacity(format.unit_count());
    for unit in format.units() {
        let digits = match unit {
            Unit::Day => day_digits,
            _ => unit.min_digits(),
        };
        if digits == 0 {
            continue;
        }

        let run_width = digits as f64 * cell.width + (digits - 1) as f64 * digit_spacing;
        let text = format.suffix(unit);
        let suffix = (!text.is_empty()).then(|| {
            let bounds = glyphs.suffix(unit);
            SuffixMetrics {
                text: text.to_string(),
                text_width: bounds.width,
                frame: fit_box(bounds.width, suffix_height, &style.suffix),
            }
        });
        let width = run_width
            + suffix
                .as_ref()
                .map_or(0.0, |suffix| suffix.frame.width + 2.0 * suffix_spacing);

        blocks.push(BlockMetrics {
            unit,
            digits,
            run_width,
            suffix,
            width,
        });
    }

    let content_width: f64 = blocks.iter().map(|block| block.width).sum();
    let content_height = if blocks.is_empty() {
        0.0
    } else {
        blocks
            .iter()
            .filter_map(|block| block.suffix.as_ref())
            .map(|suffix| suffix.frame.height)
            .fold(cell.height, f64::max)
    };

    tracing::trace!(
        template = format.template(),
        day_digits,
        content_width,
        content_height,
        "layout measured"
    );

    LayoutMetrics {
        content_width,
        content_height,
        digit_width: glyphs.digit.width,
        cell,
        digit_spacing,
        suffix_spacing,
        time_center_offset: glyphs.time_font.center_offset(style.include_font_padding),
        suffix_center_offset: glyphs.suffix_font.center_offset(style.include_font_padding),
        blocks,
    }
}

fn baseline(frame: &BoxMetrics, top: f64, center_offset: f64) -> f64 {
    top + frame.padding.top + frame.inner_height() / 2.0 - center_offset
}

/// Places every digit and suffix of `remaining` using `metrics`.
///
/// Each digit becomes its own [`SegmentKind::Time`] segment so it can be
/// drawn on its own background box.
pub fn position_segments(metrics: &LayoutMetrics, remaining: &Remaining) -> Vec<Segment> {
    let height = metrics.content_height;
    let cell = metrics.cell;
    let cell_top = (height - cell.height) / 2.0;
    let digit_baseline = baseline(&cell, cell_top, metrics.time_center_offset);

    let mut segments = Vec::new();
    let mut left = 0.0;
    for block in &metrics.blocks {
        for (i, digit) in remaining.text(block.unit).chars().enumerate() {
            if i > 0 {
                left += metrics.digit_spacing;
            }
            segments.push(Segment {
                kind: SegmentKind::Time,
                unit: block.unit,
                text: digit.to_string(),
                rect: Rect {
                    left,
                    top: cell_top,
                    width: cell.width,
                    height: cell.height,
                },
                text_x: left + cell.padding.left,
                baseline: digit_baseline,
            });
            left += cell.width;
        }

        if let Some(suffix) = &block.suffix {
            left += metrics.suffix_spacing;
            let frame = suffix.frame;
            let top = (height - frame.height) / 2.0;
            segments.push(Segment {
                kind: SegmentKind::Suffix,
                unit: block.unit,
                text: suffix.text.clone(),
                rect: Rect {
                    left,
                    top,
                    width: frame.width,
                    height: frame.height,
                },
                text_x: left + frame.padding.left,
                baseline: baseline(&frame, top, metrics.suffix_center_offset),
            });
            left += frame.width + metrics.suffix_spacing;
        }
    }

    segments
}

/// How the host constrains one axis of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Constraint {
    /// The host imposes this exact size.
    Exact(f64),
    /// The host allows up to this size.
    AtMost(f64),
    /// No constraint; the widget reports its desired size.
    #[default]
    Unspecified,
}

/// Resolves the size of one axis from the content size, the host constraint
/// and the widget's own outer padding on that axis.
///
/// An exact constraint never shrinks the content: the larger of the two wins.
///
/// ```rust
/// use bubbletea_countdown::layout::{measure_size, Constraint};
///
/// assert_eq!(measure_size(8.0, Constraint::Unspecified, 1.0, 1.0), 10.0);
/// assert_eq!(measure_size(8.0, Constraint::Exact(20.0), 1.0, 1.0), 20.0);
/// assert_eq!(measure_size(8.0, Constraint::Exact(4.0), 1.0, 1.0), 8.0);
/// assert_eq!(measure_size(8.0, Constraint::AtMost(9.0), 1.0, 1.0), 9.0);
/// ```
pub fn measure_size(content: f64, constraint: Constraint, start: f64, end: f64) -> f64 {
    match constraint {
        Constraint::Exact(size) => content.max(size),
        Constraint::AtMost(size) => (content + start + end).min(size),
        Constraint::Unspecified => content + start + end,
    }
}
