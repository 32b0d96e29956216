//! Text measurement.
//!
//! Layout never measures text itself. It asks a [`TextMeasure`]
//! implementation for glyph bounds and font metrics, so the same engine can
//! lay out terminal cells ([`CellMeasure`]) or pixels from a real font
//! rasterizer supplied by a graphical host.
//!
//! Vertical values follow the usual baseline convention: `top` and `ascent`
//! are negative (above the baseline), `bottom` and `descent` positive.

use crate::format::{TimeFormat, Unit};
use crate::style::{CountdownStyle, TextStyle};
use unicode_width::UnicodeWidthStr;

/// Tight bounds of a measured string, relative to its baseline origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextBounds {
    /// Advance width.
    pub width: f64,
    /// Height of the inked area.
    pub height: f64,
    /// Offset from the baseline to the top of the inked area.
    pub top: f64,
}

/// Vertical font metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontMetrics {
    /// Recommended distance above the baseline (negative).
    pub ascent: f64,
    /// Recommended distance below the baseline (positive).
    pub descent: f64,
    /// Maximum distance above the baseline including font padding (negative).
    pub top: f64,
    /// Maximum distance below the baseline including font padding (positive).
    pub bottom: f64,
}

impl FontMetrics {
    /// Offset that moves a baseline from a box's vertical center to where
    /// the text appears centered.
    pub fn center_offset(&self, include_font_padding: bool) -> f64 {
        if include_font_padding {
            (self.top + self.bottom) / 2.0
        } else {
            (self.ascent + self.descent) / 2.0
        }
    }
}

/// Measures text for a given style.
pub trait TextMeasure {
    /// Bounds of `text` drawn with `style`.
    fn text_bounds(&self, text: &str, style: &TextStyle) -> TextBounds;

    /// Font metrics for `style`.
    fn font_metrics(&self, style: &TextStyle) -> FontMetrics;

    /// Advance width of `text`.
    fn text_width(&self, text: &str, style: &TextStyle) -> f64 {
        self.text_bounds(text, style).width
    }
}

/// Terminal cell measurement.
///
/// Widths are display columns as reported by `unicode-width` (so `天` is two
/// cells wide), every line is one row tall and sits directly above its
/// baseline. Font size is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasure;

impl TextMeasure for CellMeasure {
    fn text_bounds(&self, text: &str, _style: &TextStyle) -> TextBounds {
        if text.is_empty() {
            return TextBounds::default();
        }
        TextBounds {
            width: UnicodeWidthStr::width(text) as f64,
            height: 1.0,
            top: -1.0,
        }
    }

    fn font_metrics(&self, _style: &TextStyle) -> FontMetrics {
        FontMetrics {
            ascent: -1.0,
            descent: 0.0,
            top: -1.0,
            bottom: 0.0,
        }
    }
}

/// Everything layout needs to know about the glyphs it positions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphMetrics {
    /// Bounds of a single digit; digits are assumed to share one advance.
    pub digit: TextBounds,
    /// Font metrics of the digit style.
    pub time_font: FontMetrics,
    /// Font metrics of the suffix style.
    pub suffix_font: FontMetrics,
    /// Bounds of each unit's suffix, indexed in [`Unit::ALL`] order. Empty
    /// suffixes have zero bounds.
    pub suffixes: [TextBounds; 4],
}

impl GlyphMetrics {
    /// Measures the digit glyph and every suffix of `format`.
    pub fn collect<M: TextMeasure + ?Sized>(
        measure: &M,
        format: &TimeFormat,
        style: &CountdownStyle,
    ) -> Self {
        let mut suffixes = [TextBounds::default(); 4];
        for unit in format.units() {
            let text = format.suffix(unit);
            if !text.is_empty() {
                suffixes[unit.index()] = measure.text_bounds(text, &style.suffix.text);
            }
        }

        Self {
            digit: measure.text_bounds("0", &style.time.text),
            time_font: measure.font_metrics(&style.time.text),
            suffix_font: measure.font_metrics(&style.suffix.text),
            suffixes,
        }
    }

    /// Bounds of the suffix attached to `unit`.
    pub fn suffix(&self, unit: Unit) -> TextBounds {
        self.suffixes[unit.index()]
    }

    /// Tallest suffix, zero when no suffix is shown.
    pub fn suffix_height(&self) -> f64 {
        self.suffixes
            .iter()
            .map(|bounds| bounds.height)
            .fold(0.0, f64::max)
    }
}
