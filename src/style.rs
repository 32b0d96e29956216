//! Visual attributes for digit cells and suffix labels.
//!
//! A [`CountdownStyle`] holds one [`SegmentStyle`] for the time digits and one
//! for the suffix labels. Sizes and spacing are expressed in the units of the
//! active [`TextMeasure`](crate::measure::TextMeasure) implementation: terminal
//! cells for [`CellMeasure`](crate::measure::CellMeasure), pixels for a
//! graphical host.
//!
//! ```rust
//! use bubbletea_countdown::style::{Background, CountdownStyle, Padding, SegmentStyle};
//!
//! let style = CountdownStyle {
//!     time: SegmentStyle::default()
//!         .with_color("#ffffff")
//!         .with_bold(true)
//!         .with_spacing(1.0)
//!         .with_background(Background::Color("#5A56E0".to_string()))
//!         .with_padding(Padding::horizontal(1.0)),
//!     ..CountdownStyle::default()
//! };
//! assert_eq!(style.time.padding.resolve().left, 1.0);
//! ```

use once_cell::sync::Lazy;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

static DEFAULT_STYLE: Lazy<CountdownStyle> = Lazy::new(|| CountdownStyle {
    time: SegmentStyle {
        text: TextStyle {
            size: 13.0,
            ..TextStyle::default()
        },
        ..SegmentStyle::default()
    },
    suffix: SegmentStyle {
        text: TextStyle {
            size: 16.0,
            ..TextStyle::default()
        },
        ..SegmentStyle::default()
    },
    include_font_padding: false,
});

/// Text attributes passed to the measurer and the drawing surface.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize), serde(default))]
pub struct TextStyle {
    /// Font size; ignored by terminal cell measurement.
    pub size: f64,
    /// Foreground color (hex code or named color). `None` keeps the host's default.
    pub color: Option<String>,
    /// Bold text.
    pub bold: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 13.0,
            color: None,
            bold: false,
        }
    }
}

/// What to draw behind a digit cell or suffix label.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum Background {
    /// A solid color fill.
    Color(String),
    /// A named resource registered with the drawing surface.
    Resource(String),
}

/// Padding with per-edge, per-axis and uniform values.
///
/// When an edge is resolved the most specific value wins: an explicit edge
/// value, then the axis value, then the uniform value, then zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize), serde(default))]
pub struct Padding {
    /// Applies to every edge.
    pub all: Option<f64>,
    /// Applies to left and right.
    pub x: Option<f64>,
    /// Applies to top and bottom.
    pub y: Option<f64>,
    /// Left edge.
    pub left: Option<f64>,
    /// Right edge.
    pub right: Option<f64>,
    /// Top edge.
    pub top: Option<f64>,
    /// Bottom edge.
    pub bottom: Option<f64>,
}

impl Padding {
    /// The same padding on every edge.
    pub fn uniform(value: f64) -> Self {
        Self {
            all: Some(value),
            ..Self::default()
        }
    }

    /// Left and right padding.
    pub fn horizontal(value: f64) -> Self {
        Self {
            x: Some(value),
            ..Self::default()
        }
    }

    /// Top and bottom padding.
    pub fn vertical(value: f64) -> Self {
        Self {
            y: Some(value),
            ..Self::default()
        }
    }

    /// Resolves the fallbacks into concrete edge values.
    pub fn resolve(&self) -> Edges {
        let pick = |edge: Option<f64>, axis: Option<f64>| {
            edge.or(axis).or(self.all).unwrap_or(0.0).max(0.0)
        };
        Edges {
            left: pick(self.left, self.x),
            right: pick(self.right, self.x),
            top: pick(self.top, self.y),
            bottom: pick(self.bottom, self.y),
        }
    }
}

/// Concrete padding for each edge of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    /// Left padding.
    pub left: f64,
    /// Right padding.
    pub right: f64,
    /// Top padding.
    pub top: f64,
    /// Bottom padding.
    pub bottom: f64,
}

impl Edges {
    /// Left plus right.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Top plus bottom.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Attributes for one kind of segment.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize), serde(default))]
pub struct SegmentStyle {
    /// Text attributes.
    pub text: TextStyle,
    /// For digits: the gap between adjacent digit cells. For suffixes: the
    /// gap on each side of the label.
    pub spacing: f64,
    /// Optional background drawn behind each box.
    pub background: Option<Background>,
    /// Minimum box width. Wider than the natural width means the text is
    /// centered with symmetric horizontal padding.
    pub background_width: Option<f64>,
    /// Minimum box height, reconciled like the width.
    pub background_height: Option<f64>,
    /// Padding between the box edge and the text.
    pub padding: Padding,
}

impl SegmentStyle {
    /// Sets the foreground color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.text.color = Some(color.into());
        self
    }

    /// Sets the bold flag.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.text.bold = bold;
        self
    }

    /// Sets the font size.
    pub fn with_size(mut self, size: f64) -> Self {
        self.text.size = size;
        self
    }

    /// Sets the spacing.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the background.
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }

    /// Sets the minimum box size.
    pub fn with_background_size(mut self, width: Option<f64>, height: Option<f64>) -> Self {
        self.background_width = width;
        self.background_height = height;
        self
    }

    /// Sets the padding.
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }
}

/// Complete styling for a countdown widget.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize), serde(default))]
pub struct CountdownStyle {
    /// Digit cell attributes.
    pub time: SegmentStyle,
    /// Suffix label attributes.
    #[cfg_attr(feature = "config", serde(deserialize_with = "suffix_over_defaults"))]
    pub suffix: SegmentStyle,
    /// Center text on the font's top/bottom extents instead of ascent/descent.
    pub include_font_padding: bool,
}

impl Default for CountdownStyle {
    fn default() -> Self {
        DEFAULT_STYLE.clone()
    }
}

#[cfg(feature = "config")]
impl CountdownStyle {
    /// Loads a style from TOML. Missing keys keep their defaults.
    ///
    /// ```toml
    /// include_font_padding = false
    ///
    /// [time]
    /// spacing = 1.0
    /// background = { color = "#5A56E0" }
    ///
    /// [time.text]
    /// color = "#ffffff"
    /// bold = true
    ///
    /// [time.padding]
    /// x = 1.0
    ///
    /// [suffix]
    /// spacing = 1.0
    /// ```
    pub fn from_toml_str(source: &str) -> crate::error::Result<Self> {
        toml::from_str(source).map_err(|err| crate::error::CountdownError::Config(err.to_string()))
    }
}

// A partial `[suffix]` table starts from the default suffix, not from
// `SegmentStyle::default()`.
#[cfg(feature = "config")]
fn suffix_over_defaults<'de, D>(deserializer: D) -> Result<SegmentStyle, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let overlay = toml::Value::deserialize(deserializer)?;
    let mut merged = toml::Value::try_from(&DEFAULT_STYLE.suffix).map_err(D::Error::custom)?;
    merge_tables(&mut merged, overlay);
    merged.try_into().map_err(D::Error::custom)
}

#[cfg(feature = "config")]
fn merge_tables(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge_tables(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
