//! Time template parsing.
//!
//! A template such as `"dd天hh:mm:ss"` names the units to display with the
//! two-letter tokens `dd`, `hh`, `mm` and `ss`. Any other text is a literal
//! suffix attached to the unit token before it:
//!
//! ```rust
//! use bubbletea_countdown::format::{parse, Unit};
//!
//! let format = parse("dd天hh小时mm分钟ss秒").unwrap();
//! assert!(format.show_days());
//! assert_eq!(format.suffix(Unit::Day), "天");
//! assert_eq!(format.suffix(Unit::Hour), "小时");
//! assert_eq!(format.suffix_count(), 4);
//!
//! let clock = parse("hh:mm:ss").unwrap();
//! assert!(!clock.show_days());
//! assert_eq!(clock.suffix(Unit::Second), "");
//! ```
//!
//! Tokens must appear at most once and in day → hour → minute → second
//! order. Text in front of the first token is ignored.

use crate::error::{CountdownError, Result};
use std::fmt;

/// Template used whenever a supplied one cannot be parsed.
pub const DEFAULT_TEMPLATE: &str = "hh:mm:ss";

/// A time unit that can appear in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Unit {
    /// `dd`, unbounded day count.
    Day,
    /// `hh`, hours modulo 24.
    Hour,
    /// `mm`, minutes modulo 60.
    Minute,
    /// `ss`, seconds modulo 60.
    Second,
}

impl Unit {
    /// All units in display order.
    pub const ALL: [Unit; 4] = [Unit::Day, Unit::Hour, Unit::Minute, Unit::Second];

    /// The template token for this unit.
    pub fn token(self) -> &'static str {
        match self {
            Unit::Day => "dd",
            Unit::Hour => "hh",
            Unit::Minute => "mm",
            Unit::Second => "ss",
        }
    }

    /// Zero-padding width used when the unit is rendered.
    ///
    /// Days are never padded because their count is unbounded.
    pub fn min_digits(self) -> usize {
        match self {
            Unit::Day => 0,
            _ => 2,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The parsed form of a time template.
///
/// Build one with [`parse`] or [`TimeFormat::parse_or_default`]. The default
/// value is the parsed form of [`DEFAULT_TEMPLATE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormat {
    template: String,
    shown: [bool; 4],
    suffixes: [String; 4],
}

impl Default for TimeFormat {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            shown: [false, true, true, true],
            suffixes: [
                String::new(),
                ":".to_string(),
                ":".to_string(),
                String::new(),
            ],
        }
    }
}

impl TimeFormat {
    /// Parses `template`, falling back to the default format when it is
    /// malformed.
    ///
    /// ```rust
    /// use bubbletea_countdown::format::{TimeFormat, DEFAULT_TEMPLATE};
    ///
    /// let format = TimeFormat::parse_or_default("");
    /// assert_eq!(format.template(), DEFAULT_TEMPLATE);
    /// ```
    pub fn parse_or_default(template: &str) -> Self {
        match parse(template) {
            Ok(format) => format,
            Err(err) => {
                tracing::warn!(%err, fallback = DEFAULT_TEMPLATE, "falling back to default time format");
                Self::default()
            }
        }
    }

    /// The template this format was parsed from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Whether `unit` appears in the template.
    pub fn shows(&self, unit: Unit) -> bool {
        self.shown[unit.index()]
    }

    /// Whether the `dd` token is present.
    pub fn show_days(&self) -> bool {
        self.shows(Unit::Day)
    }

    /// Whether the `hh` token is present.
    pub fn show_hours(&self) -> bool {
        self.shows(Unit::Hour)
    }

    /// Whether the `mm` token is present.
    pub fn show_minutes(&self) -> bool {
        self.shows(Unit::Minute)
    }

    /// Whether the `ss` token is present.
    pub fn show_seconds(&self) -> bool {
        self.shows(Unit::Second)
    }

    /// Literal text following the unit's token; empty when there is none or
    /// the unit is hidden.
    pub fn suffix(&self, unit: Unit) -> &str {
        &self.suffixes[unit.index()]
    }

    /// Shown units in display order.
    pub fn units(&self) -> impl Iterator<Item = Unit> + '_ {
        Unit::ALL.into_iter().filter(move |unit| self.shows(*unit))
    }

    /// Number of shown numeric units.
    pub fn unit_count(&self) -> usize {
        self.units().count()
    }

    /// Number of shown units with a non-empty suffix.
    pub fn suffix_count(&self) -> usize {
        self.units().filter(|unit| !self.suffix(*unit).is_empty()).count()
    }

    /// True when no unit token was found; such a format renders nothing.
    pub fn is_empty(&self) -> bool {
        self.unit_count() == 0
    }
}

/// Parses a time template.
///
/// # Errors
///
/// Returns [`CountdownError::InvalidFormat`] when the template is empty or
/// blank, repeats a token, or lists tokens out of day → hour → minute →
/// second order.
pub fn parse(template: &str) -> Result<TimeFormat> {
    if template.trim().is_empty() {
        return Err(CountdownError::invalid_format(template, "template is empty"));
    }

    let mut present: Vec<(Unit, usize)> = Vec::with_capacity(Unit::ALL.len());
    for unit in Unit::ALL {
        let token = unit.token();
        let Some(start) = template.find(token) else {
            continue;
        };
        if template[start + token.len()..].contains(token) {
            return Err(CountdownError::invalid_format(
                template,
                format!("token `{token}` appears more than once"),
            ));
        }
        present.push((unit, start));
    }

    for pair in present.windows(2) {
        let (before, before_at) = pair[0];
        let (after, after_at) = pair[1];
        if after_at < before_at + before.token().len() {
            return Err(CountdownError::invalid_format(
                template,
                format!("token `{after}` must come after `{before}`"),
            ));
        }
    }

    let mut format = TimeFormat {
        template: template.to_string(),
        shown: [false; 4],
        suffixes: Default::default(),
    };
    for (i, &(unit, start)) in present.iter().enumerate() {
        let from = start + unit.token().len();
        let to = present.get(i + 1).map_or(template.len(), |&(_, next)| next);
        format.shown[unit.index()] = true;
        format.suffixes[unit.index()] = template[from..to].to_string();
    }

    Ok(format)
}
