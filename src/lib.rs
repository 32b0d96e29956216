#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-countdown/")]

//! # bubbletea-countdown
//!
//! A countdown component for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications, with a layout engine that can also drive non-terminal hosts.
//!
//! ## Overview
//!
//! A countdown is described by a template such as `"hh:mm:ss"` or
//! `"dd天hh小时mm分钟ss秒"`. The tokens `dd`, `hh`, `mm` and `ss` select the
//! units to show; any other text becomes a suffix label after the preceding
//! unit. Every digit is drawn in its own box, which can carry a background,
//! padding and a minimum size, and suffix labels get their own style.
//!
//! The crate is layered so each piece can be used on its own:
//!
//! - [`format`] parses templates.
//! - [`remaining`] splits a duration into days, hours, minutes and seconds.
//! - [`measure`] and [`layout`] turn a format and measured glyphs into
//!   positioned segments.
//! - [`render`] draws segments on a [`Surface`](render::Surface), such as the
//!   terminal [`CellCanvas`](render::CellCanvas).
//! - [`ticker`] is the countdown state machine; [`scheduler`] drives it from
//!   timer callbacks, [`countdown`] from bubbletea tick messages.
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_countdown::prelude::*;
//!
//! let mut countdown = countdown_new(&[]);
//! let cmd = countdown.start(5_000, "hh:mm:ss");
//! assert!(cmd.is_some());
//! assert_eq!(countdown.plain_view(), "00:00:05");
//! ```
//!
//! ## Diagnostics
//!
//! The crate reports through [`tracing`](https://docs.rs/tracing): template
//! fallbacks and missing background resources at `warn`, lifecycle changes
//! at `debug`, layout recomputation at `trace`. No subscriber is installed.
//!
//! ## Feature Flags
//!
//! - `config`: `serde` support for styles and
//!   `CountdownStyle::from_toml_str` for loading them from TOML.

pub mod countdown;
pub mod error;
pub mod format;
pub mod layout;
pub mod measure;
pub mod remaining;
pub mod render;
pub mod scheduler;
pub mod style;
pub mod ticker;

pub use error::{CountdownError, Result};

/// Commonly used types and constructors.
///
/// ```rust
/// use bubbletea_countdown::prelude::*;
///
/// let format = parse_template("mm:ss").unwrap();
/// assert_eq!(format.unit_count(), 2);
/// ```
pub mod prelude {
    pub use crate::countdown::{
        new as countdown_new, with_padding, with_resource, with_start_policy, with_style,
        with_suffix_style, with_template, with_time_style, CountdownOption,
        FinishedMsg as CountdownFinishedMsg, Model as Countdown, TickMsg as CountdownTickMsg,
    };
    pub use crate::error::CountdownError;
    pub use crate::format::{parse as parse_template, TimeFormat, Unit, DEFAULT_TEMPLATE};
    pub use crate::layout::{Constraint, LayoutMetrics, Rect, Segment, SegmentKind};
    pub use crate::measure::{CellMeasure, FontMetrics, GlyphMetrics, TextBounds, TextMeasure};
    pub use crate::remaining::Remaining;
    pub use crate::render::{CellCanvas, Fill, Surface};
    pub use crate::scheduler::{
        CancelHandle, CountdownListener, ManualScheduler, ScheduledCountdown, Scheduler,
    };
    pub use crate::style::{Background, CountdownStyle, Padding, SegmentStyle, TextStyle};
    pub use crate::ticker::{StartPolicy, Ticker, TickerState};
}
