//! Countdown component for Bubble Tea applications.
//!
//! The countdown shows the time left as a row of digit cells and suffix
//! labels laid out from a template such as `"hh:mm:ss"` or
//! `"dd天hh小时mm分钟ss秒"`. It ticks once per second through bubbletea tick
//! commands, sends a [`FinishedMsg`] when it reaches zero and can be stopped
//! or restarted at any time.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_countdown::countdown::{new, with_template};
//!
//! let mut countdown = new(&[with_template("mm:ss")]);
//! let cmd = countdown.start(90_000, "mm:ss");
//! assert!(cmd.is_some());
//! assert_eq!(countdown.plain_view(), "01:30");
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use bubbletea_countdown::countdown::{new, FinishedMsg, Model};
//!
//! struct MyApp {
//!     countdown: Model,
//!     done: bool,
//! }
//!
//! impl BubbleTeaModel for MyApp {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut countdown = new(&[]);
//!         let cmd = countdown.start(10_000, "hh:mm:ss");
//!         (Self { countdown, done: false }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(finished) = msg.downcast_ref::<FinishedMsg>() {
//!             if finished.id == self.countdown.id() {
//!                 self.done = true;
//!             }
//!         }
//!
//!         // Forward countdown messages
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("Launch in {}", self.countdown.view())
//!     }
//! }
//! ```
//!
//! # Styling
//!
//! ```rust
//! use bubbletea_countdown::countdown::{new, with_resource, with_time_style};
//! use bubbletea_countdown::render::Fill;
//! use bubbletea_countdown::style::{Background, Padding, SegmentStyle};
//!
//! let countdown = new(&[
//!     with_time_style(
//!         SegmentStyle::default()
//!             .with_color("#ffffff")
//!             .with_spacing(1.0)
//!             .with_background(Background::Resource("card".to_string()))
//!             .with_padding(Padding::horizontal(1.0)),
//!     ),
//!     with_resource("card", Fill::new(' ').with_color("#5A56E0")),
//! ]);
//! assert_eq!(countdown.plain_view(), " 0   0 : 0   0 : 0   0 ");
//! ```

use crate::format::{TimeFormat, DEFAULT_TEMPLATE};
use crate::layout::{
    self, measure_size, position_segments, visible_day_digits, Constraint, LayoutMetrics, Segment,
};
use crate::measure::{CellMeasure, GlyphMetrics};
use crate::remaining::Remaining;
use crate::render::{self, CellCanvas, Fill, Surface};
use crate::scheduler::TICK_INTERVAL;
use crate::style::{CountdownStyle, Edges, Padding, SegmentStyle};
use crate::ticker::{StartOutcome, StartPolicy, TickOutcome, Ticker, TickerState};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, SystemTime};

// Internal ID management for countdown instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Generates unique identifiers for countdown instances.
///
/// Each countdown gets its own id so that several of them can live in one
/// application without reacting to each other's ticks. Ids start at 1.
fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Message that advances a running countdown by one second.
///
/// Tick messages are produced by the commands returned from
/// [`Model::start`] and [`Model::update`]; applications only need to forward
/// them. A tick is ignored unless both its id and its tag match the
/// countdown, so ticks scheduled before a `stop` or a restart are dropped.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Identifier of the countdown this tick belongs to.
    pub id: i64,
    tag: i64,
}

/// Message sent once when a countdown reaches zero.
///
/// # Examples
///
/// ```rust
/// use bubbletea_countdown::countdown::FinishedMsg;
/// use bubbletea_rs::Msg;
///
/// fn on_message(msg: &Msg, countdown_id: i64) -> bool {
///     msg.downcast_ref::<FinishedMsg>()
///         .map_or(false, |finished| finished.id == countdown_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FinishedMsg {
    /// Identifier of the countdown that finished.
    pub id: i64,
}

/// Configuration option applied by [`new`].
#[derive(Debug, Clone)]
pub enum CountdownOption {
    /// Replace the whole style.
    WithStyle(CountdownStyle),
    /// Replace the digit style.
    WithTimeStyle(SegmentStyle),
    /// Replace the suffix style.
    WithSuffixStyle(SegmentStyle),
    /// Template shown before the first start.
    WithTemplate(String),
    /// What a non-positive start does.
    WithStartPolicy(StartPolicy),
    /// Register a named background.
    WithResource(String, Fill),
    /// Padding around the whole countdown.
    WithPadding(Padding),
}

impl CountdownOption {
    fn apply(&self, m: &mut Model) {
        match self {
            CountdownOption::WithStyle(style) => m.style = style.clone(),
            CountdownOption::WithTimeStyle(style) => m.style.time = style.clone(),
            CountdownOption::WithSuffixStyle(style) => m.style.suffix = style.clone(),
            CountdownOption::WithTemplate(template) => {
                m.format = TimeFormat::parse_or_default(template);
            }
            CountdownOption::WithStartPolicy(policy) => m.ticker.set_policy(*policy),
            CountdownOption::WithResource(name, fill) => {
                m.resources.insert(name.clone(), fill.clone());
            }
            CountdownOption::WithPadding(padding) => m.padding = *padding,
        }
    }
}

/// Uses `style` for digits and suffixes.
pub fn with_style(style: CountdownStyle) -> CountdownOption {
    CountdownOption::WithStyle(style)
}

/// Uses `style` for the digit cells.
pub fn with_time_style(style: SegmentStyle) -> CountdownOption {
    CountdownOption::WithTimeStyle(style)
}

/// Uses `style` for the suffix labels.
pub fn with_suffix_style(style: SegmentStyle) -> CountdownOption {
    CountdownOption::WithSuffixStyle(style)
}

/// Shows `template` until the first [`Model::start`]. Malformed templates
/// fall back to [`DEFAULT_TEMPLATE`].
pub fn with_template(template: impl Into<String>) -> CountdownOption {
    CountdownOption::WithTemplate(template.into())
}

/// Sets how non-positive durations passed to [`Model::start`] are handled.
pub fn with_start_policy(policy: StartPolicy) -> CountdownOption {
    CountdownOption::WithStartPolicy(policy)
}

/// Registers a named background for
/// [`Background::Resource`](crate::style::Background::Resource).
pub fn with_resource(name: impl Into<String>, fill: Fill) -> CountdownOption {
    CountdownOption::WithResource(name.into(), fill)
}

/// Pads the whole countdown.
pub fn with_padding(padding: Padding) -> CountdownOption {
    CountdownOption::WithPadding(padding)
}

/// The countdown component.
///
/// Layout metrics are cached. They are recomputed when the template or the
/// style changes, or when the number of visible day digits changes while
/// the countdown runs.
#[derive(Debug, Clone)]
pub struct Model {
    id: i64,
    ticker: Ticker,
    format: TimeFormat,
    style: CountdownStyle,
    padding: Padding,
    resources: HashMap<String, Fill>,
    glyphs: GlyphMetrics,
    day_digits: usize,
    metrics: LayoutMetrics,
}

/// Creates a countdown configured by `opts`.
///
/// # Examples
///
/// ```rust
/// use bubbletea_countdown::countdown::{new, with_start_policy, with_template};
/// use bubbletea_countdown::ticker::{StartPolicy, TickerState};
///
/// let countdown = new(&[
///     with_template("mm:ss"),
///     with_start_policy(StartPolicy::FinishImmediately),
/// ]);
/// assert_eq!(countdown.state(), TickerState::Idle);
/// assert_eq!(countdown.plain_view(), "00:00");
/// ```
pub fn new(opts: &[CountdownOption]) -> Model {
    let mut m = Model {
        id: next_id(),
        ticker: Ticker::default(),
        format: TimeFormat::default(),
        style: CountdownStyle::default(),
        padding: Padding::default(),
        resources: HashMap::new(),
        glyphs: GlyphMetrics::default(),
        day_digits: 0,
        metrics: LayoutMetrics::default(),
    };

    for opt in opts {
        opt.apply(&mut m);
    }

    m.relayout();
    m
}

impl Model {
    /// Unique identifier of this countdown.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TickerState {
        self.ticker.state()
    }

    /// Whether the countdown is ticking.
    pub fn running(&self) -> bool {
        self.ticker.is_running()
    }

    /// Whether the countdown reached zero.
    pub fn finished(&self) -> bool {
        self.ticker.state() == TickerState::Finished
    }

    /// Time left.
    pub fn remaining(&self) -> Remaining {
        self.ticker.remaining()
    }

    /// The active time format.
    pub fn format(&self) -> &TimeFormat {
        &self.format
    }

    /// The active style.
    pub fn style(&self) -> &CountdownStyle {
        &self.style
    }

    /// Replaces the style.
    pub fn set_style(&mut self, style: CountdownStyle) {
        self.style = style;
        self.relayout();
    }

    /// Replaces the template. Malformed templates fall back to
    /// [`DEFAULT_TEMPLATE`].
    pub fn set_template(&mut self, template: &str) {
        if template == self.format.template() {
            return;
        }
        self.format = TimeFormat::parse_or_default(template);
        self.relayout();
    }

    /// Registers a named background.
    pub fn register_resource(&mut self, name: impl Into<String>, fill: Fill) {
        self.resources.insert(name.into(), fill);
    }

    /// Cached layout metrics for the current state.
    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    /// Starts counting down `millis` milliseconds using `template`.
    ///
    /// Any previous run is cancelled: its outstanding ticks are ignored from
    /// now on. The returned command delivers the first tick one second from
    /// now. A non-positive `millis` follows the configured [`StartPolicy`]:
    /// it is ignored (no command) or finishes immediately (the command
    /// delivers a [`FinishedMsg`]).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::new;
    ///
    /// let mut countdown = new(&[]);
    /// assert!(countdown.start(5_000, "hh:mm:ss").is_some());
    /// assert_eq!(countdown.plain_view(), "00:00:05");
    ///
    /// assert!(countdown.start(-1, "hh:mm:ss").is_none());
    /// assert!(countdown.running());
    /// ```
    pub fn start(&mut self, millis: i64, template: &str) -> Option<Cmd> {
        let outcome = self.ticker.start(millis);
        self.apply_start(outcome, template)
    }

    /// Starts counting down toward `deadline` as seen from `now`.
    ///
    /// A deadline that has already passed is treated like a non-positive
    /// duration.
    pub fn start_until(&mut self, deadline: SystemTime, now: SystemTime, template: &str) -> Option<Cmd> {
        let outcome = self.ticker.start_remaining(Remaining::until(deadline, now));
        self.apply_start(outcome, template)
    }

    // An ignored start leaves the current run and its format untouched.
    fn apply_start(&mut self, outcome: StartOutcome, template: &str) -> Option<Cmd> {
        if outcome == StartOutcome::Ignored {
            return None;
        }
        self.set_template(template);
        match outcome {
            StartOutcome::Ignored => None,
            StartOutcome::Running => {
                self.sync_day_digits();
                Some(self.tick())
            }
            StartOutcome::Finished => {
                self.sync_day_digits();
                Some(self.finished_cmd())
            }
        }
    }

    /// Stops the countdown immediately without finishing it.
    ///
    /// Ticks already in flight are ignored when they arrive, so no
    /// [`FinishedMsg`] follows a stop.
    pub fn stop(&mut self) {
        self.ticker.stop();
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.ticker.tag();

        bubbletea_tick(TICK_INTERVAL, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    fn finished_cmd(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(FinishedMsg { id }) as Msg
        })
    }

    /// Processes a message.
    ///
    /// Only [`TickMsg`]s addressed to this countdown with the current tag
    /// have an effect. While time is left the returned command schedules the
    /// next tick; the tick that reaches zero returns a command delivering
    /// [`FinishedMsg`] instead.
    pub fn update(&mut self, msg: Msg) -> std::option::Option<Cmd> {
        let tick_msg = msg.downcast_ref::<TickMsg>()?;
        if tick_msg.id != self.id || tick_msg.tag != self.ticker.tag() {
            return std::option::Option::None;
        }

        let outcome = self.ticker.tick()?;
        self.sync_day_digits();
        match outcome {
            TickOutcome::Refresh => std::option::Option::Some(self.tick()),
            TickOutcome::Finished => std::option::Option::Some(self.finished_cmd()),
        }
    }

    fn relayout(&mut self) {
        self.glyphs = GlyphMetrics::collect(&CellMeasure, &self.format, &self.style);
        self.day_digits = visible_day_digits(&self.format, &self.ticker.remaining());
        self.metrics = layout::measure(&self.format, self.day_digits, &self.glyphs, &self.style);
    }

    fn sync_day_digits(&mut self) {
        let day_digits = visible_day_digits(&self.format, &self.ticker.remaining());
        if day_digits != self.day_digits {
            self.day_digits = day_digits;
            self.metrics = layout::measure(&self.format, day_digits, &self.glyphs, &self.style);
        }
    }

    fn outer_padding(&self) -> Edges {
        self.padding.resolve()
    }

    /// Positioned segments for the current remaining time, offset by the
    /// countdown's padding.
    pub fn segments(&self) -> Vec<Segment> {
        let padding = self.outer_padding();
        let mut segments = position_segments(&self.metrics, &self.ticker.remaining());
        for segment in &mut segments {
            segment.rect.left += padding.left;
            segment.rect.top += padding.top;
            segment.text_x += padding.left;
            segment.baseline += padding.top;
        }
        segments
    }

    /// Size of the countdown in terminal cells under the given constraints.
    ///
    /// A template without unit tokens measures `(0, 0)`, padding included,
    /// matching its empty [`view`](Self::view).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::new;
    /// use bubbletea_countdown::layout::Constraint;
    ///
    /// let countdown = new(&[]);
    /// assert_eq!(countdown.measure(Constraint::Unspecified, Constraint::Unspecified), (8, 1));
    /// assert_eq!(countdown.measure(Constraint::Exact(20.0), Constraint::AtMost(1.0)), (20, 1));
    /// ```
    pub fn measure(&self, width: Constraint, height: Constraint) -> (usize, usize) {
        if self.metrics.is_empty() {
            return (0, 0);
        }
        let padding = self.outer_padding();
        let width = measure_size(self.metrics.content_width, width, padding.left, padding.right);
        let height = measure_size(self.metrics.content_height, height, padding.top, padding.bottom);
        (width.ceil() as usize, height.ceil() as usize)
    }

    /// Draws the countdown on `surface`.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        render::render(&self.segments(), &self.style, surface);
    }

    fn canvas(&self) -> CellCanvas {
        let (width, height) = self.measure(Constraint::Unspecified, Constraint::Unspecified);
        let mut canvas = CellCanvas::new(width, height);
        canvas.register_all(&self.resources);
        self.render(&mut canvas);
        canvas
    }

    /// Renders the countdown as a styled string.
    ///
    /// A template without unit tokens renders as an empty string.
    pub fn view(&self) -> String {
        if self.metrics.is_empty() {
            return String::new();
        }
        self.canvas().to_styled_string()
    }

    /// Renders the countdown without styling, one line per row.
    pub fn plain_view(&self) -> String {
        if self.metrics.is_empty() {
            return String::new();
        }
        self.canvas().plain_lines().join("\n")
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, std::option::Option<Cmd>) {
        (Self::default(), std::option::Option::None)
    }

    fn update(&mut self, msg: Msg) -> std::option::Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[with_template(DEFAULT_TEMPLATE)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SegmentKind;
    use crate::style::Background;
    use lipgloss_extras::lipgloss::strip_ansi;
    use tracing_test::traced_test;

    fn tick_msg(model: &Model) -> Msg {
        Box::new(TickMsg {
            id: model.id(),
            tag: model.ticker.tag(),
        }) as Msg
    }

    #[test]
    fn test_new_defaults() {
        let countdown = new(&[]);
        assert!(countdown.id() > 0);
        assert_eq!(countdown.state(), TickerState::Idle);
        assert_eq!(countdown.format().template(), DEFAULT_TEMPLATE);
        assert_eq!(countdown.remaining(), Remaining::ZERO);
        assert_eq!(countdown.plain_view(), "00:00:00");
    }

    #[test]
    fn test_unique_ids() {
        let a = new(&[]);
        let b = new(&[]);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_options_apply() {
        let countdown = new(&[
            with_template("mm:ss"),
            with_time_style(SegmentStyle::default().with_spacing(1.0)),
            with_suffix_style(SegmentStyle::default().with_bold(true)),
            with_start_policy(StartPolicy::FinishImmediately),
            with_resource("card", Fill::new('#')),
            with_padding(Padding::horizontal(2.0)),
        ]);
        assert_eq!(countdown.format().template(), "mm:ss");
        assert_eq!(countdown.style().time.spacing, 1.0);
        assert!(countdown.style().suffix.text.bold);
        assert_eq!(countdown.ticker.policy(), StartPolicy::FinishImmediately);
        assert!(countdown.resources.contains_key("card"));
        assert_eq!(countdown.plain_view(), "  0 0:0 0  ");
    }

    #[test]
    fn test_five_second_countdown() {
        let mut countdown = new(&[]);
        assert!(countdown.start(5_000, "hh:mm:ss").is_some());
        assert_eq!(countdown.state(), TickerState::Running);
        assert_eq!(countdown.plain_view(), "00:00:05");
        assert_eq!(strip_ansi(&countdown.view()), "00:00:05");

        for _ in 0..4 {
            assert!(countdown.update(tick_msg(&countdown)).is_some());
            assert!(countdown.running());
        }
        assert_eq!(countdown.plain_view(), "00:00:01");

        assert!(countdown.update(tick_msg(&countdown)).is_some());
        assert!(countdown.finished());
        assert_eq!(countdown.plain_view(), "00:00:00");

        // Finished is reported once; later ticks do nothing.
        assert!(countdown.update(tick_msg(&countdown)).is_none());
        assert!(countdown.finished());
    }

    #[test]
    fn test_non_positive_start_does_not_run() {
        let mut countdown = new(&[]);
        assert!(countdown.start(0, "hh:mm:ss").is_none());
        assert!(countdown.start(-1, "hh:mm:ss").is_none());
        assert_eq!(countdown.state(), TickerState::Idle);
    }

    #[test]
    fn test_finish_immediately_policy() {
        let mut countdown = new(&[with_start_policy(StartPolicy::FinishImmediately)]);
        assert!(countdown.start(0, "mm:ss").is_some());
        assert!(countdown.finished());
        assert_eq!(countdown.plain_view(), "00:00");
    }

    #[test]
    fn test_stale_tick_is_ignored() {
        let mut countdown = new(&[]);
        countdown.start(10_000, "hh:mm:ss");
        let stale = tick_msg(&countdown);

        countdown.start(20_000, "hh:mm:ss");
        assert!(countdown.update(stale).is_none());
        assert_eq!(countdown.remaining().total_secs(), 20);
    }

    #[test]
    fn test_stop_cancels_pending_ticks() {
        let mut countdown = new(&[]);
        countdown.start(3_000, "hh:mm:ss");
        let pending = tick_msg(&countdown);
        countdown.stop();

        assert_eq!(countdown.state(), TickerState::Idle);
        assert!(countdown.update(pending).is_none());
        assert_eq!(countdown.remaining().total_secs(), 3);
        assert!(!countdown.finished());
    }

    #[test]
    fn test_other_messages_ignored() {
        let mut countdown = new(&[]);
        countdown.start(3_000, "hh:mm:ss");

        let foreign = Box::new(TickMsg {
            id: countdown.id() + 1000,
            tag: countdown.ticker.tag(),
        }) as Msg;
        assert!(countdown.update(foreign).is_none());
        assert!(countdown.update(Box::new("noise") as Msg).is_none());
        assert_eq!(countdown.remaining().total_secs(), 3);
    }

    #[test]
    fn test_large_day_count() {
        let mut countdown = new(&[]);
        countdown.start(90_000_000_000, "dd天hh小时mm分钟ss秒");
        assert_eq!(countdown.plain_view(), "1041天16小时00分钟00秒");

        let segments = countdown.segments();
        let day: String = segments
            .iter()
            .take(4)
            .map(|segment| segment.text.as_str())
            .collect();
        assert_eq!(day, "1041");
        assert_eq!(segments[4].kind, SegmentKind::Suffix);
        assert_eq!(segments[4].text, "天");
    }

    #[test]
    fn test_day_block_shrinks_while_running() {
        let mut countdown = new(&[]);
        countdown.start(10 * 86_400 * 1000, "dd:hh:mm:ss");
        assert_eq!(countdown.plain_view(), "10:00:00:00");
        let wide = countdown.metrics().content_width;

        countdown.update(tick_msg(&countdown));
        assert_eq!(countdown.plain_view(), "9:23:59:59");
        assert_eq!(countdown.metrics().content_width, wide - 1.0);
    }

    #[test]
    fn test_day_block_hidden_under_one_day() {
        let mut countdown = new(&[]);
        countdown.start(3_600_000, "dd:hh:mm:ss");
        assert_eq!(countdown.plain_view(), "01:00:00");
    }

    #[test]
    #[traced_test]
    fn test_invalid_template_falls_back() {
        let mut countdown = new(&[]);
        countdown.start(5_000, "mm:mm");
        assert_eq!(countdown.format().template(), DEFAULT_TEMPLATE);
        assert_eq!(countdown.plain_view(), "00:00:05");
        assert!(logs_contain("falling back to default time format"));
    }

    #[test]
    fn test_template_without_tokens_renders_nothing() {
        let mut countdown = new(&[]);
        countdown.start(5_000, "soon");
        assert_eq!(countdown.view(), "");
        assert_eq!(countdown.measure(Constraint::Unspecified, Constraint::Unspecified), (0, 0));
    }

    #[test]
    fn test_padded_template_without_tokens_measures_zero() {
        let mut countdown = new(&[with_padding(Padding {
            all: Some(1.0),
            ..Padding::default()
        })]);
        countdown.start(5_000, "soon");
        assert_eq!(countdown.plain_view(), "");
        assert_eq!(countdown.view(), "");
        assert_eq!(countdown.measure(Constraint::Unspecified, Constraint::Unspecified), (0, 0));
        assert_eq!(countdown.measure(Constraint::AtMost(9.0), Constraint::AtMost(5.0)), (0, 0));
    }

    #[test]
    fn test_ignored_start_keeps_running_format() {
        let mut countdown = new(&[]);
        assert!(countdown.start(65_000, "hh:mm:ss").is_some());
        let tag = countdown.ticker.tag();

        assert!(countdown.start(-1, "ss秒").is_none());
        assert!(countdown.running());
        assert_eq!(countdown.ticker.tag(), tag);
        assert_eq!(countdown.format().template(), "hh:mm:ss");
        assert_eq!(countdown.plain_view(), "00:01:05");

        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        assert!(countdown.start_until(now, now, "mm分").is_none());
        assert_eq!(countdown.format().template(), "hh:mm:ss");
        assert_eq!(countdown.plain_view(), "00:01:05");
    }

    #[test]
    fn test_start_until_deadline() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        let mut countdown = new(&[]);
        assert!(countdown
            .start_until(now + Duration::from_secs(75), now, "mm:ss")
            .is_some());
        assert_eq!(countdown.plain_view(), "01:15");

        assert!(countdown.start_until(now, now, "mm:ss").is_none());
        assert_eq!(countdown.plain_view(), "01:15");
    }

    #[test]
    fn test_measure_with_padding() {
        let countdown = new(&[with_padding(Padding {
            all: Some(1.0),
            ..Padding::default()
        })]);
        assert_eq!(countdown.measure(Constraint::Unspecified, Constraint::Unspecified), (10, 3));
        assert_eq!(countdown.measure(Constraint::AtMost(9.0), Constraint::Exact(5.0)), (9, 5));
        assert_eq!(countdown.plain_view(), "          \n 00:00:00 \n          ");
    }

    #[test]
    fn test_resource_background_in_view() {
        let mut style = CountdownStyle::default();
        style.time.background = Some(Background::Resource("card".to_string()));
        style.time.padding = Padding::horizontal(1.0);
        let mut countdown = new(&[with_style(style), with_resource("card", Fill::new('|'))]);
        countdown.start(7_000, "ss");
        assert_eq!(countdown.plain_view(), "|0||7|");
    }

    #[test]
    fn test_set_style_relayouts() {
        let mut countdown = new(&[]);
        assert_eq!(countdown.metrics().content_width, 8.0);
        countdown.set_style(CountdownStyle {
            time: SegmentStyle::default().with_spacing(1.0),
            ..CountdownStyle::default()
        });
        assert_eq!(countdown.metrics().content_width, 11.0);
    }

    #[test]
    fn test_bubbletea_model_init() {
        let (countdown, cmd) = <Model as BubbleTeaModel>::init();
        assert!(cmd.is_none());
        assert_eq!(countdown.state(), TickerState::Idle);
        assert_eq!(BubbleTeaModel::view(&countdown), countdown.view());
    }
}
