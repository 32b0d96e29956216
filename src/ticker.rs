//! Countdown state machine.
//!
//! A [`Ticker`] owns the remaining time and moves between
//! [`TickerState::Idle`], [`TickerState::Running`] and
//! [`TickerState::Finished`]. It knows nothing about clocks: whoever drives
//! it calls [`Ticker::tick`] once per second, either from a bubbletea tick
//! command ([`crate::countdown`]) or from a [`Scheduler`](crate::scheduler::Scheduler)
//! callback ([`crate::scheduler`]).
//!
//! Every `start` and `stop` bumps a generation counter, the tag. Drivers
//! attach the tag to the ticks they schedule and drop ticks whose tag no
//! longer matches, which cancels a previous run without touching its timer.
//!
//! ```rust
//! use bubbletea_countdown::ticker::{StartOutcome, TickOutcome, Ticker, TickerState};
//!
//! let mut ticker = Ticker::default();
//! assert_eq!(ticker.start(2_000), StartOutcome::Running);
//! assert_eq!(ticker.tick(), Some(TickOutcome::Refresh));
//! assert_eq!(ticker.tick(), Some(TickOutcome::Finished));
//! assert_eq!(ticker.state(), TickerState::Finished);
//! assert_eq!(ticker.tick(), None);
//! ```

use crate::remaining::Remaining;

/// Lifecycle of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickerState {
    /// Not started, or stopped.
    #[default]
    Idle,
    /// Counting down.
    Running,
    /// Reached zero; stays here until the next start.
    Finished,
}

/// What `start` does with a non-positive duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum StartPolicy {
    /// Leave the ticker untouched.
    #[default]
    Ignore,
    /// Show zero and report a finished countdown right away.
    FinishImmediately,
}

/// Result of [`Ticker::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A new run began; the caller should schedule ticks.
    Running,
    /// The duration was non-positive and [`StartPolicy::FinishImmediately`]
    /// applied; the caller should report the finish.
    Finished,
    /// The duration was non-positive and [`StartPolicy::Ignore`] applied.
    Ignored,
}

/// Result of a tick that was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Time is still left; redraw and keep ticking.
    Refresh,
    /// The countdown hit zero; redraw once more and report the finish.
    Finished,
}

/// Countdown state machine driven by one-second ticks.
#[derive(Debug, Clone, Default)]
pub struct Ticker {
    state: TickerState,
    remaining: Remaining,
    tag: i64,
    policy: StartPolicy,
}

impl Ticker {
    /// An idle ticker using `policy` for non-positive starts.
    pub fn new(policy: StartPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Current state.
    pub fn state(&self) -> TickerState {
        self.state
    }

    /// Time left.
    pub fn remaining(&self) -> Remaining {
        self.remaining
    }

    /// Current generation; ticks from earlier generations must be dropped.
    pub fn tag(&self) -> i64 {
        self.tag
    }

    /// Policy applied to non-positive starts.
    pub fn policy(&self) -> StartPolicy {
        self.policy
    }

    /// Changes the policy for later starts.
    pub fn set_policy(&mut self, policy: StartPolicy) {
        self.policy = policy;
    }

    /// Whether the ticker is counting down.
    pub fn is_running(&self) -> bool {
        self.state == TickerState::Running
    }

    /// Begins a countdown of `millis` milliseconds, truncated to whole
    /// seconds. Any previous run is cancelled.
    pub fn start(&mut self, millis: i64) -> StartOutcome {
        let remaining = match Remaining::from_millis(millis) {
            Ok(remaining) => remaining,
            Err(err) => return self.reject(err, millis),
        };

        self.tag += 1;
        self.remaining = remaining;
        self.state = TickerState::Running;
        tracing::debug!(
            millis,
            tag = self.tag,
            total_secs = remaining.total_secs(),
            "countdown started"
        );
        StartOutcome::Running
    }

    /// Starts toward a known remaining time instead of a millisecond count.
    ///
    /// A zero `remaining` is treated like a non-positive duration.
    pub fn start_remaining(&mut self, remaining: Remaining) -> StartOutcome {
        let millis = i64::try_from(remaining.total_secs().saturating_mul(1000)).unwrap_or(i64::MAX);
        self.start(millis)
    }

    fn reject(&mut self, err: crate::error::CountdownError, millis: i64) -> StartOutcome {
        match self.policy {
            StartPolicy::Ignore => {
                tracing::debug!(%err, "start ignored");
                StartOutcome::Ignored
            }
            StartPolicy::FinishImmediately => {
                self.tag += 1;
                self.remaining = Remaining::ZERO;
                self.state = TickerState::Finished;
                tracing::debug!(millis, tag = self.tag, "countdown finished on start");
                StartOutcome::Finished
            }
        }
    }

    /// Advances the countdown by one second.
    ///
    /// Returns `None` unless the ticker is running.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if self.state != TickerState::Running {
            return None;
        }

        self.remaining.decrement();
        if !self.remaining.is_zero() {
            return Some(TickOutcome::Refresh);
        }

        self.remaining = Remaining::ZERO;
        self.state = TickerState::Finished;
        tracing::debug!(tag = self.tag, "countdown finished");
        Some(TickOutcome::Finished)
    }

    /// Returns to idle and invalidates outstanding ticks. Never reports a
    /// finish.
    pub fn stop(&mut self) {
        self.tag += 1;
        self.state = TickerState::Idle;
        tracing::debug!(tag = self.tag, "countdown stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let ticker = Ticker::default();
        assert_eq!(ticker.state(), TickerState::Idle);
        assert_eq!(ticker.remaining(), Remaining::ZERO);
        assert_eq!(ticker.tag(), 0);
        assert_eq!(ticker.policy(), StartPolicy::Ignore);
    }

    #[test]
    fn test_five_second_run() {
        let mut ticker = Ticker::default();
        assert_eq!(ticker.start(5_000), StartOutcome::Running);
        assert_eq!(ticker.remaining(), Remaining::from_secs(5));

        for left in (1..5).rev() {
            assert_eq!(ticker.tick(), Some(TickOutcome::Refresh));
            assert_eq!(ticker.remaining().total_secs(), left);
        }
        assert_eq!(ticker.tick(), Some(TickOutcome::Finished));
        assert_eq!(ticker.state(), TickerState::Finished);
        assert!(ticker.remaining().is_zero());
    }

    #[test]
    fn test_ticks_ignored_unless_running() {
        let mut ticker = Ticker::default();
        assert_eq!(ticker.tick(), None);

        ticker.start(1_000);
        assert_eq!(ticker.tick(), Some(TickOutcome::Finished));
        assert_eq!(ticker.tick(), None);
        assert_eq!(ticker.state(), TickerState::Finished);
    }

    #[test]
    fn test_non_positive_start_is_ignored_by_default() {
        let mut ticker = Ticker::default();
        assert_eq!(ticker.start(0), StartOutcome::Ignored);
        assert_eq!(ticker.start(-1), StartOutcome::Ignored);
        assert_eq!(ticker.state(), TickerState::Idle);
        assert_eq!(ticker.tag(), 0);
    }

    #[test]
    fn test_ignored_start_keeps_running_countdown() {
        let mut ticker = Ticker::default();
        ticker.start(10_000);
        let tag = ticker.tag();
        assert_eq!(ticker.start(0), StartOutcome::Ignored);
        assert!(ticker.is_running());
        assert_eq!(ticker.tag(), tag);
        assert_eq!(ticker.remaining().total_secs(), 10);
    }

    #[test]
    fn test_finish_immediately_policy() {
        let mut ticker = Ticker::new(StartPolicy::FinishImmediately);
        assert_eq!(ticker.start(0), StartOutcome::Finished);
        assert_eq!(ticker.state(), TickerState::Finished);
        assert!(ticker.remaining().is_zero());
        assert_eq!(ticker.tag(), 1);
    }

    #[test]
    fn test_sub_second_start_runs_with_zero_display() {
        // 999ms truncates to zero whole seconds; the first tick finishes.
        let mut ticker = Ticker::default();
        assert_eq!(ticker.start(999), StartOutcome::Running);
        assert!(ticker.remaining().is_zero());
        assert_eq!(ticker.tick(), Some(TickOutcome::Finished));
    }

    #[test]
    fn test_restart_bumps_tag() {
        let mut ticker = Ticker::default();
        ticker.start(3_000);
        let first = ticker.tag();
        ticker.start(60_000);
        assert!(ticker.tag() > first);
        assert_eq!(ticker.remaining(), Remaining::from_secs(60));
    }

    #[test]
    fn test_stop_returns_to_idle() {
        let mut ticker = Ticker::default();
        ticker.start(3_000);
        let tag = ticker.tag();
        ticker.stop();
        assert_eq!(ticker.state(), TickerState::Idle);
        assert!(ticker.tag() > tag);
        assert_eq!(ticker.tick(), None);
        assert_eq!(ticker.remaining().total_secs(), 3);
    }

    #[test]
    fn test_start_remaining() {
        let mut ticker = Ticker::default();
        assert_eq!(ticker.start_remaining(Remaining::from_secs(90)), StartOutcome::Running);
        assert_eq!(ticker.remaining().minutes, 1);
        assert_eq!(ticker.start_remaining(Remaining::ZERO), StartOutcome::Ignored);
    }
}
