//! Callback-driven countdowns for hosts without a bubbletea event loop.
//!
//! A [`Scheduler`] runs a callback repeatedly at a fixed interval until the
//! callback declines or its [`CancelHandle`] is cancelled.
//! [`ScheduledCountdown`] binds a [`Ticker`] to a scheduler and reports
//! progress to a [`CountdownListener`].
//!
//! [`ManualScheduler`] only moves when told to, which makes it suitable for
//! tests and for hosts that pump their own clock:
//!
//! ```rust
//! use bubbletea_countdown::scheduler::{CountdownListener, ManualScheduler, ScheduledCountdown};
//! use bubbletea_countdown::remaining::Remaining;
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct Done(bool);
//!
//! impl CountdownListener for Done {
//!     fn on_finish(&mut self) {
//!         self.0 = true;
//!     }
//! }
//!
//! let scheduler = ManualScheduler::new();
//! let mut countdown = ScheduledCountdown::new(scheduler.clone(), Done::default());
//! countdown.start(3_000);
//!
//! scheduler.advance(Duration::from_secs(3));
//! assert!(countdown.listener().0);
//! assert_eq!(countdown.remaining(), Remaining::ZERO);
//! ```

use crate::remaining::Remaining;
use crate::ticker::{StartOutcome, StartPolicy, TickOutcome, Ticker, TickerState};
use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Interval between countdown ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// A repeating callback. Returning `false` stops the repetition.
pub type Callback = Box<dyn FnMut() -> bool>;

/// Cancels a scheduled callback.
pub trait CancelHandle {
    /// Prevents any further invocation. Cancelling twice is harmless.
    fn cancel(&self);
}

/// Runs callbacks at a fixed interval.
pub trait Scheduler {
    /// Handle returned by [`Scheduler::schedule`].
    type Handle: CancelHandle;

    /// Calls `callback` every `interval`, first after one interval has
    /// elapsed.
    fn schedule(&self, interval: Duration, callback: Callback) -> Self::Handle;
}

/// Receives countdown progress from a [`ScheduledCountdown`].
pub trait CountdownListener {
    /// The displayed time changed.
    fn on_refresh(&mut self, _remaining: Remaining) {}

    /// The countdown reached zero. Called once per run.
    fn on_finish(&mut self) {}
}

impl CountdownListener for () {}

struct ManualTask {
    id: u64,
    interval: Duration,
    due: Duration,
    callback: Option<Callback>,
    cancelled: Rc<Cell<bool>>,
}

#[derive(Default)]
struct ManualInner {
    now: Duration,
    next_id: u64,
    tasks: Vec<ManualTask>,
}

/// A scheduler driven by explicit calls to [`ManualScheduler::advance`].
///
/// Clones share the same virtual clock and task list.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualInner>>,
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("now", &self.now())
            .field("pending", &self.pending())
            .finish()
    }
}

/// Handle for a task on a [`ManualScheduler`].
#[derive(Debug, Clone)]
pub struct ManualHandle {
    cancelled: Rc<Cell<bool>>,
}

impl CancelHandle for ManualHandle {
    fn cancel(&self) {
        self.cancelled.set(true);
    }
}

impl ManualScheduler {
    /// A scheduler at virtual time zero with no tasks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed so far.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of live tasks.
    pub fn pending(&self) -> usize {
        self.inner
            .borrow()
            .tasks
            .iter()
            .filter(|task| !task.cancelled.get())
            .count()
    }

    /// Moves virtual time forward by `by`, running every callback that comes
    /// due in order of due time.
    ///
    /// Callbacks may schedule or cancel tasks; a task scheduled during the
    /// advance runs if it comes due before the advance ends.
    pub fn advance(&self, by: Duration) {
        let target = self.inner.borrow().now + by;

        loop {
            let (id, mut callback) = {
                let mut inner = self.inner.borrow_mut();
                inner.tasks.retain(|task| !task.cancelled.get());
                let next = inner
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, task)| task.due <= target && task.callback.is_some())
                    .min_by_key(|(_, task)| (task.due, task.id))
                    .map(|(index, _)| index);
                let Some(index) = next else {
                    break;
                };
                let due = inner.tasks[index].due;
                inner.now = due;
                let task = &mut inner.tasks[index];
                match task.callback.take() {
                    Some(callback) => (task.id, callback),
                    None => break,
                }
            };

            // The borrow is released so the callback can reach the scheduler.
            let keep = callback();

            let mut inner = self.inner.borrow_mut();
            if let Some(task) = inner.tasks.iter_mut().find(|task| task.id == id) {
                if keep && !task.cancelled.get() {
                    task.callback = Some(callback);
                    task.due += task.interval;
                } else {
                    task.cancelled.set(true);
                }
            }
        }

        self.inner.borrow_mut().now = target;
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule(&self, interval: Duration, callback: Callback) -> ManualHandle {
        let interval = interval.max(Duration::from_nanos(1));
        let cancelled = Rc::new(Cell::new(false));
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let task = ManualTask {
            id: inner.next_id,
            interval,
            due: inner.now + interval,
            callback: Some(callback),
            cancelled: Rc::clone(&cancelled),
        };
        inner.tasks.push(task);
        ManualHandle { cancelled }
    }
}

/// A [`Ticker`] ticked by a [`Scheduler`].
///
/// Starting refreshes the listener immediately, then once per
/// [`TICK_INTERVAL`]. The run that reaches zero refreshes once more and then
/// finishes. Restarting or stopping cancels the pending task, and a tick
/// from a cancelled run is dropped by its tag even if the scheduler still
/// delivers it.
pub struct ScheduledCountdown<S: Scheduler, L: CountdownListener + 'static> {
    scheduler: S,
    ticker: Rc<RefCell<Ticker>>,
    listener: Rc<RefCell<L>>,
    handle: Option<S::Handle>,
}

impl<S: Scheduler, L: CountdownListener + 'static> ScheduledCountdown<S, L> {
    /// An idle countdown using the default [`StartPolicy`].
    pub fn new(scheduler: S, listener: L) -> Self {
        Self::with_policy(scheduler, listener, StartPolicy::default())
    }

    /// An idle countdown using `policy` for non-positive starts.
    pub fn with_policy(scheduler: S, listener: L, policy: StartPolicy) -> Self {
        Self {
            scheduler,
            ticker: Rc::new(RefCell::new(Ticker::new(policy))),
            listener: Rc::new(RefCell::new(listener)),
            handle: None,
        }
    }

    /// The scheduler driving this countdown.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The listener receiving progress.
    pub fn listener(&self) -> Ref<'_, L> {
        self.listener.borrow()
    }

    /// Current state.
    pub fn state(&self) -> TickerState {
        self.ticker.borrow().state()
    }

    /// Time left.
    pub fn remaining(&self) -> Remaining {
        self.ticker.borrow().remaining()
    }

    /// Starts a countdown of `millis` milliseconds.
    pub fn start(&mut self, millis: i64) -> StartOutcome {
        let outcome = self.ticker.borrow_mut().start(millis);
        match outcome {
            StartOutcome::Ignored => {}
            StartOutcome::Finished => {
                self.cancel_pending();
                let mut listener = self.listener.borrow_mut();
                listener.on_refresh(Remaining::ZERO);
                listener.on_finish();
            }
            StartOutcome::Running => {
                self.cancel_pending();
                let remaining = self.remaining();
                self.listener.borrow_mut().on_refresh(remaining);
                self.schedule_ticks();
            }
        }
        outcome
    }

    /// Stops the countdown without finishing it.
    pub fn stop(&mut self) {
        self.ticker.borrow_mut().stop();
        self.cancel_pending();
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
        }
    }

    fn schedule_ticks(&mut self) {
        let ticker = Rc::clone(&self.ticker);
        let listener = Rc::clone(&self.listener);
        let tag = ticker.borrow().tag();

        let callback: Callback = Box::new(move || {
            let (outcome, remaining) = {
                let mut ticker = ticker.borrow_mut();
                if ticker.tag() != tag {
                    return false;
                }
                let Some(outcome) = ticker.tick() else {
                    return false;
                };
                (outcome, ticker.remaining())
            };

            let mut listener = listener.borrow_mut();
            listener.on_refresh(remaining);
            match outcome {
                TickOutcome::Refresh => true,
                TickOutcome::Finished => {
                    listener.on_finish();
                    false
                }
            }
        });

        self.handle = Some(self.scheduler.schedule(TICK_INTERVAL, callback));
    }
}

impl<S: Scheduler, L: CountdownListener + 'static> Drop for ScheduledCountdown<S, L> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        refreshes: Vec<u64>,
        finishes: usize,
    }

    impl CountdownListener for Recorder {
        fn on_refresh(&mut self, remaining: Remaining) {
            self.refreshes.push(remaining.total_secs());
        }

        fn on_finish(&mut self) {
            self.finishes += 1;
        }
    }

    #[test]
    fn test_manual_scheduler_repeats_until_declined() {
        let scheduler = ManualScheduler::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        scheduler.schedule(
            Duration::from_millis(100),
            Box::new(move || {
                counter.set(counter.get() + 1);
                counter.get() < 3
            }),
        );

        scheduler.advance(Duration::from_millis(250));
        assert_eq!(calls.get(), 2);
        assert_eq!(scheduler.now(), Duration::from_millis(250));

        scheduler.advance(Duration::from_secs(1));
        assert_eq!(calls.get(), 3);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_manual_scheduler_cancel() {
        let scheduler = ManualScheduler::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let handle = scheduler.schedule(
            Duration::from_secs(1),
            Box::new(move || {
                counter.set(counter.get() + 1);
                true
            }),
        );

        scheduler.advance(Duration::from_secs(2));
        handle.cancel();
        handle.cancel();
        scheduler.advance(Duration::from_secs(5));
        assert_eq!(calls.get(), 2);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_five_second_countdown() {
        let scheduler = ManualScheduler::new();
        let mut countdown = ScheduledCountdown::new(scheduler.clone(), Recorder::default());
        assert_eq!(countdown.start(5_000), StartOutcome::Running);
        assert_eq!(countdown.listener().refreshes, vec![5]);

        scheduler.advance(Duration::from_secs(5));
        assert_eq!(countdown.state(), TickerState::Finished);
        assert_eq!(countdown.remaining(), Remaining::ZERO);
        assert_eq!(countdown.listener().refreshes, vec![5, 4, 3, 2, 1, 0]);
        assert_eq!(countdown.listener().finishes, 1);

        scheduler.advance(Duration::from_secs(10));
        assert_eq!(countdown.listener().finishes, 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_stop_never_finishes() {
        let scheduler = ManualScheduler::new();
        let mut countdown = ScheduledCountdown::new(scheduler.clone(), Recorder::default());
        countdown.start(5_000);
        scheduler.advance(Duration::from_secs(2));
        countdown.stop();
        scheduler.advance(Duration::from_secs(10));

        assert_eq!(countdown.state(), TickerState::Idle);
        assert_eq!(countdown.remaining().total_secs(), 3);
        assert_eq!(countdown.listener().finishes, 0);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_restart_cancels_previous_run() {
        let scheduler = ManualScheduler::new();
        let mut countdown = ScheduledCountdown::new(scheduler.clone(), Recorder::default());
        countdown.start(5_000);
        scheduler.advance(Duration::from_secs(2));
        countdown.start(3_000);
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(Duration::from_secs(3));
        assert_eq!(countdown.listener().finishes, 1);
        assert_eq!(countdown.listener().refreshes, vec![5, 4, 3, 3, 2, 1, 0]);
    }

    #[test]
    fn test_non_positive_start() {
        let scheduler = ManualScheduler::new();
        let mut countdown = ScheduledCountdown::new(scheduler.clone(), Recorder::default());
        assert_eq!(countdown.start(0), StartOutcome::Ignored);
        assert_eq!(countdown.start(-1), StartOutcome::Ignored);
        assert_eq!(countdown.state(), TickerState::Idle);
        assert!(countdown.listener().refreshes.is_empty());
        assert_eq!(scheduler.pending(), 0);

        let mut eager = ScheduledCountdown::with_policy(
            scheduler.clone(),
            Recorder::default(),
            StartPolicy::FinishImmediately,
        );
        assert_eq!(eager.start(0), StartOutcome::Finished);
        assert_eq!(eager.listener().finishes, 1);
        assert_eq!(eager.listener().refreshes, vec![0]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_drop_cancels_pending_tick() {
        let scheduler = ManualScheduler::new();
        {
            let mut countdown = ScheduledCountdown::new(scheduler.clone(), ());
            countdown.start(10_000);
            assert_eq!(scheduler.pending(), 1);
        }
        assert_eq!(scheduler.pending(), 0);
    }
}
