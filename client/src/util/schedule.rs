//! Cancellable timers scoped to a component's lifetime.
//!
//! DESIGN
//! ======
//! Every timer is represented by a [`TimerHandle`]; dropping the handle
//! cancels the timer. Components keep handles next to the state they animate
//! so teardown releases them without bookkeeping. The browser implementation
//! wraps `gloo-timers`, whose `Interval`/`Timeout` already clear themselves on
//! drop. [`ManualScheduler`] drives the same contract from a virtual clock.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Owns a scheduled callback. The callback is cancelled when this is dropped.
#[must_use = "dropping a TimerHandle cancels the timer"]
pub struct TimerHandle {
    guard: Option<Box<dyn Any>>,
}

impl TimerHandle {
    fn new(guard: impl Any) -> Self {
        Self { guard: Some(Box::new(guard)) }
    }

    /// A handle for a timer that will never fire (server rendering).
    pub fn inert() -> Self {
        Self { guard: None }
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle").field("armed", &self.guard.is_some()).finish()
    }
}

/// Source of repeating and one-shot timers.
pub trait Scheduler {
    /// Call `tick` every `period` until the handle is dropped.
    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> TimerHandle;

    /// Call `f` once after `delay` unless the handle is dropped first.
    fn once(&self, delay: Duration, f: Box<dyn FnOnce()>) -> TimerHandle;
}

/// `setInterval`/`setTimeout` via `gloo-timers`. Inert outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

#[cfg(feature = "hydrate")]
fn as_millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

impl Scheduler for BrowserScheduler {
    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> TimerHandle {
        #[cfg(feature = "hydrate")]
        {
            let mut tick = tick;
            TimerHandle::new(gloo_timers::callback::Interval::new(as_millis(period), move || tick()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (period, tick);
            TimerHandle::inert()
        }
    }

    fn once(&self, delay: Duration, f: Box<dyn FnOnce()>) -> TimerHandle {
        #[cfg(feature = "hydrate")]
        {
            TimerHandle::new(gloo_timers::callback::Timeout::new(as_millis(delay), f))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (delay, f);
            TimerHandle::inert()
        }
    }
}

// =============================================================================
// MANUAL SCHEDULER
// =============================================================================

enum Callback {
    Repeating(Box<dyn FnMut()>),
    Once(Box<dyn FnOnce()>),
}

struct ManualTimer {
    due: Duration,
    period: Option<Duration>,
    /// `None` while the callback is running.
    callback: Option<Callback>,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<u64, ManualTimer>,
}

/// Removes its timer from the clock when dropped.
struct ManualGuard {
    clock: Weak<RefCell<ManualClock>>,
    id: u64,
}

impl Drop for ManualGuard {
    fn drop(&mut self) {
        let Some(clock) = self.clock.upgrade() else {
            return;
        };
        let removed = clock.borrow_mut().timers.remove(&self.id);
        drop(removed);
    }
}

/// Virtual-time scheduler. Nothing fires until [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<ManualClock>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Number of timers that are still scheduled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.clock.borrow().timers.len()
    }

    /// Move the clock forward by `by`, firing every timer that comes due, in
    /// due-time order. Callbacks may schedule or cancel timers.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        while let Some((id, due)) = self.next_due(target) {
            let callback = {
                let mut clock = self.clock.borrow_mut();
                clock.now = due;
                match clock.timers.get(&id).map(|timer| timer.period) {
                    Some(Some(_)) => clock.timers.get_mut(&id).and_then(|timer| timer.callback.take()),
                    Some(None) => clock.timers.remove(&id).and_then(|timer| timer.callback),
                    None => None,
                }
            };

            match callback {
                Some(Callback::Repeating(mut tick)) => {
                    tick();
                    let mut clock = self.clock.borrow_mut();
                    // The tick may have cancelled its own timer.
                    if let Some(timer) = clock.timers.get_mut(&id) {
                        timer.due = due + timer.period.unwrap_or_default();
                        timer.callback = Some(Callback::Repeating(tick));
                    }
                }
                Some(Callback::Once(f)) => f(),
                None => {}
            }
        }
        self.clock.borrow_mut().now = target;
    }

    fn next_due(&self, target: Duration) -> Option<(u64, Duration)> {
        let clock = self.clock.borrow();
        clock
            .timers
            .iter()
            .filter(|(_, timer)| timer.callback.is_some() && timer.due <= target)
            .min_by_key(|(id, timer)| (timer.due, **id))
            .map(|(id, timer)| (*id, timer.due))
    }

    fn schedule(&self, due_in: Duration, period: Option<Duration>, callback: Callback) -> TimerHandle {
        let id = {
            let mut clock = self.clock.borrow_mut();
            let id = clock.next_id;
            clock.next_id += 1;
            let due = clock.now + due_in;
            clock.timers.insert(id, ManualTimer { due, period, callback: Some(callback) });
            id
        };
        TimerHandle::new(ManualGuard { clock: Rc::downgrade(&self.clock), id })
    }
}

impl Scheduler for ManualScheduler {
    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> TimerHandle {
        // A zero period would never let `advance` return.
        let period = period.max(Duration::from_millis(1));
        self.schedule(period, Some(period), Callback::Repeating(tick))
    }

    fn once(&self, delay: Duration, f: Box<dyn FnOnce()>) -> TimerHandle {
        self.schedule(delay, None, Callback::Once(f))
    }
}
