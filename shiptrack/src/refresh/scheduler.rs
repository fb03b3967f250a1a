//! Timer and visibility abstraction.
//!
//! The refresh controller never touches a platform timer or visibility API
//! directly. It asks a [`Scheduler`] to arm a repeating timer and to call
//! back when the consuming view is shown or hidden. Every registration
//! returns a [`CancelToken`] that releases it.
//!
//! Two implementations are provided:
//!
//! - [`TokioScheduler`] - real timers on the Tokio runtime; visibility is fed
//!   by the host through [`VisibilitySignal::set_visible`]
//! - [`ManualScheduler`] - nothing fires until the host says so; used by
//!   hosts that own their own event loop, and by tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::config::MIN_REFRESH_INTERVAL;

/// Callback invoked by a scheduler.
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Handle that releases a timer or listener registration.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: CancellationToken,
}

impl CancelToken {
    /// Create an active token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Release the registration.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    /// Whether the registration has been released.
    pub fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled()
    }

    fn cancellation(&self) -> &CancellationToken {
        &self.inner
    }
}

/// Source of timers and visibility notifications.
pub trait Scheduler: Send + Sync {
    /// Arm a repeating timer. The first firing happens one `interval` from now.
    fn arm_timer(&self, interval: Duration, callback: Callback) -> CancelToken;

    /// Call `callback` each time the view becomes visible.
    fn on_become_visible(&self, callback: Callback) -> CancelToken;

    /// Call `callback` each time the view becomes hidden.
    fn on_become_hidden(&self, callback: Callback) -> CancelToken;

    /// Whether the view is currently visible.
    fn is_visible(&self) -> bool;
}

struct Listener {
    token: CancelToken,
    callback: Callback,
}

/// Visibility flag with change listeners.
///
/// Listeners only fire on transitions; setting the current value again is
/// a no-op.
pub struct VisibilitySignal {
    visible: AtomicBool,
    on_visible: Mutex<Vec<Listener>>,
    on_hidden: Mutex<Vec<Listener>>,
}

impl Default for VisibilitySignal {
    fn default() -> Self {
        Self::new(true)
    }
}

impl VisibilitySignal {
    /// Create a signal with an initial visibility.
    pub fn new(visible: bool) -> Self {
        Self {
            visible: AtomicBool::new(visible),
            on_visible: Mutex::new(Vec::new()),
            on_hidden: Mutex::new(Vec::new()),
        }
    }

    /// Current visibility.
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Acquire)
    }

    /// Update visibility, notifying listeners on a transition.
    ///
    /// Returns true if the value changed.
    pub fn set_visible(&self, visible: bool) -> bool {
        if self.visible.swap(visible, Ordering::AcqRel) == visible {
            return false;
        }

        let listeners = if visible { &self.on_visible } else { &self.on_hidden };
        // Callbacks run outside the lock so they may register or cancel listeners
        let callbacks: Vec<Callback> = {
            let mut listeners = listeners.lock().unwrap_or_else(PoisonError::into_inner);
            listeners.retain(|l| !l.token.is_cancelled());
            listeners.iter().map(|l| Arc::clone(&l.callback)).collect()
        };

        tracing::debug!(visible, listeners = callbacks.len(), "Visibility changed");
        for callback in callbacks {
            callback();
        }
        true
    }

    /// Register a listener for the shown transition.
    pub fn on_visible(&self, callback: Callback) -> CancelToken {
        Self::register(&self.on_visible, callback)
    }

    /// Register a listener for the hidden transition.
    pub fn on_hidden(&self, callback: Callback) -> CancelToken {
        Self::register(&self.on_hidden, callback)
    }

    /// Number of active listeners, both directions.
    pub fn listener_count(&self) -> usize {
        [&self.on_visible, &self.on_hidden]
            .iter()
            .map(|list| {
                list.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .iter()
                    .filter(|l| !l.token.is_cancelled())
                    .count()
            })
            .sum()
    }

    fn register(list: &Mutex<Vec<Listener>>, callback: Callback) -> CancelToken {
        let token = CancelToken::new();
        list.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Listener {
                token: token.clone(),
                callback,
            });
        token
    }
}

/// Scheduler backed by Tokio timers.
///
/// `arm_timer` spawns a task, so it must be called from within a Tokio
/// runtime.
#[derive(Default)]
pub struct TokioScheduler {
    visibility: Arc<VisibilitySignal>,
}

impl TokioScheduler {
    /// Create a scheduler whose view starts visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scheduler sharing an existing visibility signal.
    pub fn with_visibility(visibility: Arc<VisibilitySignal>) -> Self {
        Self { visibility }
    }

    /// Visibility signal the host updates from platform events.
    pub fn visibility(&self) -> &Arc<VisibilitySignal> {
        &self.visibility
    }
}

impl Scheduler for TokioScheduler {
    fn arm_timer(&self, interval: Duration, callback: Callback) -> CancelToken {
        let token = CancelToken::new();
        let cancellation = token.cancellation().clone();
        let interval = interval.max(MIN_REFRESH_INTERVAL);

        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => callback(),
                    _ = cancellation.cancelled() => {
                        tracing::trace!("Refresh timer released");
                        break;
                    }
                }
            }
        });

        token
    }

    fn on_become_visible(&self, callback: Callback) -> CancelToken {
        self.visibility.on_visible(callback)
    }

    fn on_become_hidden(&self, callback: Callback) -> CancelToken {
        self.visibility.on_hidden(callback)
    }

    fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }
}

struct Timer {
    interval: Duration,
    token: CancelToken,
    callback: Callback,
}

/// Scheduler driven entirely by its host.
///
/// Timers fire only when [`fire_timers`](ManualScheduler::fire_timers) is
/// called; visibility changes only through
/// [`set_visible`](ManualScheduler::set_visible).
#[derive(Default)]
pub struct ManualScheduler {
    timers: Mutex<Vec<Timer>>,
    visibility: VisibilitySignal,
}

impl ManualScheduler {
    /// Create a scheduler whose view starts visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every armed timer once. Returns how many fired.
    pub fn fire_timers(&self) -> usize {
        let callbacks: Vec<Callback> = {
            let mut timers = self.timers.lock().unwrap_or_else(PoisonError::into_inner);
            timers.retain(|t| !t.token.is_cancelled());
            timers.iter().map(|t| Arc::clone(&t.callback)).collect()
        };
        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    /// Intervals of the timers currently armed.
    pub fn armed_intervals(&self) -> Vec<Duration> {
        self.timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|t| !t.token.is_cancelled())
            .map(|t| t.interval)
            .collect()
    }

    /// Change visibility, notifying listeners on a transition.
    pub fn set_visible(&self, visible: bool) -> bool {
        self.visibility.set_visible(visible)
    }

    /// Number of active visibility listeners.
    pub fn listener_count(&self) -> usize {
        self.visibility.listener_count()
    }
}

impl Scheduler for ManualScheduler {
    fn arm_timer(&self, interval: Duration, callback: Callback) -> CancelToken {
        let token = CancelToken::new();
        self.timers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Timer {
                interval,
                token: token.clone(),
                callback,
            });
        token
    }

    fn on_become_visible(&self, callback: Callback) -> CancelToken {
        self.visibility.on_visible(callback)
    }

    fn on_become_hidden(&self, callback: Callback) -> CancelToken {
        self.visibility.on_hidden(callback)
    }

    fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }
}
