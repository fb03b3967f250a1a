//! Auto-refresh controller.
//!
//! Owns the working set of shipment records and keeps its in-transit
//! members current by polling the listing backend on a timer.
//!
//! # State machine
//!
//! ```text
//!              set_enabled(true)            hidden
//!   ┌──────┐ ─────────────────► ┌───────────┐ ─────► ┌────────┐
//!   │ Idle │                    │ Scheduled │        │ Paused │
//!   └──────┘ ◄───────────────── └───────────┘ ◄───── └────────┘
//!              set_enabled(false)     │       visible (+1 refresh)
//!                                     │ timer / manual
//!                                     ▼
//!                               ┌────────────┐
//!                               │ Refreshing │ (reported while in flight)
//!                               └────────────┘
//! ```
//!
//! Timer firings are ignored while paused. Regaining visibility triggers
//! exactly one immediate refresh; if one is already in flight, a single
//! follow-up run is queued instead.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard};

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use super::backend::ShipmentListing;
use super::config::AutoRefreshConfig;
use super::error::ListingError;
use super::merge::{merge_in_transit, MergeSummary};
use super::scheduler::{CancelToken, Scheduler};
use crate::shipment::{LifecycleStatus, ShipmentRecord};

/// Broadcast channel capacity for record updates.
const UPDATE_CHANNEL_CAPACITY: usize = 16;

/// Observable controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    /// Timer not armed.
    Idle,
    /// Timer armed and the view is visible.
    Scheduled,
    /// A refresh is in flight.
    Refreshing,
    /// Timer armed but the view is hidden; firings are ignored.
    Paused,
}

impl std::fmt::Display for RefreshState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RefreshState::Idle => "idle",
            RefreshState::Scheduled => "scheduled",
            RefreshState::Refreshing => "refreshing",
            RefreshState::Paused => "paused",
        };
        f.write_str(name)
    }
}

/// Result of a refresh trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Fresh records were merged into the working set.
    Updated(MergeSummary),
    /// No in-transit records; the backend was not called.
    NothingToRefresh,
    /// Another refresh was already running.
    AlreadyInFlight,
    /// A refresh was running; one follow-up run was queued behind it.
    Coalesced,
    /// Trigger ignored (timer firing while paused, or visibility change while idle).
    Skipped,
    /// Backend call failed; the working set is unchanged.
    Failed(String),
    /// Controller was shut down.
    ShutDown,
}

/// Notification sent after a successful merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordsUpdate {
    /// What the merge did.
    pub summary: MergeSummary,
    /// Size of the working set after the merge.
    pub total: usize,
    /// When the merge completed.
    pub updated_at: DateTime<Utc>,
}

/// Snapshot for status displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshStatus {
    pub state: RefreshState,
    pub is_refreshing: bool,
    pub last_updated: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub records: usize,
    pub in_transit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Schedule {
    Idle,
    Scheduled,
    Paused,
}

#[derive(Debug)]
struct Inner {
    schedule: Schedule,
    timer: Option<CancelToken>,
    listeners: Vec<CancelToken>,
    last_updated: Option<DateTime<Utc>>,
    last_error: Option<String>,
    rerun_requested: bool,
}

/// Holds the in-flight flag for the duration of a refresh.
struct FlightGuard<'a> {
    flag: &'a AtomicBool,
    armed: bool,
}

impl<'a> FlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag, armed: true })
    }

    fn release(mut self) {
        self.flag.store(false, Ordering::Release);
        self.armed = false;
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.flag.store(false, Ordering::Release);
        }
    }
}

/// Periodically refreshes the in-transit part of a shipment working set.
pub struct AutoRefreshController<B> {
    backend: B,
    scheduler: Arc<dyn Scheduler>,
    config: AutoRefreshConfig,
    records: RwLock<Vec<ShipmentRecord>>,
    inner: Mutex<Inner>,
    in_flight: AtomicBool,
    alive: AtomicBool,
    updates_tx: broadcast::Sender<RecordsUpdate>,
}

impl<B: ShipmentListing> AutoRefreshController<B> {
    /// Create an idle controller. Call [`start`](Self::start) to arm it.
    pub fn new(backend: B, scheduler: Arc<dyn Scheduler>, config: AutoRefreshConfig) -> Self {
        let (updates_tx, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            backend,
            scheduler,
            config,
            records: RwLock::new(Vec::new()),
            inner: Mutex::new(Inner {
                schedule: Schedule::Idle,
                timer: None,
                listeners: Vec::new(),
                last_updated: None,
                last_error: None,
                rerun_requested: false,
            }),
            in_flight: AtomicBool::new(false),
            alive: AtomicBool::new(true),
            updates_tx,
        }
    }

    /// Controller configuration.
    pub fn config(&self) -> &AutoRefreshConfig {
        &self.config
    }

    /// Replace the working set.
    pub fn set_records(&self, records: Vec<ShipmentRecord>) {
        let mut current = self.records.write().unwrap_or_else(PoisonError::into_inner);
        *current = records;
    }

    /// Copy of the working set.
    pub fn records(&self) -> Vec<ShipmentRecord> {
        self.read_records().clone()
    }

    /// Number of in-transit records in the working set.
    pub fn in_transit_count(&self) -> usize {
        self.read_records().iter().filter(|r| r.is_in_transit()).count()
    }

    /// Current state.
    pub fn state(&self) -> RefreshState {
        if self.is_refreshing() {
            return RefreshState::Refreshing;
        }
        match self.lock_inner().schedule {
            Schedule::Idle => RefreshState::Idle,
            Schedule::Scheduled => RefreshState::Scheduled,
            Schedule::Paused => RefreshState::Paused,
        }
    }

    /// Whether a refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Time of the last successful merge.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.lock_inner().last_updated
    }

    /// Status snapshot.
    pub fn status(&self) -> RefreshStatus {
        let state = self.state();
        let (last_updated, last_error) = {
            let inner = self.lock_inner();
            (inner.last_updated, inner.last_error.clone())
        };
        let (records, in_transit) = {
            let records = self.read_records();
            (records.len(), records.iter().filter(|r| r.is_in_transit()).count())
        };

        RefreshStatus {
            state,
            is_refreshing: state == RefreshState::Refreshing,
            last_updated,
            last_error,
            records,
            in_transit,
        }
    }

    /// Subscribe to merge notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<RecordsUpdate> {
        self.updates_tx.subscribe()
    }

    /// Whether the controller has not been shut down.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Refresh now.
    ///
    /// Manual refreshes share the timer's code path and in-flight guard.
    pub async fn refresh(&self) -> RefreshOutcome {
        let Some(guard) = FlightGuard::acquire(&self.in_flight) else {
            tracing::debug!("Refresh already in flight");
            return RefreshOutcome::AlreadyInFlight;
        };

        loop {
            let outcome = self.refresh_once().await;

            // Release under the lock so a concurrent visibility change
            // either sees the flight or gets its rerun picked up here.
            let mut inner = self.lock_inner();
            if inner.rerun_requested && self.is_alive() {
                inner.rerun_requested = false;
                drop(inner);
                tracing::debug!("Running queued refresh");
                continue;
            }
            inner.rerun_requested = false;
            guard.release();
            return outcome;
        }
    }

    /// Handle a timer firing.
    pub async fn handle_timer_fire(&self) -> RefreshOutcome {
        let schedule = self.lock_inner().schedule;
        if schedule != Schedule::Scheduled {
            tracing::trace!(?schedule, "Timer firing ignored");
            return RefreshOutcome::Skipped;
        }
        self.refresh().await
    }

    /// Handle the view becoming hidden.
    pub fn handle_hidden(&self) {
        let mut inner = self.lock_inner();
        if inner.schedule == Schedule::Scheduled {
            inner.schedule = Schedule::Paused;
            tracing::debug!("Auto-refresh paused");
        }
    }

    /// Handle the view becoming visible: resume and refresh once.
    pub async fn handle_visible(&self) -> RefreshOutcome {
        {
            let mut inner = self.lock_inner();
            if inner.schedule != Schedule::Paused {
                return RefreshOutcome::Skipped;
            }
            inner.schedule = Schedule::Scheduled;
            tracing::debug!("Auto-refresh resumed");

            if self.is_refreshing() {
                inner.rerun_requested = true;
                return RefreshOutcome::Coalesced;
            }
        }
        self.refresh().await
    }

    /// Stop the controller: release the timer and listeners, and discard
    /// results of any refresh still in flight.
    pub fn shutdown(&self) {
        self.alive.store(false, Ordering::Release);

        let mut inner = self.lock_inner();
        if let Some(timer) = inner.timer.take() {
            timer.cancel();
        }
        for listener in inner.listeners.drain(..) {
            listener.cancel();
        }
        inner.schedule = Schedule::Idle;
        inner.rerun_requested = false;
        tracing::debug!("Auto-refresh controller shut down");
    }

    async fn refresh_once(&self) -> RefreshOutcome {
        if !self.is_alive() {
            return RefreshOutcome::ShutDown;
        }

        let in_transit = self.in_transit_count();
        if in_transit == 0 {
            tracing::debug!("No in-transit shipments, skipping refresh");
            return RefreshOutcome::NothingToRefresh;
        }

        match self.fetch_in_transit().await {
            Ok(fresh) => {
                if !self.is_alive() {
                    return RefreshOutcome::ShutDown;
                }

                let (summary, total) = {
                    let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
                    let summary = merge_in_transit(&mut records, &fresh);
                    (summary, records.len())
                };

                let updated_at = Utc::now();
                {
                    let mut inner = self.lock_inner();
                    inner.last_updated = Some(updated_at);
                    inner.last_error = None;
                }

                tracing::info!(
                    fetched = fresh.len(),
                    replaced = summary.replaced,
                    unmatched = summary.unmatched,
                    total,
                    "Shipments refreshed"
                );

                let _ = self.updates_tx.send(RecordsUpdate {
                    summary,
                    total,
                    updated_at,
                });
                RefreshOutcome::Updated(summary)
            }
            Err(e) => {
                tracing::warn!(error = %e, in_transit, "Shipment refresh failed, keeping current records");
                let message = e.to_string();
                self.lock_inner().last_error = Some(message.clone());
                RefreshOutcome::Failed(message)
            }
        }
    }

    async fn fetch_in_transit(&self) -> Result<Vec<ShipmentRecord>, ListingError> {
        let page_size = self.config.effective_page_size();
        let mut fetched = Vec::new();

        for page in 0..self.config.effective_max_pages() {
            let batch = self
                .backend
                .list_shipments(
                    LifecycleStatus::InTransit,
                    page_size,
                    page.saturating_mul(page_size),
                )
                .await?;
            let returned = batch.len();
            fetched.extend(batch);

            if returned < page_size {
                break;
            }
        }

        Ok(fetched)
    }

    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_records(&self) -> RwLockReadGuard<'_, Vec<ShipmentRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<B: ShipmentListing + 'static> AutoRefreshController<B> {
    /// Register visibility listeners and arm the timer if enabled.
    ///
    /// Must be called from within a Tokio runtime; scheduler callbacks
    /// spawn the async handlers. Calling it twice is a no-op.
    pub fn start(self: &Arc<Self>) {
        if !self.is_alive() || !self.lock_inner().listeners.is_empty() {
            return;
        }

        let weak = Arc::downgrade(self);
        let on_hidden = self.scheduler.on_become_hidden(Arc::new(move || {
            if let Some(controller) = weak.upgrade() {
                controller.handle_hidden();
            }
        }));

        let weak = Arc::downgrade(self);
        let on_visible = self.scheduler.on_become_visible(Arc::new(move || {
            let weak = weak.clone();
            tokio::spawn(async move {
                if let Some(controller) = weak.upgrade() {
                    controller.handle_visible().await;
                }
            });
        }));

        self.lock_inner().listeners.extend([on_hidden, on_visible]);
        self.set_enabled(self.config.enabled);

        tracing::info!(
            enabled = self.config.enabled,
            interval_secs = self.config.interval.as_secs(),
            "Auto-refresh controller started"
        );
    }

    /// Arm or release the periodic timer.
    pub fn set_enabled(self: &Arc<Self>, enabled: bool) {
        if !self.is_alive() {
            return;
        }

        let mut inner = self.lock_inner();
        if enabled {
            if inner.timer.is_none() {
                let weak = Arc::downgrade(self);
                let token = self.scheduler.arm_timer(
                    self.config.effective_interval(),
                    Arc::new(move || {
                        let weak = weak.clone();
                        tokio::spawn(async move {
                            if let Some(controller) = weak.upgrade() {
                                controller.handle_timer_fire().await;
                            }
                        });
                    }),
                );
                inner.timer = Some(token);
            }
            inner.schedule = if self.scheduler.is_visible() {
                Schedule::Scheduled
            } else {
                Schedule::Paused
            };
        } else {
            if let Some(timer) = inner.timer.take() {
                timer.cancel();
            }
            inner.schedule = Schedule::Idle;
        }
    }
}

impl<B> Drop for AutoRefreshController<B> {
    fn drop(&mut self) {
        let inner = self.inner.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = inner.timer.take() {
            timer.cancel();
        }
        for listener in inner.listeners.drain(..) {
            listener.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh::scheduler::ManualScheduler;
    use crate::shipment::Address;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn record(id: &str, code: &str, status: LifecycleStatus) -> ShipmentRecord {
        ShipmentRecord {
            id: id.to_string(),
            tracking_code: Some(code.to_string()),
            status,
            origin: Address::new("Porto Alegre", "RS"),
            destination: Address::new("Fortaleza", "CE"),
        }
    }

    #[derive(Default)]
    struct FakeListing {
        remote: Mutex<Vec<ShipmentRecord>>,
        calls: AtomicUsize,
        fail: AtomicBool,
    }

    impl FakeListing {
        fn with_remote(records: Vec<ShipmentRecord>) -> Self {
            Self {
                remote: Mutex::new(records),
                ..Default::default()
            }
        }
    }

    impl ShipmentListing for Arc<FakeListing> {
        // Status filtering is left to the real backend; the fake pages over
        // everything it holds.
        async fn list_shipments(
            &self,
            _status: LifecycleStatus,
            limit: usize,
            offset: usize,
        ) -> Result<Vec<ShipmentRecord>, ListingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(ListingError::UnexpectedStatus(503));
            }
            let remote = self.remote.lock().unwrap();
            Ok(remote
                .iter()
                .skip(offset)
                .take(limit)
                .cloned()
                .collect())
        }
    }

    fn controller(
        listing: &Arc<FakeListing>,
        config: AutoRefreshConfig,
    ) -> (Arc<AutoRefreshController<Arc<FakeListing>>>, Arc<ManualScheduler>) {
        let scheduler = Arc::new(ManualScheduler::new());
        let controller = Arc::new(AutoRefreshController::new(
            Arc::clone(listing),
            scheduler.clone(),
            config,
        ));
        (controller, scheduler)
    }

    #[tokio::test]
    async fn test_no_in_transit_makes_no_call() {
        let listing = Arc::new(FakeListing::default());
        let (controller, _) = controller(&listing, AutoRefreshConfig::default());
        controller.set_records(vec![
            record("1", "A", LifecycleStatus::Delivered),
            record("2", "B", LifecycleStatus::Posted),
        ]);

        assert_eq!(controller.refresh().await, RefreshOutcome::NothingToRefresh);
        assert_eq!(listing.calls.load(Ordering::SeqCst), 0);
        assert_eq!(controller.last_updated(), None);
    }

    #[tokio::test]
    async fn test_refresh_merges_and_records_time() {
        let listing = Arc::new(FakeListing::with_remote(vec![record(
            "1",
            "A",
            LifecycleStatus::OutForDelivery,
        )]));
        let (controller, _) = controller(&listing, AutoRefreshConfig::default());
        controller.set_records(vec![
            record("1", "A", LifecycleStatus::InTransit),
            record("2", "B", LifecycleStatus::Delivered),
        ]);
        let mut updates = controller.subscribe();

        let outcome = controller.refresh().await;

        assert_eq!(
            outcome,
            RefreshOutcome::Updated(MergeSummary { replaced: 1, unmatched: 0 })
        );
        let records = controller.records();
        assert_eq!(records[0].status, LifecycleStatus::OutForDelivery);
        assert_eq!(records[1].status, LifecycleStatus::Delivered);
        assert!(controller.last_updated().is_some());

        let update = updates.try_recv().unwrap();
        assert_eq!(update.total, 2);
    }

    #[tokio::test]
    async fn test_pages_until_short_page() {
        let remote: Vec<_> = (0..5)
            .map(|i| record(&i.to_string(), &format!("C{i}"), LifecycleStatus::InTransit))
            .collect();
        let listing = Arc::new(FakeListing::with_remote(remote.clone()));
        let config = AutoRefreshConfig {
            page_size: 2,
            ..Default::default()
        };
        let (controller, _) = controller(&listing, config);
        controller.set_records(remote);

        let outcome = controller.refresh().await;

        assert_eq!(
            outcome,
            RefreshOutcome::Updated(MergeSummary { replaced: 5, unmatched: 0 })
        );
        assert_eq!(listing.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_page_limit_bounds_calls() {
        let remote: Vec<_> = (0..10)
            .map(|i| record(&i.to_string(), &format!("C{i}"), LifecycleStatus::InTransit))
            .collect();
        let listing = Arc::new(FakeListing::with_remote(remote.clone()));
        let config = AutoRefreshConfig {
            page_size: 2,
            max_pages: 2,
            ..Default::default()
        };
        let (controller, _) = controller(&listing, config);
        controller.set_records(remote);

        let outcome = controller.refresh().await;

        assert_eq!(
            outcome,
            RefreshOutcome::Updated(MergeSummary { replaced: 4, unmatched: 6 })
        );
        assert_eq!(listing.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failure_keeps_records() {
        let listing = Arc::new(FakeListing::default());
        listing.fail.store(true, Ordering::SeqCst);
        let (controller, _) = controller(&listing, AutoRefreshConfig::default());
        let before = vec![record("1", "A", LifecycleStatus::InTransit)];
        controller.set_records(before.clone());

        let outcome = controller.refresh().await;

        assert!(matches!(outcome, RefreshOutcome::Failed(_)));
        assert_eq!(controller.records(), before);
        assert_eq!(controller.last_updated(), None);
        assert!(controller.status().last_error.unwrap().contains("503"));
        assert!(!controller.is_refreshing());
    }

    #[tokio::test]
    async fn test_start_arms_timer_and_listeners() {
        let listing = Arc::new(FakeListing::default());
        let (controller, scheduler) = controller(&listing, AutoRefreshConfig::default());

        assert_eq!(controller.state(), RefreshState::Idle);
        controller.start();
        controller.start();

        assert_eq!(controller.state(), RefreshState::Scheduled);
        assert_eq!(scheduler.armed_intervals(), vec![Duration::from_secs(300)]);
        assert_eq!(scheduler.listener_count(), 2);
    }

    #[tokio::test]
    async fn test_zero_interval_arms_minimum_period() {
        let listing = Arc::new(FakeListing::default());
        let config = AutoRefreshConfig {
            interval: Duration::ZERO,
            ..Default::default()
        };
        let (controller, scheduler) = controller(&listing, config);

        controller.start();
        assert_eq!(controller.state(), RefreshState::Scheduled);
        assert_eq!(scheduler.armed_intervals(), vec![Duration::from_millis(1)]);
    }

    #[tokio::test]
    async fn test_disabled_config_starts_idle() {
        let listing = Arc::new(FakeListing::default());
        let config = AutoRefreshConfig {
            enabled: false,
            ..Default::default()
        };
        let (controller, scheduler) = controller(&listing, config);

        controller.start();
        assert_eq!(controller.state(), RefreshState::Idle);
        assert!(scheduler.armed_intervals().is_empty());

        controller.set_enabled(true);
        assert_eq!(controller.state(), RefreshState::Scheduled);
        controller.set_enabled(false);
        assert_eq!(controller.state(), RefreshState::Idle);
        assert!(scheduler.armed_intervals().is_empty());
    }

    #[tokio::test]
    async fn test_timer_ignored_while_paused() {
        let listing = Arc::new(FakeListing::default());
        let (controller, _) = controller(&listing, AutoRefreshConfig::default());
        controller.set_records(vec![record("1", "A", LifecycleStatus::InTransit)]);
        controller.start();

        controller.handle_hidden();
        assert_eq!(controller.state(), RefreshState::Paused);
        assert_eq!(controller.handle_timer_fire().await, RefreshOutcome::Skipped);
        assert_eq!(listing.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_visible_refreshes_once_and_resumes() {
        let listing = Arc::new(FakeListing::default());
        let (controller, _) = controller(&listing, AutoRefreshConfig::default());
        controller.set_records(vec![record("1", "A", LifecycleStatus::InTransit)]);
        controller.start();
        controller.handle_hidden();

        let outcome = controller.handle_visible().await;

        assert_eq!(
            outcome,
            RefreshOutcome::Updated(MergeSummary { replaced: 0, unmatched: 1 })
        );
        assert_eq!(listing.calls.load(Ordering::SeqCst), 1);
        assert_eq!(controller.state(), RefreshState::Scheduled);

        // Already visible: nothing to resume
        assert_eq!(controller.handle_visible().await, RefreshOutcome::Skipped);
        assert_eq!(listing.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_shutdown_releases_everything() {
        let listing = Arc::new(FakeListing::default());
        let (controller, scheduler) = controller(&listing, AutoRefreshConfig::default());
        controller.set_records(vec![record("1", "A", LifecycleStatus::InTransit)]);
        controller.start();

        controller.shutdown();

        assert_eq!(controller.state(), RefreshState::Idle);
        assert!(scheduler.armed_intervals().is_empty());
        assert_eq!(scheduler.listener_count(), 0);
        assert_eq!(controller.refresh().await, RefreshOutcome::ShutDown);
        assert_eq!(listing.calls.load(Ordering::SeqCst), 0);

        // Cannot be restarted
        controller.start();
        assert!(scheduler.armed_intervals().is_empty());
    }

    #[test]
    fn test_flight_guard_is_exclusive() {
        let flag = AtomicBool::new(false);
        let guard = FlightGuard::acquire(&flag).unwrap();
        assert!(FlightGuard::acquire(&flag).is_none());
        guard.release();
        assert!(!flag.load(Ordering::SeqCst));

        {
            let _guard = FlightGuard::acquire(&flag).unwrap();
        }
        assert!(!flag.load(Ordering::SeqCst));
    }
}
