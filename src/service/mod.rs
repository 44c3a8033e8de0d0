// envsnap: Host Environment Snapshot Service
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The periodically refreshed snapshot service.
//!
//! ```text
//! EnvironmentSnapshotService::new(reader)
//!   .with_refresh_interval(1s)
//!
//! start(now) ---> Running        last_refresh = now
//!   tick(now)     elapsed >= interval ? refresh() : no-op
//!   refresh_now(now)                    refresh()  (manual trigger)
//!   subscribe(f) / unsubscribe(id)
//! stop() -----> Stopped          subscriptions dropped (also on Drop)
//!
//! refresh(): capture(reader) --> SnapshotCell::publish --> notify subscribers
//!            (a panicking subscriber is logged and removed)
//! readers:   snapshot() / handle().snapshot()   (Arc, never torn)
//! ```

pub mod cell;
pub mod clock;


use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use crate::error::ServiceError;
use crate::host::{EnvironmentReader, SystemReader, capture};
use crate::snapshot::EnvironmentSnapshot;

use cell::SnapshotCell;
pub use cell::SnapshotHandle;
pub use clock::{Clock, ManualClock, MonotonicClock, Timestamp};

/// Default spacing between automatic refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Service lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed; ticks are honored but `start` has not stamped the timer.
    Created,
    /// Started by its owner.
    Running,
    /// Stopped; ticks are ignored and no subscriptions remain.
    Stopped,
}

/// Handle returned by [`EnvironmentSnapshotService::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

type Subscriber = Box<dyn FnMut(&EnvironmentSnapshot) + Send>;

/// Keeps an [`EnvironmentSnapshot`] of the host fresh.
///
/// A single owner drives the service with `tick`; any number of readers
/// observe it through `snapshot` or a [`SnapshotHandle`].
pub struct EnvironmentSnapshotService<R: EnvironmentReader = SystemReader> {
    reader: R,
    refresh_interval: Duration,
    last_refresh: Timestamp,
    current: Arc<SnapshotCell>,
    state: Lifecycle,
    subscriptions: BTreeMap<SubscriptionId, Subscriber>,
    next_subscription: u64,
    refresh_count: u64,
}

impl EnvironmentSnapshotService<SystemReader> {
    /// Service reading the real host environment.
    #[must_use]
    pub fn for_host() -> Self {
        Self::new(SystemReader::new())
    }
}

impl<R: EnvironmentReader> EnvironmentSnapshotService<R> {
    /// Creates a service with the default 1 second interval and an empty snapshot.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            last_refresh: Timestamp::ZERO,
            current: Arc::new(SnapshotCell::default()),
            state: Lifecycle::Created,
            subscriptions: BTreeMap::new(),
            next_subscription: 1,
            refresh_count: 0,
        }
    }

    /// Sets the minimum spacing between automatic refreshes.
    #[must_use]
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Timestamp of the last refresh (or of `start`).
    #[must_use]
    pub const fn last_refresh(&self) -> Timestamp {
        self.last_refresh
    }

    #[must_use]
    pub const fn state(&self) -> Lifecycle {
        self.state
    }

    /// Number of completed refreshes.
    #[must_use]
    pub const fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    /// The reader this service queries.
    #[must_use]
    pub const fn reader(&self) -> &R {
        &self.reader
    }

    /// Marks the service running and stamps the timer with `now`.
    ///
    /// Restarting a stopped service is allowed.
    pub fn start(&mut self, now: Timestamp) {
        self.state = Lifecycle::Running;
        self.last_refresh = now;
        tracing::info!(
            interval_ms = self.refresh_interval.as_millis(),
            "environment snapshot service started"
        );
    }

    /// Stops the service and releases every subscription.
    ///
    /// Never fails; calling it with no subscriptions, or repeatedly, does nothing.
    pub fn stop(&mut self) {
        if self.state == Lifecycle::Stopped && self.subscriptions.is_empty() {
            return;
        }
        let released = self.subscriptions.len();
        self.subscriptions.clear();
        if self.state == Lifecycle::Running {
            tracing::info!(
                refreshes = self.refresh_count,
                released,
                "environment snapshot service stopped"
            );
        }
        self.state = Lifecycle::Stopped;
    }

    /// Refreshes if at least `refresh_interval` has passed since the last refresh.
    ///
    /// Returns whether a refresh happened. A `now` earlier than the last
    /// refresh counts as no time elapsed. Ignored once stopped.
    pub fn tick(&mut self, now: Timestamp) -> bool {
        if self.state == Lifecycle::Stopped {
            return false;
        }
        let elapsed = now.saturating_sub(self.last_refresh);
        if elapsed < self.refresh_interval {
            tracing::trace!(elapsed_ms = elapsed.as_millis(), "tick below refresh interval");
            return false;
        }
        self.refresh_now(now);
        true
    }

    /// Refreshes unconditionally and stamps the timer with `now`.
    ///
    /// The timer is stamped before subscribers run.
    pub fn refresh_now(&mut self, now: Timestamp) -> Arc<EnvironmentSnapshot> {
        let published = self.publish();
        self.last_refresh = now;
        self.notify(&published);
        published
    }

    /// Captures a new snapshot, publishes it, and notifies subscribers.
    ///
    /// Leaves the refresh timer alone.
    pub fn refresh(&mut self) -> Arc<EnvironmentSnapshot> {
        let published = self.publish();
        self.notify(&published);
        published
    }

    fn publish(&mut self) -> Arc<EnvironmentSnapshot> {
        let snapshot = capture(&mut self.reader);
        let published = self.current.publish(snapshot);
        self.refresh_count += 1;
        tracing::debug!(refresh = self.refresh_count, "environment snapshot published");
        published
    }

    /// Runs every subscriber. A subscriber that panics is removed.
    fn notify(&mut self, snapshot: &EnvironmentSnapshot) {
        let mut failed = Vec::new();
        for (id, subscriber) in &mut self.subscriptions {
            if panic::catch_unwind(AssertUnwindSafe(|| subscriber(snapshot))).is_err() {
                tracing::warn!(
                    subscription = id.0,
                    "subscriber panicked, subscription removed"
                );
                failed.push(*id);
            }
        }
        for id in failed {
            self.subscriptions.remove(&id);
        }
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<EnvironmentSnapshot> {
        self.current.load()
    }

    /// A read handle that can be moved to other threads.
    #[must_use]
    pub fn handle(&self) -> SnapshotHandle {
        SnapshotHandle::new(Arc::clone(&self.current))
    }

    /// Registers `callback` to run after every publish.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Stopped` if the service has been stopped.
    pub fn subscribe<F>(&mut self, callback: F) -> Result<SubscriptionId, ServiceError>
    where
        F: FnMut(&EnvironmentSnapshot) + Send + 'static,
    {
        if self.state == Lifecycle::Stopped {
            return Err(ServiceError::Stopped);
        }
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.insert(id, Box::new(callback));
        Ok(id)
    }

    /// Removes a subscription.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::UnknownSubscription` if `id` is not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> Result<(), ServiceError> {
        self.subscriptions
            .remove(&id)
            .map(|_| ())
            .ok_or(ServiceError::UnknownSubscription(id.0))
    }

    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl<R: EnvironmentReader> Drop for EnvironmentSnapshotService<R> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<R: EnvironmentReader> std::fmt::Debug for EnvironmentSnapshotService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentSnapshotService")
            .field("refresh_interval", &self.refresh_interval)
            .field("last_refresh", &self.last_refresh)
            .field("state", &self.state)
            .field("subscriptions", &self.subscriptions.len())
            .field("refresh_count", &self.refresh_count)
            .finish_non_exhaustive()
    }
}
