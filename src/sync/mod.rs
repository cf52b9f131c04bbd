//! Reconciliation loop: keep live views consistent with server truth.
//!
//! Each open view runs one [`SyncLoop`] on a cadence. A tick fetches fresh
//! snapshots, projects them through the view's schemes and swaps caches
//! where the tuples differ, emitting a targeted [`Region`] rebuild. Ticks
//! are awaited inline, so refreshes per view never overlap and two
//! consecutive diffs never interleave a partial rebuild.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tracing::debug;

pub mod scheme;

pub use scheme::{
    order_scheme, request_scheme, requisite_scheme, wallet_scheme, ProjectionKey,
};

/// Which sub-region of a view needs a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Balance,
    RequestRow(i64),
    RequestDetail(i64),
    RequisiteRow(i64),
    OrderRow(i64),
    OrderDetail(i64),
}

/// A cached entity together with its canonical projection tuple.
#[derive(Debug, Clone)]
pub struct Tracked<T> {
    value: T,
    key: ProjectionKey,
}

impl<T> Tracked<T> {
    pub fn new(value: T, project: impl Fn(&T) -> ProjectionKey) -> Self {
        let key = project(&value);
        Tracked { value, key }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Swap in a fresh snapshot. Returns true when the projections differ,
    /// i.e. the owning view region must rebuild.
    pub fn update(&mut self, fresh: T, project: impl Fn(&T) -> ProjectionKey) -> bool {
        let fresh_key = project(&fresh);
        let changed = fresh_key != self.key;
        // The cache always takes the fresh value; visibility only decides
        // whether a rebuild is dispatched.
        self.value = fresh;
        self.key = fresh_key;
        changed
    }
}

/// One tracked entity bound to the view region it renders into.
#[derive(Debug, Clone)]
pub struct ViewCache<T> {
    tracked: Option<Tracked<T>>,
    region: Region,
}

impl<T> ViewCache<T> {
    pub fn new(region: Region) -> Self {
        ViewCache {
            tracked: None,
            region,
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.tracked.as_ref().map(Tracked::get)
    }

    /// Apply a fresh snapshot; dispatch a rebuild only when the projection
    /// changed and the view is visible. Hidden views still update their
    /// cache so they render current data on return.
    pub async fn reconcile(
        &mut self,
        fresh: T,
        project: impl Fn(&T) -> ProjectionKey,
        visible: bool,
        rebuilds: &mpsc::Sender<Region>,
    ) {
        let changed = match self.tracked.as_mut() {
            Some(tracked) => tracked.update(fresh, project),
            None => {
                self.tracked = Some(Tracked::new(fresh, project));
                true
            }
        };
        if changed && visible {
            debug!("rebuild {:?}", self.region);
            let _ = rebuilds.send(self.region).await;
        }
    }
}

/// Cadence driver for one view's reconciliation.
#[derive(Debug, Clone)]
pub struct SyncLoop {
    cancel: Arc<AtomicBool>,
    wake: Arc<Notify>,
}

impl SyncLoop {
    pub fn new() -> Self {
        SyncLoop {
            cancel: Arc::new(AtomicBool::new(false)),
            wake: Arc::new(Notify::new()),
        }
    }

    /// Request an immediate refresh. Wakes the sleeping loop; a tick
    /// already running absorbs the request (at most one refresh in flight).
    pub fn trigger(&self) {
        self.wake.notify_one();
    }

    /// Called on view unmount; the loop exits at the next await point.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
        self.wake.notify_one();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Spawn the loop. `tick` owns the fetch-diff-swap cycle; it must
    /// swallow per-fetch failures so one slow or failing dependency never
    /// blocks the others' diffs.
    pub fn spawn<F, Fut>(&self, interval: Duration, mut tick: F) -> JoinHandle<()>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let cancel = Arc::clone(&self.cancel);
        let wake = Arc::clone(&self.wake);
        tokio::spawn(async move {
            loop {
                if cancel.load(Ordering::Relaxed) {
                    break;
                }
                tick().await;
                if cancel.load(Ordering::Relaxed) {
                    break;
                }
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = wake.notified() => {}
                }
            }
        })
    }
}

impl Default for SyncLoop {
    fn default() -> Self {
        Self::new()
    }
}
