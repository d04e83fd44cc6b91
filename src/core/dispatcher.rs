//! # Dispatch pass: notify every registered handler in parallel.
//!
//! ## Flow
//! ```text
//! dispatch()
//!   ├─► subs = registry.snapshot()            (lock held only for the copy)
//!   ├─► snap = store.snapshot()               (one stable value per kind)
//!   ├─► publish DispatchStarted{ pass, count }
//!   ├─► for sub in subs (insertion order):
//!   │      spawn_blocking(|| catch_unwind(|| sub.handler.on_value(snap.value(sub.kind))))
//!   ├─► join every worker, in order
//!   │      └─ panic ─► HandlerFault + publish HandlerFaulted
//!   └─► publish DispatchCompleted{ pass, count } ─► DispatchReport
//! ```
//!
//! ## Rules
//! - Every subscription present in the copy is invoked exactly once per pass.
//! - Handlers of the same kind receive equal values (one snapshot per pass).
//! - Workers run on Tokio's blocking pool: handlers may block freely.
//! - A faulting handler never stops its siblings or the join; it is never retried.
//! - No lock is held while handlers run, so a handler may register or even dispatch.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::task::JoinHandle;

use crate::error::HandlerFault;
use crate::events::{Bus, Event, EventKind};
use crate::observers::panic_message;

use super::{
    registry::{Registry, Subscription},
    store::SnapshotStore,
};

/// Outcome of one dispatch pass.
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    /// Pass number (1-based, per hub).
    pub pass: u64,
    /// Subscriptions taken into this pass.
    pub notified: usize,
    /// Handlers that faulted, in insertion order.
    pub faults: Vec<HandlerFault>,
}

impl DispatchReport {
    /// Number of faulted handlers.
    pub fn failed(&self) -> usize {
        self.faults.len()
    }

    /// Number of handlers that returned normally.
    pub fn completed(&self) -> usize {
        self.notified - self.failed()
    }

    /// True if no handler faulted.
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

/// Runs dispatch passes over a registry and a snapshot store.
pub struct Dispatcher {
    registry: Arc<Registry>,
    store: Arc<SnapshotStore>,
    bus: Bus,
    passes: AtomicU64,
}

impl Dispatcher {
    pub(crate) fn new(registry: Arc<Registry>, store: Arc<SnapshotStore>, bus: Bus) -> Self {
        Self {
            registry,
            store,
            bus,
            passes: AtomicU64::new(0),
        }
    }

    /// Notifies all currently registered handlers and waits for them.
    ///
    /// Must be awaited inside a Tokio runtime.
    pub async fn dispatch(&self) -> DispatchReport {
        let pass = self.passes.fetch_add(1, Ordering::Relaxed) + 1;
        let subs = self.registry.snapshot();
        let snap = self.store.snapshot();

        self.bus.publish(
            Event::new(EventKind::DispatchStarted)
                .with_pass(pass)
                .with_count(subs.len()),
        );

        let workers: Vec<(Subscription, JoinHandle<Result<(), String>>)> = subs
            .into_iter()
            .map(|sub| {
                let handler = Arc::clone(sub.handler());
                let value = snap.value(sub.kind());
                let join = tokio::task::spawn_blocking(move || {
                    panic::catch_unwind(AssertUnwindSafe(|| handler.on_value(value)))
                        .map_err(|payload| panic_message(&*payload))
                });
                (sub, join)
            })
            .collect();

        let mut report = DispatchReport {
            pass,
            notified: workers.len(),
            faults: Vec::new(),
        };

        for (sub, join) in workers {
            let reason = match join.await {
                Ok(Ok(())) => continue,
                Ok(Err(msg)) => msg,
                Err(join_err) => join_err.to_string(),
            };
            let fault = HandlerFault {
                index: sub.index(),
                handler: Arc::from(sub.handler().name()),
                kind: sub.kind(),
                reason,
            };
            self.bus.publish(
                Event::new(EventKind::HandlerFaulted)
                    .with_pass(pass)
                    .with_handler(Arc::clone(&fault.handler))
                    .with_sensor(fault.kind)
                    .with_index(fault.index)
                    .with_reason(fault.reason.as_str()),
            );
            report.faults.push(fault);
        }

        let mut done = Event::new(EventKind::DispatchCompleted)
            .with_pass(pass)
            .with_count(report.completed());
        if !report.is_clean() {
            done = done.with_reason(format!("faults={}", report.failed()));
        }
        self.bus.publish(done);

        report
    }

    /// Number of passes started so far.
    pub fn passes(&self) -> u64 {
        self.passes.load(Ordering::Relaxed)
    }
}
