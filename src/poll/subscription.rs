//! Fixed-interval polling of a remote resource.
//!
//! A [`Subscription`] calls its fetch function once immediately and then on
//! every tick of a fixed interval, measured from the start of the previous
//! call. Calls are not serialized: a slow response can still be in flight
//! when the next tick fires. Two rules keep the published state coherent:
//!
//! - every call gets a sequence number, and a response is only applied if
//!   no later call has already been applied;
//! - the stopped flag is checked under the same lock that writes the state,
//!   so nothing lands after [`Subscription::stop`] returns.
//!
//! Failures never cancel the timer; they are published through
//! [`PollingState::error`] with the previous data kept, and the next tick
//! simply tries again.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::error::{DashError, ErrorInfo, Result};

/// What a consumer sees of a subscription.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollingState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ErrorInfo>,
}

impl<T> Default for PollingState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

#[derive(Debug, Default)]
struct Gate {
    stopped: bool,
    issued: u64,
    applied: u64,
    in_flight: usize,
}

struct Shared<T> {
    gate: Mutex<Gate>,
    tx: watch::Sender<PollingState<T>>,
}

impl<T> Shared<T> {
    fn gate(&self) -> MutexGuard<'_, Gate> {
        self.gate.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a new call; `None` once stopped.
    fn begin(&self) -> Option<u64> {
        let mut gate = self.gate();
        if gate.stopped {
            return None;
        }
        gate.issued += 1;
        gate.in_flight += 1;
        self.tx.send_modify(|s| s.loading = true);
        Some(gate.issued)
    }

    fn finish(&self, seq: u64, outcome: Result<T>) {
        let mut gate = self.gate();
        if gate.stopped {
            return;
        }
        gate.in_flight = gate.in_flight.saturating_sub(1);
        let loading = gate.in_flight > 0;

        if seq <= gate.applied {
            // overtaken by a newer call
            self.tx.send_modify(|s| s.loading = loading);
            return;
        }
        gate.applied = seq;

        match outcome {
            Ok(data) => self.tx.send_modify(|s| {
                s.data = Some(data);
                s.error = None;
                s.loading = loading;
            }),
            Err(e) => {
                warn!(seq, error = %e, "poll fetch failed");
                let info = ErrorInfo::from(&e);
                self.tx.send_modify(|s| {
                    s.error = Some(info);
                    s.loading = loading;
                });
            }
        }
    }

    /// A call that ended without an outcome (its future panicked or was
    /// dropped) still has to leave the in-flight count.
    fn abandon(&self, seq: u64) {
        let mut gate = self.gate();
        if gate.stopped {
            return;
        }
        warn!(seq, "poll fetch ended without a result");
        gate.in_flight = gate.in_flight.saturating_sub(1);
        let loading = gate.in_flight > 0;
        self.tx.send_modify(|s| s.loading = loading);
    }

    /// Returns `true` if this call did the stopping.
    fn stop(&self) -> bool {
        let mut gate = self.gate();
        !std::mem::replace(&mut gate.stopped, true)
    }
}

/// One registered call. Settles exactly once: with an outcome, or on drop.
struct InFlight<T> {
    shared: Arc<Shared<T>>,
    seq: u64,
    settled: bool,
}

impl<T> InFlight<T> {
    fn settle(mut self, outcome: Result<T>) {
        self.settled = true;
        self.shared.finish(self.seq, outcome);
    }
}

impl<T> Drop for InFlight<T> {
    fn drop(&mut self) {
        if !self.settled {
            self.shared.abandon(self.seq);
        }
    }
}

/// Register a call and spawn it. `false` once stopped.
fn launch<T, F, Fut>(shared: &Arc<Shared<T>>, fetch: &F) -> bool
where
    T: Send + Sync + 'static,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    let Some(seq) = shared.begin() else {
        return false;
    };
    let call = InFlight {
        shared: Arc::clone(shared),
        seq,
        settled: false,
    };
    let pending = fetch();
    tokio::spawn(async move {
        let outcome = pending.await;
        call.settle(outcome);
    });
    true
}

/// Handle to a running poll loop. Dropping it stops the loop.
pub struct Subscription<T> {
    shared: Arc<Shared<T>>,
    rx: watch::Receiver<PollingState<T>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<T> Subscription<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Start polling `fetch` every `interval`. Must be called inside a
    /// Tokio runtime.
    pub fn start<F, Fut>(fetch: F, interval: Duration) -> Result<Self>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        if interval.is_zero() {
            return Err(DashError::validation("poll interval must be greater than zero"));
        }

        let (tx, rx) = watch::channel(PollingState::default());
        let shared = Arc::new(Shared {
            gate: Mutex::new(Gate::default()),
            tx,
        });

        // The first call is issued here so `state()` reports it right away.
        launch(&shared, &fetch);

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let timer_shared = Arc::clone(&shared);
        let timer = tokio::spawn(async move {
            // the immediate tick belongs to the call above
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !launch(&timer_shared, &fetch) {
                    break;
                }
            }
        });

        info!(interval_ms = interval.as_millis() as u64, "subscription started");

        Ok(Self {
            shared,
            rx,
            timer: Mutex::new(Some(timer)),
        })
    }
}

impl<T> Subscription<T> {
    /// Stop polling. Idempotent; responses still in flight are discarded.
    pub fn stop(&self) {
        if self.shared.stop() {
            info!("subscription stopped");
        }
        let handle = self
            .timer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.shared.gate().stopped
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PollingState<T>
    where
        T: Clone,
    {
        self.rx.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    pub fn watch(&self) -> watch::Receiver<PollingState<T>> {
        self.rx.clone()
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A subscription bound to a set of parameters.
///
/// Changing the parameters tears the old subscription down and starts a new
/// one with empty state; the old timer never runs with new parameters.
pub struct KeyedSubscription<P, T, F> {
    params: P,
    interval: Duration,
    factory: Arc<F>,
    current: Subscription<T>,
}

impl<P, T, F, Fut> KeyedSubscription<P, T, F>
where
    P: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    pub fn start(params: P, interval: Duration, factory: F) -> Result<Self> {
        let factory = Arc::new(factory);
        let current = Self::spawn(&factory, &params, interval)?;
        Ok(Self {
            params,
            interval,
            factory,
            current,
        })
    }

    fn spawn(factory: &Arc<F>, params: &P, interval: Duration) -> Result<Subscription<T>> {
        let factory = Arc::clone(factory);
        let params = params.clone();
        Subscription::start(move || factory(params.clone()), interval)
    }

    /// Rebind to `params`. Returns `false` (and keeps polling) if unchanged.
    pub fn update(&mut self, params: P) -> Result<bool> {
        if params == self.params {
            return Ok(false);
        }
        self.current.stop();
        self.current = Self::spawn(&self.factory, &params, self.interval)?;
        self.params = params;
        Ok(true)
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    pub fn state(&self) -> PollingState<T> {
        self.current.state()
    }

    /// Receiver for the *current* binding; call again after [`update`](Self::update).
    pub fn watch(&self) -> watch::Receiver<PollingState<T>> {
        self.current.watch()
    }

    pub fn stop(&self) {
        self.current.stop();
    }
}
