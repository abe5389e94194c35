#![forbid(unsafe_code)]

//! Timer-driven tick producers.
//!
//! Each cadence runs on its own thread and pushes ticks into a shared
//! `mpsc` channel, which is the single point where the update and render
//! streams merge. Ticks arrive at the consumer in the order their timers
//! fired.
//!
//! A cadence does not start its next wait until the consumer acknowledges the
//! current tick through its [`TickAck`], reporting how long handling took.
//! The update cadence subtracts half of that from its next wait to absorb
//! drift; the render cadence keeps its plain interval.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// How often a producer waiting for an acknowledgement checks for stop.
const ACK_POLL: Duration = Duration::from_millis(50);

/// Which stream a cadence feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CadenceKind {
    /// Component updates; compensates for time spent handling ticks.
    Update,
    /// Frame renders; fixed interval.
    Render,
}

impl CadenceKind {
    /// Wait before the next tick given the time spent on the previous one.
    pub fn next_wait(self, interval: Duration, spent: Duration) -> Duration {
        match self {
            Self::Update => interval.saturating_sub(spent / 2),
            Self::Render => interval,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Render => "render",
        }
    }
}

/// Acknowledgement handle carried by every tick.
///
/// Dropping it unacknowledged releases the producer as if no time was spent.
#[derive(Debug)]
pub struct TickAck {
    reply: mpsc::Sender<Duration>,
}

impl TickAck {
    /// Report how long the tick took and release the producer.
    pub fn done(self, spent: Duration) {
        let _ = self.reply.send(spent);
    }
}

/// Signal for stopping a cadence.
#[derive(Clone)]
pub(crate) struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    /// Create a new stop signal pair (signal, trigger).
    pub(crate) fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: inner.clone(),
        };
        (signal, StopTrigger { inner })
    }

    /// Check if the stop signal has been triggered.
    pub(crate) fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Wait for either the stop signal or a timeout.
    ///
    /// Returns `true` if stopped, `false` if timed out. Loops over spurious
    /// wakeups until the full duration has elapsed.
    pub(crate) fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let start = Instant::now();
        loop {
            if *stopped {
                return true;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            let (guard, _) = cvar
                .wait_timeout(stopped, duration - elapsed)
                .unwrap_or_else(PoisonError::into_inner);
            stopped = guard;
        }
    }
}

/// Trigger to stop a cadence from the consumer side.
pub(crate) struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopTrigger {
    pub(crate) fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        *stopped = true;
        cvar.notify_all();
    }
}

/// A running cadence thread.
pub(crate) struct Cadence {
    kind: CadenceKind,
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
}

impl Cadence {
    /// Start a cadence that sends `make_tick(ack)` every `interval`.
    pub(crate) fn spawn<T: Send + 'static>(
        kind: CadenceKind,
        interval: Duration,
        sender: mpsc::Sender<T>,
        make_tick: fn(TickAck) -> T,
    ) -> Self {
        let (signal, trigger) = StopSignal::new();
        let thread = thread::Builder::new()
            .name(format!("halfcell-{}", kind.name()))
            .spawn(move || run(kind, interval, &sender, make_tick, &signal));
        let thread = match thread {
            Ok(handle) => Some(handle),
            Err(error) => {
                tracing::error!(cadence = kind.name(), %error, "failed to spawn cadence thread");
                None
            }
        };
        tracing::debug!(cadence = kind.name(), ?interval, "cadence started");
        Self {
            kind,
            trigger,
            thread,
        }
    }

    /// Stop the cadence and join its thread.
    pub(crate) fn stop(mut self) {
        self.trigger.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
        tracing::debug!(cadence = self.kind.name(), "cadence stopped");
    }
}

impl Drop for Cadence {
    fn drop(&mut self) {
        self.trigger.stop();
    }
}

fn run<T>(
    kind: CadenceKind,
    interval: Duration,
    sender: &mpsc::Sender<T>,
    make_tick: fn(TickAck) -> T,
    stop: &StopSignal,
) {
    let mut wait = interval;
    loop {
        if stop.wait_timeout(wait) {
            return;
        }
        let (reply, acks) = mpsc::channel();
        if sender.send(make_tick(TickAck { reply })).is_err() {
            return;
        }
        let spent = loop {
            match acks.recv_timeout(ACK_POLL) {
                Ok(spent) => break spent,
                Err(RecvTimeoutError::Disconnected) => break Duration::ZERO,
                Err(RecvTimeoutError::Timeout) => {
                    if stop.is_stopped() {
                        return;
                    }
                }
            }
        };
        wait = kind.next_wait(interval, spent);
        tracing::trace!(cadence = kind.name(), ?spent, ?wait, "tick acknowledged");
    }
}
