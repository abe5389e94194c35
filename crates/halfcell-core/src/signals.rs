#![forbid(unsafe_code)]

//! Process-wide OS signal hooks.
//!
//! [`install`] forwards window-resize, interrupt and termination signals to a
//! handler running on a dedicated thread. The hooks stay registered until the
//! returned [`SignalGuard`] is dropped.

use std::io;

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM, SIGWINCH};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// An OS notification relevant to a terminal application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsSignal {
    /// The terminal window changed size (`SIGWINCH`).
    Resize,
    /// The user asked to interrupt the process (`SIGINT`).
    Interrupt,
    /// The process is being asked to exit (`SIGTERM`).
    Terminate,
}

impl OsSignal {
    /// Whether this signal should close the application.
    #[inline]
    pub const fn is_close(self) -> bool {
        matches!(self, Self::Interrupt | Self::Terminate)
    }
}

/// Keeps signal hooks registered. Dropping it unregisters them.
#[derive(Debug)]
pub struct SignalGuard {
    #[cfg(unix)]
    handle: signal_hook::iterator::Handle,
    #[cfg(unix)]
    thread: Option<std::thread::JoinHandle<()>>,
}

/// Register the signal hooks and forward every delivery to `handler`.
#[cfg(unix)]
pub fn install<F>(mut handler: F) -> io::Result<SignalGuard>
where
    F: FnMut(OsSignal) + Send + 'static,
{
    let mut signals = Signals::new([SIGINT, SIGTERM, SIGWINCH]).map_err(io::Error::other)?;
    let handle = signals.handle();
    let thread = std::thread::spawn(move || {
        for signal in signals.forever() {
            let signal = match signal {
                SIGWINCH => OsSignal::Resize,
                SIGINT => OsSignal::Interrupt,
                SIGTERM => OsSignal::Terminate,
                _ => continue,
            };
            crate::debug!(?signal, "signal received");
            handler(signal);
        }
    });
    Ok(SignalGuard {
        handle,
        thread: Some(thread),
    })
}

/// Platforms without native signal delivery get an inert guard; interrupts
/// reach the application as key presses instead.
#[cfg(not(unix))]
pub fn install<F>(_handler: F) -> io::Result<SignalGuard>
where
    F: FnMut(OsSignal) + Send + 'static,
{
    Ok(SignalGuard {})
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_signals() {
        assert!(OsSignal::Interrupt.is_close());
        assert!(OsSignal::Terminate.is_close());
        assert!(!OsSignal::Resize.is_close());
    }

    #[cfg(unix)]
    #[test]
    fn resize_signal_is_forwarded() {
        use std::sync::mpsc;
        use std::time::Duration;

        let (tx, rx) = mpsc::channel();
        let guard = install(move |signal| {
            let _ = tx.send(signal);
        })
        .expect("install hooks");

        signal_hook::low_level::raise(SIGWINCH).expect("raise SIGWINCH");
        let received = rx.recv_timeout(Duration::from_secs(2)).expect("signal forwarded");
        assert_eq!(received, OsSignal::Resize);
        drop(guard);
    }
}
