//! Termination signals that end a `run` session
//!
//! Panel teardown lives in the controller's `Drop`; this module only turns
//! SIGINT, SIGTERM and SIGHUP into a normal return so that drop actually
//! happens instead of the process dying mid-loop.

use std::fmt;
use std::io;

/// Signal that ended the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Interrupt,
    Terminate,
    Hangup,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShutdownReason::Interrupt => "SIGINT",
            ShutdownReason::Terminate => "SIGTERM",
            ShutdownReason::Hangup => "SIGHUP",
        };
        f.write_str(name)
    }
}

/// Installed handlers for the signals that end a session.
///
/// Once installed, the default disposition (immediate exit) no longer
/// applies; a signal that arrives while a transition is blocking is
/// delivered by the next [`recv`](Self::recv).
#[cfg(unix)]
pub struct ShutdownSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
    hangup: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ShutdownSignals {
    /// Install the handlers. Must be called inside a tokio runtime.
    pub fn install() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
            hangup: signal(SignalKind::hangup())?,
        })
    }

    /// Wait for the next shutdown signal. Cancel-safe.
    pub async fn recv(&mut self) -> ShutdownReason {
        tokio::select! {
            _ = self.interrupt.recv() => ShutdownReason::Interrupt,
            _ = self.terminate.recv() => ShutdownReason::Terminate,
            _ = self.hangup.recv() => ShutdownReason::Hangup,
        }
    }
}

#[cfg(not(unix))]
pub struct ShutdownSignals;

#[cfg(not(unix))]
impl ShutdownSignals {
    pub fn install() -> io::Result<Self> {
        Ok(Self)
    }

    pub async fn recv(&mut self) -> ShutdownReason {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
        ShutdownReason::Interrupt
    }
}

/// Wait on optional handlers; never resolves when there are none
pub async fn recv_optional(signals: &mut Option<ShutdownSignals>) -> ShutdownReason {
    match signals {
        Some(signals) => signals.recv().await,
        None => std::future::pending().await,
    }
}
