//! Owned handle to a spawned terminal emulator process

use std::io;
use std::process::{Child, ExitStatus};
use std::time::{Duration, Instant};

/// Signals the supervisor sends to terminal processes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Existence probe, delivers nothing
    Probe,
    Terminate,
    Kill,
}

impl Signal {
    #[cfg(unix)]
    fn as_raw(self) -> libc::c_int {
        match self {
            Signal::Probe => 0,
            Signal::Terminate => libc::SIGTERM,
            Signal::Kill => libc::SIGKILL,
        }
    }
}

/// Send `signal` to `pid`.
#[cfg(unix)]
pub fn send_signal(pid: u32, signal: Signal) -> io::Result<()> {
    let pid = libc::pid_t::try_from(pid)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "pid out of range"))?;

    // SAFETY: kill(2) has no memory-safety preconditions.
    let rc = unsafe { libc::kill(pid, signal.as_raw()) };
    if rc == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
pub fn send_signal(_pid: u32, _signal: Signal) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "signals are only supported on unix",
    ))
}

/// A terminal process the orchestrator spawned and is responsible for reaping.
///
/// Once the child has been waited on, the exit status is cached and the
/// process is never signalled again, so a recycled pid cannot be hit.
#[derive(Debug)]
pub struct TerminalProcess {
    pid: u32,
    child: Child,
    exit_status: Option<ExitStatus>,
}

impl TerminalProcess {
    pub fn from_child(child: Child) -> Self {
        Self {
            pid: child.id(),
            child,
            exit_status: None,
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Exit status, if the process has already been reaped
    pub fn exit_status(&self) -> Option<ExitStatus> {
        self.exit_status
    }

    /// Reap the process if it has exited, without blocking
    pub fn try_reap(&mut self) -> Option<ExitStatus> {
        if self.exit_status.is_none() {
            match self.child.try_wait() {
                Ok(status) => self.exit_status = status,
                Err(e) => tracing::debug!("try_wait on pid {} failed: {}", self.pid, e),
            }
        }
        self.exit_status
    }

    /// Poll for exit until `timeout` elapses
    pub fn wait_timeout(&mut self, timeout: Duration, poll: Duration) -> Option<ExitStatus> {
        let started = Instant::now();
        loop {
            if let Some(status) = self.try_reap() {
                return Some(status);
            }
            if started.elapsed() >= timeout {
                return None;
            }
            std::thread::sleep(poll);
        }
    }

    /// Send a signal unless the process is already reaped
    pub fn signal(&self, signal: Signal) -> io::Result<()> {
        if self.exit_status.is_some() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("process {} already exited", self.pid),
            ));
        }
        send_signal(self.pid, signal)
    }
}
