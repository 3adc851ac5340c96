//! Liveness probing and termination of terminal processes

use std::process::ExitStatus;
use std::time::Duration;

use tracing::{debug, warn};

use super::handle::{send_signal, Signal, TerminalProcess};
use crate::config::ProcessSettings;

/// Interval between exit checks while waiting out the grace period
const REAP_POLL: Duration = Duration::from_millis(20);

/// Outcome of [`ProcessSupervisor::terminate`]
#[derive(Debug)]
pub enum Termination {
    /// The process exited after SIGTERM (or had already exited)
    Exited(ExitStatus),
    /// The process ignored SIGTERM and was killed
    Killed(ExitStatus),
    /// The process is still running after every signal we were allowed to send
    Unresponsive,
    /// The termination request could not be delivered
    SignalFailed(std::io::Error),
}

impl Termination {
    /// Whether the process is known to be gone and reaped
    pub fn is_reaped(&self) -> bool {
        matches!(self, Termination::Exited(_) | Termination::Killed(_))
    }
}

/// Check whether a process exists, by pid alone.
///
/// Uses signal 0, which checks existence without delivering anything. Any
/// failure, including a permission error, counts as not alive.
pub fn probe(pid: u32) -> bool {
    send_signal(pid, Signal::Probe).is_ok()
}

/// Probes and terminates spawned terminal processes
#[derive(Debug, Clone)]
pub struct ProcessSupervisor {
    settings: ProcessSettings,
}

impl ProcessSupervisor {
    pub fn new(settings: ProcessSettings) -> Self {
        Self { settings }
    }

    /// Whether the process is still running.
    ///
    /// An exited child is reaped first so it is not mistaken for a live
    /// process by the signal-0 probe.
    pub fn is_alive(&self, process: &mut TerminalProcess) -> bool {
        if process.try_reap().is_some() {
            return false;
        }
        probe(process.pid())
    }

    /// Ask the process to exit and reap it.
    ///
    /// Sends SIGTERM and waits up to the configured grace period. If the
    /// process is still running and escalation is enabled, follows up with
    /// SIGKILL.
    pub fn terminate(&self, process: &mut TerminalProcess) -> Termination {
        if let Some(status) = process.try_reap() {
            return Termination::Exited(status);
        }

        let pid = process.pid();
        if let Err(e) = process.signal(Signal::Terminate) {
            // The child may have exited between the reap check and the signal
            if let Some(status) = process.try_reap() {
                return Termination::Exited(status);
            }
            warn!("Failed to send SIGTERM to pid {}: {}", pid, e);
            return Termination::SignalFailed(e);
        }

        let grace = Duration::from_millis(self.settings.term_grace_ms);
        if let Some(status) = process.wait_timeout(grace, REAP_POLL) {
            debug!("pid {} exited after SIGTERM: {}", pid, status);
            return Termination::Exited(status);
        }

        if !self.settings.escalate_to_kill {
            warn!(
                "pid {} still running {}ms after SIGTERM, leaving it",
                pid, self.settings.term_grace_ms
            );
            return Termination::Unresponsive;
        }

        warn!("pid {} ignored SIGTERM, sending SIGKILL", pid);
        if let Err(e) = process.signal(Signal::Kill) {
            if let Some(status) = process.try_reap() {
                return Termination::Exited(status);
            }
            return Termination::SignalFailed(e);
        }

        match process.wait_timeout(grace, REAP_POLL) {
            Some(status) => Termination::Killed(status),
            None => Termination::Unresponsive,
        }
    }
}

impl Default for ProcessSupervisor {
    fn default() -> Self {
        Self::new(ProcessSettings::default())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::process::{Command, Stdio};

    fn spawn(cmd: &str) -> TerminalProcess {
        let child = Command::new("sh")
            .arg("-c")
            .arg(cmd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("Failed to spawn sh");
        TerminalProcess::from_child(child)
    }

    fn supervisor(escalate: bool) -> ProcessSupervisor {
        ProcessSupervisor::new(ProcessSettings {
            term_grace_ms: 300,
            escalate_to_kill: escalate,
        })
    }

    #[test]
    fn test_probe_own_process() {
        assert!(probe(std::process::id()));
    }

    #[test]
    fn test_is_alive_tracks_exit() {
        let sup = supervisor(true);
        let mut process = spawn("exec sleep 30");
        assert!(sup.is_alive(&mut process));

        let outcome = sup.terminate(&mut process);
        assert!(outcome.is_reaped(), "unexpected outcome: {:?}", outcome);
        assert!(!sup.is_alive(&mut process));
    }

    #[test]
    fn test_zombie_is_not_alive() {
        let sup = supervisor(true);
        let mut process = spawn("exit 0");
        // Give it time to become a zombie without reaping it ourselves
        std::thread::sleep(Duration::from_millis(200));
        assert!(!sup.is_alive(&mut process));
    }

    #[test]
    fn test_terminate_already_exited() {
        let sup = supervisor(true);
        let mut process = spawn("exit 7");
        std::thread::sleep(Duration::from_millis(200));
        match sup.terminate(&mut process) {
            Termination::Exited(status) => assert_eq!(status.code(), Some(7)),
            other => panic!("expected Exited, got {:?}", other),
        }
    }

    #[test]
    fn test_escalates_when_sigterm_ignored() {
        let sup = supervisor(true);
        let mut process = spawn("trap '' TERM; while true; do sleep 0.05; done");
        std::thread::sleep(Duration::from_millis(100));
        let outcome = sup.terminate(&mut process);
        assert!(matches!(outcome, Termination::Killed(_)), "got {:?}", outcome);
    }

    #[test]
    fn test_no_escalation_leaves_process_running() {
        let sup = supervisor(false);
        let mut process = spawn("trap '' TERM; while true; do sleep 0.05; done");
        std::thread::sleep(Duration::from_millis(100));
        let outcome = sup.terminate(&mut process);
        assert!(matches!(outcome, Termination::Unresponsive), "got {:?}", outcome);

        process.signal(Signal::Kill).unwrap();
        process.wait_timeout(Duration::from_secs(5), REAP_POLL);
    }
}
