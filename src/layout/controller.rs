//! Teardown-then-rebuild transitions between dashboard layouts

use tracing::{debug, info, warn};

use super::report::{ControllerState, LayoutReport, SpawnFailure, TeardownReport};
use crate::debugger::{DebuggerChannel, DebuggerCommand};
use crate::process::ProcessSupervisor;
use crate::registry::{PanelBinding, PanelRegistry};
use crate::terminal::{SpawnedTerminal, Spawner};
use crate::window::WindowFocus;
use crate::Layout;

/// Owns the active panel terminals and moves between layouts.
///
/// The controller is the only writer of the registry. Dropping it (or calling
/// [`shutdown`](Self::shutdown)) tears down every active panel exactly once:
/// outputs go back to the home device and the terminals are closed.
pub struct LayoutController<D, S, W>
where
    D: DebuggerChannel,
    S: Spawner,
    W: WindowFocus,
{
    debugger: D,
    spawner: S,
    focus: W,
    supervisor: ProcessSupervisor,
    registry: PanelRegistry,
    /// Device panel output returns to when its terminal closes
    home_device: String,
    layout: Layout,
    state: ControllerState,
    shut_down: bool,
}

impl<D, S, W> LayoutController<D, S, W>
where
    D: DebuggerChannel,
    S: Spawner,
    W: WindowFocus,
{
    pub fn new(
        debugger: D,
        spawner: S,
        focus: W,
        supervisor: ProcessSupervisor,
        home_device: impl Into<String>,
    ) -> Self {
        Self {
            debugger,
            spawner,
            focus,
            supervisor,
            registry: PanelRegistry::new(),
            home_device: home_device.into(),
            layout: Layout::source_only(),
            state: ControllerState::Idle,
            shut_down: false,
        }
    }

    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    /// Layout most recently declared to the debugger
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn home_device(&self) -> &str {
        &self.home_device
    }

    pub fn debugger(&self) -> &D {
        &self.debugger
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    pub fn focus(&self) -> &W {
        &self.focus
    }

    /// Declare the source-only layout without touching any terminals
    pub fn declare_initial_layout(&mut self) {
        self.layout = Layout::source_only();
        self.issue(DebuggerCommand::SetLayout(self.layout.clone()));
    }

    /// Replace the current layout with `requested`.
    ///
    /// Every active panel is torn down before the first new terminal is
    /// spawned. Unknown names are dropped. A panel whose terminal fails to
    /// open is reported and skipped; the rest of the layout still goes up.
    pub fn apply_layout<I, T>(&mut self, requested: I) -> LayoutReport
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.state = ControllerState::Transitioning;

        let teardown = self.teardown();

        let (layout, dropped) = Layout::from_requested(requested);
        if !dropped.is_empty() {
            debug!("Ignoring unknown panels: {}", dropped.join(", "));
        }

        self.issue(DebuggerCommand::SetLayout(layout.clone()));
        self.layout = layout.clone();
        info!("Dashboard layout set to: {}", layout);

        let mut pending: Vec<SpawnedTerminal> = Vec::new();
        let mut failed = Vec::new();
        for &panel in layout.panels() {
            match self.spawner.spawn(panel) {
                Ok(terminal) => pending.push(terminal),
                Err(error) => {
                    warn!("Could not open a terminal for {}: {}", panel, error);
                    failed.push(SpawnFailure { panel, error });
                }
            }
        }

        let focus_actions = self.compensate_focus(pending.len());

        let mut bound = Vec::with_capacity(pending.len());
        for terminal in pending {
            bound.push((terminal.panel, terminal.device.clone()));
            self.bind(terminal);
        }

        self.issue(DebuggerCommand::Refresh);
        self.state = ControllerState::Idle;

        LayoutReport {
            teardown,
            layout,
            dropped,
            bound,
            failed,
            focus_actions,
        }
    }

    /// Route every active panel back to the home device and close its terminal.
    ///
    /// Entries are cleared whether or not termination succeeded.
    pub fn teardown(&mut self) -> TeardownReport {
        let mut report = TeardownReport::default();

        for panel in self.registry.active() {
            self.issue(DebuggerCommand::SetPanelOutput {
                panel,
                device: self.home_device.clone(),
            });

            if let Some(binding) = self.registry.get_mut(panel) {
                let pid = binding.pid();
                if self.supervisor.is_alive(&mut binding.process) {
                    let outcome = self.supervisor.terminate(&mut binding.process);
                    info!("Closed {} panel with PID {}", panel, pid);
                    report.terminated.push((panel, outcome));
                } else {
                    debug!("{} terminal (pid {}) already gone", panel, pid);
                }
            }

            self.registry.clear(panel);
            report.released.push(panel);
        }

        report
    }

    /// Tear down and consume the controller
    pub fn shutdown(mut self) -> TeardownReport {
        self.final_teardown()
    }

    fn final_teardown(&mut self) -> TeardownReport {
        if self.shut_down {
            return TeardownReport::default();
        }
        self.shut_down = true;
        self.teardown()
    }

    fn bind(&mut self, terminal: SpawnedTerminal) {
        let SpawnedTerminal {
            panel,
            device,
            process,
        } = terminal;

        if let Some(mut superseded) = self
            .registry
            .set(panel, PanelBinding::new(device.clone(), process))
        {
            warn!(
                "{} requested more than once, closing its earlier terminal (pid {})",
                panel,
                superseded.pid()
            );
            self.supervisor.terminate(&mut superseded.process);
        }

        self.issue(DebuggerCommand::SetPanelOutput {
            panel,
            device: device.clone(),
        });
        info!("{} panel output has been redirected to: {}", panel, device);
    }

    fn compensate_focus(&mut self, spawned: usize) -> usize {
        for _ in 0..spawned {
            if let Err(e) = self.focus.focus_previous() {
                warn!("Failed to return focus to the debugger window: {}", e);
            }
        }
        spawned
    }

    fn issue(&mut self, command: DebuggerCommand) {
        if let Err(e) = self.debugger.send(&command) {
            warn!("Debugger command '{}' failed: {}", command, e);
        }
    }
}

impl<D, S, W> Drop for LayoutController<D, S, W>
where
    D: DebuggerChannel,
    S: Spawner,
    W: WindowFocus,
{
    fn drop(&mut self) {
        self.final_teardown();
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::ProcessSettings;
    use crate::process::{probe, TerminalProcess};
    use crate::terminal::SpawnError;
    use crate::Panel;
    use std::cell::RefCell;
    use std::io;
    use std::process::{Command, Stdio};
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct RecordingChannel(Log);

    impl DebuggerChannel for RecordingChannel {
        fn send(&mut self, command: &DebuggerCommand) -> io::Result<()> {
            self.0.borrow_mut().push(command.to_string());
            Ok(())
        }
    }

    struct CountingFocus(Log);

    impl WindowFocus for CountingFocus {
        fn focus_previous(&mut self) -> io::Result<()> {
            self.0.borrow_mut().push("focus".to_string());
            Ok(())
        }
    }

    /// Spawns `sleep` in place of a terminal and hands out fake devices
    struct SleepSpawner {
        log: Log,
        next: u32,
        fail: Vec<Panel>,
    }

    impl Spawner for SleepSpawner {
        fn spawn(&mut self, panel: Panel) -> Result<SpawnedTerminal, SpawnError> {
            self.log.borrow_mut().push(format!("spawn {}", panel));
            if self.fail.contains(&panel) {
                return Err(SpawnError::Timeout {
                    panel,
                    waited: std::time::Duration::from_millis(1),
                });
            }
            let child = Command::new("sleep")
                .arg("30")
                .stdin(Stdio::null())
                .spawn()
                .map_err(|source| SpawnError::Launch {
                    program: "sleep".to_string(),
                    source,
                })?;
            self.next += 1;
            Ok(SpawnedTerminal {
                panel,
                device: format!("/dev/pts/{}", 100 + self.next),
                process: TerminalProcess::from_child(child),
            })
        }
    }

    type TestController = LayoutController<RecordingChannel, SleepSpawner, CountingFocus>;

    fn controller(fail: Vec<Panel>) -> (TestController, Log) {
        let log: Log = Rc::default();
        let supervisor = ProcessSupervisor::new(ProcessSettings {
            term_grace_ms: 1000,
            escalate_to_kill: true,
        });
        let controller = LayoutController::new(
            RecordingChannel(log.clone()),
            SleepSpawner {
                log: log.clone(),
                next: 0,
                fail,
            },
            CountingFocus(log.clone()),
            supervisor,
            "/dev/pts/0",
        );
        (controller, log)
    }

    fn pids(controller: &TestController) -> Vec<u32> {
        controller.registry().iter().map(|(_, b)| b.pid()).collect()
    }

    #[test]
    fn test_transition_order() {
        let (mut controller, log) = controller(vec![]);
        let report = controller.apply_layout(["stack", "bogus", "threads"]);

        assert_eq!(report.layout.to_string(), "source stack threads");
        assert_eq!(report.dropped, vec!["bogus".to_string()]);
        assert_eq!(report.spawned(), 2);
        assert_eq!(report.focus_actions, 2);
        assert_eq!(controller.state(), ControllerState::Idle);

        assert_eq!(
            *log.borrow(),
            vec![
                "dashboard -layout source stack threads",
                "spawn stack",
                "spawn threads",
                "focus",
                "focus",
                "dashboard stack -output /dev/pts/101",
                "dashboard threads -output /dev/pts/102",
                "dashboard",
            ]
        );
        assert!(log.borrow().iter().all(|line| !line.contains("bogus")));
    }

    #[test]
    fn test_reapplying_same_layout_replaces_terminals() {
        let (mut controller, log) = controller(vec![]);
        controller.apply_layout(["memory", "registers"]);
        let first = pids(&controller);
        assert_eq!(first.len(), 2);

        log.borrow_mut().clear();
        let report = controller.apply_layout(["memory", "registers"]);

        assert_eq!(report.teardown.released, vec![Panel::Memory, Panel::Registers]);
        assert_eq!(report.teardown.terminated.len(), 2);
        assert!(report.teardown.terminated.iter().all(|(_, t)| t.is_reaped()));
        assert_eq!(controller.registry().len(), 2);
        for pid in first {
            assert!(!probe(pid), "old terminal {} still running", pid);
        }

        // Old panels are released before anything new is spawned
        let lines = log.borrow();
        let first_spawn = lines.iter().position(|l| l.starts_with("spawn")).unwrap();
        let last_release = lines
            .iter()
            .rposition(|l| l.ends_with("-output /dev/pts/0"))
            .unwrap();
        assert!(last_release < first_spawn);
    }

    #[test]
    fn test_only_requested_panels_remain() {
        let (mut controller, _log) = controller(vec![]);
        controller.apply_layout(["stack", "memory", "history"]);
        controller.apply_layout(["history"]);
        assert_eq!(controller.registry().active(), vec![Panel::History]);
    }

    #[test]
    fn test_empty_request_clears_everything() {
        let (mut controller, log) = controller(vec![]);
        controller.apply_layout(["variables"]);
        log.borrow_mut().clear();

        let report = controller.apply_layout(Vec::<String>::new());
        assert_eq!(report.layout.to_string(), "source");
        assert_eq!(report.focus_actions, 0);
        assert!(controller.registry().is_empty());
        assert_eq!(
            *log.borrow(),
            vec![
                "dashboard variables -output /dev/pts/0",
                "dashboard -layout source",
                "dashboard",
            ]
        );
    }

    #[test]
    fn test_spawn_failure_is_reported_and_skipped() {
        let (mut controller, log) = controller(vec![Panel::Assembly]);
        let report = controller.apply_layout(["stack", "assembly", "threads"]);

        assert!(!report.is_complete());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].panel, Panel::Assembly);
        assert_eq!(report.focus_actions, 2);
        assert_eq!(controller.registry().active(), vec![Panel::Stack, Panel::Threads]);
        assert_eq!(log.borrow().iter().filter(|l| *l == "focus").count(), 2);
    }

    #[test]
    fn test_duplicate_request_does_not_orphan_a_terminal() {
        let (mut controller, _log) = controller(vec![]);
        let report = controller.apply_layout(["stack", "stack"]);

        assert_eq!(report.layout.to_string(), "source stack stack");
        assert_eq!(report.spawned(), 2);
        assert_eq!(report.focus_actions, 2);
        assert_eq!(controller.registry().len(), 1);
        assert_eq!(
            controller.registry().get(Panel::Stack).unwrap().device,
            "/dev/pts/102"
        );
    }

    #[test]
    fn test_drop_tears_down_once() {
        let (mut controller, log) = controller(vec![]);
        controller.apply_layout(["breakpoints", "expressions"]);
        let live = pids(&controller);
        log.borrow_mut().clear();

        drop(controller);

        assert_eq!(
            *log.borrow(),
            vec![
                "dashboard expressions -output /dev/pts/0",
                "dashboard breakpoints -output /dev/pts/0",
            ]
        );
        for pid in live {
            assert!(!probe(pid));
        }
    }

    #[test]
    fn test_shutdown_then_drop_does_not_repeat() {
        let (mut controller, log) = controller(vec![]);
        controller.apply_layout(["threads"]);
        log.borrow_mut().clear();

        let report = controller.shutdown();
        assert_eq!(report.released, vec![Panel::Threads]);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_shutdown_without_any_layout() {
        let (controller, log) = controller(vec![]);
        let report = controller.shutdown();
        assert!(report.released.is_empty());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_dead_terminal_is_still_released() {
        let (mut controller, log) = controller(vec![]);
        controller.apply_layout(["stack"]);
        let pid = pids(&controller)[0];
        crate::process::send_signal(pid, crate::process::Signal::Kill).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(200));
        log.borrow_mut().clear();

        let report = controller.teardown();
        assert_eq!(report.released, vec![Panel::Stack]);
        assert!(report.terminated.is_empty());
        assert!(controller.registry().is_empty());
        assert_eq!(*log.borrow(), vec!["dashboard stack -output /dev/pts/0"]);
    }
}
