//! Shared test utilities for terminal and layout integration tests
//!
//! `env sh -c "<script>"` stands in for a terminal emulator: `env` execs the
//! wrapper shell directly, so the spawned pid is the shell that writes the
//! handoff file and then execs the "interactive" command.

#![allow(dead_code)]

use std::path::Path;

use dashsplit::config::{ProcessSettings, TerminalSettings};
use dashsplit::debugger::LineChannel;
use dashsplit::process::ProcessSupervisor;
use dashsplit::terminal::EmulatorSpawner;
use dashsplit::window::NoopFocus;
use dashsplit::LayoutController;

pub type TestController = LayoutController<LineChannel<Vec<u8>>, EmulatorSpawner, NoopFocus>;

pub const HOME_DEVICE: &str = "/dev/pts/0";

/// Terminal settings that run `script` pieces without a real emulator
pub fn fake_terminal(tty_dir: &Path, device_probe: &str, shell: &str) -> TerminalSettings {
    TerminalSettings {
        program: "env".to_string(),
        args: Vec::new(),
        shell: shell.to_string(),
        device_probe: device_probe.to_string(),
        tty_dir: Some(tty_dir.to_path_buf()),
        poll_interval_ms: 20,
        spawn_timeout_ms: 5_000,
    }
}

pub fn fast_process_settings() -> ProcessSettings {
    ProcessSettings {
        term_grace_ms: 1_000,
        escalate_to_kill: true,
    }
}

/// A controller whose terminals report `/dev/pts/<pid>` and then sleep
pub fn controller(tty_dir: &Path) -> TestController {
    let settings = fake_terminal(tty_dir, "echo /dev/pts/$$", "sleep 30");
    LayoutController::new(
        LineChannel::new(Vec::new()),
        EmulatorSpawner::new(settings, fast_process_settings()),
        NoopFocus,
        ProcessSupervisor::new(fast_process_settings()),
        HOME_DEVICE,
    )
}

/// Dashboard commands the controller has written so far
pub fn commands(controller: &TestController) -> Vec<String> {
    String::from_utf8(controller.debugger().get_ref().clone())
        .expect("commands are utf-8")
        .lines()
        .map(str::to_string)
        .collect()
}

/// Pids of every tracked terminal
pub fn tracked_pids(controller: &TestController) -> Vec<u32> {
    controller
        .registry()
        .iter()
        .map(|(_, binding)| binding.pid())
        .collect()
}
