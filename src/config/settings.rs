//! Settings sections of the configuration file

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How panel terminals are launched and discovered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSettings {
    /// Terminal emulator binary (must stay in the foreground until its window closes)
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before the wrapper shell, e.g. `-e` for st and xterm
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Interactive shell exec'd once the device path has been written
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Command that prints the terminal's device path
    #[serde(default = "default_device_probe")]
    pub device_probe: String,

    /// Directory for `<panel>_tty` handoff files (defaults to the system temp dir)
    #[serde(default)]
    pub tty_dir: Option<PathBuf>,

    /// How often to check for the handoff file
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Give up on a terminal that has not reported its device after this long
    #[serde(default = "default_spawn_timeout_ms")]
    pub spawn_timeout_ms: u64,
}

/// How spawned terminals are shut down
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSettings {
    /// Time a terminal gets to exit after SIGTERM
    #[serde(default = "default_term_grace_ms")]
    pub term_grace_ms: u64,

    /// Send SIGKILL to terminals that outlive the grace period
    #[serde(default = "default_escalate_to_kill")]
    pub escalate_to_kill: bool,
}

/// Returning focus to the debugger window after terminals open
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSettings {
    /// Send one focus-previous key per spawned terminal
    #[serde(default = "default_focus_enabled")]
    pub enabled: bool,

    /// Key injection tool
    #[serde(default = "default_focus_program")]
    pub program: String,

    /// Window manager binding that focuses the previous window
    #[serde(default = "default_focus_key")]
    pub key: String,
}

/// Debugger command syntax
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebuggerSettings {
    /// Command every dashboard instruction starts with
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
}

fn default_program() -> String {
    "st".to_string()
}

fn default_args() -> Vec<String> {
    vec!["-e".to_string()]
}

fn default_shell() -> String {
    "sh".to_string()
}

fn default_device_probe() -> String {
    "tty".to_string()
}

fn default_poll_interval_ms() -> u64 {
    100
}

fn default_spawn_timeout_ms() -> u64 {
    10_000
}

fn default_term_grace_ms() -> u64 {
    500
}

fn default_escalate_to_kill() -> bool {
    true
}

fn default_focus_enabled() -> bool {
    true
}

fn default_focus_program() -> String {
    "xdotool".to_string()
}

fn default_focus_key() -> String {
    "alt+k".to_string()
}

fn default_command_prefix() -> String {
    "dashboard".to_string()
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            shell: default_shell(),
            device_probe: default_device_probe(),
            tty_dir: None,
            poll_interval_ms: default_poll_interval_ms(),
            spawn_timeout_ms: default_spawn_timeout_ms(),
        }
    }
}

impl TerminalSettings {
    /// Directory the handoff files live in
    pub fn tty_dir(&self) -> PathBuf {
        self.tty_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Default for ProcessSettings {
    fn default() -> Self {
        Self {
            term_grace_ms: default_term_grace_ms(),
            escalate_to_kill: default_escalate_to_kill(),
        }
    }
}

impl Default for FocusSettings {
    fn default() -> Self {
        Self {
            enabled: default_focus_enabled(),
            program: default_focus_program(),
            key: default_focus_key(),
        }
    }
}

impl Default for DebuggerSettings {
    fn default() -> Self {
        Self {
            command_prefix: default_command_prefix(),
        }
    }
}
