//! Configuration loading and management

mod io;
mod settings;

pub use settings::{DebuggerSettings, FocusSettings, ProcessSettings, TerminalSettings};

use serde::{Deserialize, Serialize};

use crate::Panel;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Device panels are returned to on teardown (detected from the controlling terminal if unset)
    #[serde(default)]
    pub home_device: Option<String>,

    /// Panels opened when `run` is started without any
    #[serde(default)]
    pub startup_layout: Vec<Panel>,

    #[serde(default)]
    pub terminal: TerminalSettings,

    #[serde(default)]
    pub process: ProcessSettings,

    #[serde(default)]
    pub focus: FocusSettings,

    #[serde(default)]
    pub debugger: DebuggerSettings,
}
