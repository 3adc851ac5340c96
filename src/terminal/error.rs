use std::process::ExitStatus;
use std::time::Duration;

use crate::Panel;

/// Error type for terminal spawning
#[derive(Debug, thiserror::Error)]
pub enum SpawnError {
    #[error("Failed to launch terminal emulator '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Terminal for {panel} exited before reporting its device ({status})")]
    ExitedEarly { panel: Panel, status: ExitStatus },

    #[error("Terminal for {panel} did not report its device within {}ms", .waited.as_millis())]
    Timeout { panel: Panel, waited: Duration },

    #[error("Terminal for {panel} reported '{output}', which is not a device path")]
    NotATerminal { panel: Panel, output: String },

    #[error("Failed to read device handoff file: {0}")]
    Io(#[from] std::io::Error),
}

impl SpawnError {
    /// Panel the failed spawn was for, when known
    pub fn panel(&self) -> Option<Panel> {
        match self {
            SpawnError::ExitedEarly { panel, .. }
            | SpawnError::Timeout { panel, .. }
            | SpawnError::NotATerminal { panel, .. } => Some(*panel),
            SpawnError::Launch { .. } | SpawnError::Io(_) => None,
        }
    }
}
