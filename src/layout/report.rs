//! What a layout transition did

use crate::process::Termination;
use crate::terminal::SpawnError;
use crate::{Layout, Panel};

/// Controller state; `apply_layout` is the only transition out of `Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    Transitioning,
}

/// Result of tearing down the active panels
#[derive(Debug, Default)]
pub struct TeardownReport {
    /// Panels routed back to the home device, in registry order
    pub released: Vec<Panel>,
    /// Panels whose terminal was still running and was asked to exit
    pub terminated: Vec<(Panel, Termination)>,
}

/// A panel whose terminal could not be opened
#[derive(Debug)]
pub struct SpawnFailure {
    pub panel: Panel,
    pub error: SpawnError,
}

/// Result of one full teardown-then-rebuild transition
#[derive(Debug)]
pub struct LayoutReport {
    pub teardown: TeardownReport,
    /// Layout declared to the debugger
    pub layout: Layout,
    /// Requested names that are not panels
    pub dropped: Vec<String>,
    /// Panels now routed to a terminal, with the device they were given
    pub bound: Vec<(Panel, String)>,
    pub failed: Vec<SpawnFailure>,
    /// Focus-previous actions issued
    pub focus_actions: usize,
}

impl LayoutReport {
    /// Number of terminals opened during the transition
    pub fn spawned(&self) -> usize {
        self.bound.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
