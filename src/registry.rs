//! Which panels are active and where their output goes

use crate::process::TerminalProcess;
use crate::Panel;

/// An active panel's terminal: the device its output is routed to and the
/// emulator process that owns that device.
#[derive(Debug)]
pub struct PanelBinding {
    pub device: String,
    pub process: TerminalProcess,
}

impl PanelBinding {
    pub fn new(device: impl Into<String>, process: TerminalProcess) -> Self {
        Self {
            device: device.into(),
            process,
        }
    }

    pub fn pid(&self) -> u32 {
        self.process.pid()
    }
}

/// Binding per panel; a panel without a binding is inactive.
///
/// Iteration always follows [`Panel::ALL`] order.
#[derive(Debug)]
pub struct PanelRegistry {
    slots: [Option<PanelBinding>; Panel::ALL.len()],
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    pub fn get(&self, panel: Panel) -> Option<&PanelBinding> {
        self.slots[panel.index()].as_ref()
    }

    pub fn get_mut(&mut self, panel: Panel) -> Option<&mut PanelBinding> {
        self.slots[panel.index()].as_mut()
    }

    /// Bind a panel, returning the binding it replaces
    pub fn set(&mut self, panel: Panel, binding: PanelBinding) -> Option<PanelBinding> {
        self.slots[panel.index()].replace(binding)
    }

    /// Unbind a panel, returning its binding
    pub fn clear(&mut self, panel: Panel) -> Option<PanelBinding> {
        self.slots[panel.index()].take()
    }

    /// Panels that currently have a binding
    pub fn active(&self) -> Vec<Panel> {
        self.iter().map(|(panel, _)| panel).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Panel, &PanelBinding)> + '_ {
        Panel::ALL
            .into_iter()
            .zip(self.slots.iter())
            .filter_map(|(panel, slot)| slot.as_ref().map(|binding| (panel, binding)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PanelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
