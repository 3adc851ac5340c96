//! Panel identifiers for the debugger dashboard

use serde::{Deserialize, Serialize};

/// Name of the dashboard panel that always stays in the debugger's own window.
///
/// It heads every declared layout but is never spawned into a terminal and
/// never tracked by the registry, so it is deliberately not a [`Panel`].
pub const SOURCE_PANEL: &str = "source";

/// A dashboard panel that can be redirected into its own terminal window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Stack,
    Assembly,
    Memory,
    Expressions,
    History,
    Threads,
    Registers,
    Breakpoints,
    Variables,
}

/// Error returned when a name is not one of the known panels
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown panel: {0}")]
pub struct UnknownPanel(pub String);

impl Panel {
    /// Every panel, in registry iteration order
    pub const ALL: [Panel; 9] = [
        Panel::Stack,
        Panel::Assembly,
        Panel::Memory,
        Panel::Expressions,
        Panel::History,
        Panel::Threads,
        Panel::Registers,
        Panel::Breakpoints,
        Panel::Variables,
    ];

    /// Look up a panel by its dashboard name.
    ///
    /// Matching is exact: the debugger only accepts lowercase names, so
    /// `"Stack"` is as unknown as `"bogus"`.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|panel| panel.as_str() == name)
    }

    /// The dashboard name of this panel
    pub fn as_str(&self) -> &'static str {
        match self {
            Panel::Stack => "stack",
            Panel::Assembly => "assembly",
            Panel::Memory => "memory",
            Panel::Expressions => "expressions",
            Panel::History => "history",
            Panel::Threads => "threads",
            Panel::Registers => "registers",
            Panel::Breakpoints => "breakpoints",
            Panel::Variables => "variables",
        }
    }

    /// Position of this panel in [`Panel::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// File name the spawned terminal writes its device path into
    pub fn tty_file_name(&self) -> String {
        format!("{}_tty", self.as_str())
    }
}

impl std::fmt::Display for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Panel {
    type Err = UnknownPanel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownPanel(s.to_string()))
    }
}
