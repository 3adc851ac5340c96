//! Command channel to the debugger dashboard
//!
//! The orchestrator never interprets debugger output. It only emits three
//! dashboard instructions and does not check whether they succeeded.

use std::io::{self, Write};

use crate::{Layout, Panel};

/// Default command every dashboard instruction starts with
pub const DEFAULT_PREFIX: &str = "dashboard";

/// An instruction for the debugger dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebuggerCommand {
    /// Declare which panels are shown, source first
    SetLayout(Layout),
    /// Route a panel's output to a terminal device
    SetPanelOutput { panel: Panel, device: String },
    /// Redraw the dashboard
    Refresh,
}

impl DebuggerCommand {
    /// Render the command line using `prefix` as the dashboard command
    pub fn render(&self, prefix: &str) -> String {
        match self {
            DebuggerCommand::SetLayout(layout) => format!("{} -layout {}", prefix, layout),
            DebuggerCommand::SetPanelOutput { panel, device } => {
                format!("{} {} -output {}", prefix, panel, device)
            }
            DebuggerCommand::Refresh => prefix.to_string(),
        }
    }
}

impl std::fmt::Display for DebuggerCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(DEFAULT_PREFIX))
    }
}

/// Where debugger commands are sent
pub trait DebuggerChannel {
    fn send(&mut self, command: &DebuggerCommand) -> io::Result<()>;
}

/// Writes one command per line, flushing after each.
///
/// Point it at stdout for a debugger-side script that executes each line,
/// or at a FIFO the debugger reads from.
#[derive(Debug)]
pub struct LineChannel<W: Write> {
    writer: W,
    prefix: String,
}

impl<W: Write> LineChannel<W> {
    pub fn new(writer: W) -> Self {
        Self::with_prefix(writer, DEFAULT_PREFIX)
    }

    pub fn with_prefix(writer: W, prefix: impl Into<String>) -> Self {
        Self {
            writer,
            prefix: prefix.into(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DebuggerChannel for LineChannel<W> {
    fn send(&mut self, command: &DebuggerCommand) -> io::Result<()> {
        writeln!(self.writer, "{}", command.render(&self.prefix))?;
        self.writer.flush()
    }
}
