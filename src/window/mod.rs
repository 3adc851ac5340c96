//! Focus compensation through the window manager
//!
//! Each new terminal window is assumed to take input focus. After a layout
//! transition the controller asks for one "focus previous window" action per
//! spawned terminal to get back to the debugger window. This is a heuristic;
//! window managers that do not steal focus will overshoot.

use std::io;
use std::process::{Command, Stdio};

use crate::config::FocusSettings;

/// Moves input focus back toward the debugger window
pub trait WindowFocus {
    fn focus_previous(&mut self) -> io::Result<()>;
}

/// Injects the window manager's focus-previous key with xdotool
#[derive(Debug, Clone)]
pub struct XdotoolFocus {
    program: String,
    key: String,
}

impl XdotoolFocus {
    pub fn new(program: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            key: key.into(),
        }
    }
}

impl WindowFocus for XdotoolFocus {
    fn focus_previous(&mut self) -> io::Result<()> {
        let status = Command::new(&self.program)
            .arg("key")
            .arg(&self.key)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;

        if !status.success() {
            return Err(io::Error::other(format!(
                "{} key {} exited with {}",
                self.program, self.key, status
            )));
        }
        Ok(())
    }
}

/// Does nothing, for setups where new windows do not take focus
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFocus;

impl WindowFocus for NoopFocus {
    fn focus_previous(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Focus compensation as selected by configuration
#[derive(Debug, Clone)]
pub enum ConfiguredFocus {
    Xdotool(XdotoolFocus),
    Disabled(NoopFocus),
}

impl ConfiguredFocus {
    pub fn from_settings(settings: &FocusSettings) -> Self {
        if settings.enabled {
            ConfiguredFocus::Xdotool(XdotoolFocus::new(&settings.program, &settings.key))
        } else {
            ConfiguredFocus::Disabled(NoopFocus)
        }
    }
}

impl WindowFocus for ConfiguredFocus {
    fn focus_previous(&mut self) -> io::Result<()> {
        match self {
            ConfiguredFocus::Xdotool(focus) => focus.focus_previous(),
            ConfiguredFocus::Disabled(focus) => focus.focus_previous(),
        }
    }
}
