//! Device handoff file written by a freshly spawned terminal
//!
//! The terminal writes its own device path to `<dir>/<panel>_tty` and then
//! execs an interactive shell. We poll for a non-empty file, read it once
//! and delete it.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::error::SpawnError;
use super::helpers::is_device_path;
use crate::process::TerminalProcess;
use crate::Panel;

/// Handoff file for one panel
#[derive(Debug, Clone)]
pub struct TtyFile {
    panel: Panel,
    path: PathBuf,
}

impl TtyFile {
    pub fn new(dir: &Path, panel: Panel) -> Self {
        Self {
            panel,
            path: dir.join(panel.tty_file_name()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file, treating an absent file as success
    pub fn remove(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    /// Read and consume the file if the terminal has written it
    pub fn take(&self) -> io::Result<Option<String>> {
        let metadata = match std::fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        if metadata.len() == 0 {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let device = content.trim();
        if device.is_empty() {
            return Ok(None);
        }

        let device = device.to_string();
        self.remove()?;
        Ok(Some(device))
    }

    /// Wait until the terminal reports its device path.
    ///
    /// Fails if the terminal process exits first, if `timeout` elapses, or if
    /// the reported text is not a device path.
    pub fn wait_for_device(
        &self,
        process: &mut TerminalProcess,
        poll: Duration,
        timeout: Duration,
    ) -> Result<String, SpawnError> {
        let started = Instant::now();
        loop {
            if let Some(device) = self.take()? {
                return self.validate(device);
            }

            if let Some(status) = process.try_reap() {
                // It may have written the file right before exiting
                if let Some(device) = self.take()? {
                    return self.validate(device);
                }
                return Err(SpawnError::ExitedEarly {
                    panel: self.panel,
                    status,
                });
            }

            let waited = started.elapsed();
            if waited >= timeout {
                return Err(SpawnError::Timeout {
                    panel: self.panel,
                    waited,
                });
            }

            std::thread::sleep(poll);
        }
    }

    fn validate(&self, device: String) -> Result<String, SpawnError> {
        if is_device_path(&device) {
            Ok(device)
        } else {
            Err(SpawnError::NotATerminal {
                panel: self.panel,
                output: device,
            })
        }
    }
}
