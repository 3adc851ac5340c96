//! Launching panel terminals

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;

use tracing::{debug, warn};

use super::error::SpawnError;
use super::helpers::shell_escape;
use super::tty_file::TtyFile;
use crate::config::{ProcessSettings, TerminalSettings};
use crate::process::{ProcessSupervisor, TerminalProcess};
use crate::Panel;

/// A terminal that has reported its device and is ready to receive output
#[derive(Debug)]
pub struct SpawnedTerminal {
    pub panel: Panel,
    pub device: String,
    pub process: TerminalProcess,
}

/// Opens a terminal window for a panel
pub trait Spawner {
    /// Launch a terminal and block until it reports its device path
    fn spawn(&mut self, panel: Panel) -> Result<SpawnedTerminal, SpawnError>;
}

/// Spawns a real terminal emulator per panel.
///
/// The emulator runs `sh -c "<probe> > <file>; exec <shell>"`, so the window
/// stays open on an interactive shell after reporting its device.
#[derive(Debug, Clone)]
pub struct EmulatorSpawner {
    settings: TerminalSettings,
    tty_dir: PathBuf,
    /// Used to clean up terminals that never report a device
    supervisor: ProcessSupervisor,
}

impl EmulatorSpawner {
    pub fn new(settings: TerminalSettings, process: ProcessSettings) -> Self {
        let tty_dir = settings.tty_dir();
        Self {
            settings,
            tty_dir,
            supervisor: ProcessSupervisor::new(process),
        }
    }

    /// Handoff file for `panel`
    pub fn tty_file(&self, panel: Panel) -> TtyFile {
        TtyFile::new(&self.tty_dir, panel)
    }

    /// Script run inside the new terminal
    pub fn shell_script(&self, file: &TtyFile) -> String {
        format!(
            "{} > {}; exec {}",
            self.settings.device_probe,
            shell_escape(&file.path().display().to_string()),
            self.settings.shell
        )
    }

    fn command(&self, file: &TtyFile) -> Command {
        let mut cmd = Command::new(&self.settings.program);
        cmd.args(&self.settings.args)
            .arg("sh")
            .arg("-c")
            .arg(self.shell_script(file))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl Spawner for EmulatorSpawner {
    fn spawn(&mut self, panel: Panel) -> Result<SpawnedTerminal, SpawnError> {
        let file = self.tty_file(panel);
        // A leftover file from a crashed run would be read as our device
        file.remove()?;

        let child = self
            .command(&file)
            .spawn()
            .map_err(|source| SpawnError::Launch {
                program: self.settings.program.clone(),
                source,
            })?;
        let mut process = TerminalProcess::from_child(child);
        debug!("Spawned {} terminal with pid {}", panel, process.pid());

        let poll = Duration::from_millis(self.settings.poll_interval_ms);
        let timeout = Duration::from_millis(self.settings.spawn_timeout_ms);

        match file.wait_for_device(&mut process, poll, timeout) {
            Ok(device) => Ok(SpawnedTerminal {
                panel,
                device,
                process,
            }),
            Err(e) => {
                let outcome = self.supervisor.terminate(&mut process);
                debug!("Cleaned up {} terminal after failure: {:?}", panel, outcome);
                if let Err(remove_err) = file.remove() {
                    warn!(
                        "Failed to remove {}: {}",
                        file.path().display(),
                        remove_err
                    );
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_shell_script_quotes_path() {
        let settings = TerminalSettings {
            tty_dir: Some(PathBuf::from("/tmp/dash split")),
            ..TerminalSettings::default()
        };
        let spawner = EmulatorSpawner::new(settings, ProcessSettings::default());
        let file = spawner.tty_file(Panel::Stack);

        assert_eq!(file.path(), Path::new("/tmp/dash split/stack_tty"));
        assert_eq!(
            spawner.shell_script(&file),
            "tty > '/tmp/dash split/stack_tty'; exec sh"
        );
    }

    #[test]
    fn test_command_line_layout() {
        let settings = TerminalSettings {
            tty_dir: Some(PathBuf::from("/tmp")),
            ..TerminalSettings::default()
        };
        let spawner = EmulatorSpawner::new(settings, ProcessSettings::default());
        let cmd = spawner.command(&spawner.tty_file(Panel::Memory));

        assert_eq!(cmd.get_program(), "st");
        let args: Vec<_> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec!["-e", "sh", "-c", "tty > '/tmp/memory_tty'; exec sh"]
        );
    }
}
