//! Terminal windows for dashboard panels.
//!
//! This module provides the [`Spawner`] seam and its real implementation,
//! [`EmulatorSpawner`], which opens one terminal emulator window per panel
//! and discovers the pseudo-terminal device it owns.
//!
//! # Architecture
//!
//! Device discovery works by:
//! 1. Launching the emulator with a shell command that writes `tty` output
//!    to `<tty_dir>/<panel>_tty`
//! 2. Exec'ing an interactive shell so the window stays open
//! 3. Polling the handoff file until it is non-empty, then reading and
//!    deleting it
//!
//! The wait is bounded: a terminal that exits early or never reports a
//! device yields a [`SpawnError`] instead of blocking forever.

mod error;
mod helpers;
mod spawner;
mod tty_file;

pub use error::SpawnError;
pub use helpers::{controlling_device, is_device_path, shell_escape};
pub use spawner::{EmulatorSpawner, SpawnedTerminal, Spawner};
pub use tty_file::TtyFile;
