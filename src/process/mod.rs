//! Process supervision for spawned terminal windows
//!
//! Every terminal the orchestrator opens is held as an owned
//! [`TerminalProcess`], so termination always ends with the child being
//! reaped rather than left behind as a zombie.

mod handle;
mod supervisor;

pub use handle::{send_signal, Signal, TerminalProcess};
pub use supervisor::{probe, ProcessSupervisor, Termination};
