//! dashsplit - split a debugger dashboard across terminal windows
//!
//! dashsplit opens one terminal window per dashboard panel (stack, memory,
//! registers, ...) and tells the debugger to route each panel's output to
//! the new window's device. The source panel stays in the debugger's own
//! terminal.
//!
//! ## Layout transitions
//!
//! Every layout change is a full teardown-then-rebuild:
//!
//! 1. Active panels are routed back to the home device and their terminals closed
//! 2. The new layout is declared to the debugger
//! 3. A terminal is spawned per panel and its device discovered
//! 4. Focus is handed back to the debugger window
//! 5. Panel outputs are bound to the new devices and the dashboard redrawn
//!
//! The [`LayoutController`] owns the terminals; dropping it closes them.

pub mod config;
pub mod debugger;
pub mod domain;
pub mod layout;
pub mod process;
pub mod registry;
pub mod shutdown;
pub mod terminal;
pub mod window;

pub use domain::*;
pub use layout::{LayoutController, LayoutReport};
pub use registry::{PanelBinding, PanelRegistry};
