//! Layout transitions
//!
//! [`LayoutController`] is the state machine behind every layout change:
//! tear down the active panels, declare the new layout, spawn terminals,
//! return focus to the debugger, bind outputs, and refresh.

mod controller;
mod report;

pub use controller::LayoutController;
pub use report::{ControllerState, LayoutReport, SpawnFailure, TeardownReport};
