//! Core domain types for dashsplit

mod layout;
mod panel;

pub use layout::Layout;
pub use panel::{Panel, UnknownPanel, SOURCE_PANEL};
