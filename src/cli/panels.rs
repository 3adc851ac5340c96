//! Panels command implementation

use anyhow::Result;

use dashsplit::{Panel, SOURCE_PANEL};

/// List the panel names accepted in a layout request
pub fn panels_command() -> Result<()> {
    println!("{} (always shown in the debugger window)", SOURCE_PANEL);
    for panel in Panel::ALL {
        println!("{}", panel);
    }
    Ok(())
}
