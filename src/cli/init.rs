//! Init command implementation

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use dashsplit::config::Config;

/// Default configuration content for dashsplit init
pub const DEFAULT_CONFIG: &str = r#"# dashsplit configuration
# =======================
#
# dashsplit opens one terminal window per debugger dashboard panel and routes
# the panel's output to that window.

# Device panels return to when their window closes. Detected from the
# controlling terminal when unset.
# home_device = "/dev/pts/0"

# Panels opened when `dashsplit run` is started without any.
# Valid names: stack, assembly, memory, expressions, history, threads,
#              registers, breakpoints, variables
startup_layout = []

# ============================================================================
# TERMINAL - How panel windows are launched
# ============================================================================
#
# The emulator is run as:  <program> <args...> sh -c "<device_probe> > <tty_dir>/<panel>_tty; exec <shell>"
# It must stay in the foreground until its window closes (st, xterm, alacritty, kitty do).

[terminal]
program = "st"
args = ["-e"]
shell = "sh"
device_probe = "tty"
# tty_dir = "/tmp"
poll_interval_ms = 100
spawn_timeout_ms = 10000

# ============================================================================
# PROCESS - How panel windows are closed
# ============================================================================

[process]
# Time a terminal gets to exit after SIGTERM
term_grace_ms = 500
# Send SIGKILL if it is still running after the grace period
escalate_to_kill = true

# ============================================================================
# FOCUS - Returning to the debugger window
# ============================================================================
#
# New windows usually take focus. After opening N windows, dashsplit sends
# the focus-previous key N times.

[focus]
enabled = true
program = "xdotool"
key = "alt+k"

# ============================================================================
# DEBUGGER - Command syntax
# ============================================================================

[debugger]
command_prefix = "dashboard"
"#;

/// Write the default configuration file
pub async fn init_command(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created: {}", config_path.display());

    Ok(())
}
