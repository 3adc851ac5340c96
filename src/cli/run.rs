//! Run command implementation
//!
//! Reads layout requests from stdin, one per line, until EOF, `quit`, or a
//! termination signal. Dashboard commands go to stdout (or `--commands`),
//! so a debugger-side script can execute them line by line.

use anyhow::{bail, Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use dashsplit::config::Config;
use dashsplit::debugger::{DebuggerChannel, LineChannel};
use dashsplit::process::ProcessSupervisor;
use dashsplit::shutdown::{recv_optional, ShutdownSignals};
use dashsplit::terminal::{controlling_device, EmulatorSpawner, Spawner};
use dashsplit::window::{ConfiguredFocus, WindowFocus};
use dashsplit::{LayoutController, LayoutReport};

/// One line of input
#[derive(Debug, PartialEq, Eq)]
enum Request {
    /// Panel names for the next layout
    Layout(Vec<String>),
    /// Back to the source panel alone
    Clear,
    Status,
    Quit,
    Empty,
}

impl Request {
    fn parse(line: &str) -> Self {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => Request::Empty,
            ["quit"] | ["exit"] => Request::Quit,
            ["status"] => Request::Status,
            ["clear"] => Request::Clear,
            names => Request::Layout(names.iter().map(|s| s.to_string()).collect()),
        }
    }
}

/// Pick the device panels are returned to: flag, then config, then our own terminal
fn resolve_home_device(flag: Option<String>, config: &Config) -> Result<String> {
    if let Some(device) = flag.or_else(|| config.home_device.clone()) {
        return Ok(device);
    }
    match controlling_device() {
        Some(device) => Ok(device),
        None => bail!(
            "Could not determine the debugger's terminal device.\n\
             Pass --home-device or set home_device in the config."
        ),
    }
}

fn open_commands(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open command output: {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}

fn summarize(report: &LayoutReport) {
    if !report.dropped.is_empty() {
        warn!("Unknown panel(s) ignored: {}", report.dropped.join(", "));
    }
    for failure in &report.failed {
        eprintln!("{}: {}", failure.panel, failure.error);
    }
}

fn print_status<D, S, W>(controller: &LayoutController<D, S, W>)
where
    D: DebuggerChannel,
    S: Spawner,
    W: WindowFocus,
{
    eprintln!("Layout: {}", controller.layout());
    if controller.registry().is_empty() {
        eprintln!("No panel terminals open.");
        return;
    }
    for (panel, binding) in controller.registry().iter() {
        eprintln!("  {:<12} {} (pid {})", panel, binding.device, binding.pid());
    }
}

/// Run the interactive layout session
pub async fn run_command(
    config: Config,
    home_device: Option<String>,
    commands: Option<PathBuf>,
    panels: Vec<String>,
) -> Result<()> {
    let home_device = resolve_home_device(home_device, &config)?;
    info!("Panels return to {} when closed", home_device);

    let channel = LineChannel::with_prefix(
        open_commands(commands.as_ref())?,
        config.debugger.command_prefix.clone(),
    );
    let spawner = EmulatorSpawner::new(config.terminal.clone(), config.process.clone());
    let focus = ConfiguredFocus::from_settings(&config.focus);
    let supervisor = ProcessSupervisor::new(config.process.clone());

    // Before the first spawn, so a signal during startup still tears down
    let mut signals = match ShutdownSignals::install() {
        Ok(signals) => Some(signals),
        Err(e) => {
            warn!("Failed to install signal handlers: {}", e);
            None
        }
    };

    let mut controller = LayoutController::new(channel, spawner, focus, supervisor, home_device);
    controller.declare_initial_layout();

    let startup: Vec<String> = if panels.is_empty() {
        config.startup_layout.iter().map(|p| p.to_string()).collect()
    } else {
        panels
    };
    if !startup.is_empty() {
        summarize(&controller.apply_layout(&startup));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            reason = recv_optional(&mut signals) => {
                info!("Received {}, closing panels", reason);
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                match Request::parse(&line) {
                    Request::Layout(names) => summarize(&controller.apply_layout(&names)),
                    Request::Clear => summarize(&controller.apply_layout(Vec::<String>::new())),
                    Request::Status => print_status(&controller),
                    Request::Quit => break,
                    Request::Empty => {}
                }
            }
        }
    }

    let teardown = controller.shutdown();
    info!("Closed {} panel(s)", teardown.released.len());
    Ok(())
}
