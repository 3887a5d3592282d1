//! loadlist - drive a loadlist store from the command line
//!
//! Plays the part of the presentation layer: each step is turned into an
//! action and dispatched, then the store is allowed to settle and the final
//! state is printed.

mod output;
mod steps;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use libloadlist::logging::LoggingConfig;
use libloadlist::{Action, Config, LoadListError, StateReceiver, Store};

use output::{render_change, render_state, OutputFormat};
use steps::Step;

#[derive(Parser, Debug)]
#[command(name = "loadlist")]
#[command(about = "Load, reorder and delete rows in a loadlist store", long_about = None)]
struct Cli {
    /// Steps to run in order: load, wait, move:<rows>:<dest>, delete:<rows>.
    /// With no steps, the list is loaded as if it had just been shown.
    #[arg(value_name = "STEP")]
    steps: Vec<String>,

    /// Config file (defaults to $LOADLIST_CONFIG or the XDG config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the fetch delay, e.g. "2s" or "150ms"
    #[arg(long, value_parser = humantime::parse_duration)]
    delay: Option<Duration>,

    /// Make every fetch fail with this message
    #[arg(long)]
    fail: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print every published state change
    #[arg(short, long)]
    watch: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    LoggingConfig::from_env(cli.verbose).init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<LoadListError>()
            .map(LoadListError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let steps = if cli.steps.is_empty() {
        vec![Step::Dispatch(Action::RepositoryLoad)]
    } else {
        cli.steps
            .iter()
            .map(|raw| raw.parse())
            .collect::<Result<Vec<Step>, LoadListError>>()?
    };

    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if let Some(delay) = cli.delay {
        config.fetch.delay = delay;
    }
    if let Some(message) = cli.fail {
        config.fetch.fail_with = Some(message);
    }

    let mut store = Store::from_config(&config);
    let mut changes = store.subscribe();

    for step in steps {
        tracing::info!(%step, "Running step");
        match step {
            Step::Wait => store.settle().await,
            Step::Dispatch(action) => store.dispatch(action),
        }
        if cli.watch {
            print_changes(&mut changes, cli.format)?;
        }
    }

    store.settle().await;
    if cli.watch {
        print_changes(&mut changes, cli.format)?;
    }

    let rendered = render_state(store.state(), cli.format).context("Failed to render state")?;
    println!("{}", rendered);
    Ok(())
}

fn print_changes(changes: &mut StateReceiver, format: OutputFormat) -> anyhow::Result<()> {
    use tokio::sync::broadcast::error::TryRecvError;

    loop {
        match changes.try_recv() {
            Ok(change) => {
                let line = render_change(&change, format).context("Failed to render change")?;
                println!("{}", line);
            }
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!("Watch output lagged, skipped {} changes", skipped);
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return Ok(()),
        }
    }
}
