//! Terminal front end for the feed importer and post calendar.

mod app;
mod config;
mod logging;
mod pages;
mod router;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use desk_nexus::{Application, HashHistory};

use crate::app::Shell;
use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "post-desk", version, about)]
struct Cli {
    /// Config file (defaults to <config dir>/post-desk/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Location to open, e.g. `#/calendar`
    #[arg(long)]
    hash: Option<String>,

    /// Directory for post-desk.log (also POST_DESK_LOG_DIR)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Trace-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(hash) = cli.hash {
        config.initial_hash = hash;
    }
    if let Some(dir) = cli.log_dir {
        config.log.dir = Some(dir);
    }

    let log_path = logging::init(&config.log, cli.verbose)?;
    tracing::debug!(?config, ?log_path, "configuration loaded");

    let history = HashHistory::from_url(&config.initial_url());
    let router = router::build_router(history).context("failed to build router")?;

    Application::new()
        .tick_rate(config.tick_rate())
        .run(move |cx| {
            cx.set_root(Shell::new(router))?;
            Ok(())
        })
}
