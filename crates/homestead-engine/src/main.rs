//! # Homestead
//!
//! Terminal front end for the Homestead farming game.
//!
//! Loads a map and an optional TOML config, then reads commands from stdin
//! and prints the farm after each one:
//! - `select <item>`, `buy <item>`, `sell <item>`
//! - `next` to sleep until morning, `quit` to stop
//! - `bind <action> <key>` to change a key, e.g. `bind till x`
//! - any other line is a run of key presses (`wasd` to move, `t` till,
//!   `u` untill, `p` plant, `h` harvest, `r` remove, `n` next day)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod app;
mod config;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use homestead_gameplay::{FarmController, Map};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::app::App;
use crate::config::{EngineConfig, CONFIG_FILE};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Map file: one row per line of G (grass), U (untilled) and S (soil).
    #[arg(value_name = "MAP", required_unless_present_any = ["dump_config", "write_config"])]
    map: Option<PathBuf>,

    /// TOML config file.
    #[arg(short, long, value_name = "FILE", default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Print JSON snapshots instead of the text view.
    #[arg(long)]
    json: bool,

    /// Print the effective config as TOML and exit.
    #[arg(long)]
    dump_config: bool,

    /// Write the effective config to the config file and exit.
    #[arg(long, conflicts_with = "dump_config")]
    write_config: bool,
}

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env().add_directive("homestead=info".parse()?))
        .init();

    let args = CliArgs::parse();
    let mut config = EngineConfig::load_from(&args.config);
    config.display.json |= args.json;

    if args.dump_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }
    if args.write_config {
        config.save_to(&args.config)?;
        return Ok(());
    }

    let map_path = args.map.context("no map file given")?;
    let map = Map::load(&map_path)
        .with_context(|| format!("Failed to load map {}", map_path.display()))?;

    info!("Homestead {} starting", env!("CARGO_PKG_VERSION"));
    let controller = FarmController::new(map, &config.farm)?;
    let mut app = App::new(controller, config.display);
    app.run(io::stdin().lock(), &mut io::stdout().lock())?;

    let info = app.controller().info_bar();
    info!("Session ended on day {} with ${}", info.day, info.money);
    info!("Homestead shutdown complete");
    Ok(())
}
