// src/main.rs

use tads_display::{config::Config, orchestrator::ScriptOrchestrator, script::Script};

use anyhow::Context;
use log::info;
use std::path::PathBuf;

/// Main entry point for the `tads-display` headless driver.
///
/// Usage: `tads-display <script.json> [config.json]`
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting tads-display...");

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let script_path = args
        .next()
        .context("usage: tads-display <script.json> [config.json]")?;
    let config_path = args.next();

    let config = Config::load_or_default(config_path.as_deref());
    info!("Link settings: {:?}", config.link_settings());

    let script = Script::load(&script_path)?;
    let mut orchestrator = ScriptOrchestrator::new(script, config);
    orchestrator.run();

    for line in orchestrator.transcript() {
        println!("{}", line);
    }

    info!("tads-display exited successfully.");
    Ok(())
}
