//! SOFA desktop entry point.
//!
//! Runs a session against the in-process desktop shell. Remote keys and
//! platform events are read from stdin, one command per line (see
//! [`script`]). The config path comes from the first argument or
//! `SOFA_CONFIG`; without one the defaults apply.

mod script;

use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};

use sofa_core::Session;
use sofa_core::config::SofaConfig;
use sofa_core::platform::{DesktopShell, FileStore};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SOFA_CONFIG").ok())
    {
        Some(path) => SofaConfig::from_file(Path::new(&path))
            .with_context(|| format!("cannot load config {path}"))?,
        None => {
            log::info!("No config given, using defaults");
            SofaConfig::default()
        },
    };

    let store = FileStore::open(&config.store_path);
    log::info!(
        "Starting SOFA (store {}, playable {:?})",
        store.path().display(),
        config.playable_extensions
    );

    let mut session = Session::new(&config, DesktopShell::new(), store);
    session.launch();
    println!("{}", script::status(&session));

    for (number, line) in std::io::stdin().lock().lines().enumerate() {
        let line = line.context("cannot read stdin")?;
        match script::parse(&line) {
            Ok(Some(command)) => {
                if !script::apply(&mut session, command) {
                    break;
                }
            },
            Ok(None) => {},
            Err(e) => log::warn!("line {}: {e:#}", number + 1),
        }
    }

    log::info!("Exiting");
    Ok(())
}
