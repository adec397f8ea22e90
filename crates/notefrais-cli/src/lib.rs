pub mod cli;
pub mod dispatch;

use std::sync::Once;

use anyhow::{Context, Result, bail};
use clap::Parser;
use notefrais_app::{App, RouteBus};
use notefrais_core::session::{self, SessionConfig};
use notefrais_core::store::{self, TomlBillStore};

use crate::cli::Cli;

static TRACING_ONCE: Once = Once::new();

fn init_tracing() {
    TRACING_ONCE.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("notefrais_app=info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

pub fn run() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let session = load_required_session()?;

    let store_path = store::resolve_store_path()?;
    let store = TomlBillStore::new(store_path);
    let bus = RouteBus::new();
    let app = App::new(&store, &bus, session.user);

    dispatch::run_with_deps(cli, &app, &bus)
}

fn load_required_session() -> Result<SessionConfig> {
    let path = session::resolve_session_path()?;
    if !path.exists() {
        bail!(
            "no session found at {}; write one with your employee email before using notefrais",
            path.display()
        );
    }

    let session = session::load_session(&path)
        .with_context(|| format!("failed to load session at {}", path.display()))?;
    tracing::debug!(email = %session.user.email, "session loaded");
    Ok(session)
}
