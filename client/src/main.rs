//! `contacts` entry-point: loads settings, wires the HTTP adapters and runs
//! one command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use contact_client::config::ClientSettings;
use contact_client::domain::ports::SessionStore;
use contact_client::inbound::cli::terminal::{TerminalDialog, TerminalNavigator};
use contact_client::inbound::cli::{Cli, Services, execute};
use contact_client::outbound::http::{HttpAccountGateway, HttpContactGateway, HttpTransport};
use contact_client::outbound::session::{FileSessionStore, MemorySessionStore};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let mut settings = ClientSettings::load_from_iter([OsString::from("contacts")])
        .wrap_err("failed to load contact client settings")?;
    if let Some(base_url) = cli.base_url.clone() {
        settings.base_url = Some(base_url);
    }
    if let Some(route_style) = cli.route_style {
        settings.route_style = Some(route_style.to_string());
    }

    let sessions = settings.session_file().map_or_else(
        || -> Arc<dyn SessionStore> { Arc::new(MemorySessionStore::new()) },
        |path| -> Arc<dyn SessionStore> { Arc::new(FileSessionStore::new(path)) },
    );
    let mut gateway_config = settings.gateway_config()?;
    match sessions.load_token() {
        Ok(Some(token)) => gateway_config = gateway_config.with_bearer_token(token),
        Ok(None) => {}
        Err(error) => warn!(%error, "ignoring unreadable session token"),
    }
    let transport =
        HttpTransport::new(gateway_config).wrap_err("failed to build the HTTP client")?;

    let services = Services {
        contacts: Arc::new(HttpContactGateway::new(transport.clone())),
        accounts: Arc::new(HttpAccountGateway::new(transport)),
        sessions,
        navigator: Arc::new(TerminalNavigator),
        dialog: Arc::new(TerminalDialog::stdio()),
    };

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build the Tokio runtime")?;
    let mut stdout = io::stdout().lock();
    let outcome = runtime.block_on(execute(cli.command, &services, &mut stdout));
    stdout.flush().wrap_err("failed to flush output")?;

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(error) => {
            let mut stderr = io::stderr().lock();
            writeln!(stderr, "{error}").wrap_err("failed to write error")?;
            Ok(ExitCode::FAILURE)
        }
    }
}
