//! `zhq ui`: the interactive dashboard.

use crate::output::{CliError, OutputMode, render_error};
use crate::tui::{app, dashboard::DashboardView, terminal};
use clap::Args;
use zayan_core::auth::CredentialAuthenticator;
use zayan_core::config::DashboardConfig;
use zayan_core::error::ErrorCode;

#[derive(Args, Debug, Default)]
pub struct UiArgs {
    /// Prefill the login username (defaults to the configured account).
    #[arg(long, short = 'u')]
    pub username: Option<String>,
}

pub fn run_ui(args: &UiArgs, output: OutputMode, config: &DashboardConfig) -> anyhow::Result<()> {
    let username = args
        .username
        .clone()
        .or_else(|| Some(config.auth.username.clone()));
    let dashboard = DashboardView::new(zayan_core::seed::seeded_store(), config.timing);
    let authenticator = CredentialAuthenticator::new(config.auth.clone());
    let mut app = app::App::new(dashboard, Box::new(authenticator), username);

    terminal::install_panic_hook();
    let mut tui = match terminal::init() {
        Ok(tui) => tui,
        Err(e) => {
            // Raw mode may be half-enabled.
            let _ = terminal::restore();
            render_error(
                output,
                &CliError::coded(ErrorCode::TerminalUnavailable, format!("{e:#}")),
            )?;
            return Err(e.context("failed to initialise the terminal"));
        }
    };

    let result = app::run(&mut tui, &mut app, config.timing.tick());
    terminal::restore()?;
    result
}
