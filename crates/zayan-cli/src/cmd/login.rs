//! `zhq login`: run the credential check without opening the dashboard.

use crate::output::{CliError, OutputMode, pretty_kv, render_error, render_mode};
use anyhow::Context;
use clap::Args;
use std::io::{BufRead, Write};
use zayan_core::auth::{Authenticator, CredentialAuthenticator, Session};
use zayan_core::config::AuthConfig;

/// Environment variable read when `--password-stdin` is not given.
pub const PASSWORD_ENV_VAR: &str = "ZAYAN_HQ_PASSWORD";

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account name.
    #[arg(long, short = 'u')]
    pub username: String,

    /// Read the password from the first line of stdin.
    #[arg(long)]
    pub password_stdin: bool,
}

/// First line of `input`, without the line terminator.
fn read_password_line(mut input: impl BufRead) -> anyhow::Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn write_text(session: &Session, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{}  {}  {}", session.id, session.name, session.email)
}

fn write_pretty(session: &Session, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "✓ Connecté")?;
    pretty_kv(w, "Nom", &session.name)?;
    pretty_kv(w, "Email", &session.email)
}

pub fn run_login(args: &LoginArgs, output: OutputMode, account: &AuthConfig) -> anyhow::Result<()> {
    let password = if args.password_stdin {
        read_password_line(std::io::stdin().lock())?
    } else if let Ok(value) = std::env::var(PASSWORD_ENV_VAR) {
        value
    } else {
        let err = CliError::new(format!(
            "no password supplied: pass --password-stdin or set {PASSWORD_ENV_VAR}"
        ));
        render_error(output, &err)?;
        anyhow::bail!("no password supplied");
    };

    let authenticator = CredentialAuthenticator::new(account.clone());
    match authenticator.authenticate(&args.username, &password) {
        Ok(session) => render_mode(output, &session, write_text, write_pretty),
        Err(e) => {
            render_error(output, &CliError::from(e.code()))?;
            Err(e.into())
        }
    }
}
