//! Top-level TUI state: the login gate in front of the dashboard.

use crate::tui::dashboard::{DashboardAction, DashboardView};
use crate::tui::login::{LoginAction, LoginForm};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tracing::debug;
use zayan_core::auth::{Authenticator, Session};

/// Shown on the login screen after a rejected attempt.
pub const LOGIN_REJECTED: &str = "Identifiants invalides";

pub struct App {
    login: LoginForm,
    session: Option<Session>,
    dashboard: DashboardView,
    authenticator: Box<dyn Authenticator>,
    should_quit: bool,
}

impl App {
    pub fn new(
        dashboard: DashboardView,
        authenticator: Box<dyn Authenticator>,
        username: Option<String>,
    ) -> Self {
        Self {
            login: LoginForm::new(username),
            session: None,
            dashboard,
            authenticator,
            should_quit: false,
        }
    }

    #[cfg(test)]
    fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if self.session.is_some() {
            match self.dashboard.handle_key(key, now) {
                DashboardAction::None => {}
                DashboardAction::Logout => self.logout(),
                DashboardAction::Quit => self.should_quit = true,
            }
            return;
        }

        match self.login.handle_key(key) {
            LoginAction::None => {}
            LoginAction::Quit => self.should_quit = true,
            LoginAction::Submit { username, password } => {
                match self.authenticator.authenticate(&username, &password) {
                    Ok(session) => {
                        self.dashboard.set_status(format!("Bienvenue, {}", session.name));
                        self.session = Some(session);
                    }
                    Err(_) => self.login.reject(LOGIN_REJECTED),
                }
            }
        }
    }

    fn logout(&mut self) {
        debug!("session closed");
        self.session = None;
        self.dashboard.close_modals();
        self.login.reset();
    }

    /// Fire due deferred events. The store outlives the session, so this
    /// runs on the login screen too.
    pub fn tick(&mut self, now: Instant) {
        self.dashboard.tick(now);
    }

    pub fn poll_timeout(&self, now: Instant, tick: Duration) -> Duration {
        self.dashboard.poll_timeout(now, tick)
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        match &self.session {
            Some(session) => self.dashboard.render(frame, area, &session.name),
            None => self.login.render(frame, area),
        }
    }

    #[cfg(test)]
    fn dashboard(&self) -> &DashboardView {
        &self.dashboard
    }
}

/// Draw, poll for a key until the next tick or deferred event, apply due
/// events; until quit.
pub fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, tick: Duration) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| app.render(f))?;

        if event::poll(app.poll_timeout(Instant::now(), tick))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key, Instant::now());
        }
        app.tick(Instant::now());
    }
    Ok(())
}
