//! Login screen shown before the dashboard.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LoginField {
    #[default]
    Username,
    Password,
}

/// What the form asks the caller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    None,
    Submit { username: String, password: String },
    Quit,
}

#[derive(Debug, Default)]
pub struct LoginForm {
    username: String,
    password: String,
    focus: LoginField,
    error: Option<String>,
}

impl LoginForm {
    /// Form with the username prefilled; focus starts on the password then.
    pub fn new(username: Option<String>) -> Self {
        let username = username.unwrap_or_default();
        let focus = if username.is_empty() {
            LoginField::Username
        } else {
            LoginField::Password
        };
        Self {
            username,
            focus,
            ..Self::default()
        }
    }

    /// Show a rejection and clear the password for the next attempt.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.password.clear();
        self.focus = LoginField::Password;
        self.error = Some(message.into());
    }

    /// Forget everything typed, keeping the username (after a log out).
    pub fn reset(&mut self) {
        self.password.clear();
        self.error = None;
        self.focus = if self.username.is_empty() {
            LoginField::Username
        } else {
            LoginField::Password
        };
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return LoginAction::Quit;
        }
        match key.code {
            KeyCode::Esc => LoginAction::Quit,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
                LoginAction::None
            }
            KeyCode::Enter => match self.focus {
                LoginField::Username => {
                    self.focus = LoginField::Password;
                    LoginAction::None
                }
                LoginField::Password => LoginAction::Submit {
                    username: self.username.trim().to_string(),
                    password: self.password.clone(),
                },
            },
            KeyCode::Backspace => {
                self.field_mut().pop();
                LoginAction::None
            }
            KeyCode::Char(c) => {
                self.field_mut().push(c);
                self.error = None;
                LoginAction::None
            }
            _ => LoginAction::None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 50.min(area.width);
        let height = 12.min(area.height);
        let panel = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        };
        frame.render_widget(Clear, panel);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .title(" 🦦 Zayan HQ ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            panel,
        );

        let inner = Rect {
            x: panel.x + 1,
            y: panel.y + 1,
            width: panel.width.saturating_sub(2),
            height: panel.height.saturating_sub(2),
        };
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new("Connectez-vous pour accéder au dashboard")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray)),
            rows[0],
        );

        let field_style = |field: LoginField| {
            if self.focus == field {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            }
        };
        let cursor = |field: LoginField| if self.focus == field { "_" } else { "" };

        frame.render_widget(
            Paragraph::new(format!("{}{}", self.username, cursor(LoginField::Username))).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Identifiant ")
                    .border_style(field_style(LoginField::Username)),
            ),
            rows[1],
        );
        frame.render_widget(
            Paragraph::new(format!(
                "{}{}",
                "*".repeat(self.password.chars().count()),
                cursor(LoginField::Password)
            ))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Mot de passe ")
                    .border_style(field_style(LoginField::Password)),
            ),
            rows[2],
        );

        if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(error.as_str())
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Red)),
                rows[3],
            );
        }
    }

    #[cfg(test)]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
