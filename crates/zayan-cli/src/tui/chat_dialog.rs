//! Chat overlay: pick an agent, type a message, send.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use zayan_core::store::DashboardStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    Send { agent_id: String, text: String },
    Cancel,
}

#[derive(Debug, Clone)]
pub struct ChatDialog {
    /// `(id, "<emoji> <name>")`.
    agents: Vec<(String, String)>,
    agent_idx: usize,
    message: String,
}

impl ChatDialog {
    /// Dialog addressed to `preselect` when it names a known agent, else the
    /// first agent.
    pub fn new(store: &DashboardStore, preselect: Option<&str>) -> Self {
        let agents: Vec<_> = store
            .agents()
            .iter()
            .map(|a| (a.id.clone(), format!("{} {}", a.emoji, a.name)))
            .collect();
        let agent_idx = preselect
            .and_then(|id| agents.iter().position(|(a, _)| a == id))
            .unwrap_or(0);
        Self {
            agents,
            agent_idx,
            message: String::new(),
        }
    }

    pub fn agent_id(&self) -> Option<&str> {
        self.agents.get(self.agent_idx).map(|(id, _)| id.as_str())
    }

    fn cycle(&mut self, forward: bool) {
        let len = self.agents.len();
        if len == 0 {
            return;
        }
        self.agent_idx = if forward {
            (self.agent_idx + 1) % len
        } else {
            (self.agent_idx + len - 1) % len
        };
    }

    /// `None` while typing. Enter with a blank message, or with no agent to
    /// address, does nothing.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ChatAction> {
        match key.code {
            KeyCode::Esc => Some(ChatAction::Cancel),
            KeyCode::Enter => {
                let text = self.message.trim();
                if text.is_empty() {
                    return None;
                }
                self.agent_id().map(|agent_id| ChatAction::Send {
                    agent_id: agent_id.to_string(),
                    text: text.to_string(),
                })
            }
            KeyCode::Tab | KeyCode::Right => {
                self.cycle(true);
                None
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.cycle(false);
                None
            }
            KeyCode::Backspace => {
                self.message.pop();
                None
            }
            KeyCode::Char(c) => {
                self.message.push(c);
                None
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width: u16 = 60.min(area.width.saturating_sub(4));
        let height: u16 = 9.min(area.height.saturating_sub(2));
        let dialog_area = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        };
        frame.render_widget(Clear, dialog_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Chat ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

        let target = self
            .agents
            .get(self.agent_idx)
            .map_or("—", |(_, label)| label.as_str());
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("À : ", Style::default().fg(Color::DarkGray)),
                Span::styled(format!("◀ {target} ▶"), Style::default().fg(Color::Yellow)),
            ])),
            rows[0],
        );
        frame.render_widget(
            Paragraph::new(format!("{}_", self.message))
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title(" Message ")),
            rows[1],
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::Yellow)),
                Span::raw(" envoyer  "),
                Span::styled("Tab", Style::default().fg(Color::Yellow)),
                Span::raw(" agent  "),
                Span::styled("Esc", Style::default().fg(Color::Yellow)),
                Span::raw(" fermer"),
            ])),
            rows[2],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use zayan_core::seed::seeded_store;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn preselects_known_agent_or_falls_back_to_first() {
        let store = seeded_store();
        assert_eq!(ChatDialog::new(&store, Some("qa")).agent_id(), Some("qa"));
        assert_eq!(ChatDialog::new(&store, Some("ghost")).agent_id(), Some("zayan"));
        assert_eq!(ChatDialog::new(&store, None).agent_id(), Some("zayan"));
    }

    #[test]
    fn blank_message_does_not_send() {
        let mut dialog = ChatDialog::new(&seeded_store(), None);
        dialog.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), None);
    }

    #[test]
    fn tab_retargets_and_enter_sends_trimmed_text() {
        let mut dialog = ChatDialog::new(&seeded_store(), None);
        dialog.handle_key(key(KeyCode::Tab));
        for c in " déploie ? ".chars() {
            dialog.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            Some(ChatAction::Send {
                agent_id: "frontend".to_string(),
                text: "déploie ?".to_string()
            })
        );
    }

    #[test]
    fn no_agents_means_nothing_to_send() {
        let store = DashboardStore::new();
        let mut dialog = ChatDialog::new(&store, None);
        dialog.handle_key(key(KeyCode::Char('x')));
        dialog.handle_key(key(KeyCode::Tab));
        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(dialog.handle_key(key(KeyCode::Esc)), Some(ChatAction::Cancel));
    }
}
