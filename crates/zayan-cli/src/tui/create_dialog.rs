//! TUI create dialog.
//!
//! Opened with `c` on the board. Collects a title, description, priority,
//! assignee, project and tags, then hands a [`NewTask`] back to the caller.
//!
//! - **Tab** / **Shift-Tab** move between fields
//! - **←** / **→** cycle the priority, assignee and project pickers
//! - **Enter** (or **Ctrl-S**) creates the task once the title is non-blank
//! - **Esc** cancels

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use zayan_core::actions::NewTask;
use zayan_core::model::Priority;
use zayan_core::store::DashboardStore;

/// The action the dialog wants the caller to take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogAction {
    Create(NewTask),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Field {
    #[default]
    Title,
    Description,
    Priority,
    Assignee,
    Project,
    Tags,
}

impl Field {
    const fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Priority,
            Self::Priority => Self::Assignee,
            Self::Assignee => Self::Project,
            Self::Project => Self::Tags,
            Self::Tags => Self::Title,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Tags,
            Self::Description => Self::Title,
            Self::Priority => Self::Description,
            Self::Assignee => Self::Priority,
            Self::Project => Self::Assignee,
            Self::Tags => Self::Project,
        }
    }

    const fn is_text(self) -> bool {
        matches!(self, Self::Title | Self::Description | Self::Tags)
    }
}

/// `(id, label)` pairs; index 0 of an optional picker means "none".
type Choices = Vec<(String, String)>;

#[derive(Debug, Clone)]
pub struct CreateDialog {
    focus: Field,
    title: String,
    description: String,
    priority_idx: usize,
    agents: Choices,
    assignee_idx: usize,
    projects: Choices,
    project_idx: usize,
    tags: String,
}

impl CreateDialog {
    /// Dialog listing the store's agents and projects. The project picker
    /// starts on the currently selected project filter.
    pub fn new(store: &DashboardStore) -> Self {
        let agents: Choices = store
            .agents()
            .iter()
            .map(|a| (a.id.clone(), format!("{} {}", a.emoji, a.name)))
            .collect();
        let projects: Choices = store
            .projects()
            .iter()
            .map(|p| (p.id.clone(), p.name.clone()))
            .collect();
        let project_idx = store
            .selected_project()
            .and_then(|sel| projects.iter().position(|(id, _)| id == sel))
            .map_or(0, |idx| idx + 1);
        let priority_idx = Priority::ALL
            .iter()
            .position(|p| *p == Priority::default())
            .unwrap_or(0);

        Self {
            focus: Field::Title,
            title: String::new(),
            description: String::new(),
            priority_idx,
            agents,
            assignee_idx: 0,
            projects,
            project_idx,
            tags: String::new(),
        }
    }

    fn can_submit(&self) -> bool {
        !self.title.trim().is_empty()
    }

    fn priority(&self) -> Priority {
        Priority::ALL
            .get(self.priority_idx)
            .copied()
            .unwrap_or_default()
    }

    fn pick(choices: &Choices, idx: usize) -> Option<&(String, String)> {
        idx.checked_sub(1).and_then(|i| choices.get(i))
    }

    fn build(&self) -> NewTask {
        NewTask {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            priority: self.priority(),
            assigned_to: Self::pick(&self.agents, self.assignee_idx).map(|(id, _)| id.clone()),
            project_id: Self::pick(&self.projects, self.project_idx).map(|(id, _)| id.clone()),
            tags: self
                .tags
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    fn cycle(&mut self, forward: bool) {
        let (idx, len) = match self.focus {
            Field::Priority => (&mut self.priority_idx, Priority::ALL.len()),
            Field::Assignee => (&mut self.assignee_idx, self.agents.len() + 1),
            Field::Project => (&mut self.project_idx, self.projects.len() + 1),
            _ => return,
        };
        *idx = if forward {
            (*idx + 1) % len
        } else {
            (*idx + len - 1) % len
        };
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Title => Some(&mut self.title),
            Field::Description => Some(&mut self.description),
            Field::Tags => Some(&mut self.tags),
            Field::Priority | Field::Assignee | Field::Project => None,
        }
    }

    /// Feed a key event to the dialog.
    ///
    /// Returns `Some(DialogAction)` when the dialog is complete, `None` while
    /// the user is still editing. Submitting with a blank title keeps the
    /// dialog open.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DialogAction> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => Some(DialogAction::Cancel),
            KeyCode::Enter => self.can_submit().then(|| DialogAction::Create(self.build())),
            KeyCode::Char('s') if ctrl => {
                self.can_submit().then(|| DialogAction::Create(self.build()))
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Left => {
                self.cycle(false);
                None
            }
            KeyCode::Right => {
                self.cycle(true);
                None
            }
            KeyCode::Backspace => {
                if let Some(text) = self.text_mut() {
                    text.pop();
                }
                None
            }
            KeyCode::Char(' ') if !self.focus.is_text() => {
                self.cycle(true);
                None
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.text_mut() {
                    text.push(c);
                }
                None
            }
            _ => None,
        }
    }

    fn field_line(&self, field: Field, label: &str, value: String) -> Line<'static> {
        let focused = self.focus == field;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value = if focused && field.is_text() {
            format!("{value}_")
        } else if focused {
            format!("◀ {value} ▶")
        } else {
            value
        };
        Line::from(vec![
            Span::styled(format!("{label:<12}"), label_style),
            Span::raw(value),
        ])
    }

    /// Render the dialog as a centered overlay on top of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let dialog_w: u16 = 64.min(area.width.saturating_sub(4));
        let dialog_h: u16 = 11.min(area.height.saturating_sub(2));
        let dialog_area = Rect {
            x: area.x + area.width.saturating_sub(dialog_w) / 2,
            y: area.y + area.height.saturating_sub(dialog_h) / 2,
            width: dialog_w,
            height: dialog_h,
        };

        frame.render_widget(Clear, dialog_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Nouvelle tâche ")
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let none = || "—".to_string();
        let lines = vec![
            self.field_line(Field::Title, "Titre", self.title.clone()),
            self.field_line(Field::Description, "Description", self.description.clone()),
            self.field_line(Field::Priority, "Priorité", self.priority().label().to_string()),
            self.field_line(
                Field::Assignee,
                "Assigné à",
                Self::pick(&self.agents, self.assignee_idx).map_or_else(none, |(_, l)| l.clone()),
            ),
            self.field_line(
                Field::Project,
                "Projet",
                Self::pick(&self.projects, self.project_idx)
                    .map_or_else(none, |(_, l)| l.clone()),
            ),
            self.field_line(Field::Tags, "Tags", self.tags.clone()),
        ];

        let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner);
        frame.render_widget(Paragraph::new(lines), chunks[0]);

        let submit_style = if self.can_submit() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let hints = Line::from(vec![
            Span::styled("Enter", submit_style),
            Span::raw(" créer  "),
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(" champ  "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" annuler"),
        ]);
        frame.render_widget(Paragraph::new(hints), chunks[1]);
    }

    /// The current title being entered (for external read-back).
    #[cfg(test)]
    pub fn title(&self) -> &str {
        &self.title
    }
}
