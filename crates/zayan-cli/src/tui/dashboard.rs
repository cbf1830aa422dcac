//! The main dashboard: sidebar, header, kanban board and activity feed.
//!
//! ## Keys
//!
//! - **h** / **l** (or ←/→) switch column, **j** / **k** (or ↓/↑) switch task
//! - **n** advances the selected task, **p** moves it back, **d** deletes it
//! - **c** opens the create dialog, **m** the chat dialog
//! - **r** requests a refresh notice
//! - **[** / **]** cycle the project filter, **0** shows every project
//! - **L** logs out, **q** or **Ctrl-C** quits

use crate::tui::chat_dialog::{ChatAction, ChatDialog};
use crate::tui::create_dialog::{CreateDialog, DialogAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::time::{Duration, Instant};
use zayan_core::actions;
use zayan_core::board::{
    BoardStats, COLUMNS, active_agent_count, active_agents_label, assignee_label, column_tasks,
};
use zayan_core::clock::IdGenerator;
use zayan_core::config::TimingConfig;
use zayan_core::deferred::DeferredQueue;
use zayan_core::feed::{EMPTY_FEED_LABEL, author_label, relative_age};
use zayan_core::model::{AgentStatus, Priority, Task};
use zayan_core::store::DashboardStore;

/// Label of the "no project filter" sidebar entry.
pub const ALL_PROJECTS_LABEL: &str = "Tous les projets";

const STATUS_TTL: Duration = Duration::from_secs(3);
const SIDEBAR_WIDTH: u16 = 30;

// ---------------------------------------------------------------------------
// Input modes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum InputMode {
    #[default]
    Normal,
    /// Create-task dialog is open.
    CreateModal,
    /// Chat dialog is open.
    ChatModal,
}

/// What the dashboard asks the surrounding app to do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    None,
    Logout,
    Quit,
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

pub struct DashboardView {
    store: DashboardStore,
    ids: IdGenerator,
    queue: DeferredQueue,
    timing: TimingConfig,
    column: usize,
    row: usize,
    input_mode: InputMode,
    create_modal: Option<CreateDialog>,
    chat_modal: Option<ChatDialog>,
    status_msg: Option<(String, Instant)>,
}

impl DashboardView {
    pub fn new(store: DashboardStore, timing: TimingConfig) -> Self {
        Self {
            store,
            ids: IdGenerator::new(),
            queue: DeferredQueue::new(),
            timing,
            column: 0,
            row: 0,
            input_mode: InputMode::Normal,
            create_modal: None,
            chat_modal: None,
            status_msg: None,
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &DashboardStore {
        &self.store
    }

    pub fn set_status(&mut self, msg: String) {
        self.status_msg = Some((msg, Instant::now()));
    }

    /// Leave any open dialog; used when the session ends.
    pub fn close_modals(&mut self) {
        self.input_mode = InputMode::Normal;
        self.create_modal = None;
        self.chat_modal = None;
    }

    /// Apply every deferred event due at `now`. Runs whether or not the
    /// dashboard is on screen.
    pub fn tick(&mut self, now: Instant) -> usize {
        actions::apply_due(&mut self.store, &mut self.ids, &mut self.queue, now)
    }

    /// How long the event loop may block on input: `tick`, shortened so a
    /// pending event fires on time.
    pub fn poll_timeout(&self, now: Instant, tick: Duration) -> Duration {
        self.queue
            .next_due()
            .map_or(tick, |due| tick.min(due.saturating_duration_since(now)))
    }

    fn column_ids(&self, column: usize) -> Vec<String> {
        COLUMNS.get(column).map_or_else(Vec::new, |c| {
            column_tasks(self.store.visible_tasks(), c.status)
                .into_iter()
                .map(|t| t.id.clone())
                .collect()
        })
    }

    /// Id of the highlighted task, if the current column has one.
    pub fn selected_task_id(&self) -> Option<String> {
        self.column_ids(self.column).into_iter().nth(self.row)
    }

    fn clamp_row(&mut self) {
        let len = self.column_ids(self.column).len();
        self.row = self.row.min(len.saturating_sub(1));
    }

    /// Move the selection onto `task_id` wherever it now sits.
    fn focus_task(&mut self, task_id: &str) {
        let Some(task) = self.store.task(task_id) else {
            self.clamp_row();
            return;
        };
        self.column = task.status.column_index();
        self.row = self
            .column_ids(self.column)
            .iter()
            .position(|id| id == task_id)
            .unwrap_or(0);
    }

    fn cycle_project(&mut self, forward: bool) {
        let mut options: Vec<Option<String>> = vec![None];
        options.extend(self.store.projects().iter().map(|p| Some(p.id.clone())));
        let current = self.store.selected_project().map(str::to_string);
        let idx = options.iter().position(|o| *o == current).unwrap_or(0);
        let len = options.len();
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        self.select_project(options.swap_remove(next));
    }

    fn select_project(&mut self, id: Option<String>) {
        let label = id
            .as_deref()
            .and_then(|id| self.store.project(id))
            .map_or_else(|| ALL_PROJECTS_LABEL.to_string(), |p| p.name.clone());
        self.store.select_project(id);
        self.clamp_row();
        self.set_status(format!("Filtre : {label}"));
    }

    // -----------------------------------------------------------------------
    // Key handling
    // -----------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> DashboardAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return DashboardAction::Quit;
        }
        match self.input_mode {
            InputMode::CreateModal => {
                self.handle_create_modal_key(key);
                DashboardAction::None
            }
            InputMode::ChatModal => {
                self.handle_chat_modal_key(key, now);
                DashboardAction::None
            }
            InputMode::Normal => self.handle_normal_key(key, now),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent, now: Instant) -> DashboardAction {
        match key.code {
            KeyCode::Char('q') => return DashboardAction::Quit,
            KeyCode::Char('L') => return DashboardAction::Logout,

            // Navigation
            KeyCode::Char('h') | KeyCode::Left => {
                self.column = self.column.saturating_sub(1);
                self.clamp_row();
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.column = (self.column + 1).min(COLUMNS.len() - 1);
                self.clamp_row();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.row += 1;
                self.clamp_row();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.row = self.row.saturating_sub(1);
            }

            // Task transitions
            KeyCode::Char('n') => {
                if let Some(id) = self.selected_task_id()
                    && let Some(to) = actions::advance_task(&mut self.store, &mut self.ids, &id)
                {
                    self.focus_task(&id);
                    self.set_status(format!("→ {}", to.label()));
                }
            }
            KeyCode::Char('p') => {
                if let Some(id) = self.selected_task_id()
                    && let Some(to) = actions::regress_task(&mut self.store, &mut self.ids, &id)
                {
                    self.focus_task(&id);
                    self.set_status(format!("← {}", to.label()));
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_task_id()
                    && actions::delete_task(&mut self.store, &mut self.ids, &id)
                {
                    self.clamp_row();
                    self.set_status("Tâche supprimée".to_string());
                }
            }

            // Dialogs
            KeyCode::Char('c') => {
                self.create_modal = Some(CreateDialog::new(&self.store));
                self.input_mode = InputMode::CreateModal;
            }
            KeyCode::Char('m') => {
                let preselect = self
                    .selected_task_id()
                    .and_then(|id| actions::task_assignee_id(&self.store, &id));
                self.chat_modal = Some(ChatDialog::new(&self.store, preselect.as_deref()));
                self.input_mode = InputMode::ChatModal;
            }

            KeyCode::Char('r') => {
                actions::request_refresh(&mut self.queue, now, self.timing.refresh_notice_delay());
                self.set_status("Actualisation…".to_string());
            }

            // Project filter
            KeyCode::Char(']') => self.cycle_project(true),
            KeyCode::Char('[') => self.cycle_project(false),
            KeyCode::Char('0') => self.select_project(None),

            _ => {}
        }
        DashboardAction::None
    }

    fn handle_create_modal_key(&mut self, key: KeyEvent) {
        let Some(dialog) = self.create_modal.as_mut() else {
            self.input_mode = InputMode::Normal;
            return;
        };
        match dialog.handle_key(key) {
            Some(DialogAction::Create(input)) => {
                self.close_modals();
                match actions::create_task(&mut self.store, &mut self.ids, input) {
                    Ok(id) => {
                        self.focus_task(&id);
                        self.set_status("Tâche créée".to_string());
                    }
                    Err(e) => self.set_status(format!("{}: {e}", e.code().code())),
                }
            }
            Some(DialogAction::Cancel) => self.close_modals(),
            None => {}
        }
    }

    fn handle_chat_modal_key(&mut self, key: KeyEvent, now: Instant) {
        let Some(dialog) = self.chat_modal.as_mut() else {
            self.input_mode = InputMode::Normal;
            return;
        };
        match dialog.handle_key(key) {
            Some(ChatAction::Send { agent_id, text }) => {
                self.close_modals();
                let sent = actions::send_chat_message(
                    &mut self.store,
                    &mut self.ids,
                    &mut self.queue,
                    now,
                    self.timing.chat_reply_delay(),
                    &agent_id,
                    &text,
                );
                match sent {
                    Ok(()) => self.set_status("Message envoyé".to_string()),
                    Err(e) => self.set_status(format!("{}: {e}", e.code().code())),
                }
            }
            Some(ChatAction::Cancel) => self.close_modals(),
            None => {}
        }
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Draw the dashboard for the signed-in `user`.
    pub fn render(&self, frame: &mut Frame, area: Rect, user: &str) {
        let outer = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)])
            .split(area);
        self.render_sidebar(frame, outer[0]);

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(1),
            ])
            .split(outer[1]);
        self.render_header(frame, main[0], user);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(main[1]);
        self.render_board(frame, body[0]);
        self.render_feed(frame, body[1]);
        self.render_status(frame, main[2]);

        match self.input_mode {
            InputMode::CreateModal => {
                if let Some(dialog) = &self.create_modal {
                    dialog.render(frame, area);
                }
            }
            InputMode::ChatModal => {
                if let Some(dialog) = &self.chat_modal {
                    dialog.render(frame, area);
                }
            }
            InputMode::Normal => {}
        }
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let selected = self.store.selected_project();
        let marker = |active: bool| if active { "● " } else { "  " };
        let entry_style = |active: bool| {
            if active {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            }
        };

        let mut lines = vec![
            Line::from(Span::styled(
                "Projets",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{}{ALL_PROJECTS_LABEL}", marker(selected.is_none())),
                entry_style(selected.is_none()),
            )),
        ];
        for project in self.store.projects() {
            let active = selected == Some(project.id.as_str());
            lines.push(Line::from(vec![
                Span::raw(marker(active)),
                Span::styled(
                    "■ ",
                    Style::default().fg(hex_color(&project.color).unwrap_or(Color::Gray)),
                ),
                Span::styled(project.name.clone(), entry_style(active)),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Équipe",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for agent in self.store.agents() {
            lines.push(Line::from(vec![
                Span::raw(format!("{} ", agent.emoji)),
                Span::styled(
                    agent.name.clone(),
                    Style::default().fg(hex_color(&agent.color).unwrap_or(Color::White)),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::raw("   "),
                Span::styled(agent.status.label(), agent_status_style(agent.status)),
                Span::styled(
                    format!(" · {}", agent.role),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            if let Some(task) = &agent.current_task {
                lines.push(Line::from(vec![
                    Span::raw("   → "),
                    Span::styled(task.clone(), Style::default().add_modifier(Modifier::ITALIC)),
                ]));
            }
        }

        frame.render_widget(
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" 🦦 Zayan HQ ")),
            area,
        );
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, user: &str) {
        let stats = BoardStats::from_tasks(self.store.tasks());
        let active = active_agent_count(self.store.agents());
        let line = Line::from(vec![
            Span::styled(stats.summary(), Style::default().fg(Color::White)),
            Span::raw("   "),
            Span::styled(
                active_agents_label(active),
                Style::default().fg(if active > 0 { Color::Green } else { Color::DarkGray }),
            ),
            Span::raw("   "),
            Span::styled(format!("👤 {user}"), Style::default().fg(Color::Cyan)),
        ]);
        frame.render_widget(
            Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" Tableau ")),
            area,
        );
    }

    fn render_board(&self, frame: &mut Frame, area: Rect) {
        let lanes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 5); 5])
            .split(area);
        let visible = self.store.visible_tasks();

        for (idx, (column, lane)) in COLUMNS.iter().zip(lanes.iter()).enumerate() {
            let tasks = column_tasks(visible.iter().copied(), column.status);
            let focused = idx == self.column;
            let items: Vec<ListItem> = tasks.iter().map(|task| self.task_item(task)).collect();
            let border = if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(border)
                        .title(format!(" {} ({}) ", column.label, tasks.len())),
                )
                .highlight_style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .fg(Color::White)
                        .bg(Color::DarkGray),
                );
            let mut state = ListState::default();
            if focused && !tasks.is_empty() {
                state.select(Some(self.row));
            }
            frame.render_stateful_widget(list, *lane, &mut state);
        }
    }

    fn task_item(&self, task: &Task) -> ListItem<'static> {
        ListItem::new(vec![
            Line::from(Span::styled(
                task.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(task.priority.label(), priority_style(task.priority)),
                Span::raw(" · "),
                Span::styled(
                    assignee_label(&self.store, task),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::from(""),
        ])
    }

    fn render_feed(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Activité récente ");
        let activities = self.store.activities();
        if activities.is_empty() {
            frame.render_widget(
                Paragraph::new(EMPTY_FEED_LABEL)
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block),
                area,
            );
            return;
        }

        let now = self.store.now();
        let capacity = usize::from(area.height.saturating_sub(2)) / 2 + 1;
        let items: Vec<ListItem> = activities
            .iter()
            .take(capacity)
            .map(|entry| {
                let author = author_label(&self.store, entry).unwrap_or_default();
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            format!("[{}] ", entry.kind.label()),
                            Style::default().fg(Color::Yellow),
                        ),
                        Span::raw(author),
                        Span::styled(
                            format!(" · {}", relative_age(now, entry.timestamp)),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]),
                    Line::from(format!("  {}", entry.message)),
                ])
            })
            .collect();
        frame.render_widget(List::new(items).block(block), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if let Some((msg, at)) = &self.status_msg
            && at.elapsed() < STATUS_TTL
        {
            frame.render_widget(
                Paragraph::new(Span::styled(msg.clone(), Style::default().fg(Color::Cyan))),
                area,
            );
            return;
        }

        let key = Style::default().fg(Color::Yellow);
        let mut spans = Vec::new();
        for (k, label) in [
            ("h/l", " colonne  "),
            ("j/k", " tâche  "),
            ("n/p", " avancer/reculer  "),
            ("d", " supprimer  "),
            ("c", " créer  "),
            ("m", " chat  "),
            ("r", " actualiser  "),
            ("[/]", " projet  "),
            ("L", " déconnexion  "),
            ("q", " quitter"),
        ] {
            spans.push(Span::styled(k, key));
            spans.push(Span::styled(label, Style::default().fg(Color::DarkGray)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    #[cfg(test)]
    fn status(&self) -> Option<&str> {
        self.status_msg.as_ref().map(|(msg, _)| msg.as_str())
    }
}

/// Parse a `#rrggbb` colour.
fn hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

const fn priority_style(priority: Priority) -> Style {
    let color = match priority {
        Priority::Low => Color::DarkGray,
        Priority::Medium => Color::Blue,
        Priority::High => Color::Yellow,
        Priority::Urgent => Color::Red,
    };
    Style::new().fg(color)
}

const fn agent_status_style(status: AgentStatus) -> Style {
    let color = match status {
        AgentStatus::Idle => Color::Gray,
        AgentStatus::Working => Color::Green,
        AgentStatus::Done => Color::Blue,
        AgentStatus::Error => Color::Red,
    };
    Style::new().fg(color)
}
