//! Application state and key handling
//!
//! The App owns the tracker, the current screen, the selection indexes
//! and any open creation form. Every key event funnels through
//! `handle_key`; rendering reads the state but never changes it.

use chrono::{Duration, Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tracing::debug;

use taskflow_core::calendar;
use taskflow_core::project::CreateProjectRequest;
use taskflow_core::task::{CreateTaskRequest, TaskPriority, TaskStatus};
use taskflow_core::Tracker;

use crate::settings::Settings;

/// Top-level screens, reached from the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Tasks,
    Projects,
    Calendar,
    Settings,
}

/// Menu entries in display order
pub const MENU_ITEMS: [&str; 4] = ["Tasks", "Projects", "Calendar", "Settings"];

/// Number of rows on the settings screen
pub const SETTINGS_ROWS: usize = 3;

const TASK_FORM_FIELDS: usize = 4;
const PROJECT_FORM_FIELDS: usize = 3;

/// In-progress task creation form
///
/// Field order is name, priority, due date, project. The date is kept
/// as raw text until submit; the project is picked by cycling through
/// the existing projects with the arrow keys.
#[derive(Debug, Default)]
pub struct TaskForm {
    pub name: String,
    pub priority: TaskPriority,
    pub due_date: String,
    pub project_id: Option<u64>,
    pub field: usize,
}

/// In-progress project creation form
///
/// Field order is name, start date, end date. New projects always start
/// at zero progress.
#[derive(Debug, Default)]
pub struct ProjectForm {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub field: usize,
}

impl ProjectForm {
    fn current_field_mut(&mut self) -> &mut String {
        match self.field {
            0 => &mut self.name,
            1 => &mut self.start_date,
            _ => &mut self.end_date,
        }
    }
}

/// State for the terminal frontend
#[derive(Debug)]
pub struct App {
    pub tracker: Tracker,
    pub settings: Settings,
    pub screen: Screen,
    pub menu_index: usize,
    pub task_index: usize,
    pub project_index: usize,
    pub settings_index: usize,
    pub selected_date: NaiveDate,
    pub task_form: Option<TaskForm>,
    pub project_form: Option<ProjectForm>,
    pub status_line: Option<String>,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Empty tracker, calendar opened on today
    pub fn new() -> Self {
        Self {
            tracker: Tracker::new(),
            settings: Settings::default(),
            screen: Screen::Menu,
            menu_index: 0,
            task_index: 0,
            project_index: 0,
            settings_index: 0,
            selected_date: Local::now().date_naive(),
            task_form: None,
            project_form: None,
            status_line: None,
            should_quit: false,
        }
    }

    /// Tracker pre-filled with a small demo dataset
    pub fn with_demo_data() -> Self {
        let mut app = Self::new();
        app.seed_demo_data();
        app
    }

    fn seed_demo_data(&mut self) {
        let planning = self.tracker.create_project(CreateProjectRequest {
            name: "Q4 Planning".to_string(),
            progress: 65,
            start_date: parse_date("2024-10-01"),
            end_date: parse_date("2024-12-31"),
        });
        let redesign = self.tracker.create_project(CreateProjectRequest {
            name: "Website Redesign".to_string(),
            progress: 30,
            start_date: parse_date("2024-10-15"),
            end_date: parse_date("2024-11-30"),
        });
        let (Ok(planning), Ok(redesign)) = (planning, redesign) else {
            return;
        };

        let seeds = [
            (
                "Complete project proposal",
                planning.id,
                TaskPriority::High,
                "2024-10-28",
                "Finish the Q4 proposal",
                TaskStatus::InProgress,
            ),
            (
                "Review team feedback",
                planning.id,
                TaskPriority::Medium,
                "2024-10-26",
                "Go through all feedback",
                TaskStatus::Pending,
            ),
            (
                "Update documentation",
                redesign.id,
                TaskPriority::Low,
                "2024-10-30",
                "Update API docs",
                TaskStatus::Pending,
            ),
        ];
        for (name, project_id, priority, due, description, status) in seeds {
            let created = self.tracker.create_task(CreateTaskRequest {
                name: name.to_string(),
                priority,
                due_date: parse_date(due),
                project_id: Some(project_id),
                description: description.to_string(),
            });
            let Ok(task) = created else { continue };
            if status != TaskStatus::Pending {
                let _ = self.tracker.set_task_status(task.id, status);
            }
        }

        // Land the calendar in the week the demo tasks are due.
        self.selected_date =
            NaiveDate::from_ymd_opt(2024, 10, 24).unwrap_or(self.selected_date);
    }

    /// Route one key event. Only presses act; repeats and releases are
    /// ignored so Windows terminals do not double-fire.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.status_line = None;

        if self.task_form.is_some() {
            self.handle_task_form_key(key.code);
            return;
        }
        if self.project_form.is_some() {
            self.handle_project_form_key(key.code);
            return;
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Esc if self.screen != Screen::Menu => {
                self.screen = Screen::Menu;
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Menu => self.handle_menu_key(key.code),
            Screen::Tasks => self.handle_tasks_key(key.code),
            Screen::Projects => self.handle_projects_key(key.code),
            Screen::Calendar => self.handle_calendar_key(key.code),
            Screen::Settings => self.handle_settings_key(key.code),
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_index = self.menu_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.menu_index + 1 < MENU_ITEMS.len() {
                    self.menu_index += 1;
                }
            }
            KeyCode::Enter => {
                self.screen = match self.menu_index {
                    0 => Screen::Tasks,
                    1 => Screen::Projects,
                    2 => Screen::Calendar,
                    _ => Screen::Settings,
                };
            }
            _ => {}
        }
    }

    fn handle_tasks_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.task_index = self.task_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.task_index + 1 < self.tracker.task_count() {
                    self.task_index += 1;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(id) = self.selected_task_id() {
                    if let Err(err) = self.tracker.toggle_task_completion(id) {
                        self.status_line = Some(err.to_string());
                    }
                }
            }
            KeyCode::Char('a') => {
                self.task_form = Some(TaskForm::default());
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_task_id() {
                    if let Err(err) = self.tracker.delete_task(id) {
                        self.status_line = Some(err.to_string());
                    }
                    self.clamp_selections();
                }
            }
            _ => {}
        }
    }

    fn handle_projects_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.project_index = self.project_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.project_index + 1 < self.tracker.project_count() {
                    self.project_index += 1;
                }
            }
            KeyCode::Char('a') => {
                self.project_form = Some(ProjectForm::default());
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_project_id() {
                    if let Err(err) = self.tracker.delete_project(id) {
                        self.status_line = Some(err.to_string());
                    }
                    self.clamp_selections();
                }
            }
            _ => {}
        }
    }

    fn handle_calendar_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left => self.step_selected_date(-1),
            KeyCode::Right => self.step_selected_date(1),
            KeyCode::Up => self.step_selected_date(-7),
            KeyCode::Down => self.step_selected_date(7),
            KeyCode::PageUp => {
                self.selected_date = calendar::prev_month(self.selected_date);
            }
            KeyCode::PageDown => {
                self.selected_date = calendar::next_month(self.selected_date);
            }
            KeyCode::Char('t') => {
                self.selected_date = Local::now().date_naive();
            }
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.settings_index = self.settings_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.settings_index + 1 < SETTINGS_ROWS {
                    self.settings_index += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.settings_index {
                0 => self.settings.toggle_dark_mode(),
                1 => self.settings.cycle_text_size(),
                _ => self.settings.toggle_push_notifications(),
            },
            _ => {}
        }
    }

    fn handle_task_form_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.task_form = None;
                return;
            }
            KeyCode::Enter => {
                self.submit_task_form();
                return;
            }
            _ => {}
        }

        let project_ids: Vec<u64> = self.tracker.projects().iter().map(|p| p.id).collect();
        let Some(form) = self.task_form.as_mut() else {
            return;
        };
        match code {
            KeyCode::Tab | KeyCode::Down => {
                form.field = (form.field + 1) % TASK_FORM_FIELDS;
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.field = (form.field + TASK_FORM_FIELDS - 1) % TASK_FORM_FIELDS;
            }
            KeyCode::Left | KeyCode::Right => {
                let forward = code == KeyCode::Right;
                match form.field {
                    1 => {
                        form.priority = if forward {
                            next_priority(form.priority)
                        } else {
                            prev_priority(form.priority)
                        };
                    }
                    3 => {
                        form.project_id = cycle_project(form.project_id, &project_ids, forward);
                    }
                    _ => {}
                }
            }
            KeyCode::Backspace => match form.field {
                0 => {
                    form.name.pop();
                }
                2 => {
                    form.due_date.pop();
                }
                _ => {}
            },
            KeyCode::Char(c) => match form.field {
                0 => form.name.push(c),
                2 => form.due_date.push(c),
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_project_form_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.project_form = None;
                return;
            }
            KeyCode::Enter => {
                self.submit_project_form();
                return;
            }
            _ => {}
        }

        let Some(form) = self.project_form.as_mut() else {
            return;
        };
        match code {
            KeyCode::Tab | KeyCode::Down => {
                form.field = (form.field + 1) % PROJECT_FORM_FIELDS;
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.field = (form.field + PROJECT_FORM_FIELDS - 1) % PROJECT_FORM_FIELDS;
            }
            KeyCode::Backspace => {
                form.current_field_mut().pop();
            }
            KeyCode::Char(c) => {
                form.current_field_mut().push(c);
            }
            _ => {}
        }
    }

    /// Submit the open task form. On rejection the form stays open with
    /// the message shown in the footer.
    fn submit_task_form(&mut self) {
        let Some(form) = self.task_form.take() else {
            return;
        };
        let request = CreateTaskRequest {
            name: form.name.clone(),
            priority: form.priority,
            due_date: parse_date(&form.due_date),
            project_id: form.project_id,
            ..Default::default()
        };
        match self.tracker.create_task(request) {
            Ok(task) => {
                debug!(task_id = task.id, "created task from form");
                if let Some(pos) = self.tracker.tasks().iter().position(|t| t.id == task.id) {
                    self.task_index = pos;
                }
            }
            Err(err) => {
                self.status_line = Some(err.to_string());
                self.task_form = Some(form);
            }
        }
    }

    fn submit_project_form(&mut self) {
        let Some(form) = self.project_form.take() else {
            return;
        };
        let request = CreateProjectRequest {
            name: form.name.clone(),
            progress: 0,
            start_date: parse_date(&form.start_date),
            end_date: parse_date(&form.end_date),
        };
        match self.tracker.create_project(request) {
            Ok(project) => {
                debug!(project_id = project.id, "created project from form");
                if let Some(pos) = self
                    .tracker
                    .projects()
                    .iter()
                    .position(|p| p.id == project.id)
                {
                    self.project_index = pos;
                }
            }
            Err(err) => {
                self.status_line = Some(err.to_string());
                self.project_form = Some(form);
            }
        }
    }

    pub fn selected_task_id(&self) -> Option<u64> {
        self.tracker.tasks().get(self.task_index).map(|t| t.id)
    }

    pub fn selected_project_id(&self) -> Option<u64> {
        self.tracker.projects().get(self.project_index).map(|p| p.id)
    }

    fn step_selected_date(&mut self, days: i64) {
        if let Some(date) = self.selected_date.checked_add_signed(Duration::days(days)) {
            self.selected_date = date;
        }
    }

    fn clamp_selections(&mut self) {
        self.task_index = self
            .task_index
            .min(self.tracker.task_count().saturating_sub(1));
        self.project_index = self
            .project_index
            .min(self.tracker.project_count().saturating_sub(1));
    }
}

/// Parse a YYYY-MM-DD form field, treating anything else as no date
fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

fn next_priority(priority: TaskPriority) -> TaskPriority {
    match priority {
        TaskPriority::Low => TaskPriority::Medium,
        TaskPriority::Medium => TaskPriority::High,
        TaskPriority::High => TaskPriority::Low,
    }
}

fn prev_priority(priority: TaskPriority) -> TaskPriority {
    match priority {
        TaskPriority::Low => TaskPriority::High,
        TaskPriority::Medium => TaskPriority::Low,
        TaskPriority::High => TaskPriority::Medium,
    }
}

/// Step through No Project and each existing project in turn
fn cycle_project(current: Option<u64>, ids: &[u64], forward: bool) -> Option<u64> {
    if ids.is_empty() {
        return None;
    }
    let position = current.and_then(|id| ids.iter().position(|&p| p == id));
    if forward {
        match position {
            None => Some(ids[0]),
            Some(i) if i + 1 < ids.len() => Some(ids[i + 1]),
            Some(_) => None,
        }
    } else {
        match position {
            None => ids.last().copied(),
            Some(0) => None,
            Some(i) => Some(ids[i - 1]),
        }
    }
}
