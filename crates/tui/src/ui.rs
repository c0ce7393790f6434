//! Rendering for the terminal app
//!
//! One draw function per screen, dispatched on the current screen. The
//! creation forms render as centered overlays on top of the screen
//! content, and the bottom row carries key hints or the latest error.

use chrono::{Datelike, NaiveDate};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use taskflow_core::calendar::{self, DayCell};
use taskflow_core::project::Project;
use taskflow_core::task::{Task, TaskPriority, TaskStatus};

use crate::app::{App, ProjectForm, Screen, TaskForm, MENU_ITEMS};
use crate::settings::TextSize;

/// Colors derived from the dark mode setting
struct Theme {
    fg: Color,
    dim: Color,
    highlight: Color,
    accent: Color,
}

impl Theme {
    fn new(dark_mode: bool) -> Self {
        if dark_mode {
            Self {
                fg: Color::White,
                dim: Color::DarkGray,
                highlight: Color::Cyan,
                accent: Color::Blue,
            }
        } else {
            Self {
                fg: Color::Black,
                dim: Color::Gray,
                highlight: Color::Blue,
                accent: Color::Blue,
            }
        }
    }
}

/// Draw the whole frame for the current screen
pub fn draw(frame: &mut Frame, app: &App) {
    let theme = Theme::new(app.settings.dark_mode);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    match app.screen {
        Screen::Menu => draw_menu(frame, app, &theme, chunks[0]),
        Screen::Tasks => draw_tasks(frame, app, &theme, chunks[0]),
        Screen::Projects => draw_projects(frame, app, &theme, chunks[0]),
        Screen::Calendar => draw_calendar(frame, app, &theme, chunks[0]),
        Screen::Settings => draw_settings(frame, app, &theme, chunks[0]),
    }
    draw_footer(frame, app, &theme, chunks[1]);

    if let Some(form) = &app.task_form {
        draw_task_form(frame, app, &theme, form);
    }
    if let Some(form) = &app.project_form {
        draw_project_form(frame, &theme, form);
    }
}

fn draw_menu(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let items: Vec<ListItem> = MENU_ITEMS
        .iter()
        .map(|label| ListItem::new(Line::from(*label)))
        .collect();
    let list = List::new(items)
        .block(Block::default().title("TaskFlow").borders(Borders::ALL))
        .style(Style::default().fg(theme.fg))
        .highlight_style(
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.menu_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_tasks(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let tasks = app.tracker.tasks();
    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| task_list_item(app, theme, task))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .title(format!("Tasks ({})", tasks.len()))
                .borders(Borders::ALL),
        )
        .style(Style::default().fg(theme.fg))
        .highlight_style(
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    let selected = if tasks.is_empty() {
        None
    } else {
        Some(app.task_index.min(tasks.len() - 1))
    };
    state.select(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

/// Render one task row. The text size setting controls the row density:
/// small packs everything on one line and drops the description. Medium
/// and large add the detail and description lines; large also pads each
/// row with a spacer.
fn task_list_item<'a>(app: &'a App, theme: &Theme, task: &'a Task) -> ListItem<'a> {
    let checkbox = if task.is_completed() { "[x] " } else { "[ ] " };
    let name_style = if task.is_completed() {
        Style::default()
            .fg(theme.dim)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(theme.fg)
    };

    let mut header = vec![
        Span::raw(checkbox),
        Span::styled(task.name.as_str(), name_style),
    ];
    if let Some(project) = task.project_id.and_then(|id| app.tracker.project(id)) {
        header.push(Span::styled(
            format!("  #{}", project.name),
            Style::default().fg(theme.accent),
        ));
    }

    let mut detail = vec![Span::styled(
        task.priority.as_str(),
        Style::default().fg(priority_color(task.priority)),
    )];
    if let Some(due) = task.due_date {
        detail.push(Span::styled(
            format!("  due {}", due.format("%Y-%m-%d")),
            Style::default().fg(theme.dim),
        ));
    }
    detail.push(Span::styled(
        format!("  {}", task.status.as_str()),
        Style::default().fg(status_color(task.status)),
    ));

    match app.settings.text_size {
        TextSize::Small => {
            header.push(Span::raw("  "));
            header.extend(detail);
            ListItem::new(Line::from(header))
        }
        TextSize::Medium | TextSize::Large => {
            let mut second = vec![Span::raw("    ")];
            second.extend(detail);
            let mut lines = vec![Line::from(header), Line::from(second)];
            if !task.description.is_empty() {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(task.description.as_str(), Style::default().fg(theme.dim)),
                ]));
            }
            if app.settings.text_size == TextSize::Large {
                lines.push(Line::from(""));
            }
            ListItem::new(lines)
        }
    }
}

fn draw_projects(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let projects = app.tracker.projects();
    let block = Block::default()
        .title(format!("Projects ({})", projects.len()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if projects.is_empty() {
        let empty = Paragraph::new("No projects yet. Press a to add one.")
            .style(Style::default().fg(theme.dim));
        frame.render_widget(empty, inner);
        return;
    }

    let row_height = 4u16;
    let visible = (inner.height / row_height).max(1) as usize;
    let first = (app.project_index + 1).saturating_sub(visible);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(row_height); visible])
        .split(inner);

    for (slot, project) in projects.iter().skip(first).take(visible).enumerate() {
        let selected = first + slot == app.project_index;
        draw_project_row(frame, app, theme, rows[slot], project, selected);
    }
}

fn draw_project_row(
    frame: &mut Frame,
    app: &App,
    theme: &Theme,
    area: Rect,
    project: &Project,
    selected: bool,
) {
    if area.height < 2 {
        return;
    }
    let border_style = if selected {
        Style::default().fg(theme.highlight)
    } else {
        Style::default().fg(theme.dim)
    };
    let (done, total) = app.tracker.completion_ratio(project.id);
    let block = Block::default()
        .title(format!("{} ({}/{} tasks done)", project.name, done, total))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.accent))
        .percent(u16::from(project.progress.min(100)))
        .label(format!("{}%", project.progress));
    frame.render_widget(gauge, rows[0]);

    let dates = Paragraph::new(format!(
        "{} to {}",
        format_date_opt(project.start_date),
        format_date_opt(project.end_date)
    ))
    .style(Style::default().fg(theme.dim));
    frame.render_widget(dates, rows[1]);
}

fn draw_calendar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block = Block::default()
        .title(app.selected_date.format("%B %Y").to_string())
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(6),
            Constraint::Min(1),
        ])
        .split(inner);

    let header: Vec<Span> = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]
        .iter()
        .map(|name| Span::styled(format!("{:>4}", name), Style::default().fg(theme.dim)))
        .collect();
    frame.render_widget(Paragraph::new(Line::from(header)), sections[0]);

    let cells = calendar::month_grid(app.selected_date);
    let lines: Vec<Line> = cells
        .chunks(7)
        .map(|week| {
            Line::from(
                week.iter()
                    .map(|cell| day_span(app, theme, cell))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), sections[1]);

    let due = app.tracker.tasks_due_on(app.selected_date);
    let items: Vec<ListItem> = due
        .iter()
        .map(|task| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    task.priority.as_str(),
                    Style::default().fg(priority_color(task.priority)),
                ),
                Span::raw("  "),
                Span::styled(task.name.as_str(), Style::default().fg(theme.fg)),
            ]))
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .title(format!("Due {}", app.selected_date.format("%Y-%m-%d")))
            .borders(Borders::TOP),
    );
    frame.render_widget(list, sections[2]);
}

fn day_span(app: &App, theme: &Theme, cell: &DayCell) -> Span<'static> {
    let text = format!("{:>4}", cell.day);
    if !cell.is_current_month {
        return Span::styled(text, Style::default().fg(theme.dim));
    }

    let has_due = app
        .selected_date
        .with_day(cell.day)
        .map(|date| !app.tracker.tasks_due_on(date).is_empty())
        .unwrap_or(false);

    let mut style = Style::default().fg(theme.fg);
    if has_due {
        style = style.fg(theme.accent).add_modifier(Modifier::BOLD);
    }
    if cell.day == app.selected_date.day() {
        style = Style::default()
            .fg(Color::Black)
            .bg(theme.highlight)
            .add_modifier(Modifier::BOLD);
    }
    Span::styled(text, style)
}

fn draw_settings(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let values = [
        ("Dark mode", on_off(app.settings.dark_mode).to_string()),
        ("Text size", app.settings.text_size.as_str().to_string()),
        (
            "Push notifications",
            on_off(app.settings.push_notifications).to_string(),
        ),
    ];
    let items: Vec<ListItem> = values
        .into_iter()
        .map(|(label, value)| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<20}", label)),
                Span::styled(value, Style::default().fg(theme.accent)),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().title("Settings").borders(Borders::ALL))
        .style(Style::default().fg(theme.fg))
        .highlight_style(
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.settings_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_footer(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let line = if let Some(status) = &app.status_line {
        Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Red),
        ))
    } else {
        let hint = if app.task_form.is_some() || app.project_form.is_some() {
            "Tab next field | Enter save | Esc cancel"
        } else {
            match app.screen {
                Screen::Menu => "Up/Down select | Enter open | q quit",
                Screen::Tasks => "Space toggle | a add | d delete | Esc back | q quit",
                Screen::Projects => "a add | d delete | Esc back | q quit",
                Screen::Calendar => "Arrows move | PgUp/PgDn month | t today | Esc back",
                Screen::Settings => "Up/Down select | Enter change | Esc back",
            }
        };
        Line::from(Span::styled(hint, Style::default().fg(theme.dim)))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_task_form(frame: &mut Frame, app: &App, theme: &Theme, form: &TaskForm) {
    let area = centered_rect(60, 6, frame.area());
    frame.render_widget(Clear, area);
    let block = Block::default().title("New Task").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let project_label = form
        .project_id
        .and_then(|id| app.tracker.project(id))
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "No Project".to_string());

    let rows = [
        ("Name", form.name.clone()),
        ("Priority", form.priority.as_str().to_string()),
        ("Due date", form.due_date.clone()),
        ("Project", project_label),
    ];
    let lines: Vec<Line> = rows
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| form_line(theme, label, value, form.field == i))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_project_form(frame: &mut Frame, theme: &Theme, form: &ProjectForm) {
    let area = centered_rect(60, 5, frame.area());
    frame.render_widget(Clear, area);
    let block = Block::default().title("New Project").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = [
        ("Name", form.name.clone()),
        ("Start date", form.start_date.clone()),
        ("End date", form.end_date.clone()),
    ];
    let lines: Vec<Line> = rows
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| form_line(theme, label, value, form.field == i))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn form_line(theme: &Theme, label: &str, value: String, focused: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let value_style = if focused {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg)
    };
    Line::from(vec![
        Span::raw(marker.to_string()),
        Span::raw(format!("{:<12}", label)),
        Span::styled(value, value_style),
    ])
}

fn priority_color(priority: TaskPriority) -> Color {
    match priority {
        TaskPriority::High => Color::Red,
        TaskPriority::Medium => Color::Yellow,
        TaskPriority::Low => Color::Green,
    }
}

fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Completed => Color::Green,
        TaskStatus::InProgress => Color::Blue,
        TaskStatus::Pending => Color::Gray,
    }
}

fn format_date_opt(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => "unscheduled".to_string(),
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "On"
    } else {
        "Off"
    }
}

fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    // u16 math overflows on very wide terminals
    let width = (u32::from(area.width) * u32::from(width_percent) / 100).max(1) as u16;
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(app: &App) -> String {
        render_sized(app, 80, 24)
    }

    fn render_sized(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_menu_renders_all_entries() {
        let app = App::new();
        let rendered = render(&app);

        assert!(rendered.contains("TaskFlow"));
        for label in MENU_ITEMS {
            assert!(rendered.contains(label));
        }
    }

    #[test]
    fn test_tasks_screen_shows_demo_tasks() {
        let mut app = App::with_demo_data();
        app.screen = Screen::Tasks;
        let rendered = render(&app);

        assert!(rendered.contains("Complete project proposal"));
        assert!(rendered.contains("#Q4 Planning"));
        assert!(rendered.contains("In Progress"));
    }

    #[test]
    fn test_task_description_visible_at_medium_and_large() {
        let mut app = App::with_demo_data();
        app.screen = Screen::Tasks;

        app.settings.text_size = TextSize::Medium;
        assert!(render(&app).contains("Finish the Q4 proposal"));

        app.settings.text_size = TextSize::Large;
        assert!(render(&app).contains("Finish the Q4 proposal"));

        app.settings.text_size = TextSize::Small;
        assert!(!render(&app).contains("Finish the Q4 proposal"));
    }

    #[test]
    fn test_every_screen_and_text_size_renders() {
        let mut app = App::with_demo_data();
        let screens = [
            Screen::Menu,
            Screen::Tasks,
            Screen::Projects,
            Screen::Calendar,
            Screen::Settings,
        ];
        let sizes = [TextSize::Small, TextSize::Medium, TextSize::Large];
        for screen in screens {
            for size in sizes {
                app.screen = screen;
                app.settings.text_size = size;
                render(&app);
            }
        }
    }

    #[test]
    fn test_projects_screen_shows_progress() {
        let mut app = App::with_demo_data();
        app.screen = Screen::Projects;
        let rendered = render(&app);

        assert!(rendered.contains("Q4 Planning"));
        assert!(rendered.contains("65%"));
        assert!(rendered.contains("2024-10-01 to 2024-12-31"));
    }

    #[test]
    fn test_calendar_screen_shows_month_title() {
        let mut app = App::with_demo_data();
        app.screen = Screen::Calendar;
        let rendered = render(&app);

        assert!(rendered.contains("October 2024"));
        assert!(rendered.contains("Su"));
        assert!(rendered.contains("Due 2024-10-24"));
    }

    #[test]
    fn test_form_overlays_render() {
        let mut app = App::with_demo_data();
        app.screen = Screen::Tasks;
        app.task_form = Some(TaskForm::default());
        let rendered = render(&app);
        assert!(rendered.contains("New Task"));
        assert!(rendered.contains("No Project"));

        app.task_form = None;
        app.project_form = Some(ProjectForm::default());
        let rendered = render(&app);
        assert!(rendered.contains("New Project"));
    }

    #[test]
    fn test_form_overlays_render_on_wide_terminal() {
        let mut app = App::with_demo_data();
        app.screen = Screen::Tasks;
        app.task_form = Some(TaskForm::default());
        assert!(render_sized(&app, 1200, 24).contains("New Task"));

        app.task_form = None;
        app.project_form = Some(ProjectForm::default());
        assert!(render_sized(&app, 1200, 24).contains("New Project"));
    }
}
