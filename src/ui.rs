// 🥗 Terminal UI - presentation adapter over TrackerState
//
// Renders the partition/progress/report views and forwards user intents
// (toggle, add, dismiss) into the tracker. Persistence is write-through
// after each mutating intent; write failures are deliberately swallowed.

use crate::db::TrackerStore;
use crate::tracker::{AddResult, TrackerState, WEEKLY_GOAL};
use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// How long a notice stays on screen before auto-dismissing.
const NOTICE_SECONDS: u64 = 3;

/// Input poll timeout; doubles as the week-check tick.
const TICK_MILLIS: u64 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    ToEat,
    Eaten,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::ToEat => Page::Eaten,
            Page::Eaten => Page::ToEat,
        }
    }

    pub fn previous(&self) -> Self {
        // Two tabs: previous == next
        self.next()
    }

    pub fn title(&self) -> &str {
        match self {
            Page::ToEat => "To Eat",
            Page::Eaten => "Eaten",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Adding,
}

/// Transient acknowledgement, auto-dismissed after NOTICE_SECONDS.
pub struct Notice {
    pub title: String,
    pub message: String,
    shown_at: Instant,
}

impl Notice {
    fn new(title: &str, message: String) -> Self {
        Notice {
            title: title.to_string(),
            message,
            shown_at: Instant::now(),
        }
    }

    fn expired(&self) -> bool {
        self.shown_at.elapsed() >= Duration::from_secs(NOTICE_SECONDS)
    }
}

// ============================================================================
// APP
// ============================================================================

pub struct App {
    pub tracker: TrackerState,
    store: TrackerStore,
    pub current_page: Page,
    pub list_state: ListState,
    pub input_mode: InputMode,
    pub input: String,
    pub notice: Option<Notice>,
}

impl App {
    pub fn new(tracker: TrackerState, store: TrackerStore) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        App {
            tracker,
            store,
            current_page: Page::ToEat,
            list_state,
            input_mode: InputMode::Browse,
            input: String::new(),
            notice: None,
        }
    }

    /// Foods shown on the active tab, in catalog order.
    pub fn visible_foods(&self) -> Vec<String> {
        let partition = self.tracker.partition();
        match self.current_page {
            Page::ToEat => partition.to_eat,
            Page::Eaten => partition.eaten,
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_foods().len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            let i = self.list_state.selected().unwrap_or(0).min(len - 1);
            self.list_state.select(Some(i));
        }
    }

    pub fn next(&mut self) {
        let len = self.visible_foods().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible_foods().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
        self.clamp_selection();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
        self.clamp_selection();
    }

    /// Toggle the selected food and persist the eaten set.
    pub fn toggle_selected(&mut self) {
        let foods = self.visible_foods();
        let selected = match self.list_state.selected() {
            Some(i) => i,
            None => return,
        };

        if let Some(food) = foods.get(selected) {
            self.tracker.toggle_eaten(food);
            let _ = self.store.save_eaten_foods(&self.tracker.eaten_foods());
            self.clamp_selection();
        }
    }

    /// Submit the add-food input; notices follow the add outcome.
    pub fn submit_food(&mut self) {
        let raw = std::mem::take(&mut self.input);

        match self.tracker.add_food(&raw) {
            AddResult::Ignored => {}
            AddResult::CreatedAndMarkedEaten(_) => {
                let _ = self.store.save_custom_foods(self.tracker.custom_foods());
                let _ = self.store.save_eaten_foods(&self.tracker.eaten_foods());
            }
            AddResult::AlreadyExistedNowMarked(existing) => {
                let _ = self.store.save_eaten_foods(&self.tracker.eaten_foods());
                self.notice = Some(Notice::new(
                    "Already in your list!",
                    format!(
                        "{} was already in your list. Marked it as eaten for you.",
                        existing
                    ),
                ));
            }
            AddResult::AlreadyExistedAlreadyMarked(existing) => {
                self.notice = Some(Notice::new(
                    "Already in your list!",
                    format!("{} was already in your list and marked as eaten.", existing),
                ));
            }
        }

        self.input_mode = InputMode::Browse;
        self.clamp_selection();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Periodic tick: expire the notice, latch the weekly report.
    pub fn on_tick(&mut self) {
        if self.notice.as_ref().map_or(false, |n| n.expired()) {
            self.notice = None;
        }
        self.tracker.poll_week(Utc::now());
    }

    /// User acknowledged the weekly report: apply the reset and persist.
    pub fn acknowledge_report(&mut self) {
        self.tracker.reset_week(Utc::now());
        let _ = self.store.save_eaten_foods(&self.tracker.eaten_foods());
        let _ = self.store.save_week_start(self.tracker.week_start());
        self.clamp_selection();
    }
}

// ============================================================================
// EVENT LOOP
// ============================================================================

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(TICK_MILLIS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code, key.modifiers) {
                    return Ok(());
                }
            }
        }

        app.on_tick();
    }
}

/// Returns true when the app should quit.
fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
    // The report overlay captures everything until acknowledged
    if app.tracker.report_due() {
        match code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('d') => app.acknowledge_report(),
            KeyCode::Char('q') => return true,
            _ => {}
        }
        return false;
    }

    match app.input_mode {
        InputMode::Adding => match code {
            KeyCode::Enter => app.submit_food(),
            KeyCode::Esc => {
                app.input.clear();
                app.input_mode = InputMode::Browse;
            }
            KeyCode::Backspace => {
                app.input.pop();
            }
            KeyCode::Char(c) => app.input.push(c),
            _ => {}
        },
        InputMode::Browse => match code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                if app.notice.is_some() {
                    app.dismiss_notice();
                } else {
                    return true;
                }
            }
            KeyCode::Char('a') => app.input_mode = InputMode::Adding,
            KeyCode::Tab => {
                if modifiers.contains(KeyModifiers::SHIFT) {
                    app.previous_page();
                } else {
                    app.next_page();
                }
            }
            KeyCode::BackTab => app.previous_page(),
            KeyCode::Down | KeyCode::Char('j') => app.next(),
            KeyCode::Up | KeyCode::Char('k') => app.previous(),
            KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected(),
            KeyCode::Home => app.list_state.select(Some(0)),
            KeyCode::End => {
                let len = app.visible_foods().len();
                if len > 0 {
                    app.list_state.select(Some(len - 1));
                }
            }
            _ => {}
        },
    }

    false
}

// ============================================================================
// RENDERING
// ============================================================================

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header: title + tabs + progress
            Constraint::Length(3), // Add-food input
            Constraint::Min(0),    // Food list
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_input(f, chunks[1], app);
    render_food_list(f, chunks[2], app);
    render_status_bar(f, chunks[3], app);

    if app.tracker.report_due() {
        render_report(f, app);
    } else if app.notice.is_some() {
        render_notice(f, app);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let progress = app.tracker.progress();

    let title_line = Line::from(vec![
        Span::styled(
            "Weekly Fruit & Veggie Tracker",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!(
                "Week starting: {}",
                app.tracker.week_start().format("%Y-%m-%d")
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    // Page tabs
    let pages = [Page::ToEat, Page::Eaten];
    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("{}/{}", progress.count, WEEKLY_GOAL),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));
    tab_spans.push(Span::raw("  "));
    tab_spans.push(Span::styled(
        progress.message,
        Style::default().fg(Color::White),
    ));

    let header = Paragraph::new(vec![title_line, Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let (text, style, title) = match app.input_mode {
        InputMode::Adding => (
            format!("{}▏", app.input),
            Style::default().fg(Color::Yellow),
            " Add new fruit or vegetable (Enter to add, Esc to cancel) ",
        ),
        InputMode::Browse => (
            "Press 'a' to add a new fruit or vegetable".to_string(),
            Style::default().fg(Color::DarkGray),
            " Add ",
        ),
    };

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(match app.input_mode {
                InputMode::Adding => Style::default().fg(Color::Yellow),
                InputMode::Browse => Style::default().fg(Color::White),
            })
            .title(title),
    );

    f.render_widget(input, area);
}

fn render_food_list(f: &mut Frame, area: Rect, app: &mut App) {
    let foods = app.visible_foods();

    let items: Vec<ListItem> = foods
        .iter()
        .map(|food| {
            let (marker, style) = match app.current_page {
                Page::ToEat => ("○ ", Style::default().fg(Color::White)),
                Page::Eaten => ("✓ ", Style::default().fg(Color::Green)),
            };

            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::raw(food.clone()),
            ]))
        })
        .collect();

    let title = format!(" {} ({}) ", app.current_page.title(), foods.len());

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(title),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    match app.input_mode {
        InputMode::Adding => {
            status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Add | "));
            status_spans.push(Span::styled("Esc", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Cancel"));
        }
        InputMode::Browse => {
            status_spans.push(Span::styled("Space", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Toggle | "));
            status_spans.push(Span::styled("a", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Add | "));
            status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Tab | "));
            status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
            status_spans.push(Span::raw(" Nav | "));
            status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
            status_spans.push(Span::raw(" Quit"));
        }
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_report(f: &mut Frame, app: &App) {
    let report = app.tracker.weekly_report();
    let area = centered_rect(60, 40, f.size());

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            report.message(),
            Style::default().fg(Color::Green),
        )),
        Line::from(""),
        Line::from(report.summary()),
    ];

    if let Some(note) = report.custom_note() {
        lines.push(Line::from(Span::styled(
            note,
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Start a new week"),
    ]));

    let report_box = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" 📋 Weekly Report "),
    );

    f.render_widget(Clear, area);
    f.render_widget(report_box, area);
}

fn render_notice(f: &mut Frame, app: &App) {
    let notice = match &app.notice {
        Some(notice) => notice,
        None => return,
    };

    let width = 44.min(f.size().width);
    let height = 4.min(f.size().height);
    let area = Rect {
        x: f.size().width.saturating_sub(width + 1),
        y: f.size().height.saturating_sub(height + 1),
        width,
        height,
    };

    let body = Paragraph::new(notice.message.clone())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(format!(" {} ", notice.title)),
        );

    f.render_widget(Clear, area);
    f.render_widget(body, area);
}

/// Centered overlay rectangle, percent of the full frame.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
