use anyhow::Result;
use chrono_tz::Tz;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use delegate_core::{
    Catalog, Clock, Dashboard, DashboardSettings, Notification, Page, Route, SharedCatalog,
    SystemClock, Ticker,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{debug, info};

use crate::views;

/// Which goal-page input receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Goal,
    Constraint,
    Document,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Goal => Focus::Constraint,
            Focus::Constraint => Focus::Document,
            Focus::Document => Focus::Goal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub dashboard: Dashboard,
    pub tz: Tz,
    pub focus: Focus,
    pub constraint_type: usize,
    pub constraint_input: String,
    pub document_input: String,
    pub integration: usize,
}

impl App {
    pub fn new(catalog: SharedCatalog, settings: DashboardSettings, tz: Tz) -> Self {
        Self {
            dashboard: Dashboard::new(catalog, settings),
            tz,
            focus: Focus::Goal,
            constraint_type: 0,
            constraint_input: String::new(),
            document_input: String::new(),
            integration: 0,
        }
    }

    fn navigate(&mut self, route: Route) -> Result<()> {
        if route == self.dashboard.route() {
            return Ok(());
        }
        self.dashboard.navigate(route)?;
        self.reset_inputs();
        Ok(())
    }

    /// Goal-page inputs live as long as the page does.
    pub fn reset_inputs(&mut self) {
        self.focus = Focus::Goal;
        self.constraint_type = 0;
        self.constraint_input.clear();
        self.document_input.clear();
        self.integration = 0;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Flow> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Ok(Flow::Quit),
            KeyCode::Char('c') if ctrl => return Ok(Flow::Quit),
            KeyCode::F(1) => self.navigate(Route::Goal)?,
            KeyCode::F(2) => self.navigate(Route::Monitoring)?,
            KeyCode::F(3) => self.navigate(Route::Review)?,
            _ => match self.dashboard.route() {
                Route::Goal => self.goal_key(key, ctrl)?,
                Route::Monitoring => self.monitoring_key(key),
                Route::Review => self.review_key(key)?,
            },
        }
        Ok(Flow::Continue)
    }

    fn goal_key(&mut self, key: KeyEvent, ctrl: bool) -> Result<()> {
        let catalog = self.dashboard.catalog().clone();
        if ctrl {
            match key.code {
                KeyCode::Char('s') => {
                    self.dashboard.start_task();
                    return Ok(());
                }
                KeyCode::Char('n') => {
                    let count = catalog.all_integrations().len().max(1);
                    self.integration = (self.integration + 1) % count;
                    return Ok(());
                }
                _ => {}
            }
        }

        let Page::Goal(goal) = self.dashboard.page_mut() else {
            return Ok(());
        };
        let mut notes: Vec<Notification> = Vec::new();

        match key.code {
            KeyCode::Char('g') if ctrl => {
                if goal.generate_interpretation().is_none() {
                    notes.push(Notification::destructive(
                        "Goal Required",
                        "Please enter your high-level goal first.",
                    ));
                }
            }
            KeyCode::Char('k') if ctrl => {
                goal.toggle_confirmed();
            }
            KeyCode::Char('d') if ctrl => {
                if let Some(last) = goal.constraints().last().map(|c| c.id) {
                    goal.remove_constraint(last)?;
                }
            }
            KeyCode::Char('t') if ctrl => {
                if let Some(first) = goal.suggestions().first() {
                    goal.apply_template(&first.id)?;
                }
            }
            KeyCode::Char('e') if ctrl => {
                let id = catalog
                    .all_integrations()
                    .get(self.integration)
                    .map(|i| i.id.as_str())
                    .unwrap_or_default();
                match goal.connect_integration(id) {
                    Ok(n) => notes.push(n),
                    Err(e) => notes.push(Notification::destructive("Integration Error", e.to_string())),
                }
            }
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::Left | KeyCode::Right if self.focus == Focus::Constraint => {
                let count = catalog.constraint_types().len().max(1);
                self.constraint_type = if key.code == KeyCode::Right {
                    (self.constraint_type + 1) % count
                } else {
                    (self.constraint_type + count - 1) % count
                };
            }
            KeyCode::Enter => match self.focus {
                Focus::Goal => {
                    goal.generate_interpretation();
                }
                Focus::Constraint => {
                    let type_id = catalog
                        .constraint_types()
                        .get(self.constraint_type)
                        .map(|t| t.id.as_str())
                        .unwrap_or_default();
                    match goal.add_constraint(type_id, &self.constraint_input) {
                        Ok(_) => self.constraint_input.clear(),
                        Err(e) => notes.push(Notification::destructive("Invalid Constraint", e.to_string())),
                    }
                }
                Focus::Document => {
                    let path = std::path::PathBuf::from(self.document_input.trim());
                    let result = std::fs::metadata(&path)
                        .map_err(anyhow::Error::from)
                        .and_then(|meta| {
                            let name = path
                                .file_name()
                                .map(|n| n.to_string_lossy().into_owned())
                                .unwrap_or_else(|| path.display().to_string());
                            goal.add_document(&name, meta.len())?;
                            Ok(name)
                        });
                    match result {
                        Ok(name) => {
                            notes.push(Notification::success("Document Uploaded", format!("{name} attached.")));
                            self.document_input.clear();
                        }
                        Err(e) => notes.push(Notification::destructive("Upload Failed", e.to_string())),
                    }
                }
            },
            KeyCode::Backspace => match self.focus {
                Focus::Goal => {
                    let mut text = goal.goal().to_string();
                    text.pop();
                    goal.set_goal(text);
                }
                Focus::Constraint => {
                    self.constraint_input.pop();
                }
                Focus::Document => {
                    self.document_input.pop();
                }
            },
            KeyCode::Char(c) if !ctrl => match self.focus {
                Focus::Goal => {
                    let mut text = goal.goal().to_string();
                    text.push(c);
                    goal.set_goal(text);
                }
                Focus::Constraint => self.constraint_input.push(c),
                Focus::Document => self.document_input.push(c),
            },
            _ => {}
        }

        for n in notes {
            self.dashboard.notify(n);
        }
        Ok(())
    }

    fn monitoring_key(&mut self, key: KeyEvent) {
        let Page::Monitoring(page) = self.dashboard.page_mut() else {
            return;
        };
        let note = match key.code {
            KeyCode::Char(' ') => page.toggle_running(),
            KeyCode::Char(c @ '1'..='3') => {
                page.select_choice(usize::from(c as u8 - b'1'));
                None
            }
            KeyCode::Char('a') => page.approve(),
            KeyCode::Char('r') => page.request_changes(),
            _ => None,
        };
        if let Some(n) = note {
            self.dashboard.notify(n);
        }
    }

    fn review_key(&mut self, key: KeyEvent) -> Result<()> {
        let Page::Review(page) = self.dashboard.page_mut() else {
            return Ok(());
        };
        let mut goto = None;
        let note = match key.code {
            KeyCode::Up | KeyCode::Down => {
                let ids: Vec<String> = page.selectable().iter().map(|r| r.id.clone()).collect();
                if !ids.is_empty() {
                    let cur = ids.iter().position(|id| id == page.selected_id()).unwrap_or(0);
                    let next = if key.code == KeyCode::Down {
                        (cur + 1) % ids.len()
                    } else {
                        (cur + ids.len() - 1) % ids.len()
                    };
                    page.select(&ids[next])?;
                }
                None
            }
            KeyCode::Tab => {
                page.set_tab(page.tab().toggle());
                None
            }
            KeyCode::Char('e') => Some(page.explore_alternatives()),
            KeyCode::Char('a') => Some(page.approve()),
            KeyCode::Char('x') => Some(page.export()),
            KeyCode::Char('s') => Some(page.share()),
            KeyCode::Char('p') => Some(page.print()),
            KeyCode::Backspace => {
                let (n, route) = page.reject();
                goto = Some(route);
                Some(n)
            }
            _ => None,
        };
        if let Some(route) = goto {
            self.navigate(route)?;
        }
        if let Some(n) = note {
            self.dashboard.notify(n);
        }
        Ok(())
    }
}

pub fn run_tui(app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App) -> Result<()> {
    let clock = SystemClock::new();
    let interval = app.dashboard.settings().simulator.tick_interval;
    let mut ticker = Ticker::new(clock, interval);
    let mut mounted = app.dashboard.route();
    info!(route = %mounted, "dashboard opened");

    loop {
        terminal.draw(|f| views::draw(f, &app))?;

        let wait = ticker.until_next().min(Duration::from_millis(50));
        if event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key)? == Flow::Quit {
                    break;
                }
            }
        }

        // Ticks only count from the moment a page is mounted.
        if app.dashboard.route() != mounted {
            ticker = Ticker::new(clock, interval);
        }
        app.dashboard.tick(ticker.due());
        if let Some(route) = app.dashboard.poll(clock.elapsed())? {
            debug!(%route, "redirected");
            app.reset_inputs();
            ticker = Ticker::new(clock, interval);
        }
        mounted = app.dashboard.route();
    }

    info!("dashboard closed");
    Ok(())
}
