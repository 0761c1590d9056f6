use delegate_core::{
    ActivityStatus, Catalog, GoalPage, MonitoringPage, Page, ReviewPage, ReviewTab, Route,
    SimPhase, Variant,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

use crate::tui::{App, Focus};

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().fg(Color::Gray)
}

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(5),
        ])
        .split(f.area());

    draw_nav(f, chunks[0], app.dashboard.route());
    match app.dashboard.page() {
        Page::Goal(page) => draw_goal(f, chunks[1], app, page),
        Page::Monitoring(page) => draw_monitoring(f, chunks[1], page),
        Page::Review(page) => draw_review(f, chunks[1], page),
    }
    draw_footer(f, chunks[2], app);
}

fn draw_nav(f: &mut Frame, area: Rect, current: Route) {
    let titles: Vec<Line> = Route::ALL
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Line::from(vec![
                Span::styled(format!("F{} {}", i + 1, r.name()), bold()),
                Span::styled(format!("  {}", r.description()), dim()),
            ])
        })
        .collect();
    let selected = Route::ALL.iter().position(|r| *r == current).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Delegate"));
    f.render_widget(tabs, area);
}

fn focused(block: Block<'static>, on: bool) -> Block<'static> {
    if on {
        block.border_style(Style::default().fg(Color::Cyan))
    } else {
        block
    }
}

fn draw_goal(f: &mut Frame, area: Rect, app: &App, page: &GoalPage) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(cols[0]);

    let goal = Paragraph::new(page.goal())
        .block(focused(
            Block::default().borders(Borders::ALL).title("What do you want to accomplish?"),
            app.focus == Focus::Goal,
        ));
    f.render_widget(goal, left[0]);

    let catalog = app.dashboard.catalog();
    let kind = catalog.constraint_types().get(app.constraint_type);
    let (label, placeholder) = kind
        .map(|k| (k.label.as_str(), k.placeholder.as_str()))
        .unwrap_or(("Constraint", ""));
    let input = if app.constraint_input.is_empty() {
        Span::styled(placeholder.to_string(), dim())
    } else {
        Span::raw(app.constraint_input.clone())
    };
    let constraint = Paragraph::new(Line::from(vec![
        Span::styled(format!("< {label} > "), bold()),
        input,
    ]))
    .block(focused(
        Block::default().borders(Borders::ALL).title("Add constraint (←/→ type, Enter add)"),
        app.focus == Focus::Constraint,
    ));
    f.render_widget(constraint, left[1]);

    let mut lines: Vec<Line> = page
        .constraints()
        .iter()
        .map(|c| Line::from(format!("• {}: {}", page.constraint_label(c), c.value)))
        .collect();
    for d in page.documents() {
        lines.push(Line::styled(
            format!("📄 {} ({} KB)", d.name, d.size_bytes.div_ceil(1024)),
            dim(),
        ));
    }
    let list = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Constraints & documents"));
    f.render_widget(list, left[2]);

    let doc = Paragraph::new(app.document_input.as_str()).block(focused(
        Block::default().borders(Borders::ALL).title("Upload document path (PDF, DOC, XLS, images; 10 MB)"),
        app.focus == Focus::Document,
    ));
    f.render_widget(doc, left[3]);

    let suggestions: Vec<Span> = page
        .suggestions()
        .iter()
        .map(|t| Span::raw(format!("{}  ", t.title)))
        .collect();
    let integ: Vec<Span> = catalog
        .all_integrations()
        .iter()
        .enumerate()
        .map(|(i, it)| {
            let mark = if it.connected { "✓" } else { "○" };
            let style = if i == app.integration { bold() } else { dim() };
            Span::styled(format!("{mark} {}  ", it.name), style)
        })
        .collect();
    let extras = Paragraph::new(vec![Line::from(suggestions), Line::from(integ)])
        .block(Block::default().borders(Borders::ALL).title("Templates (Ctrl+T) / Integrations (Ctrl+N, Ctrl+E)"));
    f.render_widget(extras, left[4]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(5)])
        .split(cols[1]);

    let interp_text = page
        .interpretation()
        .unwrap_or("Press Ctrl+G to generate the AI interpretation.");
    let title = if page.is_confirmed() {
        "AI interpretation ✓ confirmed"
    } else {
        "AI interpretation (Ctrl+K to confirm)"
    };
    let interp = Paragraph::new(interp_text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(interp, right[0]);

    let c = page.checklist();
    let tick = |b: bool| if b { "[x]" } else { "[ ]" };
    let checklist = Paragraph::new(vec![
        Line::from(format!("{} Goal defined", tick(c.goal_defined))),
        Line::from(format!(
            "{} Constraints added ({})",
            tick(c.constraint_count > 0),
            c.constraint_count
        )),
        Line::from(format!("{} Interpretation confirmed", tick(c.confirmed))),
    ])
    .block(Block::default().borders(Borders::ALL).title("Ready to start? (Ctrl+S)"));
    f.render_widget(checklist, right[1]);
}

fn status_color(status: ActivityStatus) -> Color {
    match status {
        ActivityStatus::Completed => Color::Green,
        ActivityStatus::InProgress => Color::Blue,
        ActivityStatus::Pending => Color::Gray,
        ActivityStatus::Error => Color::Red,
    }
}

fn draw_monitoring(f: &mut Frame, area: Rect, page: &MonitoringPage) {
    let approval = page.approval_choices();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(if approval.is_some() { 7 } else { 0 }),
            Constraint::Min(6),
        ])
        .split(area);

    let sim = page.simulator();
    let phase = match sim.phase() {
        SimPhase::Idle => "idle",
        SimPhase::Running => "running",
        SimPhase::Paused => "paused",
        SimPhase::AwaitingApproval => "awaiting approval",
        SimPhase::Completed => "completed",
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Overall progress (space: pause/resume)"))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(u16::from(sim.progress()))
        .label(format!(
            "{}% · {phase} · ~{} min remaining",
            sim.progress(),
            sim.estimated_minutes_remaining()
        ));
    f.render_widget(gauge, rows[0]);

    let steps: Vec<Span> = page
        .steps()
        .iter()
        .map(|s| {
            Span::styled(
                format!("{}. {}   ", s.number, s.name),
                Style::default().fg(status_color(s.status)),
            )
        })
        .collect();
    let metrics: Vec<Span> = page
        .metrics()
        .iter()
        .map(|m| Span::raw(format!("{} {}{}  ", m.label, m.value, m.unit)))
        .collect();
    f.render_widget(
        Paragraph::new(vec![Line::from(steps), Line::from(metrics)]),
        rows[1],
    );

    if let Some(choices) = approval {
        let mut lines = vec![Line::from(delegate_core::monitoring::APPROVAL_PROMPT)];
        let selected = page.selected_choice();
        for (i, c) in choices.iter().enumerate() {
            let style = if selected == Some(c) {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::styled(
                format!(
                    "{}) {} · ${}/year · {}% savings · {}",
                    i + 1,
                    c.provider,
                    c.annual_premium,
                    c.savings_percent,
                    c.coverage
                ),
                style,
            ));
        }
        let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title("Approval Required (a: approve, r: request changes)"),
        );
        f.render_widget(panel, rows[2]);
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[3]);

    let mut log: Vec<Line> = Vec::new();
    for e in page.activity_log() {
        log.push(Line::from(vec![
            Span::styled(format!("[{}] ", e.status.as_str()), Style::default().fg(status_color(e.status))),
            Span::styled(format!("{} ", e.timestamp), dim()),
            Span::raw(e.description.clone()),
        ]));
        if let Some(details) = &e.details {
            log.push(Line::styled(format!("    {details}"), dim()));
        }
    }
    f.render_widget(
        Paragraph::new(log)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Activity log")),
        cols[0],
    );

    let reasoning: Vec<Line> = page
        .reasoning_log()
        .iter()
        .map(|r| {
            Line::from(vec![
                Span::styled(format!("{:?} {}% ", r.category, r.confidence), bold()),
                Span::raw(r.reasoning.clone()),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(reasoning)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("AI reasoning")),
        cols[1],
    );
}

fn draw_review(f: &mut Frame, area: Rect, page: &ReviewPage) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let s = page.summary();
    let mut lines = vec![
        Line::from(vec![
            Span::styled(s.provider.clone(), bold()),
            Span::styled(
                if s.recommended { "  AI recommended" } else { "" },
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(format!(
            "${}/year · saves ${} vs ${} · {}% monthly",
            s.annual_premium,
            s.annual_savings,
            page.current_annual_premium(),
            s.monthly_savings_percent
        )),
        Line::from(format!(
            "{}{} {:.1} · coverage {}/100 · {} risk",
            "★".repeat(usize::from(s.stars)),
            "☆".repeat(usize::from(5 - s.stars.min(5))),
            s.rating,
            s.coverage_score,
            s.risk_level.as_str()
        )),
        Line::from(""),
    ];
    for (title, items) in [("Features", &s.features), ("Pros", &s.pros), ("Cons", &s.cons)] {
        lines.push(Line::styled(title, bold()));
        lines.extend(items.iter().map(|i| Line::from(format!("  • {i}"))));
    }
    if page.alternatives_visible() {
        lines.push(Line::from(""));
        lines.push(Line::styled("Options (↑/↓)", bold()));
        for r in page.selectable() {
            let marker = if r.id == page.selected_id() { "▶" } else { " " };
            lines.push(Line::from(format!("{marker} {} ${}/yr", r.provider, r.annual_premium)));
        }
    }
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Recommendation (e: explore alternatives)")),
        cols[0],
    );

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(cols[1]);
    let tab_idx = match page.tab() {
        ReviewTab::Comparison => 0,
        ReviewTab::Reasoning => 1,
    };
    f.render_widget(
        Tabs::new(vec!["Comparison", "AI reasoning"])
            .select(tab_idx)
            .highlight_style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title("Tab")),
        right[0],
    );

    match page.tab() {
        ReviewTab::Comparison => {
            let rows = page.comparison_rows().iter().map(|r| {
                Row::new(vec![
                    r.feature.clone(),
                    r.current.clone(),
                    r.recommended.clone(),
                    format!("{:?}", r.improvement).to_lowercase(),
                    format!("{:?}", r.impact).to_lowercase(),
                ])
            });
            let table = Table::new(
                rows,
                [
                    Constraint::Percentage(28),
                    Constraint::Percentage(22),
                    Constraint::Percentage(22),
                    Constraint::Percentage(14),
                    Constraint::Percentage(14),
                ],
            )
            .header(Row::new(vec!["Feature", "Current", "Recommended", "Change", "Impact"]).style(bold()))
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(table, right[1]);
        }
        ReviewTab::Reasoning => {
            let lines: Vec<Line> = page
                .reasoning()
                .iter()
                .enumerate()
                .map(|(i, r)| Line::from(format!("{}. {r}", i + 1)))
                .collect();
            f.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: false })
                    .block(Block::default().borders(Borders::ALL)),
                right[1],
            );
        }
    }
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = app
        .dashboard
        .notifications()
        .iter()
        .rev()
        .map(|shown| {
            let n = &shown.notification;
            let color = match n.variant {
                Variant::Default => Color::White,
                Variant::Success => Color::Green,
                Variant::Destructive => Color::Red,
            };
            let at = shown.raised_at.with_timezone(&app.tz).format("%H:%M:%S");
            Line::from(vec![
                Span::styled(format!("{at} "), dim()),
                Span::styled(format!("{}: ", n.title), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw(n.description.clone()),
            ])
        })
        .collect();
    while lines.len() < 3 {
        lines.push(Line::from(""));
    }

    lines.push(Line::styled(help_line(app.dashboard.route()), dim()).alignment(Alignment::Center));
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::TOP)),
        area,
    );
}

/// Key bindings handled on each page.
fn help_line(route: Route) -> &'static str {
    match route {
        Route::Goal => {
            "Tab focus · Ctrl+G interpret · Ctrl+K confirm · Ctrl+D drop constraint · Ctrl+T template · \
             Ctrl+N next integration · Ctrl+E connect · Ctrl+S start · Esc quit"
        }
        Route::Monitoring => "space pause/resume · 1-3 choose · a approve · r request changes · Esc quit",
        Route::Review => {
            "↑/↓ select · Tab switch tab · e explore alternatives · a approve · x export · s share · \
             p print · Backspace reject · Esc quit"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;
    use delegate_core::{DashboardSettings, StaticCatalog};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn every_page_renders() {
        let mut app = App::new(Arc::new(StaticCatalog::demo()), DashboardSettings::default(), Tz::UTC);
        let goal = render(&app);
        assert!(goal.contains("Ready to start?"));
        assert!(goal.contains("Task Delegation"));

        app.dashboard.navigate(Route::Monitoring).unwrap();
        app.dashboard.tick(25);
        let monitoring = render(&app);
        assert!(monitoring.contains("Approval Required"));
        assert!(monitoring.contains("Activity log"));

        app.dashboard.navigate(Route::Review).unwrap();
        let review = render(&app);
        assert!(review.contains("Allstate"));
        assert!(review.contains("Comparison"));
    }

    #[test]
    fn help_lists_every_page_binding() {
        let goal = help_line(Route::Goal);
        for key in ["Ctrl+G", "Ctrl+K", "Ctrl+D", "Ctrl+T", "Ctrl+N", "Ctrl+E", "Ctrl+S"] {
            assert!(goal.contains(key), "goal help missing {key}");
        }
        let review = help_line(Route::Review);
        for key in ["e explore", "a approve", "x export", "s share", "p print", "Backspace"] {
            assert!(review.contains(key), "review help missing {key}");
        }
        assert!(help_line(Route::Monitoring).contains("r request changes"));
    }
}
