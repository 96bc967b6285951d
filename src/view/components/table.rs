use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::data::Account;
use crate::icons;

use super::popups::truncate_string;

/// Render the PR table
pub fn render_table(f: &mut Frame, app: &App, area: Rect) {
    if app.prs.is_empty() {
        render_placeholder(f, app, area);
        return;
    }

    let visible_prs = app.visible_prs();
    if visible_prs.is_empty() {
        render_placeholder(f, app, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("PR#").style(Style::default().fg(Color::Yellow).bold()),
        Cell::from("Title").style(Style::default().fg(Color::Yellow).bold()),
        Cell::from("Author").style(Style::default().fg(Color::Yellow).bold()),
        Cell::from("Created").style(Style::default().fg(Color::Yellow).bold()),
        Cell::from("Assignees").style(Style::default().fg(Color::Yellow).bold()),
        Cell::from("Reviewers").style(Style::default().fg(Color::Yellow).bold()),
    ])
    .height(1)
    .bottom_margin(1);

    let rows: Vec<Row> = visible_prs
        .iter()
        .map(|pr| {
            Row::new(vec![
                Cell::from(format!("#{}", pr.number)),
                Cell::from(truncate_string(&pr.title, 45)),
                Cell::from(pr.author.login.clone()).style(Style::default().fg(Color::Magenta)),
                Cell::from(pr.created_date().to_string()),
                Cell::from(join_logins(&pr.assignees, 18)),
                Cell::from(join_logins(&pr.requested_reviewers, 18)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Min(30),
        Constraint::Length(16),
        Constraint::Length(12),
        Constraint::Length(20),
        Constraint::Length(20),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(icons::SELECTOR);

    f.render_stateful_widget(table, area, &mut app.table_state.clone());
}

fn join_logins(accounts: &[Account], max_len: usize) -> String {
    if accounts.is_empty() {
        return "-".to_string();
    }
    let joined = accounts
        .iter()
        .map(|a| a.login.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    truncate_string(&joined, max_len)
}

fn render_placeholder(f: &mut Frame, app: &App, area: Rect) {
    let message = if app.loading && app.prs.is_empty() {
        format!("{} Loading pull requests…", app.spinner())
    } else if !app.search_query.is_empty() {
        "No matches".to_string()
    } else if !app.prs.is_empty() {
        "All open pull requests are from excluded authors".to_string()
    } else {
        "No open pull requests".to_string()
    };

    let placeholder = Paragraph::new(Line::from(message).centered())
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(placeholder, area);
}
