use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    Frame,
};

use crate::app::App;

/// Render the header line: app name and repository on the left, loading
/// spinner and shown/hidden counts on the right.
pub fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let repo_display = format!("{}/{}", app.repo_owner, app.repo_name);

    let left = Line::from(vec![
        Span::styled(" extprs ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(repo_display, Style::default().fg(Color::White)),
    ]);

    let loading_indicator = if app.loading {
        format!("{} ", app.spinner())
    } else {
        String::new()
    };

    let shown = app.filtered_indices.len();
    let hidden = app.hidden_count();
    let counts = if hidden > 0 {
        format!("{} shown · {} hidden ", shown, hidden)
    } else {
        format!("{} shown ", shown)
    };

    let right = Line::from(vec![
        Span::styled(loading_indicator, Style::default().fg(Color::Yellow)),
        Span::styled(counts, Style::default().fg(Color::DarkGray)),
    ]);

    let chunks = Layout::horizontal([Constraint::Min(0), Constraint::Length(right.width() as u16)])
        .split(area);

    f.render_widget(left, chunks[0]);
    f.render_widget(right, chunks[1]);
}
