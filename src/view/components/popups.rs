use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::icons;

/// Render the help popup
pub fn render_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_width = 42u16;
    let popup_height = 14u16;
    let popup_area = centered_rect(popup_width, popup_height, area);

    f.render_widget(Clear, popup_area);

    let help_lines = vec![
        Line::from(vec![
            Span::styled("/    ", Style::default().fg(Color::Yellow)),
            Span::raw("Fuzzy search"),
        ]),
        Line::from(vec![
            Span::styled("j/↓  ", Style::default().fg(Color::Yellow)),
            Span::raw("Move down"),
        ]),
        Line::from(vec![
            Span::styled("k/↑  ", Style::default().fg(Color::Yellow)),
            Span::raw("Move up"),
        ]),
        Line::from(vec![
            Span::styled("g/G  ", Style::default().fg(Color::Yellow)),
            Span::raw("Go to top/bottom"),
        ]),
        Line::from(vec![
            Span::styled("o/⏎  ", Style::default().fg(Color::Yellow)),
            Span::raw("Open PR in browser"),
        ]),
        Line::from(vec![
            Span::styled("x    ", Style::default().fg(Color::Yellow)),
            Span::raw("Manage excluded authors"),
        ]),
        Line::from(vec![
            Span::styled("r    ", Style::default().fg(Color::Yellow)),
            Span::raw("Refresh"),
        ]),
        Line::from(vec![
            Span::styled("?    ", Style::default().fg(Color::Yellow)),
            Span::raw("Toggle help"),
        ]),
        Line::from(vec![
            Span::styled("q    ", Style::default().fg(Color::Yellow)),
            Span::raw("Quit"),
        ]),
        Line::raw(""),
        Line::from("Press any key to close").centered(),
    ];

    let popup = Paragraph::new(help_lines).block(
        Block::default()
            .title(" Help ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(popup, popup_area);
}

/// Render the error popup
pub fn render_error_popup(f: &mut Frame, error: &str) {
    let area = f.area();
    let popup_width = (area.width * 60 / 100).max(40).min(area.width - 4);
    let popup_height = 7u16;
    let popup_area = centered_rect(popup_width, popup_height, area);

    f.render_widget(Clear, popup_area);

    let error_paragraph = Paragraph::new(error)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .title(" Error ")
                .title_style(Style::default().fg(Color::Red).bold())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(error_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height,
        width: popup_area.width,
        height: 1,
    };

    if hint_area.y < area.height {
        let hint = Line::from(vec![
            Span::raw("Press "),
            Span::styled("r", Style::default().fg(Color::Yellow)),
            Span::raw(" to retry or "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" to dismiss"),
        ])
        .centered();
        f.render_widget(hint, hint_area);
    }
}

/// Render the excluded-author management popup
pub fn render_excluded_popup(f: &mut Frame, app: &App) {
    let area = f.area();
    let popup_width = 50u16;
    let popup_height = 16u16;
    let popup_area = centered_rect(popup_width, popup_height, area);

    f.render_widget(Clear, popup_area);

    let repo_display = format!("{}/{}", app.repo_owner, app.repo_name);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Repo: ", Style::default().fg(Color::DarkGray)),
            Span::styled(repo_display, Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Hiding: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} pull requests", app.hidden_count()),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::raw(""),
    ];

    if app.excluded.is_empty() {
        lines.push(Line::styled(
            "No excluded authors",
            Style::default().fg(Color::DarkGray),
        ));
        lines.push(Line::raw(""));
    } else {
        for (i, login) in app.excluded.iter().enumerate() {
            let is_selected = app.excluded_list_state.selected() == Some(i);
            let prefix = if is_selected { icons::SELECTOR } else { "  " };
            let style = if is_selected {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::styled(
                format!("{}{} {}", prefix, icons::BULLET, login),
                style,
            ));
        }
        lines.push(Line::raw(""));
    }

    // Hint line
    lines.push(Line::from(vec![
        Span::styled("a", Style::default().fg(Color::Yellow)),
        Span::raw(" add  "),
        Span::styled("d", Style::default().fg(Color::Yellow)),
        Span::raw(" remove  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(" close"),
    ]));

    let popup = Paragraph::new(lines).block(
        Block::default()
            .title(" Excluded Authors ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(popup, popup_area);
}

/// Render the add-author popup
pub fn render_add_author_popup(f: &mut Frame, app: &App) {
    let area = f.area();
    let popup_width = 45u16;
    let popup_height = 7u16;
    let popup_area = centered_rect(popup_width, popup_height, area);

    f.render_widget(Clear, popup_area);

    let content = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("Login: ", Style::default().fg(Color::Yellow)),
            Span::styled(&app.author_input, Style::default().fg(Color::White)),
            Span::styled(icons::CURSOR, Style::default().fg(Color::Cyan)),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" save  "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" cancel"),
        ]),
    ];

    let popup = Paragraph::new(content).block(
        Block::default()
            .title(" Exclude Author ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(popup, popup_area);
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);

    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}

/// Truncate a string to a maximum length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
