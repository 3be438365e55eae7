//! Layout components (content area, status bar)

use crate::app::App;
use crate::state::NotificationState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Create the main layout
pub fn create_layout(area: Rect) -> Rect {
    // Reserve bottom line for status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Dirty indicator
    let dirty = if app.notifications.is_dirty(&app.form) {
        Span::styled(" ● ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Green))
    };
    spans.push(dirty);

    spans.push(Span::styled(
        state_hint(app.notifications.state()),
        Style::default().fg(Color::Gray),
    ));

    let changed = app.form.dirty_fields();
    if !changed.is_empty() {
        let names: Vec<&str> = changed.iter().map(String::as_str).collect();
        spans.push(Span::styled(
            format!(" ({})", names.join(", ")),
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        format!("^F:{}", app.service.failure_mode().label()),
        Style::default().fg(Color::Magenta),
    ));

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        format!("saves: {}", app.service.save_count()),
        Style::default().fg(Color::Blue),
    ));
    if app.service.profile().published {
        spans.push(Span::styled(" (published)", Style::default().fg(Color::Blue)));
    }

    // Quit hint on the right (double Ctrl+C to quit)
    let quit_hint = " ^C^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

fn state_hint(state: NotificationState) -> &'static str {
    match state {
        NotificationState::Hidden => "no unsaved changes",
        NotificationState::Initial => "unsaved changes",
        NotificationState::Saving => "saving...",
        NotificationState::Success => "saved",
        NotificationState::Error => "save failed",
    }
}
