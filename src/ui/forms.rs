//! Profile form rendering

use crate::app::App;
use crate::platform::{SAVE_FALLBACK_SHORTCUT, SAVE_SHORTCUT};
use crate::state::{Form, FormField};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw a form field
fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    error: Option<&str>,
    has_error: bool,
) {
    let accent = if has_error {
        Color::Red
    } else if is_active {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let style = Style::default().fg(accent);

    let value = field.display_value();
    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };

    let cursor = if is_active { "▌" } else { "" };

    let mut lines: Vec<Line> = display_value
        .split('\n')
        .map(|l| Line::from(l.to_string()))
        .collect();
    if is_active {
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
        }
    }

    let dirty_marker = if field.is_dirty() { " •" } else { "" };
    let mut block = Block::default()
        .title(format!(" {}{} ", field.label, dirty_marker))
        .borders(Borders::ALL)
        .border_style(style);
    if let Some(message) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

/// Draw the profile editor
pub fn draw_profile_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.form;

    let mut constraints: Vec<Constraint> = form
        .fields()
        .iter()
        .map(|f| {
            if f.is_multiline {
                Constraint::Min(6)
            } else {
                Constraint::Length(3)
            }
        })
        .collect();
    constraints.push(Constraint::Length(1)); // Avatar toggle
    constraints.push(Constraint::Length(1)); // Help text

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    let block = Block::default()
        .title(" Edit Profile ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    for (index, field) in form.fields().iter().enumerate() {
        let error = form.field_error(index);
        draw_field(
            frame,
            chunks[index],
            field,
            form.active_field() == index,
            error.and_then(|e| e.message.as_deref()),
            error.is_some(),
        );
    }

    let count = form.field_count();
    let avatar = if app.avatar_changed() {
        Span::styled(
            "Avatar: new image selected •",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("Avatar: unchanged", Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(Paragraph::new(Line::from(avatar)), chunks[count]);

    let help = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(": next field  "),
        Span::styled(SAVE_SHORTCUT, Style::default().fg(Color::Cyan)),
        Span::raw("/"),
        Span::styled(SAVE_FALLBACK_SHORTCUT, Style::default().fg(Color::Cyan)),
        Span::raw(": save  "),
        Span::styled("Ctrl+R", Style::default().fg(Color::Cyan)),
        Span::raw(": reset  "),
        Span::styled("Ctrl+T", Style::default().fg(Color::Cyan)),
        Span::raw(": avatar"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[count + 1]);
}
