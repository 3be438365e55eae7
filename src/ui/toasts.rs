//! Toast overlay: renders the four save notification views
//!
//! Toasts sharing a position stack away from their anchor corner, oldest
//! nearest the corner. New toasts slide in from the right edge.

use super::components::{button_span, wrap_text};
use crate::state::{AnnounceRole, ErrorBody, Notification, Toast, ToastPosition};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::collections::HashMap;
use std::time::{Duration, Instant};

const TOAST_WIDTH: u16 = 48;
const MARGIN: u16 = 1;
/// Borders plus one column of padding on each side
const HORIZONTAL_CHROME: u16 = 4;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_FRAME_TIME: Duration = Duration::from_millis(80);

/// Draw every visible toast over `area`
pub fn draw_toasts(frame: &mut Frame, area: Rect, toasts: &[Toast], now: Instant) {
    let width = TOAST_WIDTH.min(area.width);
    let text_width = width.saturating_sub(HORIZONTAL_CHROME).max(1) as usize;
    let mut stacked: HashMap<ToastPosition, u16> = HashMap::new();

    for toast in toasts {
        let (lines, accent) = toast_content(toast, now, text_width);
        let height = (lines.len() as u16 + 2).min(area.height);
        let position = toast.options.position;

        let (x, y) = position.origin(area.width, area.height, width, height, MARGIN);
        let offset = stacked.entry(position).or_insert(0);
        let y = if position.is_top() {
            y + *offset
        } else {
            y.saturating_sub(*offset)
        };
        *offset += height;

        let slide = ((1.0 - toast.entrance_progress(now)) * f32::from(width)) as u16;
        let toast_area = Rect {
            x: area.x + x + slide,
            y: area.y + y,
            width,
            height,
        }
        .intersection(area);
        if toast_area.is_empty() {
            continue;
        }

        let mut border_style = Style::default().fg(accent);
        if toast.options.announcement == Some(AnnounceRole::Alert) {
            border_style = border_style.add_modifier(Modifier::BOLD);
        }

        frame.render_widget(Clear, toast_area);
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .style(Style::default().bg(Color::Black)),
        );
        frame.render_widget(paragraph, toast_area);
    }
}

/// Lines and accent color for one toast
fn toast_content(toast: &Toast, now: Instant, text_width: usize) -> (Vec<Line<'static>>, Color) {
    match &toast.notification {
        Notification::Initial { actions, selected } => {
            let mut lines = header('!', Color::Yellow, "Unsaved changes");
            lines.extend(body_lines(
                "You have unsaved changes. Do you want to save them?",
                text_width,
            ));

            let mut buttons = vec![button_span("Reset", None, false), Span::raw(" ")];
            for (index, action) in actions.iter().enumerate() {
                buttons.push(button_span(&action.label, action.icon, index == *selected));
                buttons.push(Span::raw(" "));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(buttons));

            let mut hint = String::from("^S save  ^R reset  ^X dismiss");
            if actions.len() > 1 {
                hint.push_str("  ^A switch");
            }
            lines.push(hint_line(hint));
            (lines, Color::Yellow)
        }
        Notification::Saving => {
            let elapsed = now.saturating_duration_since(toast.shown_at);
            let frame = (elapsed.as_millis() / SPINNER_FRAME_TIME.as_millis()) as usize
                % SPINNER_FRAMES.len();
            let mut lines = vec![Line::from(vec![
                Span::styled(SPINNER_FRAMES[frame], Style::default().fg(Color::Cyan)),
                Span::raw(" "),
                Span::styled(
                    "Saving changes",
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])];
            lines.extend(body_lines("Please wait...", text_width));
            (lines, Color::Cyan)
        }
        Notification::Success { title, message } => {
            let mut lines = header('✓', Color::Green, title);
            lines.extend(body_lines(message, text_width));
            lines.push(hint_line("^X close".to_string()));
            (lines, Color::Green)
        }
        Notification::Error { title, body } => {
            let mut lines = header('✗', Color::Red, title);
            match body {
                ErrorBody::Text(message) => lines.extend(body_lines(message, text_width)),
                ErrorBody::List(items) => {
                    for item in items {
                        for (i, line) in wrap_text(item, text_width.saturating_sub(2))
                            .into_iter()
                            .enumerate()
                        {
                            let bullet = if i == 0 { "• " } else { "  " };
                            lines.push(Line::from(Span::styled(
                                format!("{bullet}{line}"),
                                Style::default().fg(Color::Gray),
                            )));
                        }
                    }
                }
            }
            lines.push(hint_line("^X close".to_string()));
            (lines, Color::Red)
        }
    }
}

fn header(icon: char, color: Color, title: &str) -> Vec<Line<'static>> {
    vec![Line::from(vec![
        Span::styled(icon.to_string(), Style::default().fg(color)),
        Span::raw(" "),
        Span::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])]
}

fn body_lines(text: &str, width: usize) -> Vec<Line<'static>> {
    wrap_text(text, width)
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(Color::Gray))))
        .collect()
}

fn hint_line(hint: String) -> Line<'static> {
    Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SaveActionView, ToastId, ToastOptions};
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    fn toast(notification: Notification, position: ToastPosition, shown_at: Instant) -> Toast {
        Toast {
            id: ToastId::generate(),
            notification,
            options: ToastOptions::new(position),
            shown_at,
        }
    }

    fn text_of(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_error_list_renders_bullets() {
        let now = Instant::now();
        let error = toast(
            Notification::Error {
                title: "There were 2 errors with your submission".to_string(),
                body: ErrorBody::List(vec!["required".to_string(), "too short".to_string()]),
            },
            ToastPosition::TopRight,
            now,
        );

        let (lines, color) = toast_content(&error, now, 40);

        assert_eq!(color, Color::Red);
        let text = text_of(&lines);
        assert_eq!(text[1], "• required");
        assert_eq!(text[2], "• too short");
    }

    #[test]
    fn test_prompt_highlights_selected_action() {
        let now = Instant::now();
        let prompt = toast(
            Notification::Initial {
                actions: vec![
                    SaveActionView {
                        label: "Save".to_string(),
                        icon: None,
                    },
                    SaveActionView {
                        label: "Save and publish".to_string(),
                        icon: None,
                    },
                ],
                selected: 1,
            },
            ToastPosition::BottomRight,
            now,
        );

        let (lines, _) = toast_content(&prompt, now, 44);
        let text = text_of(&lines);

        assert!(text.iter().any(|l| l.contains("[ Save and publish ]")));
        assert!(text.last().is_some_and(|l| l.contains("^A switch")));
    }

    #[test]
    fn test_spinner_advances_with_time() {
        let start = Instant::now();
        let saving = toast(Notification::Saving, ToastPosition::BottomRight, start);

        let (first, _) = toast_content(&saving, start, 40);
        let (later, _) = toast_content(&saving, start + SPINNER_FRAME_TIME, 40);

        assert_eq!(first[0].spans[0].content, SPINNER_FRAMES[0]);
        assert_eq!(later[0].spans[0].content, SPINNER_FRAMES[1]);
    }

    #[test]
    fn test_draw_stacks_toasts_per_corner() {
        let backend = TestBackend::new(60, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let start = Instant::now() - Duration::from_secs(1);
        let toasts = vec![
            toast(Notification::Saving, ToastPosition::BottomRight, start),
            toast(
                Notification::Success {
                    title: "Success".to_string(),
                    message: "Changes were successfully saved".to_string(),
                },
                ToastPosition::TopRight,
                start,
            ),
            toast(
                Notification::Error {
                    title: "Error".to_string(),
                    body: ErrorBody::Text("x".repeat(200)),
                },
                ToastPosition::TopRight,
                start,
            ),
        ];

        terminal
            .draw(|frame| draw_toasts(frame, frame.area(), &toasts, Instant::now()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let rendered: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(rendered.contains("Success"));
        assert!(rendered.contains("Saving changes"));
    }
}
