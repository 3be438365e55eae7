//! Button component for TUI

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

/// Render an inline bracketed button, e.g. `[ ✓ Save ]`
pub fn button_span(content: &str, icon: Option<char>, is_selected: bool) -> Span<'static> {
    let text_style = if is_selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let label = match icon {
        Some(icon) => format!("[ {icon} {content} ]"),
        None => format!("[ {content} ]"),
    };
    Span::styled(label, text_style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_with_icon() {
        let span = button_span("Save", Some('✓'), false);
        assert_eq!(span.content, "[ ✓ Save ]");
    }

    #[test]
    fn test_selected_button_is_bold() {
        let span = button_span("Reset", None, true);
        assert_eq!(span.content, "[ Reset ]");
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
    }
}
