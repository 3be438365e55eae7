//! Validation error summary shown when a submit fails validation

use crate::state::{FieldErrors, FieldRef};

/// Title, bullet items and focus targets derived from validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorSummary {
    pub title: String,
    /// Messages in field order; errors without a message are left out
    pub items: Vec<String>,
    /// Refs of erroring fields that can take focus, in field order
    pub focus_targets: Vec<FieldRef>,
}

pub fn summarize_errors(errors: &FieldErrors) -> ErrorSummary {
    let items: Vec<String> = errors
        .values()
        .filter_map(|error| error.message.as_deref())
        .filter(|message| !message.is_empty())
        .map(str::to_string)
        .collect();

    let focus_targets = errors.values().filter_map(|error| error.field_ref).collect();

    let title = if items.len() > 1 {
        format!("There were {} errors with your submission", items.len())
    } else {
        "There was an error with your submission".to_string()
    };

    ErrorSummary {
        title,
        items,
        focus_targets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldError;
    use pretty_assertions::assert_eq;

    fn error(message: Option<&str>, field_ref: Option<usize>) -> FieldError {
        FieldError {
            message: message.map(str::to_string),
            field_ref: field_ref.map(FieldRef),
        }
    }

    #[test]
    fn test_single_message_title() {
        let mut errors = FieldErrors::new();
        errors.insert("a".to_string(), error(Some("required"), None));

        let summary = summarize_errors(&errors);

        assert_eq!(summary.title, "There was an error with your submission");
        assert_eq!(summary.items, vec!["required".to_string()]);
    }

    #[test]
    fn test_multiple_messages_keep_input_order() {
        let mut errors = FieldErrors::new();
        errors.insert("a".to_string(), error(Some("required"), Some(0)));
        errors.insert("b".to_string(), error(Some("too short"), Some(1)));

        let summary = summarize_errors(&errors);

        assert_eq!(summary.title, "There were 2 errors with your submission");
        assert_eq!(
            summary.items,
            vec!["required".to_string(), "too short".to_string()]
        );
        assert_eq!(summary.focus_targets, vec![FieldRef(0), FieldRef(1)]);
    }

    #[test]
    fn test_message_less_error_still_contributes_focus_target() {
        let mut errors = FieldErrors::new();
        errors.insert("bio".to_string(), error(None, Some(3)));
        errors.insert("name".to_string(), error(Some("required"), Some(0)));
        errors.insert("blank".to_string(), error(Some(""), None));

        let summary = summarize_errors(&errors);

        assert_eq!(summary.title, "There was an error with your submission");
        assert_eq!(summary.items, vec!["required".to_string()]);
        assert_eq!(summary.focus_targets, vec![FieldRef(3), FieldRef(0)]);
    }

    #[test]
    fn test_empty_errors() {
        let summary = summarize_errors(&FieldErrors::new());
        assert_eq!(summary.title, "There was an error with your submission");
        assert!(summary.items.is_empty());
        assert!(summary.focus_targets.is_empty());
    }
}
