//! Form field value objects

/// Validation rule checked by the form before a submit
///
/// Every rule but `Required` is skipped while the value is empty. A rule
/// without a message still fails validation; it just contributes nothing
/// to the error list shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Required { message: Option<String> },
    MinLength { len: usize, message: Option<String> },
    MaxLength { len: usize, message: Option<String> },
    Contains { needle: char, message: Option<String> },
    StartsWith { prefix: String, message: Option<String> },
}

impl Rule {
    pub fn required(message: &str) -> Self {
        Rule::Required {
            message: Some(message.to_string()),
        }
    }

    pub fn min_length(len: usize, message: &str) -> Self {
        Rule::MinLength {
            len,
            message: Some(message.to_string()),
        }
    }

    /// Check a value, returning the rule's message on failure
    pub fn check(&self, value: &str) -> Result<(), Option<String>> {
        let trimmed = value.trim();
        let passed = match self {
            Rule::Required { .. } => !trimmed.is_empty(),
            _ if trimmed.is_empty() => true,
            Rule::MinLength { len, .. } => trimmed.chars().count() >= *len,
            Rule::MaxLength { len, .. } => value.chars().count() <= *len,
            Rule::Contains { needle, .. } => trimmed.contains(*needle),
            Rule::StartsWith { prefix, .. } => trimmed.starts_with(prefix.as_str()),
        };

        if passed {
            Ok(())
        } else {
            Err(self.message().map(str::to_string))
        }
    }

    fn message(&self) -> Option<&str> {
        match self {
            Rule::Required { message }
            | Rule::MinLength { message, .. }
            | Rule::MaxLength { message, .. }
            | Rule::Contains { message, .. }
            | Rule::StartsWith { message, .. } => message.as_deref(),
        }
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    /// Value the field was loaded with; dirtiness is measured against it
    pub initial: String,
    pub is_multiline: bool,
    /// Whether the field can take keyboard focus
    pub focusable: bool,
    pub rules: Vec<Rule>,
}

impl FormField {
    /// Create a new empty text field
    pub fn text(name: &str, label: &str, is_multiline: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: String::new(),
            initial: String::new(),
            is_multiline,
            focusable: true,
            rules: Vec::new(),
        }
    }

    /// Load an initial value (also the current value)
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.initial = value.clone();
        self.value = value;
        self
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn is_dirty(&self) -> bool {
        self.value != self.initial
    }

    /// Run the rules in order and stop at the first failure
    pub fn validate(&self) -> Result<(), Option<String>> {
        self.rules.iter().try_for_each(|rule| rule.check(&self.value))
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    /// Revert to the initial value
    pub fn reset(&mut self) {
        self.value = self.initial.clone();
    }

    /// Accept a saved value as the new baseline
    pub fn commit(&mut self, saved: &str) {
        self.initial = saved.to_string();
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod rules {
        use super::*;

        #[test]
        fn test_required_rejects_blank() {
            let rule = Rule::required("Name is required");
            assert_eq!(rule.check("   "), Err(Some("Name is required".to_string())));
            assert_eq!(rule.check("Ada"), Ok(()));
        }

        #[test]
        fn test_optional_rules_skip_empty_values() {
            let rule = Rule::min_length(3, "too short");
            assert_eq!(rule.check(""), Ok(()));
            assert_eq!(rule.check("ab"), Err(Some("too short".to_string())));
        }

        #[test]
        fn test_rule_without_message_still_fails() {
            let rule = Rule::MaxLength {
                len: 3,
                message: None,
            };
            assert_eq!(rule.check("abcd"), Err(None));
        }

        #[test]
        fn test_contains_and_starts_with() {
            let at = Rule::Contains {
                needle: '@',
                message: Some("invalid".to_string()),
            };
            assert!(at.check("ada@example.com").is_ok());
            assert!(at.check("ada").is_err());

            let http = Rule::StartsWith {
                prefix: "http".to_string(),
                message: None,
            };
            assert!(http.check("https://example.com").is_ok());
            assert!(http.check("example.com").is_err());
        }
    }

    mod form_field {
        use super::*;

        #[test]
        fn test_with_value_is_clean() {
            let field = FormField::text("name", "Name", false).with_value("Ada");
            assert!(!field.is_dirty());
            assert_eq!(field.display_value(), "Ada");
        }

        #[test]
        fn test_editing_marks_dirty_and_back_is_clean() {
            let mut field = FormField::text("name", "Name", false).with_value("Ada");
            field.push_char('m');
            assert!(field.is_dirty());
            field.pop_char();
            assert!(!field.is_dirty());
        }

        #[test]
        fn test_reset_restores_initial() {
            let mut field = FormField::text("name", "Name", false).with_value("Ada");
            field.push_char('!');
            field.reset();
            assert_eq!(field.value, "Ada");
        }

        #[test]
        fn test_commit_moves_baseline() {
            let mut field = FormField::text("name", "Name", false);
            field.push_char('A');
            field.commit("A");
            assert!(!field.is_dirty());
        }

        #[test]
        fn test_validate_stops_at_first_failure() {
            let field = FormField::text("name", "Name", false)
                .with_rule(Rule::required("required"))
                .with_rule(Rule::min_length(2, "too short"));
            assert_eq!(field.validate(), Err(Some("required".to_string())));
        }
    }
}
