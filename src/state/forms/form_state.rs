//! Form state management: dirty tracking, validation, focus

use super::field::{FormField, Rule};
use crate::state::Profile;
use indexmap::{IndexMap, IndexSet};

/// Focusable handle to a field, as reported in validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldRef(pub usize);

/// Validation failure for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub message: Option<String>,
    /// Present only when the field can take focus
    pub field_ref: Option<FieldRef>,
}

/// Validation errors keyed by field name, in field order
pub type FieldErrors = IndexMap<String, FieldError>;

/// Submitted values keyed by field name, in field order
pub type FormValues = IndexMap<String, String>;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// A form's fields plus the error state of its last validation pass
#[derive(Debug, Clone, Default)]
pub struct FormState {
    fields: Vec<FormField>,
    active_field_index: usize,
    errors: FieldErrors,
}

impl FormState {
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut form = Self {
            fields,
            active_field_index: 0,
            errors: FieldErrors::new(),
        };
        // Start on the first field that can take input
        if let Some(index) = form.fields.iter().position(|f| f.focusable) {
            form.active_field_index = index;
        }
        form
    }

    /// Build the profile editor form
    pub fn from_profile(profile: &Profile) -> Self {
        Self::new(vec![
            FormField::text("name", "Name", false)
                .with_value(profile.name.as_str())
                .with_rule(Rule::required("Name is required"))
                .with_rule(Rule::min_length(2, "Name must be at least 2 characters")),
            FormField::text("email", "Email", false)
                .with_value(profile.email.as_str())
                .with_rule(Rule::required("Email is required"))
                .with_rule(Rule::Contains {
                    needle: '@',
                    message: Some("Email must contain an @".to_string()),
                }),
            FormField::text("website", "Website", false)
                .with_value(profile.website.as_str())
                .with_rule(Rule::StartsWith {
                    prefix: "http".to_string(),
                    message: Some("Website must start with http:// or https://".to_string()),
                }),
            FormField::text("bio", "Bio", true)
                .with_value(profile.bio.as_str())
                // Over-long bios are flagged on the field only
                .with_rule(Rule::MaxLength {
                    len: 160,
                    message: None,
                }),
        ])
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Names of fields whose value differs from the initial value
    pub fn dirty_fields(&self) -> IndexSet<String> {
        self.fields
            .iter()
            .filter(|f| f.is_dirty())
            .map(|f| f.name.clone())
            .collect()
    }

    pub fn is_dirty(&self) -> bool {
        self.fields.iter().any(FormField::is_dirty)
    }

    /// Errors from the last validation pass
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn field_error(&self, index: usize) -> Option<&FieldError> {
        let field = self.fields.get(index)?;
        self.errors.get(&field.name)
    }

    /// Current values in field order
    pub fn values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// Re-run every field's rules and store the result
    pub fn validate(&mut self) -> &FieldErrors {
        self.errors = self
            .fields
            .iter()
            .enumerate()
            .filter_map(|(index, field)| {
                field.validate().err().map(|message| {
                    let error = FieldError {
                        message,
                        field_ref: field.focusable.then_some(FieldRef(index)),
                    };
                    (field.name.clone(), error)
                })
            })
            .collect();
        &self.errors
    }

    /// Validate, then hand the values to `on_valid` or the errors to
    /// `on_invalid`. Exactly one continuation runs.
    pub fn handle_submit<R>(
        &mut self,
        on_valid: impl FnOnce(FormValues) -> R,
        on_invalid: impl FnOnce(&FieldErrors) -> R,
    ) -> R {
        if self.validate().is_empty() {
            on_valid(self.values())
        } else {
            on_invalid(&self.errors)
        }
    }

    /// Move keyboard focus to a field. Returns false if the ref does not
    /// point at a focusable field.
    pub fn focus(&mut self, target: FieldRef) -> bool {
        match self.fields.get(target.0) {
            Some(field) if field.focusable => {
                self.active_field_index = target.0;
                true
            }
            _ => false,
        }
    }

    /// Revert every field to its initial value and clear errors
    pub fn reset(&mut self) {
        self.fields.iter_mut().for_each(FormField::reset);
        self.errors.clear();
    }

    /// Accept saved values as the new baseline for the matching fields
    pub fn commit(&mut self, saved: &FormValues) {
        for field in &mut self.fields {
            if let Some(value) = saved.get(&field.name) {
                field.commit(value);
            }
        }
    }

    /// Handle character input on the active field
    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.get_active_field_mut() {
            field.push_char(c);
            let name = field.name.clone();
            self.errors.shift_remove(&name);
        }
    }

    /// Handle backspace on the active field
    pub fn backspace(&mut self) {
        if let Some(field) = self.get_active_field_mut() {
            field.pop_char();
            let name = field.name.clone();
            self.errors.shift_remove(&name);
        }
    }

    /// Insert a line break if the active field is multiline
    pub fn newline(&mut self) {
        if self.is_active_field_multiline() {
            self.input_char('\n');
        }
    }

    pub fn is_active_field_multiline(&self) -> bool {
        self.get_field(self.active_field_index)
            .is_some_and(|f| f.is_multiline)
    }
}

impl Form for FormState {
    fn field_count(&self) -> usize {
        self.fields.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len().saturating_sub(1));
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_form() -> FormState {
        FormState::from_profile(&Profile::sample())
    }

    fn two_field_form() -> FormState {
        FormState::new(vec![
            FormField::text("a", "A", false).with_rule(Rule::required("required")),
            FormField::text("b", "B", false).with_rule(Rule::min_length(3, "too short")),
        ])
    }

    mod dirty_tracking {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_loaded_form_is_clean() {
            let form = sample_form();
            assert!(!form.is_dirty());
            assert!(form.dirty_fields().is_empty());
        }

        #[test]
        fn test_typing_marks_only_active_field() {
            let mut form = sample_form();
            form.next_field();
            form.input_char('x');
            let dirty: Vec<_> = form.dirty_fields().into_iter().collect();
            assert_eq!(dirty, vec!["email".to_string()]);
        }

        #[test]
        fn test_reset_clears_dirty_and_errors() {
            let mut form = two_field_form();
            form.next_field();
            form.input_char('x');
            form.validate();
            form.reset();
            assert!(!form.is_dirty());
            assert!(form.errors().is_empty());
        }

        #[test]
        fn test_commit_uses_saved_values_not_current() {
            let mut form = two_field_form();
            form.input_char('x');
            let saved = form.values();
            form.input_char('y');
            form.commit(&saved);
            let dirty: Vec<_> = form.dirty_fields().into_iter().collect();
            assert_eq!(dirty, vec!["a".to_string()]);
            assert_eq!(form.get_field(0).map(|f| f.initial.as_str()), Some("x"));
        }
    }

    mod validation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_errors_follow_field_order() {
            let mut form = two_field_form();
            form.set_active_field(1);
            form.input_char('x');
            let errors = form.validate().clone();
            let names: Vec<_> = errors.keys().cloned().collect();
            assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
            assert_eq!(errors["a"].field_ref, Some(FieldRef(0)));
            assert_eq!(errors["b"].message.as_deref(), Some("too short"));
        }

        #[test]
        fn test_read_only_field_has_no_ref() {
            let id = FormField {
                focusable: false,
                ..FormField::text("id", "Id", false)
            };
            let mut form = FormState::new(vec![id.with_rule(Rule::required("required"))]);
            let errors = form.validate();
            assert_eq!(errors["id"].field_ref, None);
        }

        #[test]
        fn test_handle_submit_valid_passes_values() {
            let mut form = sample_form();
            let result = form.handle_submit(|values| Some(values), |_| None);
            let values = result.expect("sample profile is valid");
            assert_eq!(values["name"], Profile::sample().name);
        }

        #[test]
        fn test_handle_submit_invalid_passes_errors() {
            let mut form = two_field_form();
            let count = form.handle_submit(|_| 0, |errors| errors.len());
            assert_eq!(count, 1);
        }

        #[test]
        fn test_editing_clears_that_fields_error() {
            let mut form = two_field_form();
            form.validate();
            form.input_char('a');
            assert!(form.field_error(0).is_none());
        }
    }

    mod focus {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_focus_moves_active_field() {
            let mut form = sample_form();
            assert!(form.focus(FieldRef(2)));
            assert_eq!(form.active_field(), 2);
        }

        #[test]
        fn test_focus_rejects_out_of_range_and_read_only() {
            let mut form = FormState::new(vec![
                FormField::text("a", "A", false),
                FormField {
                    focusable: false,
                    ..FormField::text("id", "Id", false)
                },
            ]);
            assert!(!form.focus(FieldRef(5)));
            assert!(!form.focus(FieldRef(1)));
            assert_eq!(form.active_field(), 0);
        }

        #[test]
        fn test_next_and_prev_wrap() {
            let mut form = sample_form();
            form.prev_field();
            assert_eq!(form.active_field(), 3);
            form.next_field();
            assert_eq!(form.active_field(), 0);
        }

        #[test]
        fn test_newline_only_in_multiline() {
            let mut form = sample_form();
            form.newline();
            assert!(!form.is_dirty());
            form.set_active_field(3);
            form.newline();
            assert!(form.is_dirty());
        }
    }
}
