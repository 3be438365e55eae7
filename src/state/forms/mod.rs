//! Form domain layer
//!
//! Fields with initial values and validation rules, dirty tracking, and the
//! `handle_submit` validation pass the save notifications run before saving.

mod field;
mod form_state;

pub use field::{FormField, Rule};
pub use form_state::{FieldError, FieldErrors, FieldRef, Form, FormState, FormValues};
