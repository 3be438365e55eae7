//! Display text for failed saves

use crate::service::SubmitError;

/// Shown when a save error carries no text of its own
pub const DEFAULT_ERROR_MESSAGE: &str =
    "An error occured while trying to save your changes. Please try again.";

/// Map a save failure to the message shown in the error toast
pub fn error_message(err: &SubmitError) -> String {
    let text = err.to_string();
    if text.trim().is_empty() {
        DEFAULT_ERROR_MESSAGE.to_string()
    } else {
        text
    }
}
