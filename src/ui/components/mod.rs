//! Reusable UI components

mod button;
mod text;

pub use button::button_span;
pub use text::wrap_text;
