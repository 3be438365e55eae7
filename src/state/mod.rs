//! Application state module

mod forms;
mod profile;
mod toast;

pub use forms::*;
pub use profile::*;
pub use toast::*;
