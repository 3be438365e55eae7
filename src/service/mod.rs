//! Save handlers the form submits through

mod profile;
mod traits;

pub use profile::{ProfileService, SaveMode};
pub use traits::{SubmitError, SubmitHandler};

#[cfg(test)]
pub use traits::MockSubmitHandler;
