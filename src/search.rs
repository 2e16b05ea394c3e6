//! NIK search: validated strict search, permissive live search, and input feedback.

pub mod engine;
pub mod validator;

pub use engine::{live_search, nik_matches, strict_search, LiveOutcome, StrictOutcome};
pub use validator::{validate, validate_with, Feedback};

/// Minimum number of digits a submitted search must have.
pub const MIN_SEARCH_LENGTH: usize = 8;
