//! Therapist search route handlers and module exports.

mod search_therapists;
pub use search_therapists::search_therapists;

pub mod search_filters;
