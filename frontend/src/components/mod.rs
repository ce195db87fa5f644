pub mod chat_panel;
pub mod error_boundary;
pub mod filter_panel;
pub mod navbar;
pub mod suspend_boundary;
pub mod therapist_results_panel;
