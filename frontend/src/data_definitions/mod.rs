pub mod drawer_state;
pub mod therapist_search_state;
