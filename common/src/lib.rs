//! Common library exports shared between frontend and backend.

extern crate serde;


pub mod filter_criteria;
pub mod therapist;
pub mod profile_names;
pub mod chat;
pub mod slug;
pub mod location_data;
