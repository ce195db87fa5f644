pub mod search;
pub mod profile;
pub mod chat;
