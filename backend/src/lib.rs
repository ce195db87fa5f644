pub mod api;
pub mod config;
pub mod db_utils;
pub mod directory;
pub mod server_extra;
pub mod sitemap;
