//! Matchya web frontend.

// dioxus components are snake case
#![allow(non_snake_case)]

pub mod app;
pub(crate) mod routes;
pub(crate) mod pages;
pub(crate) mod components;
pub(crate) mod data_definitions;
pub(crate) mod api;
