//! Client API calls for therapist search, profiles and the chat assistant.

use common::{
    chat::{ChatRequest, ChatResponse},
    filter_criteria::FilterCriteria,
    therapist::{TherapistProfile, TherapistSearchResponse},
};
use dioxus::prelude::*;

#[server]
pub async fn search_therapists(criteria: FilterCriteria) -> Result<TherapistSearchResponse, ServerFnError> {
    let x = backend::api::search::search_therapists(criteria).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

#[server]
pub async fn get_therapist_profile(slug: String) -> Result<Option<TherapistProfile>, ServerFnError> {
    let x = backend::api::profile::get_therapist_profile(slug).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}

#[server]
pub async fn send_chat_message(request: ChatRequest) -> Result<ChatResponse, ServerFnError> {
    let x = backend::api::chat::send_chat_message(request).await;
    x.map_err(|e| ServerFnError::ServerError { message: e.to_string(), code: 500, details: None })
}
