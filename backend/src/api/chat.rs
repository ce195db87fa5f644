//! Chat assistant proxy.

use anyhow::Context;
use common::chat::{ChatRequest, ChatResponse};

fn chat_api_url() -> String {
    std::env::var("CHAT_API_URL").unwrap_or("http://127.0.0.1:8000".to_string())
}

/// Forward one user message to the assistant API and return its reply.
pub async fn send_chat_message(request: ChatRequest) -> anyhow::Result<ChatResponse> {
    let message = request.message.trim();
    if message.is_empty() {
        anyhow::bail!("Chat message is empty");
    }
    let url = format!("{}/chat", chat_api_url().trim_end_matches('/'));
    tracing::info!("send_chat_message: chat_id={} ({} chars)", request.chat_id, message.len());

    let response = reqwest::Client::new()
        .post(&url)
        .json(&request)
        .send()
        .await
        .with_context(|| format!("chat request to {url} failed"))?;
    let status = response.status();
    let response_txt = response.text().await?;
    if status.is_client_error() || status.is_server_error() {
        anyhow::bail!("Chat API error: {}: {}", status, response_txt);
    }
    let reply = serde_json::from_str::<ChatResponse>(&response_txt).context("unexpected chat response")?;
    Ok(reply)
}
