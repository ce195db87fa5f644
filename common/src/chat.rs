//! Chat assistant messages.

use serde::{Deserialize, Serialize};

use crate::therapist::TherapistSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub chat_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub chat_id: String,
    pub timestamp: i64,
    pub content: String,
    pub role: ChatRole,
    /// Results of the assistant's tool calls, if any.
    #[serde(default)]
    pub source_documents: Option<serde_json::Value>,
    #[serde(default)]
    pub audio_file_url: Option<String>,
}

impl ChatResponse {
    /// Therapists the assistant found while answering. `None` when the
    /// tool output is absent or is not a therapist list.
    pub fn therapist_results(&self) -> Option<Vec<TherapistSummary>> {
        let value = self.source_documents.as_ref()?;
        serde_json::from_value::<Vec<TherapistSummary>>(value.clone()).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: i64,
}


#[cfg(test)]
mod tests {
    use super::*;

    fn response(source_documents: Option<serde_json::Value>) -> ChatResponse {
        ChatResponse {
            chat_id: "c1".into(),
            timestamp: 0,
            content: "Here are some options".into(),
            role: ChatRole::Assistant,
            source_documents,
            audio_file_url: None,
        }
    }

    #[test]
    fn therapist_results_from_tool_output() {
        let tool_output = serde_json::json!([{ "id": "t1", "name": "Jane Doe", "available_online": true }]);
        let results = response(Some(tool_output)).therapist_results().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Jane Doe");
        assert!(results[0].available_online);

        assert_eq!(response(None).therapist_results(), None);
        assert_eq!(response(Some(serde_json::json!("plain text"))).therapist_results(), None);
    }
}
