// src/services/coach.rs
use super::openai::{ChatCompletion, ChatMessage, CompletionRequest, MessageRole, UpstreamError};

pub const SYSTEM_PROMPT: &str = "You are a supportive mental coach.";
pub const MODEL: &str = "gpt-5";

pub fn build_request(user_msg: &str) -> CompletionRequest {
    CompletionRequest {
        model: MODEL.to_string(),
        messages: vec![
            ChatMessage::new(MessageRole::System, SYSTEM_PROMPT),
            ChatMessage::new(MessageRole::User, user_msg),
        ],
    }
}

/// One upstream call, no retry. A reply with no choices or null content is an error.
pub async fn generate_reply(client: &dyn ChatCompletion, user_msg: &str) -> Result<String, UpstreamError> {
    let request = build_request(user_msg);
    let response = client.complete(&request).await?;
    response.first_content().ok_or(UpstreamError::EmptyCompletion)
}
