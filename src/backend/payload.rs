//! Request bodies and response interpretation for the remote functions.
//!
//! Responses are read as loose `serde_json::Value`s: the scrape function has
//! been seen returning the markdown both nested under `data` and at the top
//! level, and the chat function's reply field differs between deployments.

use serde::Serialize;
use serde_json::Value;

use crate::backend::collaborator::BackendError;
use crate::core::state::{ChatTurn, Role};

#[derive(Serialize, Debug)]
pub struct ScrapeRequest<'a> {
    pub url: &'a str,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WireMessage<'a> {
    pub role: Role,
    pub content: &'a str,
}

#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub messages: Vec<WireMessage<'a>>,
    pub context: &'a str,
}

impl<'a> ChatRequest<'a> {
    /// History followed by the new user message.
    pub fn new(history: &'a [ChatTurn], message: &'a str, context: &'a str) -> Self {
        let mut messages: Vec<WireMessage<'a>> = history
            .iter()
            .map(|turn| WireMessage {
                role: turn.role,
                content: &turn.content,
            })
            .collect();
        messages.push(WireMessage {
            role: Role::User,
            content: message,
        });
        Self { messages, context }
    }
}

/// Returns the function's explicit error, if it reported one.
fn explicit_error(body: &Value) -> Option<String> {
    match body.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => {}
        Some(Value::String(msg)) => return Some(msg.clone()),
        Some(Value::Object(obj)) => {
            let msg = obj
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| Value::Object(obj.clone()).to_string());
            return Some(msg);
        }
        Some(other) => return Some(other.to_string()),
    }
    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return Some("function reported success=false".to_string());
    }
    None
}

fn non_empty_str<'v>(value: Option<&'v Value>) -> Option<&'v str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Pull the page text out of a scrape response.
///
/// Checks `data.markdown` first, then top-level `markdown`.
pub fn extract_markdown(body: &Value) -> Result<String, BackendError> {
    if let Some(msg) = explicit_error(body) {
        return Err(BackendError::Rejected(msg));
    }

    let nested = body.get("data").and_then(|data| data.get("markdown"));
    non_empty_str(nested)
        .or_else(|| non_empty_str(body.get("markdown")))
        .map(str::to_string)
        .ok_or(BackendError::Empty)
}

/// Pull the assistant reply out of a chat response.
///
/// Accepts `reply`, `content`, `message`, or `choices[0].message.content`.
pub fn extract_reply(body: &Value) -> Result<String, BackendError> {
    if let Some(msg) = explicit_error(body) {
        return Err(BackendError::Rejected(msg));
    }

    ["reply", "content", "message"]
        .iter()
        .find_map(|key| non_empty_str(body.get(*key)))
        .or_else(|| non_empty_str(body.pointer("/choices/0/message/content")))
        .map(str::to_string)
        .ok_or(BackendError::Empty)
}
