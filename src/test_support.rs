//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::backend::{AnswerRequest, Answerer, BackendError, Scraper};
use crate::core::state::{App, ChatTurn};

/// Captured arguments of one `answer()` call.
#[derive(Debug, Clone)]
pub struct RecordedQuestion {
    pub history: Vec<ChatTurn>,
    pub message: String,
    pub context: String,
}

/// Returns canned markdown and a canned reply, recording what was asked.
pub struct ScriptedBackend {
    markdown: String,
    reply: String,
    questions: Mutex<Vec<RecordedQuestion>>,
}

impl ScriptedBackend {
    pub fn new(markdown: &str, reply: &str) -> Self {
        Self {
            markdown: markdown.to_string(),
            reply: reply.to_string(),
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn last_question(&self) -> Option<RecordedQuestion> {
        self.questions.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Scraper for ScriptedBackend {
    async fn scrape(&self, _url: &str) -> Result<String, BackendError> {
        Ok(self.markdown.clone())
    }
}

#[async_trait]
impl Answerer for ScriptedBackend {
    async fn answer(&self, request: AnswerRequest<'_>) -> Result<String, BackendError> {
        self.questions.lock().unwrap().push(RecordedQuestion {
            history: request.history.to_vec(),
            message: request.message.to_string(),
            context: request.context.to_string(),
        });
        Ok(self.reply.clone())
    }
}

/// Every call fails with a 500.
pub struct FailingBackend;

#[async_trait]
impl Scraper for FailingBackend {
    async fn scrape(&self, _url: &str) -> Result<String, BackendError> {
        Err(BackendError::Api {
            status: 500,
            message: "boom".to_string(),
        })
    }
}

#[async_trait]
impl Answerer for FailingBackend {
    async fn answer(&self, _request: AnswerRequest<'_>) -> Result<String, BackendError> {
        Err(BackendError::Api {
            status: 500,
            message: "boom".to_string(),
        })
    }
}

/// An `App` whose context is already loaded with `text`.
pub fn loaded_app(text: &str) -> App {
    let mut app = App::new();
    app.context.begin_loading();
    app.context.finish_loaded(text.to_string());
    app
}
