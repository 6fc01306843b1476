//! HTTP client for serverless functions.
//!
//! Each collaborator is a named function reachable at
//! `POST {base_url}/functions/v1/{name}`, authenticated with the project key
//! sent both as a bearer token and as an `apikey` header.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::Value;

use crate::backend::collaborator::{AnswerRequest, Answerer, BackendError, Scraper};
use crate::backend::payload::{ChatRequest, ScrapeRequest, extract_markdown, extract_reply};
use crate::core::config::ResolvedConfig;

pub struct FunctionsClient {
    base_url: String,
    api_key: Option<String>,
    scrape_function: String,
    chat_function: String,
    client: reqwest::Client,
}

impl FunctionsClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        scrape_function: impl Into<String>,
        chat_function: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            scrape_function: scrape_function.into(),
            chat_function: chat_function.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            config.api_key.clone(),
            config.scrape_function.clone(),
            config.chat_function.clone(),
        )
    }

    pub fn function_url(&self, name: &str) -> String {
        format!("{}/functions/v1/{}", self.base_url, name)
    }

    /// POST `body` to the named function and return the parsed JSON response.
    async fn invoke<B: Serialize + ?Sized>(&self, name: &str, body: &B) -> Result<Value, BackendError> {
        let url = reqwest::Url::parse(&self.function_url(name))
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
            .ok_or_else(|| BackendError::Config(format!("invalid base URL: {}", self.base_url)))?;

        let mut request = self.client.post(url).json(body);
        if let Some(key) = &self.api_key {
            request = request
                .header("Authorization", format!("Bearer {key}"))
                .header("apikey", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        debug!("Function '{}' response status: {}", name, response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Function '{}' error: {} - {}", name, status, err_body);
            return Err(BackendError::Api {
                status,
                message: err_body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| {
            warn!("Function '{}' returned non-JSON body ({} bytes)", name, text.len());
            BackendError::Parse(e.to_string())
        })
    }
}

#[async_trait]
impl Scraper for FunctionsClient {
    async fn scrape(&self, url: &str) -> Result<String, BackendError> {
        info!("Invoking '{}' for {}", self.scrape_function, url);
        let body = self.invoke(&self.scrape_function, &ScrapeRequest { url }).await?;
        let markdown = extract_markdown(&body)?;
        info!("Scraped {} bytes of markdown", markdown.len());
        Ok(markdown)
    }
}

#[async_trait]
impl Answerer for FunctionsClient {
    async fn answer(&self, request: AnswerRequest<'_>) -> Result<String, BackendError> {
        let chat = ChatRequest::new(request.history, request.message, request.context);
        info!(
            "Invoking '{}': messages={}, context_len={}",
            self.chat_function,
            chat.messages.len(),
            request.context.len()
        );
        let body = self.invoke(&self.chat_function, &chat).await?;
        extract_reply(&body)
    }
}
