use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::aggregator::PromptPayload;
use crate::error::{DigestError, Result};
use crate::http;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [Message<'a>; 2],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Turns a rendered prompt into prose through a chat-completions API.
pub struct ChatSummarizer {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
    temperature: f32,
}

impl ChatSummarizer {
    pub fn new(client: Client, endpoint: Url, api_key: String, model: String, temperature: f32) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            model,
            temperature,
        }
    }

    /// Returns the content of the top choice. There is no retry and no fallback text.
    pub async fn summarize(&self, prompt: &PromptPayload) -> Result<String> {
        info!(prompt_size = prompt.user.len(), "requesting summary");

        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: [
                Message {
                    role: "system",
                    content: &prompt.system,
                },
                Message {
                    role: "user",
                    content: &prompt.user,
                },
            ],
        };

        let endpoint = self.endpoint.as_str();
        let builder = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request);
        let response: ChatResponse = http::fetch_json(builder, endpoint).await?;

        let summary = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| DigestError::MissingContent {
                endpoint: endpoint.to_string(),
            })?;

        info!(summary_len = summary.len(), "received summary");
        Ok(summary)
    }
}
