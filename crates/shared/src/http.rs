use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{DigestError, Result};

pub const USER_AGENT: &str = "arrakis-client/0.0.1";

/// Longest slice of an error body kept in a `Status` error.
const ERROR_BODY_LIMIT: usize = 500;

/// The one HTTP client shared by every collaborator in a run.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| DigestError::transport("client builder", e))
}

/// Sends `request` and returns the body of a successful response.
pub async fn fetch_text(request: RequestBuilder, endpoint: &str) -> Result<String> {
    let response = request
        .send()
        .await
        .map_err(|e| DigestError::transport(endpoint, e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("unknown error"));
        return Err(DigestError::Status {
            endpoint: endpoint.to_string(),
            status,
            body: truncate(&body, ERROR_BODY_LIMIT).to_string(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| DigestError::transport(endpoint, e))?;
    debug!(endpoint, bytes = body.len(), "response received");
    Ok(body)
}

/// Sends `request` and decodes the successful response body as `T` in one step.
pub async fn fetch_json<T: DeserializeOwned>(request: RequestBuilder, endpoint: &str) -> Result<T> {
    let body = fetch_text(request, endpoint).await?;
    decode(&body, endpoint)
}

pub fn decode<T: DeserializeOwned>(body: &str, endpoint: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| DigestError::decode(endpoint, e))
}

/// Appends `path` to `base`, which may or may not end in a slash.
pub fn join_path(base: &url::Url, path: &str) -> String {
    format!("{}{}", base.as_str().trim_end_matches('/'), path)
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
