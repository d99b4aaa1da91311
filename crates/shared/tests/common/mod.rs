#![allow(dead_code)]

use std::sync::Once;
use std::time::Duration;

use serde_json::{json, Value};
use shared::{Authenticator, Config, DigestSettings, Endpoints};
use wiremock::MockServer;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn config_for(server: &MockServer) -> Config {
    Config {
        reddit_client_id: "client-id".to_string(),
        reddit_client_secret: "client-secret".to_string(),
        openai_api_key: "sk-test".to_string(),
        discord_bot_token: "bot-token".to_string(),
        endpoints: Endpoints::all_at(&server.uri()).unwrap(),
        settings: DigestSettings {
            subreddits: vec!["rust".to_string()],
            hackernews_pages: 1,
            boards: vec!["g".to_string()],
            pacing: Duration::from_millis(10),
            ..DigestSettings::default()
        },
    }
}

pub fn authenticator_for(server: &MockServer) -> Authenticator {
    let config = config_for(server);
    Authenticator::new(
        reqwest::Client::new(),
        config.endpoints.reddit_token,
        config.reddit_client_id,
        config.reddit_client_secret,
    )
}

pub fn grant(token: &str, expires_in: i64) -> Value {
    json!({
        "access_token": token,
        "token_type": "bearer",
        "expires_in": expires_in,
        "scope": "*"
    })
}

pub fn listing(titles: &[&str]) -> Value {
    let children: Vec<Value> = titles
        .iter()
        .map(|title| json!({"kind": "t3", "data": {"title": title, "score": 1}}))
        .collect();
    json!({"kind": "Listing", "data": {"after": null, "children": children}})
}

pub fn hackernews_page(titles: &[&str]) -> String {
    let rows: String = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            format!(
                r#"<tr class="athing" id="{i}"><td class="title"><span class="titleline"><a href="item?id={i}">{title}</a></span></td></tr>"#
            )
        })
        .collect();
    format!("<html><body><table>{rows}</table></body></html>")
}

pub fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}]
    })
}
