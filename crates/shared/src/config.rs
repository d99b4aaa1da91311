use std::env;
use std::time::Duration;

use url::Url;

#[derive(Debug, thiserror::Error)]
#[error(
    "{var} not found.\n\n\
    To fix this, create ~/.config/headline-digest/.env with:\n  \
    REDDIT_CLIENT_ID=your_client_id\n  \
    REDDIT_CLIENT_SECRET=your_client_secret\n  \
    OPENAI_API_KEY=your_key_here\n  \
    ARRAKIS_TERMINAL_TOKEN=your_bot_token"
)]
pub struct MissingVar {
    pub var: &'static str,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub reddit_client_id: String,
    pub reddit_client_secret: String,
    pub openai_api_key: String,
    pub discord_bot_token: String,
    pub endpoints: Endpoints,
    pub settings: DigestSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, MissingVar> {
        // Try to load .env from multiple locations
        Self::try_load_dotenv();

        Ok(Self {
            reddit_client_id: require("REDDIT_CLIENT_ID")?,
            reddit_client_secret: require("REDDIT_CLIENT_SECRET")?,
            openai_api_key: require("OPENAI_API_KEY")?,
            discord_bot_token: require("ARRAKIS_TERMINAL_TOKEN")?,
            endpoints: Endpoints::default(),
            settings: DigestSettings::default(),
        })
    }

    fn try_load_dotenv() {
        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/headline-digest/.env (standard config location)
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("headline-digest").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env (home directory)
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }
    }
}

fn require(var: &'static str) -> Result<String, MissingVar> {
    env::var(var).map_err(|_| MissingVar { var })
}

/// Base URLs of every upstream the pipeline talks to.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub reddit_token: Url,
    pub reddit_api: Url,
    pub hackernews: Url,
    pub fourchan: Url,
    pub chat_completions: Url,
    pub discord_api: Url,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            reddit_token: fixed_url("https://www.reddit.com/api/v1/access_token"),
            reddit_api: fixed_url("https://oauth.reddit.com"),
            hackernews: fixed_url("https://news.ycombinator.com"),
            fourchan: fixed_url("https://boards.4chan.org"),
            chat_completions: fixed_url("https://api.openai.com/v1/chat/completions"),
            discord_api: fixed_url("https://discord.com/api/v10"),
        }
    }
}

impl Endpoints {
    /// Points every upstream at one base URL, as a mock server would serve them.
    pub fn all_at(base: &str) -> Result<Self, url::ParseError> {
        let base = Url::parse(base)?;
        Ok(Self {
            reddit_token: base.join("/api/v1/access_token")?,
            reddit_api: base.clone(),
            hackernews: base.clone(),
            fourchan: base.clone(),
            chat_completions: base.join("/v1/chat/completions")?,
            discord_api: base.join("/api/v10")?,
        })
    }
}

fn fixed_url(raw: &'static str) -> Url {
    Url::parse(raw).expect("built-in endpoint URL")
}

/// Fixed parameters of a digest run.
#[derive(Debug, Clone)]
pub struct DigestSettings {
    pub subreddits: Vec<String>,
    pub listing_limit: u32,
    pub hackernews_pages: u32,
    pub boards: Vec<String>,
    pub channel_names: Vec<String>,
    pub model: String,
    pub temperature: f32,
    pub max_message_len: usize,
    pub pacing: Duration,
}

impl Default for DigestSettings {
    fn default() -> Self {
        Self {
            subreddits: strings(&[
                "wallstreetbets",
                "investmentclub",
                "stockmarkets",
                "investing",
                "cryptocurrency",
                "cscareerquestions",
                "worldnews",
                "stocks",
            ]),
            listing_limit: 20,
            hackernews_pages: 5,
            boards: strings(&["biz", "g"]),
            channel_names: strings(&["arrakis-terminal", "money-talk", "arrakeen"]),
            model: "gpt-4o".to_string(),
            temperature: 1.0,
            max_message_len: 2000,
            pacing: Duration::from_millis(500),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_all_at_keeps_paths() {
        let endpoints = Endpoints::all_at("http://127.0.0.1:4000").unwrap();
        assert_eq!(
            endpoints.reddit_token.as_str(),
            "http://127.0.0.1:4000/api/v1/access_token"
        );
        assert_eq!(endpoints.discord_api.as_str(), "http://127.0.0.1:4000/api/v10");
    }

    #[test]
    fn test_default_settings_match_transport_limits() {
        let settings = DigestSettings::default();
        assert_eq!(settings.max_message_len, 2000);
        assert_eq!(settings.pacing, Duration::from_millis(500));
        assert_eq!(settings.boards, vec!["biz", "g"]);
    }
}
