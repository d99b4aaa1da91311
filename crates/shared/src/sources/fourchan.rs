use std::sync::OnceLock;

use regex::Regex;
use reqwest::Client;
use tracing::info;
use url::Url;

use super::Headline;
use crate::error::Result;
use crate::http;

static TEASER: OnceLock<Regex> = OnceLock::new();

/// Characters trimmed from both ends of a teaser match.
///
/// This is a character set, not a prefix: titles that start or end with any of
/// these characters lose them too (`"teaser":"rates up"` becomes ` up`).
const TEASER_TRIM: &[char] = &['"', 't', 'e', 'a', 's', 'r', ':'];

/// Thread teasers pulled out of a board catalog page.
pub struct FourChanSource {
    client: Client,
    base: Url,
}

impl FourChanSource {
    pub fn new(client: Client, base: Url) -> Self {
        Self { client, base }
    }

    pub fn origin(board: &str) -> String {
        format!("boards.4chan.org/{}", board)
    }

    pub async fn fetch(&self, board: &str) -> Result<Vec<Headline>> {
        let url = http::join_path(&self.base, &format!("/{}/catalog", urlencoding::encode(board)));
        let body = http::fetch_text(self.client.get(&url), &url).await?;

        let origin = Self::origin(board);
        let headlines: Vec<Headline> = extract_teasers(&body)
            .filter_map(|teaser| Headline::new(teaser, origin.as_str()))
            .collect();

        info!(board, count = headlines.len(), "board headline count");
        Ok(headlines)
    }
}

/// Scans the raw catalog text for every `"teaser":"..."` value.
pub fn extract_teasers(body: &str) -> impl Iterator<Item = &str> {
    TEASER
        .get_or_init(|| Regex::new(r#""teaser":"(.*?)""#).expect("teaser regex"))
        .find_iter(body)
        .map(|m| m.as_str().trim_matches(TEASER_TRIM))
}
