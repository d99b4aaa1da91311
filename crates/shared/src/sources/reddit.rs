use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use super::Headline;
use crate::error::Result;
use crate::http;
use crate::token_store::Credential;

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
struct Post {
    title: String,
}

/// Hot listings from a set of subreddits, read through the OAuth API.
pub struct RedditSource {
    client: Client,
    api_base: Url,
    limit: u32,
}

impl RedditSource {
    pub fn new(client: Client, api_base: Url, limit: u32) -> Self {
        Self {
            client,
            api_base,
            limit,
        }
    }

    pub fn origin(subreddit: &str) -> String {
        format!("www.reddit.com/r/{}", subreddit)
    }

    pub async fn fetch(&self, credential: &Credential, subreddits: &[String]) -> Result<Vec<Headline>> {
        let mut headlines = Vec::new();

        for subreddit in subreddits {
            info!(subreddit = %subreddit, "getting reddit headlines");
            let url = http::join_path(
                &self.api_base,
                &format!(
                    "/r/{}/hot?limit={}&raw_json=1",
                    urlencoding::encode(subreddit),
                    self.limit
                ),
            );

            let request = self
                .client
                .get(&url)
                .header("Authorization", format!("bearer {}", credential.access_token));
            let listing: Listing = http::fetch_json(request, &url).await?;

            let origin = Self::origin(subreddit);
            let before = headlines.len();
            headlines.extend(
                listing
                    .data
                    .children
                    .into_iter()
                    .filter_map(|child| Headline::new(child.data.title, origin.as_str())),
            );
            debug!(subreddit = %subreddit, count = headlines.len() - before, "parsed listing");
        }

        info!(count = headlines.len(), "reddit headline count");
        Ok(headlines)
    }
}
