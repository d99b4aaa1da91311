use reqwest::Client;
use scraper::{ElementRef, Html};
use tracing::info;
use url::Url;

use super::Headline;
use crate::error::Result;
use crate::http;

pub const ORIGIN: &str = "news.ycombinator.com";

const TITLE_TAG: &str = "span";
const TITLE_CLASS: &str = "titleline";

/// Front-page titles scraped from Hacker News.
pub struct HackerNewsSource {
    client: Client,
    base: Url,
}

impl HackerNewsSource {
    pub fn new(client: Client, base: Url) -> Self {
        Self { client, base }
    }

    /// Scrapes pages `1..=pages`. A page without any title spans adds nothing.
    pub async fn fetch(&self, pages: u32) -> Result<Vec<Headline>> {
        let mut headlines = Vec::new();

        for page in 1..=pages {
            info!(page, "getting hackernews headlines");
            let url = http::join_path(&self.base, &format!("/?p={}", page));
            let body = http::fetch_text(self.client.get(&url), &url).await?;

            headlines.extend(
                extract_titles(&body)
                    .into_iter()
                    .filter_map(|title| Headline::new(title, ORIGIN)),
            );
        }

        info!(count = headlines.len(), "hackernews headline count");
        Ok(headlines)
    }
}

/// Parses `html` and collects the title of every story on the page.
pub fn extract_titles(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    title_lines(&document).collect()
}

/// Walks the document depth-first, yielding the first text of the first anchor
/// inside each `<span class="titleline">`.
///
/// Only an anchor whose very first child is a text node counts; `<a><b>x</b> y</a>` yields nothing.
pub fn title_lines(document: &Html) -> impl Iterator<Item = String> + '_ {
    document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| {
            element.value().name() == TITLE_TAG && element.value().attr("class") == Some(TITLE_CLASS)
        })
        .filter_map(|span| {
            span.children()
                .filter_map(ElementRef::wrap)
                .find(|child| child.value().name() == "a")
        })
        .filter_map(|anchor| {
            anchor
                .first_child()
                .and_then(|node| node.value().as_text().map(|text| String::from(&**text)))
        })
}
