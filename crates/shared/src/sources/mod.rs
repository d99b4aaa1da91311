//! Upstream adapters. Each one turns a source's wire format into [`Headline`]s.

pub mod fourchan;
pub mod hackernews;
pub mod reddit;

pub use fourchan::FourChanSource;
pub use hackernews::HackerNewsSource;
pub use reddit::RedditSource;

/// A bit of news from one source, waiting to be summarized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub title: String,
    /// Which source or sub-source produced it, e.g. `www.reddit.com/r/stocks`.
    pub origin: String,
    pub body: Option<String>,
}

impl Headline {
    /// Builds a headline, or `None` when the title is empty.
    pub fn new(title: impl Into<String>, origin: impl Into<String>) -> Option<Self> {
        let title = title.into();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            title,
            origin: origin.into(),
            body: None,
        })
    }
}
