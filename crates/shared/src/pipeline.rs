//! One digest run, from channel discovery to the last message sent.

use std::path::PathBuf;

use reqwest::Client;
use tracing::info;

use crate::aggregator::build_prompt;
use crate::chunker;
use crate::config::Config;
use crate::discord::{resolve_targets, DeliveryTarget, DiscordClient};
use crate::dispatcher::{DeliveryReport, Dispatcher};
use crate::error::Result;
use crate::http;
use crate::sources::{FourChanSource, HackerNewsSource, Headline, RedditSource};
use crate::summarizer::ChatSummarizer;
use crate::token_store::{unix_now, Authenticator, Integration, TokenStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Deliver,
    /// Summarize but skip channel discovery and delivery.
    DryRun,
}

/// State owned by a single run: the HTTP client, configuration and credentials.
pub struct RunContext {
    pub http: Client,
    pub config: Config,
    pub tokens: TokenStore,
}

impl RunContext {
    pub fn open(config: Config, auth_file: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            http: http::build_client()?,
            config,
            tokens: TokenStore::load(auth_file),
        })
    }

    pub fn with_client(http: Client, config: Config, tokens: TokenStore) -> Self {
        Self { http, config, tokens }
    }

    pub fn authenticator(&self) -> Authenticator {
        Authenticator::new(
            self.http.clone(),
            self.config.endpoints.reddit_token.clone(),
            self.config.reddit_client_id.clone(),
            self.config.reddit_client_secret.clone(),
        )
    }

    pub fn discord(&self) -> DiscordClient {
        DiscordClient::new(
            self.http.clone(),
            self.config.endpoints.discord_api.clone(),
            self.config.discord_bot_token.clone(),
        )
    }

    pub fn summarizer(&self) -> ChatSummarizer {
        let settings = &self.config.settings;
        ChatSummarizer::new(
            self.http.clone(),
            self.config.endpoints.chat_completions.clone(),
            self.config.openai_api_key.clone(),
            settings.model.clone(),
            settings.temperature,
        )
    }

    /// Refreshes credentials, persists them, and pulls headlines from every
    /// source in turn: Hacker News, Reddit, then each board.
    pub async fn collect_headlines(&mut self, now: i64) -> Result<Vec<Headline>> {
        let auth = self.authenticator();
        self.tokens.refresh_all(&auth, now).await?;
        let reddit_credential = self.tokens.get_valid(Integration::Reddit, &auth, now).await?;

        let endpoints = &self.config.endpoints;
        let settings = &self.config.settings;
        let mut headlines = Vec::new();

        let hackernews = HackerNewsSource::new(self.http.clone(), endpoints.hackernews.clone());
        headlines.extend(hackernews.fetch(settings.hackernews_pages).await?);

        let reddit = RedditSource::new(self.http.clone(), endpoints.reddit_api.clone(), settings.listing_limit);
        headlines.extend(reddit.fetch(&reddit_credential, &settings.subreddits).await?);

        let fourchan = FourChanSource::new(self.http.clone(), endpoints.fourchan.clone());
        for board in &settings.boards {
            headlines.extend(fourchan.fetch(board).await?);
        }

        info!(count = headlines.len(), "collected headlines");
        Ok(headlines)
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub targets: Vec<DeliveryTarget>,
    pub headline_count: usize,
    pub chunks: Vec<String>,
    pub delivery: Option<DeliveryReport>,
}

/// Runs the pipeline to completion. The first transport or decode failure ends
/// the run; failed deliveries do not.
pub async fn run(mut ctx: RunContext, mode: RunMode) -> Result<RunReport> {
    info!(?mode, "sending headline prompt");
    let discord = ctx.discord();

    let targets = match mode {
        RunMode::Deliver => resolve_targets(&discord, &ctx.config.settings.channel_names).await?,
        RunMode::DryRun => Vec::new(),
    };

    let headlines = ctx.collect_headlines(unix_now()).await?;
    let prompt = build_prompt(&headlines);
    info!(prompt_size = prompt.user.len(), "built prompt");

    let summary = ctx.summarizer().summarize(&prompt).await?;
    let chunks = chunker::split(&summary, ctx.config.settings.max_message_len);
    info!(split_count = chunks.len(), "split summary");

    let delivery = match mode {
        RunMode::Deliver => {
            let dispatcher = Dispatcher::new(&discord, ctx.config.settings.pacing);
            Some(dispatcher.deliver(&targets, &chunks).await)
        }
        RunMode::DryRun => None,
    };

    Ok(RunReport {
        targets,
        headline_count: headlines.len(),
        chunks,
        delivery,
    })
}
