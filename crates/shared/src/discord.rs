use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::Result;
use crate::http;

/// Channel type of a guild text channel.
pub const GUILD_TEXT: u8 = 0;

#[derive(Debug, Clone, Deserialize)]
pub struct Guild {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Channel {
    pub fn is_text(&self) -> bool {
        self.kind == GUILD_TEXT
    }
}

#[derive(Serialize)]
struct CreateMessage<'a> {
    content: &'a str,
}

/// A channel the digest may be posted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryTarget {
    pub channel_id: String,
    pub guild_id: String,
    pub name: String,
    pub text_capable: bool,
}

/// Bot-authenticated calls against the Discord REST API.
pub struct DiscordClient {
    client: Client,
    api_base: Url,
    bot_token: String,
}

impl DiscordClient {
    pub fn new(client: Client, api_base: Url, bot_token: String) -> Self {
        Self {
            client,
            api_base,
            bot_token,
        }
    }

    fn authorization(&self) -> String {
        format!("Bot {}", self.bot_token)
    }

    pub async fn guilds(&self) -> Result<Vec<Guild>> {
        let url = http::join_path(&self.api_base, "/users/@me/guilds");
        let request = self.client.get(&url).header("Authorization", self.authorization());
        http::fetch_json(request, &url).await
    }

    pub async fn channels(&self, guild_id: &str) -> Result<Vec<Channel>> {
        let url = http::join_path(&self.api_base, &format!("/guilds/{}/channels", guild_id));
        let request = self.client.get(&url).header("Authorization", self.authorization());
        http::fetch_json(request, &url).await
    }

    pub async fn send_message(&self, channel_id: &str, content: &str) -> Result<()> {
        let url = http::join_path(&self.api_base, &format!("/channels/{}/messages", channel_id));
        let request = self
            .client
            .post(&url)
            .header("Authorization", self.authorization())
            .json(&CreateMessage { content });
        http::fetch_text(request, &url).await?;
        Ok(())
    }
}

/// Finds every text channel, across all of the bot's guilds, whose name is in
/// `allowed_names`. Any failed lookup aborts the whole resolution.
pub async fn resolve_targets(discord: &DiscordClient, allowed_names: &[String]) -> Result<Vec<DeliveryTarget>> {
    let guilds = discord.guilds().await?;
    let guild_ids: Vec<&str> = guilds.iter().map(|g| g.id.as_str()).collect();
    info!(?guild_ids, "resolved guilds");

    let mut targets = Vec::new();
    for guild in &guilds {
        let channels = discord.channels(&guild.id).await?;
        debug!(guild = %guild.id, channels = channels.len(), "listed channels");
        targets.extend(eligible_targets(&guild.id, channels, allowed_names));
    }

    let names: Vec<&str> = targets.iter().map(|t| t.name.as_str()).collect();
    info!(?names, "sending updates to channels");
    Ok(targets)
}

fn eligible_targets<'a>(
    guild_id: &'a str,
    channels: Vec<Channel>,
    allowed_names: &'a [String],
) -> impl Iterator<Item = DeliveryTarget> + 'a {
    channels.into_iter().filter_map(move |channel| {
        let name = channel.name.as_deref()?;
        if !channel.is_text() || !allowed_names.iter().any(|allowed| allowed == name) {
            return None;
        }
        Some(DeliveryTarget {
            text_capable: channel.is_text(),
            channel_id: channel.id.clone(),
            guild_id: channel.guild_id.clone().unwrap_or_else(|| guild_id.to_string()),
            name: name.to_string(),
        })
    })
}
