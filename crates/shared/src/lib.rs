// Public modules
pub mod aggregator;
pub mod announcement;
pub mod chunker;
pub mod config;
pub mod discord;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod sources;
pub mod summarizer;
pub mod token_store;

// Re-export commonly used types
pub use aggregator::{build_prompt, PromptPayload};
pub use announcement::AnnouncementStore;
pub use config::{Config, DigestSettings, Endpoints};
pub use discord::{resolve_targets, DeliveryTarget, DiscordClient};
pub use dispatcher::{DeliveryReport, Dispatcher};
pub use error::{DigestError, Result};
pub use pipeline::{run, RunContext, RunMode, RunReport};
pub use sources::Headline;
pub use summarizer::ChatSummarizer;
pub use token_store::{Authenticator, Credential, Integration, TokenStore};
