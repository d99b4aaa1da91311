use std::time::Duration;

use tracing::{info, warn};

use crate::discord::{DeliveryTarget, DiscordClient};

/// Outcome of one delivery pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub attempted: usize,
    pub failed: usize,
}

impl DeliveryReport {
    pub fn delivered(&self) -> usize {
        self.attempted - self.failed
    }
}

/// Posts chunks to targets one at a time, pausing after every send.
pub struct Dispatcher<'a> {
    discord: &'a DiscordClient,
    pacing: Duration,
}

impl<'a> Dispatcher<'a> {
    pub fn new(discord: &'a DiscordClient, pacing: Duration) -> Self {
        Self { discord, pacing }
    }

    /// Sends every chunk, in order, to every target. A failed send is logged and
    /// the remaining sends still go out; nothing is retried.
    pub async fn deliver(&self, targets: &[DeliveryTarget], chunks: &[String]) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        for target in targets.iter().filter(|t| t.text_capable) {
            for (i, chunk) in chunks.iter().enumerate() {
                info!(channel = %target.name, split = i, total = chunks.len(), "sending split");
                report.attempted += 1;

                if let Err(e) = self.discord.send_message(&target.channel_id, chunk).await {
                    report.failed += 1;
                    warn!(channel = %target.channel_id, split = i, error = %e, "failed to deliver split");
                }

                tokio::time::sleep(self.pacing).await;
            }
        }

        info!(attempted = report.attempted, failed = report.failed, "delivery finished");
        report
    }
}
