use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use shared::{Config, RunContext, RunMode};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "send-headlines")]
#[command(about = "Summarize today's headlines and post them to the bot's Discord channels")]
struct Args {
    /// Where expiring API credentials are kept between runs
    #[arg(long, default_value = "auth.json")]
    auth_file: PathBuf,

    /// Print the summary instead of posting it
    #[arg(long)]
    dry_run: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stdout))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = send(args).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn send(args: Args) -> Result<()> {
    let config = Config::from_env()?;
    let mode = if args.dry_run {
        RunMode::DryRun
    } else {
        RunMode::Deliver
    };

    let ctx = RunContext::open(config, &args.auth_file).context("Failed to set up run")?;
    let report = shared::run(ctx, mode).await.context("Headline run failed")?;

    if mode == RunMode::DryRun {
        for chunk in &report.chunks {
            println!("{chunk}");
        }
    }

    match report.delivery {
        Some(delivery) => info!(
            headlines = report.headline_count,
            targets = report.targets.len(),
            delivered = delivery.delivered(),
            failed = delivery.failed,
            "run complete"
        ),
        None => info!(
            headlines = report.headline_count,
            chunks = report.chunks.len(),
            "dry run complete"
        ),
    }

    Ok(())
}
