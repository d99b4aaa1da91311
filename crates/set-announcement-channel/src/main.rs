use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use shared::announcement::{default_db_path, AnnouncementStore};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "set-announcement-channel")]
#[command(about = "Record which channel a guild wants announcements posted in")]
struct Args {
    /// Discord guild (server) id
    #[arg(short, long)]
    guild: String,

    /// Channel id within that guild
    #[arg(short, long)]
    channel: String,

    /// SQLite database file (defaults to the local data directory)
    #[arg(long)]
    db: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().compact())
        .init();

    let args = Args::parse();

    let db_path = match args.db {
        Some(path) => path,
        None => default_db_path().context("Could not determine local data directory")?,
    };

    let store = AnnouncementStore::open(&db_path)
        .with_context(|| format!("Failed to open {}", db_path.display()))?;
    info!(db = %db_path.display(), "connected to database");

    store
        .set_channel(&args.guild, &args.channel)
        .context("Failed to record announcement channel")?;

    println!("✓ Guild {} will get announcements in channel {}", args.guild, args.channel);
    Ok(())
}
