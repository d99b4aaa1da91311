use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{DigestError, Result};

/// Which channel each guild wants announcements in.
pub struct AnnouncementStore {
    conn: Connection,
}

impl AnnouncementStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DigestError::DatabasePath {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS announcement_channels (
                guild_id TEXT PRIMARY KEY,
                channel_id TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self { conn })
    }

    /// Records `channel_id` for `guild_id`, replacing any earlier choice.
    pub fn set_channel(&self, guild_id: &str, channel_id: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO announcement_channels (guild_id, channel_id) VALUES (?1, ?2)
             ON CONFLICT(guild_id) DO UPDATE SET channel_id = excluded.channel_id",
            params![guild_id, channel_id],
        )?;
        Ok(())
    }

    pub fn channel_for(&self, guild_id: &str) -> Result<Option<String>> {
        let channel = self
            .conn
            .query_row(
                "SELECT channel_id FROM announcement_channels WHERE guild_id = ?1",
                [guild_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(channel)
    }
}

pub fn default_db_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("headline-digest").join("announcements.db"))
}
