use std::path::PathBuf;

use reqwest::StatusCode;

/// Every way a digest run can fail.
///
/// `Transport` and `Status` cover failures to reach a collaborator, `Decode` and
/// `MissingContent` cover responses of the wrong shape. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: StatusCode,
        body: String,
    },

    #[error("unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response from {endpoint} carried no message content")]
    MissingContent { endpoint: String },

    #[error("{endpoint} granted a token with unusable lifetime {expires_in}")]
    InvalidLifetime { endpoint: String, expires_in: i64 },

    #[error("failed to write credential store {}: {source}", .path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize credentials: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("announcement database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("failed to prepare announcement database {}: {source}", .path.display())]
    DatabasePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DigestError {
    pub fn transport(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            source,
        }
    }

    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// True when the collaborator could not be reached or refused the request.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Status { .. })
    }

    /// True when the collaborator answered with something we could not read.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. } | Self::MissingContent { .. } | Self::InvalidLifetime { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DigestError>;
