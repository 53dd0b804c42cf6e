use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a channel session's progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Channel this session recorded
    pub channel: String,

    /// Whether the engine ever confirmed the join
    pub joined: bool,

    /// When the session object was created
    pub started_at: DateTime<Utc>,

    /// Seconds elapsed since the session was created
    pub duration_secs: f64,

    /// Raw PCM bytes appended to the output file so far
    pub bytes_captured: u64,
}
