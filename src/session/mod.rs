//! Channel session management
//!
//! This module provides the `ChannelSession` abstraction that manages:
//! - One engine instance per session, owned by a dedicated worker thread
//! - The fixed-cadence tick loop that pumps engine callbacks
//! - Persisting received PCM payloads to a per-channel dump file
//! - Cooperative shutdown via the session-local and process-wide flags

mod config;
mod session;
mod stats;

pub use config::ChannelConfig;
pub use session::{ChannelSession, TICK_INTERVAL};
pub use stats::SessionStats;
