use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::engine::JoinRequest;

/// Configuration for one channel session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Vendor credential identifying the account
    pub vendor_key: String,

    /// Channel to join (also names the output file)
    pub channel_name: String,

    /// Local user id (0 = let the engine assign one)
    pub uid: u32,

    /// Whether to receive a single mixed stream instead of per-user streams
    pub audio_mixed: bool,

    /// PCM sample rate in Hz
    pub sample_rate: u32,

    /// UDP port range passed to the engine, (0, 0) = engine defaults
    pub min_port: u16,
    pub max_port: u16,

    /// Directory the PCM dump is written to
    pub output_dir: PathBuf,
}

impl ChannelConfig {
    pub fn new(vendor_key: impl Into<String>, channel_name: impl Into<String>) -> Self {
        Self {
            vendor_key: vendor_key.into(),
            channel_name: channel_name.into(),
            uid: 0,
            audio_mixed: true,
            sample_rate: 8000,
            min_port: 0,
            max_port: 0,
            output_dir: PathBuf::from("."),
        }
    }

    /// Deterministic output path: `<output_dir>/<channel_name>.pcm`
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.pcm", self.channel_name))
    }

    pub fn join_request(&self) -> JoinRequest {
        JoinRequest {
            vendor_key: self.vendor_key.clone(),
            channel_name: self.channel_name.clone(),
            uid: self.uid,
            min_port: self.min_port,
            max_port: self.max_port,
            audio_mixed: self.audio_mixed,
            sample_rate: self.sample_rate,
        }
    }
}
