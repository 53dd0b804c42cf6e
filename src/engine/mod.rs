//! Contract with the external voice-transport engine
//!
//! The engine owns all networking, codecs, and mixing. This module only
//! defines the narrow surface the session core depends on:
//! - `EngineFactory` creates engine instances (`None` = creation failed)
//! - `VoiceEngine` is one joined-channel handle, driven by `tick`
//! - `ChannelEvents` is the callback sink the engine invokes during `tick`
//!
//! Sequencing contract: `join` first, then `tick` at a steady cadence,
//! then `leave`, then drop. All calls on one handle come from a single
//! thread; `tick` is the only point at which callbacks may fire.

pub mod null;

pub use null::{NullEngine, NullEngineFactory};

/// Parameters for joining a channel.
///
/// `join` is fire-and-forget: the outcome arrives later through
/// `ChannelEvents` during subsequent ticks.
#[derive(Debug, Clone)]
pub struct JoinRequest {
    /// Vendor credential identifying the account
    pub vendor_key: String,
    /// Channel to join
    pub channel_name: String,
    /// Local user id (0 = let the engine assign one)
    pub uid: u32,
    /// UDP port range, (0, 0) = engine defaults
    pub min_port: u16,
    pub max_port: u16,
    /// Whether the engine should deliver a single mixed stream
    pub audio_mixed: bool,
    /// PCM sample rate in Hz
    pub sample_rate: u32,
}

/// Callback sink the engine invokes synchronously during `tick`.
///
/// Callbacks always run on the thread that called `tick`, never on
/// another thread, and in the order the engine raises them.
pub trait ChannelEvents {
    /// First callback, if any; informational.
    fn on_session_create(&mut self, session_id: &str);

    /// The join issued earlier succeeded.
    fn on_join_success(&mut self, channel: &str, uid: u32, msg: &str);

    /// The engine reports a failure. The current tick is not aborted;
    /// the caller reacts at its next loop check.
    fn on_error(&mut self, code: i32, msg: &str);

    /// Raw PCM payload, delivered in stream order.
    fn on_voice_data(&mut self, uid: u32, data: &[u8]);
}

/// One engine instance, exclusively owned by a single session worker.
///
/// Dropping the handle destroys the instance; after `leave` + drop no
/// further callbacks are possible.
pub trait VoiceEngine: Send {
    /// Request to join a channel. Asynchronous; result via callbacks.
    fn join(&mut self, request: &JoinRequest);

    /// Pump the engine's internal event loop once. Blocks for as long
    /// as the engine takes; any pending callbacks fire on `events`
    /// before this returns.
    fn tick(&mut self, events: &mut dyn ChannelEvents);

    /// Leave the channel. Called exactly once, after the last tick.
    fn leave(&mut self);
}

/// Creates engine instances. `None` means the engine could not be
/// instantiated; the caller must not retry.
pub trait EngineFactory: Send + Sync {
    fn create(&self) -> Option<Box<dyn VoiceEngine>>;
}
