use tracing::debug;

use super::{ChannelEvents, EngineFactory, JoinRequest, VoiceEngine};

/// Stand-in engine for builds without a vendor engine linked in.
///
/// Accepts the full call sequence (join, tick, leave, drop) and emits
/// no events, so a session joined against it polls quietly until a
/// shutdown signal arrives.
pub struct NullEngine {
    channel: Option<String>,
}

impl VoiceEngine for NullEngine {
    fn join(&mut self, request: &JoinRequest) {
        debug!(channel = %request.channel_name, "null engine: join ignored");
        self.channel = Some(request.channel_name.clone());
    }

    fn tick(&mut self, _events: &mut dyn ChannelEvents) {}

    fn leave(&mut self) {
        if let Some(channel) = self.channel.take() {
            debug!(%channel, "null engine: leave ignored");
        }
    }
}

/// Factory producing [`NullEngine`] instances. Never fails.
pub struct NullEngineFactory;

impl EngineFactory for NullEngineFactory {
    fn create(&self) -> Option<Box<dyn VoiceEngine>> {
        Some(Box::new(NullEngine { channel: None }))
    }
}
