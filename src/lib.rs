pub mod audio;
pub mod config;
pub mod engine;
pub mod session;
pub mod shutdown;
pub mod supervisor;

pub use audio::pcm_to_wav;
pub use config::Config;
pub use engine::{
    ChannelEvents, EngineFactory, JoinRequest, NullEngine, NullEngineFactory, VoiceEngine,
};
pub use session::{ChannelConfig, ChannelSession, SessionStats, TICK_INTERVAL};
pub use shutdown::{install_signal_handlers, ShutdownFlag};
pub use supervisor::Supervisor;
