// Integration tests for process-level supervision: one shutdown flag
// broadcast to every session, sessions stopped in start order.

use anyhow::Result;
use std::sync::Arc;
use voicetap::{
    ChannelConfig, ChannelEvents, ChannelSession, EngineFactory, JoinRequest, ShutdownFlag,
    Supervisor, VoiceEngine,
};

/// Engine that emits one fixed payload per tick and raises the process
/// shutdown flag on a chosen tick. A limit of `None` never raises it,
/// modeling a session that only stops because some other session (or
/// the signal handler) did.
struct BroadcastEngine {
    payload: Vec<u8>,
    raise_on_tick: Option<usize>,
    ticks: usize,
    shutdown: ShutdownFlag,
}

impl VoiceEngine for BroadcastEngine {
    fn join(&mut self, _request: &JoinRequest) {}

    fn tick(&mut self, events: &mut dyn ChannelEvents) {
        self.ticks += 1;
        events.on_voice_data(1, &self.payload);
        if self.raise_on_tick == Some(self.ticks) {
            self.shutdown.request();
        }
    }

    fn leave(&mut self) {}
}

struct BroadcastFactory {
    payload: Vec<u8>,
    raise_on_tick: Option<usize>,
    shutdown: ShutdownFlag,
}

impl EngineFactory for BroadcastFactory {
    fn create(&self) -> Option<Box<dyn VoiceEngine>> {
        Some(Box::new(BroadcastEngine {
            payload: self.payload.clone(),
            raise_on_tick: self.raise_on_tick,
            ticks: 0,
            shutdown: self.shutdown.clone(),
        }))
    }
}

fn session(
    dir: &tempfile::TempDir,
    channel: &str,
    raise_on_tick: Option<usize>,
    shutdown: &ShutdownFlag,
) -> Result<ChannelSession> {
    let mut config = ChannelConfig::new("test-vendor-key", channel);
    config.output_dir = dir.path().to_path_buf();

    let factory = Arc::new(BroadcastFactory {
        payload: vec![0x5Au8; 32],
        raise_on_tick,
        shutdown: shutdown.clone(),
    });
    ChannelSession::new(config, factory, shutdown.clone())
}

#[test]
fn one_signal_stops_every_session() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let shutdown = ShutdownFlag::new();

    let mut supervisor = Supervisor::new(shutdown.clone());
    // Only the first session ever raises the flag; the second leaves
    // because the flag is process-wide.
    supervisor.add(session(&dir, "alpha", Some(5), &shutdown)?);
    supervisor.add(session(&dir, "beta", None, &shutdown)?);
    assert_eq!(supervisor.len(), 2);

    supervisor.start_all()?;
    supervisor.join_all()?;

    assert!(shutdown.is_requested());
    for channel in ["alpha", "beta"] {
        let dump = std::fs::read(dir.path().join(format!("{channel}.pcm")))?;
        assert!(
            !dump.is_empty() && dump.len() % 32 == 0,
            "{channel} dump should hold whole payloads, got {} bytes",
            dump.len()
        );
    }

    Ok(())
}

#[test]
fn external_request_stops_a_quiet_supervisor() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let shutdown = ShutdownFlag::new();

    let mut supervisor = Supervisor::new(shutdown.clone());
    supervisor.add(session(&dir, "gamma", None, &shutdown)?);

    supervisor.start_all()?;
    // Stand-in for the SIGINT handler firing.
    shutdown.request();
    supervisor.join_all()?;

    Ok(())
}

#[test]
fn empty_supervisor_shuts_down_cleanly() -> Result<()> {
    let shutdown = ShutdownFlag::new();
    let mut supervisor = Supervisor::new(shutdown);

    assert!(supervisor.is_empty());
    supervisor.start_all()?;
    supervisor.join_all()?;

    Ok(())
}
