//! Process-level session supervision
//!
//! The supervisor owns the full set of sessions for the life of the
//! process: it starts them all, then blocks on each one's shutdown in
//! the same order they were started. It never inspects a session's
//! internal flags; its whole view of a session is the start/stop
//! contract plus the stats it logs after stopping.

use crate::session::ChannelSession;
use crate::shutdown::ShutdownFlag;
use anyhow::Result;
use tracing::info;

pub struct Supervisor {
    sessions: Vec<ChannelSession>,
    shutdown: ShutdownFlag,
}

impl Supervisor {
    pub fn new(shutdown: ShutdownFlag) -> Self {
        Self {
            sessions: Vec::new(),
            shutdown,
        }
    }

    pub fn add(&mut self, session: ChannelSession) {
        self.sessions.push(session);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn shutdown_flag(&self) -> &ShutdownFlag {
        &self.shutdown
    }

    /// Start every session. Each returns immediately; the workers run
    /// until a quit condition is observed.
    pub fn start_all(&mut self) -> Result<()> {
        for session in &mut self.sessions {
            session.start()?;
            info!(channel = %session.channel_name(), "Session started");
        }
        Ok(())
    }

    /// Stop every session, in start order, blocking on each until its
    /// worker has fully unwound. Logs final stats per session.
    pub fn join_all(&mut self) -> Result<()> {
        for session in &mut self.sessions {
            session.stop()?;
            let stats = session.stats();
            info!(
                channel = %stats.channel,
                joined = stats.joined,
                bytes = stats.bytes_captured,
                duration_secs = stats.duration_secs,
                "Session finished"
            );
        }
        info!("All sessions joined");
        Ok(())
    }
}
