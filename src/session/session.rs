use super::config::ChannelConfig;
use super::stats::SessionStats;
use crate::engine::{ChannelEvents, EngineFactory, VoiceEngine};
use crate::shutdown::ShutdownFlag;
use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{error, info};

/// Cadence of the engine poll loop.
pub const TICK_INTERVAL: Duration = Duration::from_millis(10);

/// One voice-channel session: owns an engine instance for the length of
/// one run and dumps every received PCM payload to a per-channel file.
///
/// The engine is created, driven, and destroyed entirely on a dedicated
/// worker thread; nothing else ever touches it. A session is single-use:
/// `start` at most once, then `stop` exactly once.
pub struct ChannelSession {
    config: ChannelConfig,
    factory: Arc<dyn EngineFactory>,
    shutdown: ShutdownFlag,
    started_at: chrono::DateTime<chrono::Utc>,

    /// Set once by the join-success callback
    joined: Arc<AtomicBool>,

    /// Set once by the error callback; the poll loop exits at its next check
    quit: Arc<AtomicBool>,

    /// PCM bytes appended so far, for stats
    bytes_captured: Arc<AtomicU64>,

    /// Output sink; opened at construction, handed to the worker by `start`
    writer: Option<BufWriter<File>>,

    worker: Option<JoinHandle<()>>,
}

impl ChannelSession {
    /// Create a session and open its output file (truncating any
    /// previous dump for the same channel).
    ///
    /// Failure to open the sink is fatal: a session with nowhere to
    /// persist audio cannot serve its purpose, so the error is bubbled
    /// up rather than recovered.
    pub fn new(
        config: ChannelConfig,
        factory: Arc<dyn EngineFactory>,
        shutdown: ShutdownFlag,
    ) -> Result<Self> {
        fs::create_dir_all(&config.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                config.output_dir.display()
            )
        })?;

        let path = config.output_path();
        let file = File::create(&path)
            .with_context(|| format!("Failed to open pcm file to write: {}", path.display()))?;

        info!(
            channel = %config.channel_name,
            output = %path.display(),
            "Channel session created"
        );

        Ok(Self {
            config,
            factory,
            shutdown,
            started_at: Utc::now(),
            joined: Arc::new(AtomicBool::new(false)),
            quit: Arc::new(AtomicBool::new(false)),
            bytes_captured: Arc::new(AtomicU64::new(0)),
            writer: Some(BufWriter::new(file)),
            worker: None,
        })
    }

    /// Spawn the worker thread and return immediately.
    ///
    /// The worker creates the engine, issues the join, and polls until a
    /// quit condition is observed. Calling `start` twice is a caller error.
    pub fn start(&mut self) -> Result<()> {
        if self.worker.is_some() {
            bail!(
                "Session for channel {} already started",
                self.config.channel_name
            );
        }
        let writer = self
            .writer
            .take()
            .ok_or_else(|| anyhow!("Session for channel {} cannot be restarted", self.config.channel_name))?;

        let worker = Worker {
            config: self.config.clone(),
            writer,
            joined: Arc::clone(&self.joined),
            quit: Arc::clone(&self.quit),
            bytes_captured: Arc::clone(&self.bytes_captured),
            shutdown: self.shutdown.clone(),
        };
        let factory = Arc::clone(&self.factory);

        let handle = thread::Builder::new()
            .name(format!("channel-{}", self.config.channel_name))
            .spawn(move || worker.run(factory))
            .context("Failed to spawn session worker thread")?;

        self.worker = Some(handle);
        Ok(())
    }

    /// Block until the worker has fully unwound: engine left and
    /// destroyed, sink flushed, no further callbacks possible.
    ///
    /// Cancellation is cooperative. `stop` never interrupts an in-flight
    /// tick; if the engine blocks inside tick forever, so does this call.
    pub fn stop(&mut self) -> Result<()> {
        let handle = self.worker.take().ok_or_else(|| {
            anyhow!(
                "Session for channel {} was never started",
                self.config.channel_name
            )
        })?;

        handle
            .join()
            .map_err(|_| anyhow!("Worker thread for channel {} panicked", self.config.channel_name))?;

        info!(channel = %self.config.channel_name, "Channel session stopped");
        Ok(())
    }

    /// Whether the engine ever confirmed the join.
    pub fn is_joined(&self) -> bool {
        self.joined.load(Ordering::SeqCst)
    }

    pub fn channel_name(&self) -> &str {
        &self.config.channel_name
    }

    pub fn stats(&self) -> SessionStats {
        let duration = Utc::now().signed_duration_since(self.started_at);
        SessionStats {
            channel: self.config.channel_name.clone(),
            joined: self.joined.load(Ordering::SeqCst),
            started_at: self.started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            bytes_captured: self.bytes_captured.load(Ordering::SeqCst),
        }
    }
}

/// Everything the worker thread owns, including the output sink and the
/// engine callbacks. The engine calls back through `ChannelEvents`
/// strictly inside `tick`, on this thread.
struct Worker {
    config: ChannelConfig,
    writer: BufWriter<File>,
    joined: Arc<AtomicBool>,
    quit: Arc<AtomicBool>,
    bytes_captured: Arc<AtomicU64>,
    shutdown: ShutdownFlag,
}

impl Worker {
    fn run(mut self, factory: Arc<dyn EngineFactory>) {
        let Some(mut engine) = factory.create() else {
            error!(
                channel = %self.config.channel_name,
                "Failed to create engine instance; session will not join"
            );
            self.close_sink();
            return;
        };

        info!(
            channel = %self.config.channel_name,
            uid = self.config.uid,
            sample_rate = self.config.sample_rate,
            "Joining channel"
        );
        engine.join(&self.config.join_request());

        self.poll(engine.as_mut());

        info!(channel = %self.config.channel_name, "Leaving channel");
        engine.leave();
        drop(engine);

        self.close_sink();
    }

    /// Fixed-cadence poll loop. Quit conditions raised during a tick are
    /// observed only after that tick returns, never mid-call.
    fn poll(&mut self, engine: &mut dyn VoiceEngine) {
        loop {
            engine.tick(self);

            if self.quit.load(Ordering::SeqCst) || self.shutdown.is_requested() {
                break;
            }

            thread::sleep(TICK_INTERVAL);
        }
    }

    fn close_sink(&mut self) {
        if let Err(e) = self.writer.flush() {
            error!(
                channel = %self.config.channel_name,
                "Failed to flush pcm file: {e}"
            );
        }
    }
}

impl ChannelEvents for Worker {
    fn on_session_create(&mut self, session_id: &str) {
        info!(
            channel = %self.config.channel_name,
            session_id,
            "Engine session created"
        );
    }

    fn on_join_success(&mut self, channel: &str, uid: u32, msg: &str) {
        self.joined.store(true, Ordering::SeqCst);
        info!("User {uid} joined the channel {channel}: {msg}");
    }

    fn on_error(&mut self, code: i32, msg: &str) {
        error!(
            channel = %self.config.channel_name,
            code,
            "Engine error: {msg}"
        );
        self.quit.store(true, Ordering::SeqCst);
    }

    fn on_voice_data(&mut self, _uid: u32, data: &[u8]) {
        // Verbatim append, in delivery order. A failed write is surfaced
        // in the log (SIGPIPE is masked process-wide) and the session
        // keeps polling.
        match self.writer.write_all(data) {
            Ok(()) => {
                self.bytes_captured
                    .fetch_add(data.len() as u64, Ordering::SeqCst);
            }
            Err(e) => {
                error!(
                    channel = %self.config.channel_name,
                    "Failed to write {} pcm bytes: {e}",
                    data.len()
                );
            }
        }
    }
}
