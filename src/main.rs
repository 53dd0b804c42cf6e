use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use voicetap::{
    install_signal_handlers, ChannelConfig, ChannelSession, Config, EngineFactory,
    NullEngineFactory, ShutdownFlag, Supervisor,
};

#[derive(Parser)]
#[command(name = "voicetap")]
#[command(about = "Record a voice channel to a raw PCM dump")]
struct Args {
    /// Channel to join
    channel: String,

    /// Accepted for compatibility with older launch scripts; unused
    #[arg(value_name = "HOST_ID")]
    host_id: Option<String>,

    /// Configuration file (extension optional)
    #[arg(short, long, default_value = "config/voicetap")]
    config: String,

    /// After shutdown, wrap the captured dump in a WAV container
    #[arg(long)]
    export_wav: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    if let Some(host) = &args.host_id {
        debug!(%host, "Host id argument is accepted but unused");
    }
    let cfg = Config::load(&args.config)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));

    let shutdown = ShutdownFlag::new();
    install_signal_handlers(&shutdown)?;

    let mut channel_cfg = ChannelConfig::new(cfg.vendor.key, args.channel);
    channel_cfg.uid = cfg.vendor.uid;
    channel_cfg.min_port = cfg.vendor.min_port;
    channel_cfg.max_port = cfg.vendor.max_port;
    channel_cfg.audio_mixed = cfg.audio.mixed;
    channel_cfg.sample_rate = cfg.audio.sample_rate;
    channel_cfg.output_dir = PathBuf::from(&cfg.service.output_dir);

    let output_path = channel_cfg.output_path();
    let sample_rate = channel_cfg.sample_rate;

    // No vendor engine is linked into this binary; the null engine
    // exercises the full session lifecycle and records nothing.
    let factory: Arc<dyn EngineFactory> = Arc::new(NullEngineFactory);

    let mut supervisor = Supervisor::new(shutdown.clone());
    supervisor.add(ChannelSession::new(channel_cfg, factory, shutdown)?);

    supervisor.start_all()?;
    info!("Recording, press Ctrl+C to stop");
    supervisor.join_all()?;

    if args.export_wav {
        let wav_path = output_path.with_extension("wav");
        voicetap::pcm_to_wav(&output_path, &wav_path, sample_rate, 1)?;
    }

    Ok(())
}
