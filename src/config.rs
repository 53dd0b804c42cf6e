use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub vendor: VendorConfig,
    pub audio: AudioConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub output_dir: String,
}

#[derive(Debug, Deserialize)]
pub struct VendorConfig {
    /// Credential identifying the account with the voice engine vendor
    pub key: String,
    /// Local uid for joins (0 = engine-assigned)
    pub uid: u32,
    /// UDP port range handed to the engine, 0/0 = engine defaults
    pub min_port: u16,
    pub max_port: u16,
}

#[derive(Debug, Deserialize)]
pub struct AudioConfig {
    pub sample_rate: u32,
    /// Receive one mixed stream rather than per-user streams
    pub mixed: bool,
}

impl Config {
    /// Load configuration from the named file, if present, on top of
    /// built-in defaults. A missing file is not an error.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "voicetap")?
            .set_default("service.output_dir", ".")?
            .set_default("vendor.key", "")?
            .set_default("vendor.uid", 0)?
            .set_default("vendor.min_port", 0)?
            .set_default("vendor.max_port", 0)?
            .set_default("audio.sample_rate", 8000)?
            .set_default("audio.mixed", true)?
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_file_is_missing() -> Result<()> {
        let cfg = Config::load("config/does-not-exist")?;

        assert_eq!(cfg.service.name, "voicetap");
        assert_eq!(cfg.audio.sample_rate, 8000);
        assert!(cfg.audio.mixed);
        assert_eq!(cfg.vendor.uid, 0);
        assert_eq!((cfg.vendor.min_port, cfg.vendor.max_port), (0, 0));

        Ok(())
    }
}
