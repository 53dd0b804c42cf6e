use anyhow::{bail, Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs;
use std::path::Path;
use tracing::info;

/// Wrap a raw PCM dump in a WAV container.
///
/// The dump is read as little-endian i16 samples, exactly as the engine
/// delivers them. The sample rate and channel count are not recorded in
/// the dump and must be supplied by the caller.
pub fn pcm_to_wav(pcm: &Path, wav: &Path, sample_rate: u32, channels: u16) -> Result<()> {
    let bytes = fs::read(pcm)
        .with_context(|| format!("Failed to read pcm dump {}", pcm.display()))?;

    if bytes.len() % 2 != 0 {
        bail!(
            "Pcm dump {} has odd length {}; expected 16-bit samples",
            pcm.display(),
            bytes.len()
        );
    }

    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(wav, spec)
        .with_context(|| format!("Failed to create WAV file {}", wav.display()))?;

    for pair in bytes.chunks_exact(2) {
        let sample = i16::from_le_bytes([pair[0], pair[1]]);
        writer.write_sample(sample)?;
    }

    writer.finalize().context("Failed to finalize WAV file")?;

    info!(
        "Exported {} samples to {}",
        bytes.len() / 2,
        wav.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;

    #[test]
    fn wraps_raw_samples_unchanged() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let pcm = dir.path().join("mix.pcm");
        let wav = dir.path().join("mix.wav");

        let samples: Vec<i16> = vec![0, 100, -100, i16::MAX, i16::MIN];
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        fs::write(&pcm, &bytes)?;

        pcm_to_wav(&pcm, &wav, 8000, 1)?;

        let reader = WavReader::open(&wav)?;
        assert_eq!(reader.spec().sample_rate, 8000);
        assert_eq!(reader.spec().channels, 1);
        let decoded: Vec<i16> = reader.into_samples().collect::<Result<_, _>>()?;
        assert_eq!(decoded, samples, "samples should round-trip unchanged");

        Ok(())
    }

    #[test]
    fn rejects_odd_length_dump() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let pcm = dir.path().join("bad.pcm");
        fs::write(&pcm, [1u8, 2, 3])?;

        let result = pcm_to_wav(&pcm, &dir.path().join("bad.wav"), 8000, 1);
        assert!(result.is_err(), "odd-length dump should be rejected");

        Ok(())
    }

    #[test]
    fn empty_dump_yields_empty_wav() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let pcm = dir.path().join("empty.pcm");
        let wav = dir.path().join("empty.wav");
        fs::write(&pcm, [])?;

        pcm_to_wav(&pcm, &wav, 16000, 1)?;

        let reader = WavReader::open(&wav)?;
        assert_eq!(reader.len(), 0);

        Ok(())
    }
}
