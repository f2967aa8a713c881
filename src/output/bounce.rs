//! Offline WAV bounce of an interleaved buffer for listening or inspection

use std::path::Path;

use anyhow::{ensure, Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use log::info;

use crate::engine::{OutputBuffer, Samples};

/// Write `buffer` as an integer PCM WAV, one WAV channel per synthesis channel
pub fn bounce_wav(buffer: &OutputBuffer, path: &Path, sample_rate: u32) -> Result<()> {
    ensure!(
        buffer.nchan() <= u16::MAX as usize,
        "{} channels do not fit in a WAV file",
        buffer.nchan()
    );

    let spec = WavSpec {
        channels: buffer.nchan() as u16,
        sample_rate,
        bits_per_sample: (buffer.width().bytes() * 8) as u16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).context("Failed to create WAV file")?;
    match buffer.samples() {
        Samples::I16(data) => {
            for sample in data {
                writer.write_sample(*sample).context("Failed to write sample")?;
            }
        }
        Samples::I32(data) => {
            for sample in data {
                writer.write_sample(*sample).context("Failed to write sample")?;
            }
        }
    }
    writer.finalize().context("Failed to finalize WAV file")?;

    info!("bounced {} to {}", buffer.len(), path.display());
    Ok(())
}
