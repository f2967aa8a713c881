//! Synthesis-wide settings and their resolution into typed values.
//!
//! Channel selector syntax (`FUNC:channels`, entries joined with `/`):
//! ```text
//! SINE:ALL
//! SINE:1-8/RAMP:9-16
//! SINE:ODD/SQUARE:EVEN
//! SINE:1,2,5-7
//! ```
//! Channels are 1-based. A later entry overrides an earlier one for the
//! same channel; channels no entry names stay silent.

use log::warn;

use crate::error::ConfigError;
use crate::gen::waveform::Waveform;

/// Fixed-width signed integer type of the output buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleWidth {
    I16,
    I32,
}

impl SampleWidth {
    /// Accepts a size in bytes (2, 4) or bits (16, 32)
    pub fn from_dsize(dsize: u32) -> Result<Self, ConfigError> {
        match dsize {
            2 | 16 => Ok(SampleWidth::I16),
            4 | 32 => Ok(SampleWidth::I32),
            other => Err(ConfigError::InvalidSampleWidth(other)),
        }
    }

    pub fn bytes(&self) -> usize {
        match self {
            SampleWidth::I16 => 2,
            SampleWidth::I32 => 4,
        }
    }

    /// Largest representable sample value (full scale)
    pub fn max_value(&self) -> i64 {
        match self {
            SampleWidth::I16 => i16::MAX as i64,
            SampleWidth::I32 => i32::MAX as i64,
        }
    }
}

/// Channel number to waveform assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMap {
    // Index 0 holds channel 1
    assignments: Vec<Option<Waveform>>,
}

impl ChannelMap {
    pub fn parse(selector: &str, nchan: usize) -> Result<Self, ConfigError> {
        let mut assignments = vec![None; nchan];

        for entry in selector.split('/') {
            let parts: Vec<&str> = entry.split(':').collect();
            if parts.len() != 2 {
                return Err(ConfigError::MalformedSelector(entry.to_string()));
            }
            let waveform: Waveform = parts[0].parse()?;

            for channel in parse_channels(parts[1], nchan)? {
                match assignments.get_mut(channel.wrapping_sub(1)) {
                    Some(slot) => *slot = Some(waveform),
                    None => warn!(
                        "{} selector names channel {} but only {} channels exist",
                        waveform, channel, nchan
                    ),
                }
            }
        }

        Ok(Self { assignments })
    }

    /// Waveform for a 1-based channel number
    pub fn get(&self, channel: usize) -> Option<Waveform> {
        channel
            .checked_sub(1)
            .and_then(|index| self.assignments.get(index).copied().flatten())
    }

    pub fn nchan(&self) -> usize {
        self.assignments.len()
    }

    /// Number of channels that have a waveform
    pub fn assigned_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_some()).count()
    }
}

/// Expand a channel list into 1-based channel numbers
pub fn parse_channels(token: &str, nchan: usize) -> Result<Vec<usize>, ConfigError> {
    let token = token.trim();
    match token.to_ascii_uppercase().as_str() {
        "ALL" => return Ok((1..=nchan).collect()),
        "ODD" => return Ok((1..=nchan).step_by(2).collect()),
        "EVEN" => return Ok((2..=nchan).step_by(2).collect()),
        _ => {}
    }

    let malformed = || ConfigError::MalformedChannels(token.to_string());
    let mut channels = Vec::new();
    for part in token.split(',') {
        let part = part.trim();
        if let Some((first, last)) = part.split_once('-') {
            let first: usize = first.trim().parse().map_err(|_| malformed())?;
            let last: usize = last.trim().parse().map_err(|_| malformed())?;
            if last > nchan {
                warn!(
                    "channel range {}-{} reaches past the last channel {}",
                    first, last, nchan
                );
            }
            channels.extend(first..=last.min(nchan));
            continue;
        }
        channels.push(part.parse().map_err(|_| malformed())?);
    }
    Ok(channels)
}

/// Construction parameters of a [`WaveGen`](crate::engine::WaveGen)
///
/// Sequence-valued parameters are comma-separated token lists, see
/// [`SequenceSpec`](crate::sequence::SequenceSpec).
#[derive(Debug, Clone, PartialEq)]
pub struct WaveConfig {
    pub nchan: usize,
    pub cycles: u32,
    pub wavelength: String,
    /// Samples per channel; defaults to the base wavelength
    pub total_length: Option<usize>,
    /// Output width in bytes (2, 4) or bits (16, 32)
    pub dsize: u32,
    pub wave: String,
    /// Degrees
    pub phase: String,
    pub scale: String,
    pub crop: String,
    pub spos: String,
    /// Full-scale reference voltage
    pub voltage: f64,
    /// Volts
    pub offset: String,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            nchan: 8,
            cycles: 1,
            wavelength: "20000".to_string(),
            total_length: None,
            dsize: 2,
            wave: "SINE:ALL".to_string(),
            phase: "0".to_string(),
            scale: "1".to_string(),
            crop: "0".to_string(),
            spos: "0".to_string(),
            voltage: 10.0,
            offset: "0".to_string(),
        }
    }
}

impl WaveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nchan(mut self, nchan: usize) -> Self {
        self.nchan = nchan;
        self
    }

    pub fn with_cycles(mut self, cycles: u32) -> Self {
        self.cycles = cycles;
        self
    }

    pub fn with_wavelength(mut self, wavelength: impl Into<String>) -> Self {
        self.wavelength = wavelength.into();
        self
    }

    pub fn with_total_length(mut self, total_length: usize) -> Self {
        self.total_length = Some(total_length);
        self
    }

    pub fn with_dsize(mut self, dsize: u32) -> Self {
        self.dsize = dsize;
        self
    }

    pub fn with_wave(mut self, wave: impl Into<String>) -> Self {
        self.wave = wave.into();
        self
    }

    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = phase.into();
        self
    }

    pub fn with_scale(mut self, scale: impl Into<String>) -> Self {
        self.scale = scale.into();
        self
    }

    pub fn with_crop(mut self, crop: impl Into<String>) -> Self {
        self.crop = crop.into();
        self
    }

    pub fn with_spos(mut self, spos: impl Into<String>) -> Self {
        self.spos = spos.into();
        self
    }

    pub fn with_voltage(mut self, voltage: f64) -> Self {
        self.voltage = voltage;
        self
    }

    pub fn with_offset(mut self, offset: impl Into<String>) -> Self {
        self.offset = offset.into();
        self
    }
}
