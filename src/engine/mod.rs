use std::ops::Range;

use log::{debug, info};

pub mod buffer;
pub mod plan;

pub use buffer::{FixedSample, OutputBuffer, Samples};
pub use plan::{ChannelPlan, PlanContext};

use crate::config::{ChannelMap, SampleWidth, WaveConfig};
use crate::error::ConfigError;
use crate::sequence::{Attribute, CyclerBank, SequenceSpec};

/// Multi-channel waveform synthesis engine
///
/// Every sequence-driven attribute advances once per assigned channel, in
/// ascending channel order. Cycler state survives across [`generate`]
/// calls, so a second run on the same engine continues the sequences where
/// the first one stopped. Call [`reset`] to start over.
///
/// [`generate`]: WaveGen::generate
/// [`reset`]: WaveGen::reset
pub struct WaveGen {
    nchan: usize,
    cycles: u32,
    base_wavelength: i64,
    total_length: usize,
    width: SampleWidth,
    voltage: f64,
    channels: ChannelMap,
    cyclers: CyclerBank,
}

impl WaveGen {
    /// Resolve and validate a configuration. All configuration errors are
    /// raised here, so a constructed engine always produces a full buffer.
    pub fn new(config: &WaveConfig) -> Result<Self, ConfigError> {
        if config.nchan < 1 {
            return Err(ConfigError::InvalidChannelCount(config.nchan));
        }
        if config.cycles < 1 {
            return Err(ConfigError::InvalidCycles(config.cycles));
        }
        if config.voltage == 0.0 {
            return Err(ConfigError::ZeroVoltage);
        }

        let width = SampleWidth::from_dsize(config.dsize)?;
        let channels = ChannelMap::parse(&config.wave, config.nchan)?;

        let wavelength = SequenceSpec::parse(Attribute::Wavelength.key(), &config.wavelength)?;
        let base_wavelength = (wavelength.head_value() as i64).saturating_mul(config.cycles as i64);
        let total_length = config
            .total_length
            .unwrap_or_else(|| base_wavelength.max(0) as usize);

        let fits = config
            .nchan
            .checked_mul(total_length)
            .and_then(|samples| samples.checked_mul(width.bytes()))
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if !fits {
            return Err(ConfigError::BufferTooLarge {
                nchan: config.nchan,
                total_length,
            });
        }

        let mut cyclers = CyclerBank::new();
        cyclers.insert(Attribute::Wavelength, wavelength);
        for (attribute, source) in [
            (Attribute::Scale, &config.scale),
            (Attribute::Phase, &config.phase),
            (Attribute::Crop, &config.crop),
            (Attribute::StartPosition, &config.spos),
            (Attribute::Offset, &config.offset),
        ] {
            cyclers.insert(attribute, SequenceSpec::parse(attribute.key(), source)?);
        }

        Ok(Self {
            nchan: config.nchan,
            cycles: config.cycles,
            base_wavelength,
            total_length,
            width,
            voltage: config.voltage,
            channels,
            cyclers,
        })
    }

    /// Synthesize every assigned channel into a fresh interleaved buffer
    pub fn generate(&mut self) -> OutputBuffer {
        info!(
            "Generating {} Chans @ {}Bytes * {} Samples",
            self.nchan,
            self.width.bytes(),
            self.total_length
        );

        let mut buffer =
            OutputBuffer::zeroed(self.width, self.nchan, self.total_length, self.cycles);
        let ctx = self.plan_context();

        for chan in 0..self.nchan {
            let Some(waveform) = self.channels.get(chan + 1) else {
                debug!("CH {} has no waveform, left silent", chan + 1);
                continue;
            };

            let plan = ChannelPlan::resolve(chan + 1, waveform, &mut self.cyclers, &ctx);
            info!(
                "CH {} {} offset[{}] phase[{:.4}] spos[{}] scale[{}] wavelength[{}] crop[{}]",
                plan.channel,
                plan.waveform,
                plan.offset,
                plan.phase,
                plan.spos,
                plan.scale,
                plan.wavelength,
                plan.crop
            );

            let window = plan.window(self.total_length);
            let wave = plan.waveform.render_prefix(
                plan.render_length(),
                window.len(),
                plan.phase,
                self.cycles,
                self.base_wavelength.max(0) as usize,
            );

            match buffer.samples_mut() {
                Samples::I16(data) => {
                    write_track(data, self.nchan, chan, window, &plan, &wave, &ctx)
                }
                Samples::I32(data) => {
                    write_track(data, self.nchan, chan, window, &plan, &wave, &ctx)
                }
            }
        }

        buffer
    }

    /// Clear all cycler state so the next run starts every sequence afresh
    pub fn reset(&mut self) {
        self.cyclers.reset();
    }

    fn plan_context(&self) -> PlanContext {
        PlanContext {
            cycles: self.cycles,
            voltage: self.voltage,
            full_scale: self.width.max_value(),
        }
    }

    pub fn nchan(&self) -> usize {
        self.nchan
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// First wavelength value multiplied by the cycle count
    pub fn base_wavelength(&self) -> i64 {
        self.base_wavelength
    }

    pub fn total_length(&self) -> usize {
        self.total_length
    }

    pub fn width(&self) -> SampleWidth {
        self.width
    }

    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    pub fn channels(&self) -> &ChannelMap {
        &self.channels
    }
}

/// Write one channel's placement window, then shift its whole track by the offset
fn write_track<T: FixedSample>(
    data: &mut [T],
    nchan: usize,
    chan: usize,
    window: Range<usize>,
    plan: &ChannelPlan,
    wave: &[f64],
    ctx: &PlanContext,
) {
    let width = window.len().min(wave.len());
    let written = window.start..window.start + width;

    let amplitude = ctx.full_scale as f64 * plan.scale;
    let offset = T::from_wrapped(plan.offset);

    for (index, slot) in data.iter_mut().skip(chan).step_by(nchan).enumerate() {
        if written.contains(&index) {
            *slot = T::quantize(wave[index - written.start] * amplitude);
        }
        *slot = slot.wrapping_add(&offset);
    }
}
