use std::ops::Range;

use crate::gen::waveform::Waveform;
use crate::sequence::{normalize, Attribute, CyclerBank};

/// Run-wide constants needed to turn raw sequence values into channel parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanContext {
    pub cycles: u32,
    pub voltage: f64,
    /// Largest value of the output sample type
    pub full_scale: i64,
}

/// Resolved parameters for one channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelPlan {
    /// 1-based channel number
    pub channel: usize,
    pub waveform: Waveform,
    /// Amplitude multiplier after normalization
    pub scale: f64,
    /// Samples, already multiplied by the cycle count
    pub wavelength: i64,
    /// Radians
    pub phase: f64,
    pub crop: i64,
    pub spos: i64,
    /// Fixed-point offset added to the whole track
    pub offset: i64,
}

impl ChannelPlan {
    /// Pull one value from every attribute's cycler and convert units
    pub fn resolve(
        channel: usize,
        waveform: Waveform,
        cyclers: &mut CyclerBank,
        ctx: &PlanContext,
    ) -> Self {
        let scale = normalize(cyclers.next(Attribute::Scale));
        let wavelength = (cyclers.next(Attribute::Wavelength) as i64).saturating_mul(ctx.cycles as i64);
        let phase = cyclers.next(Attribute::Phase).to_radians();
        let crop = cyclers.next(Attribute::Crop) as i64;
        let spos = cyclers.next(Attribute::StartPosition) as i64;
        let volts = cyclers.next(Attribute::Offset);
        let offset = (volts / ctx.voltage * ctx.full_scale as f64) as i64;

        Self {
            channel,
            waveform,
            scale,
            wavelength,
            phase,
            crop,
            spos,
            offset,
        }
    }

    /// Samples of the track that receive synthesized content
    ///
    /// Starts at `spos` (negative positions clamp to 0) and spans
    /// `wavelength - crop` samples, cut off at `total_length`. A crop at or
    /// beyond the wavelength gives an empty window. Any `i64` inputs are
    /// accepted.
    pub fn window(&self, total_length: usize) -> Range<usize> {
        let total = total_length as i128;
        let d0 = (self.spos as i128).clamp(0, total);
        let d1 = (d0 + self.wavelength as i128 - self.crop as i128).clamp(d0, total);
        d0 as usize..d1 as usize
    }

    /// Number of samples to render for this channel
    pub fn render_length(&self) -> usize {
        self.wavelength.max(0) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::SequenceSpec;

    fn plan(wavelength: i64, crop: i64, spos: i64) -> ChannelPlan {
        ChannelPlan {
            channel: 1,
            waveform: Waveform::Sine,
            scale: 1.0,
            wavelength,
            phase: 0.0,
            crop,
            spos,
            offset: 0,
        }
    }

    #[test]
    fn test_window_placement() {
        assert_eq!(plan(4, 0, 0).window(4), 0..4);
        assert_eq!(plan(4, 1, 2).window(4), 2..4);
        assert_eq!(plan(10, 0, 0).window(4), 0..4);
        assert_eq!(plan(4, 3, 0).window(10), 0..1);
    }

    #[test]
    fn test_degenerate_windows_are_empty() {
        assert!(plan(4, 0, 4).window(4).is_empty());
        assert!(plan(4, 0, 100).window(4).is_empty());
        assert!(plan(4, 4, 0).window(4).is_empty());
        assert!(plan(4, 9, 1).window(10).is_empty());
        assert_eq!(plan(4, 0, -3).window(10), 0..4);
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        assert_eq!(plan(8, i64::MIN, 0).window(8), 0..8);
        assert_eq!(plan(i64::MAX, 0, 3).window(8), 3..8);
        assert!(plan(i64::MIN, i64::MAX, 0).window(8).is_empty());
        assert!(plan(i64::MAX, 0, i64::MAX).window(8).is_empty());
        assert_eq!(plan(i64::MAX, i64::MIN, i64::MIN).window(8), 0..8);
    }

    #[test]
    fn test_resolve_saturates_wavelength() {
        let mut cyclers = CyclerBank::new();
        cyclers.insert(Attribute::Wavelength, SequenceSpec::parse("wave", "1e19").unwrap());
        let ctx = PlanContext {
            cycles: 4,
            voltage: 10.0,
            full_scale: i16::MAX as i64,
        };
        let plan = ChannelPlan::resolve(1, Waveform::Sine, &mut cyclers, &ctx);
        assert_eq!(plan.wavelength, i64::MAX);
    }

    #[test]
    fn test_resolve_converts_units() {
        let mut cyclers = CyclerBank::new();
        cyclers.insert(Attribute::Scale, SequenceSpec::parse("scale", "1.5").unwrap());
        cyclers.insert(Attribute::Wavelength, SequenceSpec::parse("wave", "100").unwrap());
        cyclers.insert(Attribute::Phase, SequenceSpec::parse("phase", "180").unwrap());
        cyclers.insert(Attribute::Crop, SequenceSpec::parse("crop", "2.7").unwrap());
        cyclers.insert(Attribute::StartPosition, SequenceSpec::parse("spos", "5").unwrap());
        cyclers.insert(Attribute::Offset, SequenceSpec::parse("offset", "5").unwrap());

        let ctx = PlanContext {
            cycles: 3,
            voltage: 10.0,
            full_scale: i16::MAX as i64,
        };
        let plan = ChannelPlan::resolve(2, Waveform::Ramp, &mut cyclers, &ctx);

        assert_eq!(plan.channel, 2);
        assert_eq!(plan.scale, 0.5);
        assert_eq!(plan.wavelength, 300);
        assert!((plan.phase - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(plan.crop, 2);
        assert_eq!(plan.spos, 5);
        assert_eq!(plan.offset, 16383);
    }
}
