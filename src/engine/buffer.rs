//! Interleaved fixed-point output buffer.
//!
//! Layout is sample-major: `s0_ch0, s0_ch1, .., s0_chN, s1_ch0, ..`. The
//! track of channel `c` is every `nchan`-th element starting at `c`.

use std::fmt::Debug;

use num_traits::{PrimInt, WrappingAdd};

use crate::config::SampleWidth;

/// Signed integer sample type the buffer can hold
pub trait FixedSample: PrimInt + WrappingAdd + Debug + 'static {
    /// Narrow with two's complement wraparound
    fn from_wrapped(value: i64) -> Self;

    fn extend_le_bytes(self, out: &mut Vec<u8>);

    /// Truncate towards zero, then wrap into range
    fn quantize(value: f64) -> Self {
        Self::from_wrapped(value as i64)
    }
}

impl FixedSample for i16 {
    fn from_wrapped(value: i64) -> Self {
        value as i16
    }

    fn extend_le_bytes(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl FixedSample for i32 {
    fn from_wrapped(value: i64) -> Self {
        value as i32
    }

    fn extend_le_bytes(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Samples {
    I16(Vec<i16>),
    I32(Vec<i32>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBuffer {
    nchan: usize,
    total_length: usize,
    cycles: u32,
    samples: Samples,
}

impl OutputBuffer {
    /// All-zero buffer of `nchan * total_length` samples
    pub fn zeroed(width: SampleWidth, nchan: usize, total_length: usize, cycles: u32) -> Self {
        let len = nchan * total_length;
        let samples = match width {
            SampleWidth::I16 => Samples::I16(vec![0; len]),
            SampleWidth::I32 => Samples::I32(vec![0; len]),
        };
        Self {
            nchan,
            total_length,
            cycles,
            samples,
        }
    }

    pub fn nchan(&self) -> usize {
        self.nchan
    }

    /// Samples per channel
    pub fn total_length(&self) -> usize {
        self.total_length
    }

    /// Cycle count the buffer was synthesized with
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Artifact name without id and extension: `{nchan}CH.{bytes}B.{length}.{cycles}CYCL`
    pub fn file_stem(&self) -> String {
        format!(
            "{}CH.{}B.{}.{}CYCL",
            self.nchan,
            self.width().bytes(),
            self.total_length,
            self.cycles
        )
    }

    pub fn width(&self) -> SampleWidth {
        match self.samples {
            Samples::I16(_) => SampleWidth::I16,
            Samples::I32(_) => SampleWidth::I32,
        }
    }

    /// Total number of samples across all channels
    pub fn len(&self) -> usize {
        match &self.samples {
            Samples::I16(data) => data.len(),
            Samples::I32(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut Samples {
        &mut self.samples
    }

    /// Sample at interleaved position `index`, widened
    pub fn get(&self, index: usize) -> Option<i64> {
        match &self.samples {
            Samples::I16(data) => data.get(index).map(|s| *s as i64),
            Samples::I32(data) => data.get(index).map(|s| *s as i64),
        }
    }

    /// One channel's track (0-based channel index), widened
    pub fn channel(&self, chan: usize) -> Vec<i64> {
        if chan >= self.nchan {
            return Vec::new();
        }
        match &self.samples {
            Samples::I16(data) => track(data, chan, self.nchan).map(|s| s as i64).collect(),
            Samples::I32(data) => track(data, chan, self.nchan).map(|s| s as i64).collect(),
        }
    }

    /// One channel's track converted back to volts against `voltage` full scale
    pub fn channel_volts(&self, chan: usize, voltage: f64) -> Vec<f64> {
        let full_scale = self.width().max_value() as f64;
        self.channel(chan)
            .into_iter()
            .map(|s| s as f64 / full_scale * voltage)
            .collect()
    }

    /// Raw little-endian bytes in interleaved order
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len() * self.width().bytes());
        match &self.samples {
            Samples::I16(data) => data.iter().for_each(|s| s.extend_le_bytes(&mut out)),
            Samples::I32(data) => data.iter().for_each(|s| s.extend_le_bytes(&mut out)),
        }
        out
    }
}

fn track<T: FixedSample>(data: &[T], chan: usize, nchan: usize) -> impl Iterator<Item = T> + '_ {
    data.iter().skip(chan).step_by(nchan).copied()
}
