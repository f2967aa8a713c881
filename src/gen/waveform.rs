use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Waveform functions that can be assigned to a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Ramp,
    Square,
    Null,
}

impl Waveform {
    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "SINE",
            Waveform::Ramp => "RAMP",
            Waveform::Square => "SQUARE",
            Waveform::Null => "NULL",
        }
    }

    /// Render `length` normalized samples spanning `cycles` periods.
    ///
    /// `phase` is in radians. Sine and square lie in [-1, 1]; ramp lies in
    /// [0, 1) and is not recentred. Null ignores `length` and always returns
    /// `base_length` zeros.
    pub fn render(&self, length: usize, phase: f64, cycles: u32, base_length: usize) -> Vec<f64> {
        self.render_prefix(length, usize::MAX, phase, cycles, base_length)
    }

    /// Like [`render`](Self::render), but only the first `limit` samples.
    /// The spacing of the points still follows the full `length`.
    pub fn render_prefix(
        &self,
        length: usize,
        limit: usize,
        phase: f64,
        cycles: u32,
        base_length: usize,
    ) -> Vec<f64> {
        match self {
            Waveform::Sine => sine(length, phase, cycles).take(limit).collect(),
            Waveform::Ramp => linspace(0.0, cycles as f64, length)
                .map(|x| (x + phase).rem_euclid(1.0))
                .take(limit)
                .collect(),
            Waveform::Square => sine(length, phase, cycles).map(sign).take(limit).collect(),
            Waveform::Null => vec![0.0; base_length.min(limit)],
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SINE" => Ok(Waveform::Sine),
            "RAMP" => Ok(Waveform::Ramp),
            "SQUARE" => Ok(Waveform::Square),
            "NULL" => Ok(Waveform::Null),
            _ => Err(ConfigError::UnknownWaveform(s.to_string())),
        }
    }
}

fn sine(length: usize, phase: f64, cycles: u32) -> impl Iterator<Item = f64> {
    let span = cycles as f64 * 2.0 * PI;
    linspace(-phase, -phase + span, length).map(f64::sin)
}

// -1, 0 or 1; f64::signum maps zero to 1
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// `n` evenly spaced points from `start` to `stop`, both ends included
fn linspace(start: f64, stop: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = if n > 1 {
        (stop - start) / (n - 1) as f64
    } else {
        0.0
    };
    (0..n).map(move |i| {
        if n > 1 && i == n - 1 {
            stop
        } else {
            start + i as f64 * step
        }
    })
}
