//! Configuration errors raised while resolving a [`WaveConfig`](crate::config::WaveConfig).
//!
//! Every variant aborts construction of the engine, so no buffer is ever
//! produced from a configuration that failed to resolve.

use std::fmt;

/// Errors that can occur when resolving a synthesis configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Output element width is not one of 2, 16, 4 or 32
    InvalidSampleWidth(u32),
    /// Waveform selector names a function that does not exist
    UnknownWaveform(String),
    /// Selector entry is not of the form `FUNC:channels`
    MalformedSelector(String),
    /// Channel list token is neither a keyword, a number nor an `a-b` range
    MalformedChannels(String),
    /// Sequence token could not be interpreted
    MalformedSequence { attribute: String, reason: String },
    /// Sequence has no tokens at all
    EmptySequence(String),
    /// Channel count must be at least one
    InvalidChannelCount(usize),
    /// Cycle count must be at least one
    InvalidCycles(u32),
    /// Reference voltage of zero makes offsets undefined
    ZeroVoltage,
    /// `nchan * total_length` samples do not fit in memory
    BufferTooLarge { nchan: usize, total_length: usize },
}

impl ConfigError {
    pub(crate) fn sequence(attribute: &str, reason: impl Into<String>) -> Self {
        ConfigError::MalformedSequence {
            attribute: attribute.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSampleWidth(width) => {
                write!(f, "dsize is invalid '{}' (expected 2, 16, 4 or 32)", width)
            }
            ConfigError::UnknownWaveform(name) => {
                write!(
                    f,
                    "unknown waveform '{}'. Try: SINE, RAMP, SQUARE, NULL",
                    name
                )
            }
            ConfigError::MalformedSelector(entry) => {
                write!(f, "wave selector '{}' expects FUNC:channels", entry)
            }
            ConfigError::MalformedChannels(token) => {
                write!(f, "channel token '{}' is not ALL, ODD, EVEN, n or a-b", token)
            }
            ConfigError::MalformedSequence { attribute, reason } => {
                write!(f, "{} sequence is malformed: {}", attribute, reason)
            }
            ConfigError::EmptySequence(attribute) => {
                write!(f, "{} sequence has no values", attribute)
            }
            ConfigError::InvalidChannelCount(nchan) => {
                write!(f, "channel count must be at least 1, got {}", nchan)
            }
            ConfigError::InvalidCycles(cycles) => {
                write!(f, "cycle count must be at least 1, got {}", cycles)
            }
            ConfigError::ZeroVoltage => write!(f, "reference voltage must be non-zero"),
            ConfigError::BufferTooLarge {
                nchan,
                total_length,
            } => write!(
                f,
                "{} channels of {} samples do not fit in one buffer",
                nchan, total_length
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
