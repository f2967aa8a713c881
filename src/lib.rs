//! Multi-channel waveform generator producing interleaved fixed-point buffers.
//!
//! ```no_run
//! use wavegen::{BufferWriter, SaveId, WaveConfig, WaveGen};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = WaveConfig::new()
//!     .with_nchan(8)
//!     .with_dsize(2)
//!     .with_voltage(10.0)
//!     .with_offset("+-7:7,2")
//!     .with_scale("0.05")
//!     .with_total_length(300000)
//!     .with_spos("+0,40000")
//!     .with_wavelength("10000");
//!
//! let mut engine = WaveGen::new(&config)?;
//! let buffer = engine.generate();
//! BufferWriter::default().save(&buffer, &SaveId::from_flag("1"))?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod gen;
pub mod output;
pub mod sequence;
pub mod utils;

pub use config::{ChannelMap, SampleWidth, WaveConfig};
pub use engine::{ChannelPlan, OutputBuffer, Samples, WaveGen};
pub use error::ConfigError;
pub use gen::waveform::Waveform;
pub use output::{BufferWriter, SaveId};
pub use sequence::{normalize, Attribute, CyclerBank, SequenceCycler, SequenceSpec};
