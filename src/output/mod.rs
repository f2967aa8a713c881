//! Serialization of finished buffers

pub mod writer;

#[cfg(feature = "bounce")]
pub mod bounce;

pub use writer::{BufferWriter, SaveId};

#[cfg(feature = "bounce")]
pub use bounce::bounce_wav;
