//! Per-attribute parameter sequences that advance once per synthesized channel

pub mod cycler;
pub mod spec;

pub use self::cycler::*;
pub use self::spec::*;
