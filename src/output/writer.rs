//! Raw `.dat` artifact writer.
//!
//! The artifact is the interleaved buffer as little-endian signed integers
//! of the chosen width, with no header. It is named
//! `{nchan}CH.{bytes}B.{total_length}.{cycles}CYCL.{id}.dat`, where everything
//! before the id comes from [`OutputBuffer::file_stem`].

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::info;

use crate::engine::OutputBuffer;

/// Id placed in the artifact name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveId {
    /// Current unix time in seconds
    Timestamp,
    Named(String),
}

impl SaveId {
    /// `"1"` enables timestamp naming; anything else is used verbatim
    pub fn from_flag(flag: &str) -> Self {
        if flag == "1" {
            SaveId::Timestamp
        } else {
            SaveId::Named(flag.to_string())
        }
    }

    pub fn resolve(&self) -> String {
        match self {
            SaveId::Timestamp => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
                .to_string(),
            SaveId::Named(id) => id.clone(),
        }
    }
}

/// Writes buffers into a target directory
#[derive(Debug, Clone)]
pub struct BufferWriter {
    dir: PathBuf,
}

impl Default for BufferWriter {
    fn default() -> Self {
        Self::new(".")
    }
}

impl BufferWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(buffer: &OutputBuffer, id: &str) -> String {
        format!("{}.{}.dat", buffer.file_stem(), id)
    }

    /// Write `buffer` and return the path of the artifact.
    ///
    /// A failed write may leave a partial file behind.
    pub fn save(&self, buffer: &OutputBuffer, id: &SaveId) -> Result<PathBuf> {
        let path = self
            .dir
            .join(Self::file_name(buffer, &id.resolve()));

        fs::write(&path, buffer.to_le_bytes())
            .with_context(|| format!("Failed to write wave data to {}", path.display()))?;

        info!("wave data saved to {}", path.display());
        Ok(path)
    }
}
