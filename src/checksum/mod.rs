//! Non-cryptographic integrity checksums.
//!
//! Neither CRC32 nor Adler-32 resists deliberate tampering; they only catch
//! accidental corruption.

pub mod adler32;
pub mod crc32;

pub use adler32::{adler32, Adler32};
pub use crc32::{crc32, Crc32};

use crate::error::{CybertoolsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Checksum algorithm options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumAlgorithm {
    #[default]
    Crc32,
    Adler32,
}

impl ChecksumAlgorithm {
    pub fn checksum(&self, data: &[u8]) -> u32 {
        match self {
            ChecksumAlgorithm::Crc32 => crc32(data),
            ChecksumAlgorithm::Adler32 => adler32(data),
        }
    }

    /// Start a streaming checksum for this algorithm
    pub fn hasher(&self) -> ChecksumHasher {
        match self {
            ChecksumAlgorithm::Crc32 => ChecksumHasher::Crc32(Crc32::new()),
            ChecksumAlgorithm::Adler32 => ChecksumHasher::Adler32(Adler32::new()),
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecksumAlgorithm::Crc32 => f.write_str("crc32"),
            ChecksumAlgorithm::Adler32 => f.write_str("adler32"),
        }
    }
}

impl std::str::FromStr for ChecksumAlgorithm {
    type Err = CybertoolsError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "crc32" | "crc" => Ok(Self::Crc32),
            "adler32" | "adler" => Ok(Self::Adler32),
            _ => Err(CybertoolsError::UnsupportedAlgorithm(format!(
                "checksum: {}",
                s
            ))),
        }
    }
}

/// Either streaming checksum behind one interface
#[derive(Debug, Clone, Copy)]
pub enum ChecksumHasher {
    Crc32(Crc32),
    Adler32(Adler32),
}

impl ChecksumHasher {
    pub fn update(&mut self, data: &[u8]) {
        match self {
            ChecksumHasher::Crc32(h) => h.update(data),
            ChecksumHasher::Adler32(h) => h.update(data),
        }
    }

    pub fn finalize(self) -> u32 {
        match self {
            ChecksumHasher::Crc32(h) => h.finalize(),
            ChecksumHasher::Adler32(h) => h.finalize(),
        }
    }
}

/// Render a checksum as 8 uppercase hex digits
pub fn format_checksum(value: u32) -> String {
    format!("{:08X}", value)
}
