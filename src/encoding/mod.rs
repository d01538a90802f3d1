pub mod base32;
pub mod base58;
pub mod binary;
pub mod hex_ascii;
pub mod uuencode;

pub use uuencode::UuencodeOptions;

use crate::error::{CybertoolsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text encodings selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    #[default]
    Base32,
    Base58,
    Uuencode,
    Binary,
    Hex,
}

impl Codec {
    pub const ALL: [Codec; 5] = [
        Codec::Base32,
        Codec::Base58,
        Codec::Uuencode,
        Codec::Binary,
        Codec::Hex,
    ];

    pub fn encode(&self, data: &[u8]) -> String {
        match self {
            Codec::Base32 => base32::encode(data),
            Codec::Base58 => base58::encode(data),
            Codec::Uuencode => uuencode::encode(data),
            Codec::Binary => binary::encode(data),
            Codec::Hex => hex_ascii::encode(data),
        }
    }

    pub fn decode(&self, text: &str) -> Result<Vec<u8>> {
        match self {
            Codec::Base32 => base32::decode(text),
            Codec::Base58 => base58::decode(text),
            Codec::Uuencode => uuencode::decode(text),
            Codec::Binary => binary::decode(text),
            Codec::Hex => hex_ascii::decode(text),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Codec::Base32 => "base32",
            Codec::Base58 => "base58",
            Codec::Uuencode => "uuencode",
            Codec::Binary => "binary",
            Codec::Hex => "hex",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Codec {
    type Err = CybertoolsError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "base32" | "b32" => Ok(Self::Base32),
            "base58" | "b58" => Ok(Self::Base58),
            "uuencode" | "uu" => Ok(Self::Uuencode),
            "binary" | "bin" => Ok(Self::Binary),
            "hex" => Ok(Self::Hex),
            _ => Err(CybertoolsError::UnsupportedAlgorithm(format!("codec: {}", s))),
        }
    }
}

/// Interpret decoded bytes as UTF-8 text
pub fn bytes_to_text(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|err| {
        CybertoolsError::InvalidInput(format!(
            "decoded bytes are not valid UTF-8 text (first bad byte at {})",
            err.utf8_error().valid_up_to()
        ))
    })
}
