use super::input::Input;
use crate::encoding::{uuencode, Codec, UuencodeOptions};
use crate::error::Result;
use tracing::debug;

/// Options for the encode command
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
    pub codec: Codec,
    /// Only used by UUencode
    pub uuencode: UuencodeOptions,
}

/// Options for the decode command
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    pub codec: Codec,
}

/// Encode the input bytes into text
pub fn encode_input(input: &Input, options: &EncodeOptions) -> Result<String> {
    let data = input.read_bytes()?;
    debug!(codec = %options.codec, bytes = data.len(), "encoding input");

    Ok(match options.codec {
        Codec::Uuencode => uuencode::encode_with(&data, &options.uuencode),
        codec => codec.encode(&data),
    })
}

/// Decode text input back into raw bytes
pub fn decode_input(input: &Input, options: &DecodeOptions) -> Result<Vec<u8>> {
    let text = input.read_text()?;
    debug!(codec = %options.codec, chars = text.len(), "decoding input");

    match options.codec {
        // Line structure matters for UUencode
        Codec::Uuencode => options.codec.decode(&text),
        codec => codec.decode(text.trim()),
    }
}
