use crate::error::{CybertoolsError, Result};

/// RFC 4648 Base32 alphabet
pub const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

const PAD: char = '=';

/// Encode bytes as Base32, padded with `=` to a multiple of 8 characters
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len().div_ceil(5) * 8);
    let mut buffer: u32 = 0;
    let mut bits = 0u32;

    for &byte in data {
        buffer = (buffer << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((buffer >> bits) & 0x1F) as usize] as char);
        }
        buffer &= (1 << bits) - 1;
    }

    // Zero-fill the final partial group
    if bits > 0 {
        out.push(ALPHABET[((buffer << (5 - bits)) & 0x1F) as usize] as char);
    }

    while out.len() % 8 != 0 {
        out.push(PAD);
    }

    out
}

/// Decode Base32 text. Trailing `=` padding is ignored, lowercase symbols are
/// accepted, and leftover bits that do not fill a byte are dropped.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let symbols = text.trim_end_matches(PAD);
    let mut out = Vec::with_capacity(symbols.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits = 0u32;

    for (position, c) in symbols.chars().enumerate() {
        let value = symbol_value(c).ok_or(CybertoolsError::InvalidCharacter {
            codec: "Base32",
            character: c,
            position,
        })?;

        buffer = (buffer << 5) | value as u32;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }

    Ok(out)
}

fn symbol_value(c: char) -> Option<u8> {
    match c.to_ascii_uppercase() {
        upper @ 'A'..='Z' => Some(upper as u8 - b'A'),
        digit @ '2'..='7' => Some(digit as u8 - b'2' + 26),
        _ => None,
    }
}
