use crate::error::{CybertoolsError, Result};

/// Bitcoin Base58 alphabet (no `0`, `O`, `I`, `l`)
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const BASE: u32 = 58;

/// Encode bytes as Base58.
///
/// The input is read as one big-endian unsigned integer and repeatedly
/// divided by 58. Each leading zero byte becomes a leading `'1'`.
pub fn encode(data: &[u8]) -> String {
    let zeros = data.iter().take_while(|&&b| b == 0).count();

    // Remainders come out least significant first
    let mut digits: Vec<u8> = Vec::with_capacity(data.len() * 138 / 100 + 1);
    let mut number: Vec<u8> = data[zeros..].to_vec();

    while !number.is_empty() {
        let mut remainder = 0u32;
        let mut quotient = Vec::with_capacity(number.len());
        for &byte in &number {
            let acc = (remainder << 8) | byte as u32;
            let q = acc / BASE;
            remainder = acc % BASE;
            if !quotient.is_empty() || q != 0 {
                quotient.push(q as u8);
            }
        }
        digits.push(remainder as u8);
        number = quotient;
    }

    let mut out = String::with_capacity(zeros + digits.len());
    out.extend(std::iter::repeat('1').take(zeros));
    out.extend(digits.iter().rev().map(|&d| ALPHABET[d as usize] as char));
    out
}

/// Decode Base58 text back into bytes
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let ones = text.chars().take_while(|&c| c == '1').count();

    // Big-endian accumulator for the non-zero part
    let mut bytes: Vec<u8> = Vec::with_capacity(text.len() * 733 / 1000 + 1);

    for (position, c) in text.chars().enumerate().skip(ones) {
        let value = symbol_value(c).ok_or(CybertoolsError::InvalidCharacter {
            codec: "Base58",
            character: c,
            position,
        })?;

        let mut carry = value as u32;
        for byte in bytes.iter_mut().rev() {
            carry += (*byte as u32) * BASE;
            *byte = (carry & 0xFF) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.insert(0, (carry & 0xFF) as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; ones];
    out.extend_from_slice(&bytes);
    Ok(out)
}

fn symbol_value(c: char) -> Option<u8> {
    if !c.is_ascii() {
        return None;
    }
    ALPHABET
        .iter()
        .position(|&symbol| symbol == c as u8)
        .map(|index| index as u8)
}
