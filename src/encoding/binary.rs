use crate::error::{CybertoolsError, Result};

/// Render each byte as 8 binary digits, separated by single spaces
pub fn encode(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:08b}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse binary text back into bytes.
///
/// Whitespace separates byte groups. A group of up to 8 digits is one byte
/// (so `1001000` reads as `H`); a longer group must be a multiple of 8 digits
/// and is split into bytes.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    if let Some((position, character)) = text
        .chars()
        .enumerate()
        .find(|(_, c)| !matches!(c, '0' | '1') && !c.is_whitespace())
    {
        return Err(CybertoolsError::InvalidInput(format!(
            "binary text may only contain 0, 1 and whitespace, found {:?} at position {}",
            character, position
        )));
    }

    let mut out = Vec::new();
    for group in text.split_whitespace() {
        let digits = group.as_bytes();
        if digits.len() <= 8 {
            out.push(bits_to_byte(digits));
        } else if digits.len() % 8 == 0 {
            out.extend(digits.chunks(8).map(bits_to_byte));
        } else {
            return Err(CybertoolsError::InvalidLength(format!(
                "binary group of {} digits is not a whole number of bytes",
                digits.len()
            )));
        }
    }

    Ok(out)
}

fn bits_to_byte(digits: &[u8]) -> u8 {
    digits
        .iter()
        .fold(0u8, |acc, &digit| (acc << 1) | (digit - b'0'))
}
