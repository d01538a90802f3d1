use crate::error::{CybertoolsError, Result};
use hex::FromHexError;

/// Lowercase hex, two digits per byte
pub fn encode(data: &[u8]) -> String {
    hex::encode(data)
}

/// Uppercase hex, two digits per byte
pub fn encode_upper(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// Parse hex digits into bytes. Whitespace between digits is ignored; an
/// invalid digit is reported at its character position in `text`.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    if let Some((position, character)) = text
        .chars()
        .enumerate()
        .find(|(_, c)| !c.is_whitespace() && !c.is_ascii_hexdigit())
    {
        return Err(CybertoolsError::InvalidCharacter {
            codec: "hex",
            character,
            position,
        });
    }

    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&digits).map_err(|err| match err {
        FromHexError::OddLength => CybertoolsError::InvalidLength(format!(
            "hex input has an odd number of digits ({})",
            digits.len()
        )),
        other => CybertoolsError::InvalidInput(other.to_string()),
    })
}
