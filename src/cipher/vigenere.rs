use super::caesar::rotate_char;
use crate::error::{CybertoolsError, Result};

/// Encrypt with a repeating alphabetic key.
/// Only letters consume a key character; everything else is copied through.
pub fn encrypt(text: &str, key: &str) -> Result<String> {
    let shifts = key_shifts(key)?;
    Ok(apply(text, &shifts, |shift| shift))
}

/// Decrypt text produced by [`encrypt`] with the same key
pub fn decrypt(text: &str, key: &str) -> Result<String> {
    let shifts = key_shifts(key)?;
    Ok(apply(text, &shifts, |shift| (26 - shift) % 26))
}

fn apply(text: &str, shifts: &[u8], direction: impl Fn(u8) -> u8) -> String {
    let mut key_index = 0;
    text.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                let shift = direction(shifts[key_index % shifts.len()]);
                key_index += 1;
                rotate_char(c, shift)
            } else {
                c
            }
        })
        .collect()
}

/// Convert a key into per-letter shifts (A/a = 0 ... Z/z = 25)
pub fn key_shifts(key: &str) -> Result<Vec<u8>> {
    if key.is_empty() {
        return Err(CybertoolsError::InvalidLength(
            "Vigenère key must not be empty".into(),
        ));
    }

    key.chars()
        .enumerate()
        .map(|(position, c)| {
            if c.is_ascii_alphabetic() {
                Ok(c.to_ascii_uppercase() as u8 - b'A')
            } else {
                Err(CybertoolsError::InvalidCharacter {
                    codec: "Vigenère key",
                    character: c,
                    position,
                })
            }
        })
        .collect()
}
