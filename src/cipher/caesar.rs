use crate::error::{CybertoolsError, Result};

/// Smallest accepted Caesar shift
pub const MIN_SHIFT: i32 = 1;
/// Largest accepted Caesar shift
pub const MAX_SHIFT: i32 = 25;

/// Encrypt text by rotating every ASCII letter forward by `shift`
pub fn encrypt(text: &str, shift: i32) -> Result<String> {
    let shift = validate_shift(shift)?;
    Ok(shift_letters(text, shift))
}

/// Decrypt text by rotating every ASCII letter back by `shift`
pub fn decrypt(text: &str, shift: i32) -> Result<String> {
    let shift = validate_shift(shift)?;
    Ok(shift_letters(text, 26 - shift))
}

/// Rotate ASCII letters forward by `shift` positions (any value, reduced mod 26).
/// Case is preserved and every other character passes through unchanged.
pub fn shift_letters(text: &str, shift: u8) -> String {
    let shift = shift % 26;
    text.chars().map(|c| rotate_char(c, shift)).collect()
}

/// Rotate a single character within its case's alphabet
pub(crate) fn rotate_char(c: char, shift: u8) -> char {
    let base = match c {
        'a'..='z' => b'a',
        'A'..='Z' => b'A',
        _ => return c,
    };
    let offset = (c as u8 - base + shift % 26) % 26;
    (base + offset) as char
}

fn validate_shift(shift: i32) -> Result<u8> {
    if !(MIN_SHIFT..=MAX_SHIFT).contains(&shift) {
        return Err(CybertoolsError::out_of_range(
            "Caesar shift",
            shift,
            MIN_SHIFT,
            MAX_SHIFT,
        ));
    }
    Ok(shift as u8)
}
