use super::caesar::shift_letters;

/// ROT13: Caesar with shift 13, its own inverse
pub fn rot13(text: &str) -> String {
    shift_letters(text, 13)
}
