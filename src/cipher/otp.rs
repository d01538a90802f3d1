use crate::error::{CybertoolsError, Result};
use rand::rngs::OsRng;
use rand::RngCore;

/// XOR each byte of `data` with the byte at the same position in `key`.
///
/// The key must be exactly as long as the data. Applying the function twice
/// with the same key returns the original input.
pub fn xor(data: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    if data.len() != key.len() {
        return Err(CybertoolsError::InvalidLength(format!(
            "key length mismatch: data is {} bytes, key is {} bytes",
            data.len(),
            key.len()
        )));
    }

    Ok(data.iter().zip(key).map(|(d, k)| d ^ k).collect())
}

/// Draw a fresh pad of `length` bytes from the OS CSPRNG
pub fn generate_key(length: usize) -> Vec<u8> {
    let mut key = vec![0u8; length];
    OsRng.fill_bytes(&mut key);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xor_known_vector() {
        let out = xor(b"HELLO", b"XMCKL").unwrap();
        assert_eq!(out, vec![0x10, 0x08, 0x0F, 0x07, 0x03]);
    }

    #[test]
    fn test_xor_is_self_inverse() {
        let data = b"attack at dawn";
        let key = generate_key(data.len());
        let encrypted = xor(data, &key).unwrap();
        assert_eq!(xor(&encrypted, &key).unwrap(), data);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            xor(b"short", b"longer key"),
            Err(CybertoolsError::InvalidLength(msg)) if msg.contains("key length mismatch")
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(xor(b"", b"").unwrap().is_empty());
    }

    #[test]
    fn test_generated_key_length() {
        assert_eq!(generate_key(0).len(), 0);
        assert_eq!(generate_key(64).len(), 64);
        // Two 32-byte draws colliding would mean the RNG is broken
        assert_ne!(generate_key(32), generate_key(32));
    }
}
