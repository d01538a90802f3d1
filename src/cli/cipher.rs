use super::input::Input;
use crate::cipher::{caesar, otp, rot13, vigenere};
use crate::encoding::{bytes_to_text, hex_ascii};
use crate::error::{CybertoolsError, Result};
use tracing::debug;

/// Options for the Caesar command
#[derive(Debug, Clone)]
pub struct CaesarOptions {
    pub shift: i32,
    pub decrypt: bool,
}

impl Default for CaesarOptions {
    fn default() -> Self {
        Self {
            shift: 3,
            decrypt: false,
        }
    }
}

/// Options for the Vigenère command
#[derive(Debug, Clone, Default)]
pub struct VigenereOptions {
    pub key: String,
    pub decrypt: bool,
}

/// Where the one-time pad comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PadKey {
    /// Key given as text, used byte for byte
    Text(String),
    /// Key given as hex digits
    Hex(String),
    /// Fresh random pad sized to the input (encryption only)
    #[default]
    Random,
}

/// Options for the one-time pad command
#[derive(Debug, Clone, Default)]
pub struct OtpOptions {
    pub key: PadKey,
    /// Input is hex ciphertext; output is the recovered text
    pub decrypt: bool,
}

/// Result of a one-time pad run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpOutcome {
    /// Hex ciphertext when encrypting, plaintext when decrypting
    pub output: String,
    /// Hex of the pad when it was generated for this run
    pub generated_key: Option<String>,
}

pub fn run_caesar(input: &Input, options: &CaesarOptions) -> Result<String> {
    let text = input.read_text()?;
    debug!(shift = options.shift, decrypt = options.decrypt, "caesar");
    if options.decrypt {
        caesar::decrypt(&text, options.shift)
    } else {
        caesar::encrypt(&text, options.shift)
    }
}

pub fn run_vigenere(input: &Input, options: &VigenereOptions) -> Result<String> {
    let text = input.read_text()?;
    debug!(key_len = options.key.len(), decrypt = options.decrypt, "vigenere");
    if options.decrypt {
        vigenere::decrypt(&text, &options.key)
    } else {
        vigenere::encrypt(&text, &options.key)
    }
}

pub fn run_rot13(input: &Input) -> Result<String> {
    Ok(rot13(&input.read_text()?))
}

pub fn run_otp(input: &Input, options: &OtpOptions) -> Result<OtpOutcome> {
    let data = if options.decrypt {
        hex_ascii::decode(input.read_text()?.trim())?
    } else {
        input.read_bytes()?
    };

    let (key, generated_key) = match &options.key {
        PadKey::Text(text) => (text.as_bytes().to_vec(), None),
        PadKey::Hex(digits) => (hex_ascii::decode(digits)?, None),
        PadKey::Random if options.decrypt => {
            return Err(CybertoolsError::InvalidInput(
                "decryption needs the pad that was used to encrypt".into(),
            ))
        }
        PadKey::Random => {
            let key = otp::generate_key(data.len());
            let hex = hex_ascii::encode(&key);
            (key, Some(hex))
        }
    };

    debug!(bytes = data.len(), decrypt = options.decrypt, "one-time pad");
    let transformed = otp::xor(&data, &key)?;

    let output = if options.decrypt {
        bytes_to_text(transformed)?
    } else {
        hex_ascii::encode(&transformed)
    };

    Ok(OtpOutcome {
        output,
        generated_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Input {
        Input::Text(s.into())
    }

    #[test]
    fn test_caesar_both_directions() {
        let enc = run_caesar(&text("Hello"), &CaesarOptions::default()).unwrap();
        assert_eq!(enc, "Khoor");
        let dec = run_caesar(
            &text(&enc),
            &CaesarOptions {
                shift: 3,
                decrypt: true,
            },
        )
        .unwrap();
        assert_eq!(dec, "Hello");
    }

    #[test]
    fn test_caesar_shift_validation_surfaces() {
        let options = CaesarOptions {
            shift: 26,
            decrypt: false,
        };
        assert!(matches!(
            run_caesar(&text("abc"), &options),
            Err(CybertoolsError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_vigenere_roundtrip() {
        let options = VigenereOptions {
            key: "LEMON".into(),
            decrypt: false,
        };
        let enc = run_vigenere(&text("attack at dawn"), &options).unwrap();
        assert_eq!(enc, "lxfopv ef rnhr");
        let dec = run_vigenere(
            &text(&enc),
            &VigenereOptions {
                decrypt: true,
                ..options
            },
        )
        .unwrap();
        assert_eq!(dec, "attack at dawn");
    }

    #[test]
    fn test_rot13() {
        assert_eq!(run_rot13(&text("Uryyb")).unwrap(), "Hello");
    }

    #[test]
    fn test_otp_text_key_roundtrip() {
        let enc = run_otp(
            &text("HELLO"),
            &OtpOptions {
                key: PadKey::Text("XMCKL".into()),
                decrypt: false,
            },
        )
        .unwrap();
        assert_eq!(enc.output, "10080f0703");
        assert!(enc.generated_key.is_none());

        let dec = run_otp(
            &text(&enc.output),
            &OtpOptions {
                key: PadKey::Text("XMCKL".into()),
                decrypt: true,
            },
        )
        .unwrap();
        assert_eq!(dec.output, "HELLO");
    }

    #[test]
    fn test_otp_random_key_roundtrip() {
        let enc = run_otp(&text("meet at noon"), &OtpOptions::default()).unwrap();
        let key = enc.generated_key.expect("random pad should be reported");
        assert_eq!(key.len(), "meet at noon".len() * 2);

        let dec = run_otp(
            &text(&enc.output),
            &OtpOptions {
                key: PadKey::Hex(key),
                decrypt: true,
            },
        )
        .unwrap();
        assert_eq!(dec.output, "meet at noon");
    }

    #[test]
    fn test_otp_errors() {
        let mismatch = run_otp(
            &text("HELLO"),
            &OtpOptions {
                key: PadKey::Text("KEY".into()),
                decrypt: false,
            },
        );
        assert!(matches!(mismatch, Err(CybertoolsError::InvalidLength(_))));

        let random_decrypt = run_otp(
            &text("00"),
            &OtpOptions {
                key: PadKey::Random,
                decrypt: true,
            },
        );
        assert!(matches!(random_decrypt, Err(CybertoolsError::InvalidInput(_))));
    }
}
