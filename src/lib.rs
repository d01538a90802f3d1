//! Cybertools - classical ciphers, text encodings and integrity primitives
//!
//! A small toolkit for teaching and experimenting with the building blocks of
//! cryptography. The classical ciphers offer no security; they are here to be
//! studied and broken (see the companion `codebreaker` binary).
//!
//! ## Modules
//!
//! - **cipher**: Caesar, ROT13, Vigenère and the one-time pad
//! - **encoding**: Base32, Base58, UUencode, binary and hex
//! - **checksum**: CRC32 and Adler-32, one-shot or streaming
//! - **hashing**: real digests, MACs and PBKDF2
//! - **exchange**: modular exponentiation and toy Diffie–Hellman
//!
//! ## Example
//!
//! ```
//! use cybertools::cipher::{caesar, vigenere};
//! use cybertools::encoding::Codec;
//!
//! assert_eq!(caesar::encrypt("Hello", 3).unwrap(), "Khoor");
//! assert_eq!(vigenere::encrypt("ATTACKATDAWN", "LEMON").unwrap(), "LXFOPVEFRNHR");
//! assert_eq!(Codec::Base58.encode(b"Hello World!"), "2NEpo7TZRRrLZSi2U");
//! ```

pub mod checksum;
pub mod cipher;
pub mod cli;
pub mod encoding;
pub mod error;
pub mod exchange;
pub mod hashing;

pub use error::{CybertoolsError, Result};
