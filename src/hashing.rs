//! Real message digests, MACs and password-based key derivation.
//!
//! Every algorithm here is backed by a RustCrypto or BLAKE3 implementation.
//! Algorithms that are not implemented are rejected by name rather than
//! answered with placeholder output.

use crate::error::{CybertoolsError, Result};
use digest::Digest;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use md4::Md4;
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use sha3::{Sha3_256, Sha3_512};
use std::fmt;

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;
type HmacSha3_256 = Hmac<Sha3_256>;

/// Upper bound on PBKDF2 output
pub const MAX_DERIVED_LENGTH: usize = 1024;

/// Digest algorithm options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    #[default]
    Sha256,
    Sha512,
    Sha3_256,
    Sha3_512,
    Blake3,
    /// MD4 over the UTF-16LE encoding of the input text
    Ntlm,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 8] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Sha3_512,
        HashAlgorithm::Blake3,
        HashAlgorithm::Ntlm,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Sha3_256 => "sha3-256",
            HashAlgorithm::Sha3_512 => "sha3-512",
            HashAlgorithm::Blake3 => "blake3",
            HashAlgorithm::Ntlm => "ntlm",
        }
    }

    /// Digest size in bytes
    pub fn output_len(&self) -> usize {
        match self {
            HashAlgorithm::Md5 | HashAlgorithm::Ntlm => 16,
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 | HashAlgorithm::Sha3_256 | HashAlgorithm::Blake3 => 32,
            HashAlgorithm::Sha512 | HashAlgorithm::Sha3_512 => 64,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for HashAlgorithm {
    type Err = CybertoolsError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" | "sha-1" => Ok(Self::Sha1),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "sha512" | "sha-512" => Ok(Self::Sha512),
            "sha3-256" | "sha3" => Ok(Self::Sha3_256),
            "sha3-512" => Ok(Self::Sha3_512),
            "blake3" => Ok(Self::Blake3),
            "ntlm" => Ok(Self::Ntlm),
            _ => Err(CybertoolsError::UnsupportedAlgorithm(format!("hash: {}", s))),
        }
    }
}

/// Hash `data` with the chosen algorithm
pub fn digest(algorithm: HashAlgorithm, data: &[u8]) -> Result<Vec<u8>> {
    let out = match algorithm {
        HashAlgorithm::Md5 => hash_with::<Md5>(data),
        HashAlgorithm::Sha1 => hash_with::<Sha1>(data),
        HashAlgorithm::Sha256 => hash_with::<Sha256>(data),
        HashAlgorithm::Sha512 => hash_with::<Sha512>(data),
        HashAlgorithm::Sha3_256 => hash_with::<Sha3_256>(data),
        HashAlgorithm::Sha3_512 => hash_with::<Sha3_512>(data),
        HashAlgorithm::Blake3 => blake3::hash(data).as_bytes().to_vec(),
        HashAlgorithm::Ntlm => {
            let text = std::str::from_utf8(data).map_err(|_| {
                CybertoolsError::InvalidInput("NTLM hashes UTF-8 text only".into())
            })?;
            let utf16: Vec<u8> = text.encode_utf16().flat_map(u16::to_le_bytes).collect();
            hash_with::<Md4>(&utf16)
        }
    };
    Ok(out)
}

/// Lowercase hex digest
pub fn digest_hex(algorithm: HashAlgorithm, data: &[u8]) -> Result<String> {
    digest(algorithm, data).map(hex::encode)
}

fn hash_with<D: Digest>(data: &[u8]) -> Vec<u8> {
    D::digest(data).to_vec()
}

/// Keyed authentication options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MacAlgorithm {
    #[default]
    HmacSha256,
    HmacSha512,
    HmacSha3_256,
    /// BLAKE3 keyed mode; the 32-byte key is the BLAKE3 hash of the secret
    Blake3Keyed,
}

impl MacAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            MacAlgorithm::HmacSha256 => "hmac-sha256",
            MacAlgorithm::HmacSha512 => "hmac-sha512",
            MacAlgorithm::HmacSha3_256 => "hmac-sha3-256",
            MacAlgorithm::Blake3Keyed => "blake3-keyed",
        }
    }
}

impl fmt::Display for MacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for MacAlgorithm {
    type Err = CybertoolsError;
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.to_lowercase().replace('_', "-");
        match normalized.trim_start_matches("hmac-") {
            "sha256" | "sha-256" => Ok(Self::HmacSha256),
            "sha512" | "sha-512" => Ok(Self::HmacSha512),
            "sha3-256" | "sha3" => Ok(Self::HmacSha3_256),
            "blake3" | "blake3-keyed" => Ok(Self::Blake3Keyed),
            _ => Err(CybertoolsError::UnsupportedAlgorithm(format!("mac: {}", s))),
        }
    }
}

/// Authenticate `data` under `key`
pub fn mac(algorithm: MacAlgorithm, key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    keyed_parts(algorithm, key, &[data])
}

/// Check a tag in constant time
pub fn verify_mac(algorithm: MacAlgorithm, key: &[u8], data: &[u8], tag: &[u8]) -> Result<bool> {
    match algorithm {
        MacAlgorithm::HmacSha256 => verify_with::<HmacSha256>(key, data, tag),
        MacAlgorithm::HmacSha512 => verify_with::<HmacSha512>(key, data, tag),
        MacAlgorithm::HmacSha3_256 => verify_with::<HmacSha3_256>(key, data, tag),
        MacAlgorithm::Blake3Keyed => {
            let Ok(expected) = <[u8; blake3::OUT_LEN]>::try_from(tag) else {
                return Ok(false);
            };
            let computed = blake3::keyed_hash(&derive_blake3_key(key), data);
            // blake3::Hash equality is constant time
            Ok(computed == blake3::Hash::from(expected))
        }
    }
}

/// PBKDF2 (RFC 8018) over one of the HMAC algorithms
pub fn pbkdf2(
    algorithm: MacAlgorithm,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    length: usize,
) -> Result<Vec<u8>> {
    if algorithm == MacAlgorithm::Blake3Keyed {
        return Err(CybertoolsError::UnsupportedAlgorithm(
            "pbkdf2 requires an HMAC algorithm".into(),
        ));
    }
    if iterations == 0 {
        return Err(CybertoolsError::out_of_range(
            "iterations",
            iterations,
            1u32,
            u32::MAX,
        ));
    }
    if length == 0 || length > MAX_DERIVED_LENGTH {
        return Err(CybertoolsError::out_of_range(
            "derived key length",
            length as u64,
            1u64,
            MAX_DERIVED_LENGTH as u64,
        ));
    }

    let mut derived = Vec::with_capacity(length);
    let mut block_index = 1u32;

    while derived.len() < length {
        let mut u = keyed_parts(algorithm, password, &[salt, &block_index.to_be_bytes()])?;
        let mut block = u.clone();
        for _ in 1..iterations {
            u = keyed_parts(algorithm, password, &[&u])?;
            for (acc, byte) in block.iter_mut().zip(&u) {
                *acc ^= byte;
            }
        }

        let take = (length - derived.len()).min(block.len());
        derived.extend_from_slice(&block[..take]);
        block_index += 1;
    }

    Ok(derived)
}

fn keyed_parts(algorithm: MacAlgorithm, key: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>> {
    match algorithm {
        MacAlgorithm::HmacSha256 => mac_with::<HmacSha256>(key, parts),
        MacAlgorithm::HmacSha512 => mac_with::<HmacSha512>(key, parts),
        MacAlgorithm::HmacSha3_256 => mac_with::<HmacSha3_256>(key, parts),
        MacAlgorithm::Blake3Keyed => {
            let mut hasher = blake3::Hasher::new_keyed(&derive_blake3_key(key));
            for part in parts {
                hasher.update(part);
            }
            Ok(hasher.finalize().as_bytes().to_vec())
        }
    }
}

fn new_mac<M: Mac + KeyInit>(key: &[u8]) -> Result<M> {
    <M as KeyInit>::new_from_slice(key)
        .map_err(|_| CybertoolsError::InvalidLength("MAC key rejected".into()))
}

fn mac_with<M: Mac + KeyInit>(key: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>> {
    let mut mac = new_mac::<M>(key)?;
    for part in parts {
        mac.update(part);
    }
    Ok(mac.finalize().into_bytes().to_vec())
}

fn verify_with<M: Mac + KeyInit>(key: &[u8], data: &[u8], tag: &[u8]) -> Result<bool> {
    let mut mac = new_mac::<M>(key)?;
    mac.update(data);
    Ok(mac.verify_slice(tag).is_ok())
}

/// Derive a 32-byte key for BLAKE3 from an arbitrary secret
fn derive_blake3_key(secret: &[u8]) -> [u8; 32] {
    *blake3::hash(secret).as_bytes()
}
