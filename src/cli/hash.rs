use super::input::Input;
use crate::checksum::{format_checksum, ChecksumAlgorithm};
use crate::encoding::hex_ascii;
use crate::error::{CybertoolsError, Result};
use crate::hashing::{self, HashAlgorithm, MacAlgorithm};
use serde::Serialize;
use tracing::debug;

/// Options for the checksum command
#[derive(Debug, Clone, Default)]
pub struct ChecksumOptions {
    pub algorithm: ChecksumAlgorithm,
    pub json: bool,
}

/// Options for the hash command
#[derive(Debug, Clone, Default)]
pub struct HashOptions {
    /// Empty means every supported algorithm
    pub algorithms: Vec<HashAlgorithm>,
    pub json: bool,
}

/// Options for the mac command
#[derive(Debug, Clone, Default)]
pub struct MacOptions {
    pub algorithm: MacAlgorithm,
    pub key: String,
    /// Hex tag to check instead of printing a new one
    pub verify: Option<String>,
}

/// Options for the pbkdf2 command
#[derive(Debug, Clone)]
pub struct Pbkdf2Options {
    pub algorithm: MacAlgorithm,
    pub salt: String,
    pub iterations: u32,
    pub length: usize,
}

impl Default for Pbkdf2Options {
    fn default() -> Self {
        Self {
            algorithm: MacAlgorithm::HmacSha256,
            salt: String::new(),
            iterations: 100_000,
            length: 32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecksumReport {
    pub algorithm: ChecksumAlgorithm,
    pub checksum: String,
    pub bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashEntry {
    pub algorithm: HashAlgorithm,
    pub digest: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashReport {
    pub bytes: usize,
    pub digests: Vec<HashEntry>,
}

/// Checksum the input, streaming files in chunks
pub fn checksum_input(input: &Input, options: &ChecksumOptions) -> Result<ChecksumReport> {
    let mut hasher = options.algorithm.hasher();
    let bytes = input.for_each_chunk(|chunk| hasher.update(chunk))?;
    debug!(algorithm = %options.algorithm, bytes, "checksum computed");

    Ok(ChecksumReport {
        algorithm: options.algorithm,
        checksum: format_checksum(hasher.finalize()),
        bytes,
    })
}

pub fn render_checksum(report: &ChecksumReport, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(report)?);
    }
    Ok(format!("{}: {}", report.algorithm, report.checksum))
}

/// Hash the input with each requested algorithm
pub fn hash_input(input: &Input, options: &HashOptions) -> Result<HashReport> {
    let data = input.read_bytes()?;
    let algorithms: &[HashAlgorithm] = if options.algorithms.is_empty() {
        &HashAlgorithm::ALL
    } else {
        &options.algorithms
    };

    let mut digests = Vec::with_capacity(algorithms.len());
    for &algorithm in algorithms {
        debug!(%algorithm, bytes = data.len(), "hashing input");
        digests.push(HashEntry {
            algorithm,
            digest: hashing::digest_hex(algorithm, &data)?,
        });
    }

    Ok(HashReport {
        bytes: data.len(),
        digests,
    })
}

pub fn render_hashes(report: &HashReport, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let width = report
        .digests
        .iter()
        .map(|entry| entry.algorithm.name().len())
        .max()
        .unwrap_or(0);

    let lines: Vec<String> = report
        .digests
        .iter()
        .map(|entry| {
            format!(
                "{:<width$}  {}",
                entry.algorithm.name(),
                entry.digest,
                width = width
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Compute a tag, or check one when `verify` is set
pub fn mac_input(input: &Input, options: &MacOptions) -> Result<String> {
    if options.key.is_empty() {
        return Err(CybertoolsError::InvalidLength("MAC key is empty".into()));
    }
    let data = input.read_bytes()?;
    let key = options.key.as_bytes();

    match &options.verify {
        Some(tag_hex) => {
            let tag = hex_ascii::decode(tag_hex)?;
            let valid = hashing::verify_mac(options.algorithm, key, &data, &tag)?;
            debug!(algorithm = %options.algorithm, valid, "tag checked");
            Ok(if valid { "valid" } else { "invalid" }.to_string())
        }
        None => {
            let tag = hashing::mac(options.algorithm, key, &data)?;
            Ok(format!("{}: {}", options.algorithm, hex_ascii::encode(&tag)))
        }
    }
}

/// Derive a key from the input password
pub fn pbkdf2_input(input: &Input, options: &Pbkdf2Options) -> Result<String> {
    let password = input.read_bytes()?;
    debug!(
        algorithm = %options.algorithm,
        iterations = options.iterations,
        length = options.length,
        "deriving key"
    );
    let derived = hashing::pbkdf2(
        options.algorithm,
        &password,
        options.salt.as_bytes(),
        options.iterations,
        options.length,
    )?;
    Ok(hex_ascii::encode(&derived))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_checksum_text() {
        let report = checksum_input(
            &Input::Text("123456789".into()),
            &ChecksumOptions::default(),
        )
        .unwrap();
        assert_eq!(report.checksum, "CBF43926");
        assert_eq!(report.bytes, 9);
        assert_eq!(render_checksum(&report, false).unwrap(), "crc32: CBF43926");
    }

    #[test]
    fn test_checksum_file_matches_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wiki.txt");
        std::fs::write(&path, "Wikipedia").unwrap();

        let options = ChecksumOptions {
            algorithm: ChecksumAlgorithm::Adler32,
            json: false,
        };
        let report = checksum_input(&Input::File(path), &options).unwrap();
        assert_eq!(report.checksum, "11E60398");
    }

    #[test]
    fn test_checksum_json() {
        let report = checksum_input(
            &Input::Text("The quick brown fox jumps over the lazy dog".into()),
            &ChecksumOptions::default(),
        )
        .unwrap();
        let json = render_checksum(&report, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["algorithm"], "crc32");
        assert_eq!(value["checksum"], "414FA339");
        assert_eq!(value["bytes"], 43);
    }

    #[test]
    fn test_hash_defaults_to_all_algorithms() {
        let report = hash_input(&Input::Text("abc".into()), &HashOptions::default()).unwrap();
        assert_eq!(report.digests.len(), HashAlgorithm::ALL.len());
        let sha256 = report
            .digests
            .iter()
            .find(|entry| entry.algorithm == HashAlgorithm::Sha256)
            .unwrap();
        assert_eq!(
            sha256.digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_render_aligns_names() {
        let options = HashOptions {
            algorithms: vec![HashAlgorithm::Md5, HashAlgorithm::Sha3_256],
            json: false,
        };
        let report = hash_input(&Input::Text("abc".into()), &options).unwrap();
        let text = render_hashes(&report, false).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "md5       900150983cd24fb0d6963f7d28e17f72");
        assert!(lines[1].starts_with("sha3-256  "));
    }

    #[test]
    fn test_hash_json_uses_kebab_names() {
        let options = HashOptions {
            algorithms: vec![HashAlgorithm::Sha3_512],
            json: true,
        };
        let report = hash_input(&Input::Text("".into()), &options).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&render_hashes(&report, true).unwrap()).unwrap();
        assert_eq!(value["digests"][0]["algorithm"], "sha3-512");
    }

    #[test]
    fn test_mac_and_verify() {
        let input = Input::Text("what do ya want for nothing?".into());
        let options = MacOptions {
            key: "Jefe".into(),
            ..Default::default()
        };
        let tagged = mac_input(&input, &options).unwrap();
        let tag = "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843";
        assert_eq!(tagged, format!("hmac-sha256: {}", tag));

        let check = MacOptions {
            verify: Some(tag.into()),
            ..options.clone()
        };
        assert_eq!(mac_input(&input, &check).unwrap(), "valid");

        let forged = MacOptions {
            verify: Some("00".repeat(32)),
            ..options
        };
        assert_eq!(mac_input(&input, &forged).unwrap(), "invalid");
    }

    #[test]
    fn test_mac_rejects_empty_key() {
        assert!(matches!(
            mac_input(&Input::Text("data".into()), &MacOptions::default()),
            Err(CybertoolsError::InvalidLength(_))
        ));
    }

    #[test]
    fn test_pbkdf2_rfc_vector() {
        let options = Pbkdf2Options {
            salt: "salt".into(),
            iterations: 1,
            length: 32,
            ..Default::default()
        };
        let derived = pbkdf2_input(&Input::Text("password".into()), &options).unwrap();
        assert_eq!(
            derived,
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );
    }
}
