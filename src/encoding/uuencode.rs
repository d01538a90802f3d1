use crate::error::{CybertoolsError, Result};
use tracing::trace;

/// Bytes carried by one full data line
pub const LINE_LENGTH: usize = 45;

/// Header fields written on the `begin` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UuencodeOptions {
    pub file_name: String,
    /// Unix permission bits, written in octal
    pub mode: u32,
}

impl Default for UuencodeOptions {
    fn default() -> Self {
        Self {
            file_name: "file.txt".into(),
            mode: 0o644,
        }
    }
}

/// UUencode with the default `begin 644 file.txt` header
pub fn encode(data: &[u8]) -> String {
    encode_with(data, &UuencodeOptions::default())
}

/// UUencode with a custom header.
///
/// Layout: `begin <mode> <name>`, one line per 45 input bytes (length
/// character followed by 4 characters per 3-byte group), a zero-length
/// terminator line, then `end`.
pub fn encode_with(data: &[u8], options: &UuencodeOptions) -> String {
    let mut out = format!("begin {:o} {}\n", options.mode, options.file_name);

    for line in data.chunks(LINE_LENGTH) {
        out.push(encode_value(line.len() as u8));
        for group in line.chunks(3) {
            let b0 = group[0];
            let b1 = group.get(1).copied().unwrap_or(0);
            let b2 = group.get(2).copied().unwrap_or(0);
            out.push(encode_value(b0 >> 2));
            out.push(encode_value(((b0 & 0x03) << 4) | (b1 >> 4)));
            out.push(encode_value(((b1 & 0x0F) << 2) | (b2 >> 6)));
            out.push(encode_value(b2 & 0x3F));
        }
        out.push('\n');
    }

    out.push_str("`\nend\n");
    out
}

/// Decode UUencoded text.
///
/// `begin`, `end` and blank lines are skipped. Each data line is cut to the
/// length declared by its first character. A line must carry enough
/// characters for its declared bytes; only the padding of the last group may
/// be missing, and it is read as zero.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut line_start = 0;

    for raw_line in text.split('\n') {
        let offset = line_start;
        line_start += raw_line.len() + 1;

        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        if is_framing(line) {
            trace!(line = %line, "skipping framing line");
            continue;
        }

        let bytes = line.as_bytes();
        let declared = decode_value(line, 0, offset)? as usize;
        if declared == 0 {
            continue;
        }

        let needed = 1 + (declared * 4).div_ceil(3);
        if bytes.len() < needed {
            return Err(CybertoolsError::InvalidLength(format!(
                "UUencode line at byte {} declares {} bytes but has {} of {} characters",
                offset,
                declared,
                bytes.len(),
                needed
            )));
        }

        let groups = declared.div_ceil(3);
        let mut decoded = Vec::with_capacity(groups * 3);

        for group in 0..groups {
            let mut values = [0u8; 4];
            for (i, value) in values.iter_mut().enumerate() {
                let index = 1 + group * 4 + i;
                if index < bytes.len() {
                    *value = decode_value(line, index, offset)?;
                }
            }
            decoded.push((values[0] << 2) | (values[1] >> 4));
            decoded.push((values[1] << 4) | (values[2] >> 2));
            decoded.push((values[2] << 6) | values[3]);
        }

        decoded.truncate(declared);
        out.extend_from_slice(&decoded);
    }

    Ok(out)
}

fn is_framing(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed == "end" || trimmed.starts_with("begin ")
}

fn encode_value(value: u8) -> char {
    ((value & 0x3F) + 32) as char
}

/// Decode the character at byte `index` of `line`; accepts `' '..='`'`
fn decode_value(line: &str, index: usize, line_offset: usize) -> Result<u8> {
    match line.as_bytes().get(index) {
        Some(&byte @ 32..=96) => Ok((byte - 32) & 0x3F),
        _ => {
            let character = line
                .get(index..)
                .and_then(|rest| rest.chars().next())
                .unwrap_or('\0');
            Err(CybertoolsError::InvalidCharacter {
                codec: "UUencode",
                character,
                position: line_offset + index,
            })
        }
    }
}
