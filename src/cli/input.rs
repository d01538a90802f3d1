use crate::error::{CybertoolsError, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::debug;

/// Read buffer for streaming file input
const CHUNK_SIZE: usize = 64 * 1024;

/// Where a command takes its input from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Input {
    /// Literal text given on the command line
    Text(String),
    /// Raw bytes of a file
    File(PathBuf),
    /// Standard input, with one trailing newline removed
    #[default]
    Stdin,
}

impl Input {
    /// Pick the input source from optional CLI arguments; text wins over file
    pub fn from_args(text: Option<String>, file: Option<PathBuf>) -> Self {
        match (text, file) {
            (Some(text), _) => Input::Text(text),
            (None, Some(path)) => Input::File(path),
            (None, None) => Input::Stdin,
        }
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Input::Text(text) => Ok(text.as_bytes().to_vec()),
            Input::File(path) => {
                debug!(path = %path.display(), "reading input file");
                Ok(std::fs::read(path)?)
            }
            Input::Stdin => {
                let mut buffer = Vec::new();
                io::stdin().read_to_end(&mut buffer)?;
                strip_trailing_newline(&mut buffer);
                Ok(buffer)
            }
        }
    }

    /// Read input that must be UTF-8 text
    pub fn read_text(&self) -> Result<String> {
        match self {
            Input::Text(text) => Ok(text.clone()),
            _ => String::from_utf8(self.read_bytes()?).map_err(|_| {
                CybertoolsError::InvalidInput("input is not valid UTF-8 text".into())
            }),
        }
    }

    /// Feed the input to `sink` piece by piece; files are never loaded whole
    pub fn for_each_chunk(&self, mut sink: impl FnMut(&[u8])) -> Result<usize> {
        match self {
            Input::File(path) => {
                debug!(path = %path.display(), "streaming input file");
                let mut file = File::open(path)?;
                let mut buffer = vec![0u8; CHUNK_SIZE];
                let mut total = 0;
                loop {
                    let read = file.read(&mut buffer)?;
                    if read == 0 {
                        break;
                    }
                    sink(&buffer[..read]);
                    total += read;
                }
                Ok(total)
            }
            _ => {
                let data = self.read_bytes()?;
                sink(&data);
                Ok(data.len())
            }
        }
    }
}

fn strip_trailing_newline(buffer: &mut Vec<u8>) {
    if buffer.last() == Some(&b'\n') {
        buffer.pop();
        if buffer.last() == Some(&b'\r') {
            buffer.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_from_args_precedence() {
        assert_eq!(
            Input::from_args(Some("hi".into()), Some(PathBuf::from("x"))),
            Input::Text("hi".into())
        );
        assert_eq!(
            Input::from_args(None, Some(PathBuf::from("x"))),
            Input::File(PathBuf::from("x"))
        );
        assert_eq!(Input::from_args(None, None), Input::Stdin);
    }

    #[test]
    fn test_file_input_is_raw() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, b"line\n").unwrap();
        let input = Input::File(path);
        assert_eq!(input.read_bytes().unwrap(), b"line\n");
        assert_eq!(input.read_text().unwrap(), "line\n");
    }

    #[test]
    fn test_chunked_file_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.bin");
        let data: Vec<u8> = (0..(CHUNK_SIZE * 2 + 17)).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &data).unwrap();

        let mut collected = Vec::new();
        let total = Input::File(path)
            .for_each_chunk(|chunk| collected.extend_from_slice(chunk))
            .unwrap();
        assert_eq!(total, data.len());
        assert_eq!(collected, data);
    }

    #[test]
    fn test_missing_file() {
        let input = Input::File(PathBuf::from("/definitely/not/here.txt"));
        assert!(matches!(input.read_bytes(), Err(CybertoolsError::Io(_))));
    }

    #[test]
    fn test_invalid_utf8_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.bin");
        std::fs::write(&path, [0xC3, 0x28]).unwrap();
        assert!(matches!(
            Input::File(path).read_text(),
            Err(CybertoolsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_strip_trailing_newline() {
        let mut unix = b"abc\n".to_vec();
        strip_trailing_newline(&mut unix);
        assert_eq!(unix, b"abc");

        let mut windows = b"abc\r\n".to_vec();
        strip_trailing_newline(&mut windows);
        assert_eq!(windows, b"abc");

        let mut none = b"abc".to_vec();
        strip_trailing_newline(&mut none);
        assert_eq!(none, b"abc");
    }
}
