use thiserror::Error;

#[derive(Error, Debug)]
pub enum CybertoolsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid {codec} character {character:?} at position {position}")]
    InvalidCharacter {
        codec: &'static str,
        character: char,
        position: usize,
    },

    #[error("Invalid length: {0}")]
    InvalidLength(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{name} {value} out of range: must be between {min} and {max}")]
    OutOfRange {
        name: &'static str,
        value: i128,
        min: i128,
        max: i128,
    },

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

impl CybertoolsError {
    /// Build an `OutOfRange` error from any integer parameter
    pub fn out_of_range(
        name: &'static str,
        value: impl Into<i128>,
        min: impl Into<i128>,
        max: impl Into<i128>,
    ) -> Self {
        Self::OutOfRange {
            name,
            value: value.into(),
            min: min.into(),
            max: max.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CybertoolsError>;
