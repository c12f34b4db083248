use thiserror::Error;

#[derive(Error, Debug)]
pub enum FbsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid hex key: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Input too large: {total} bytes already hashed, {additional} more would overflow the 32-bit counter")]
    InputTooLarge { total: u32, additional: usize },

    #[error("Invalid key length: {0}")]
    InvalidLength(usize),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Unsupported field kind: {0}")]
    UnsupportedKind(String),

    #[error("Key required: pass --table or --key")]
    KeyRequired,
}

pub type Result<T> = std::result::Result<T, FbsError>;
