use crate::error::{FbsError, Result};
use crate::field::{FieldKind, FieldValue};
use crate::pipeline::key::derive_table_key;

/// Where the table key comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Derive from a table name
    Table(String),
    /// Raw key bytes given as hex
    Hex(String),
}

impl KeySource {
    /// Pick a key source from the mutually exclusive `--table` / `--key` flags
    pub fn from_args(table: Option<String>, key: Option<String>) -> Result<Self> {
        match (table, key) {
            (Some(name), None) => Ok(Self::Table(name)),
            (None, Some(hex)) => Ok(Self::Hex(hex)),
            _ => Err(FbsError::KeyRequired),
        }
    }

    pub fn resolve(&self) -> Result<Vec<u8>> {
        match self {
            Self::Table(name) => Ok(derive_table_key(name)?.to_vec()),
            Self::Hex(text) => {
                let key = hex::decode(text.trim())?;
                if key.is_empty() {
                    return Err(FbsError::InvalidLength(0));
                }
                Ok(key)
            }
        }
    }
}

/// Options for the convert and batch commands
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub key: Option<KeySource>,
}

impl ConvertOptions {
    pub fn key_bytes(&self) -> Result<Vec<u8>> {
        self.key.as_ref().ok_or(FbsError::KeyRequired)?.resolve()
    }
}

/// Parse `raw` as `kind` and decode it
pub fn convert_value(kind: FieldKind, raw: &str, options: &ConvertOptions) -> Result<FieldValue> {
    let key = options.key_bytes()?;
    let value = kind.parse_value(raw)?;
    Ok(value.convert(&key))
}
