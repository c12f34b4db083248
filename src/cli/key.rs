use crate::error::{FbsError, Result};
use crate::pipeline::key::{derive_archive_password, derive_key, TABLE_KEY_SIZE};

/// Largest key the key command will derive
pub const MAX_KEY_SIZE: usize = 4096;

/// Options for the key command
#[derive(Debug, Clone)]
pub struct KeyOptions {
    pub size: usize,
}

impl Default for KeyOptions {
    fn default() -> Self {
        Self {
            size: TABLE_KEY_SIZE,
        }
    }
}

/// Derive a key for `name` and render it as hex
pub fn show_key(name: &str, options: &KeyOptions) -> Result<String> {
    if options.size == 0 || options.size > MAX_KEY_SIZE {
        return Err(FbsError::InvalidLength(options.size));
    }
    let key = derive_key(name, options.size)?;
    Ok(hex::encode(key))
}

/// Derive the archive password for `name`
pub fn show_password(name: &str) -> Result<String> {
    derive_archive_password(name)
}
