use crate::error::Result;
use crate::pipeline::xxhash::Xxh32;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Options for the hash command
#[derive(Debug, Clone, Default)]
pub struct HashOptions {
    pub seed: u32,
}

/// Hash a string's UTF-8 bytes
pub fn hash_text(text: &str, options: &HashOptions) -> Result<u32> {
    let mut hasher = Xxh32::with_seed(options.seed);
    hasher.write(text.as_bytes())?;
    Ok(hasher.digest())
}

/// Hash a file's contents, streaming it through the hasher
pub fn hash_file(path: &Path, options: &HashOptions) -> Result<u32> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Xxh32::with_seed(options.seed);
    let copied = io::copy(&mut reader, &mut hasher)?;
    log::debug!("hashed {} bytes from {}", copied, path.display());
    Ok(hasher.digest())
}

/// Render a digest the way xxhsum prints it
pub fn format_digest(digest: u32) -> String {
    format!("{:08x}", digest)
}
