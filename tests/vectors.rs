use fbscrypt::pipeline::{hash32, Xxh32};
use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct TestVector {
    input: String,
    seed: String,
    expected_hash: String,
}

fn vector_files() -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/xxhash32");
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

fn parse_seed(text: &str) -> Result<u32, Box<dyn Error>> {
    let seed = match text.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16)?,
        None => text.parse()?,
    };
    Ok(seed)
}

#[test]
fn xxhash32_matches_vector_files() -> Result<(), Box<dyn Error>> {
    let files = vector_files()?;
    assert!(!files.is_empty(), "no test vector files found");

    for path in files {
        let vector: TestVector = serde_json::from_str(&fs::read_to_string(&path)?)?;
        let seed = parse_seed(&vector.seed)?;
        let expected = u32::from_str_radix(&vector.expected_hash, 16)?;

        let digest = hash32(vector.input.as_bytes(), seed)?;
        assert_eq!(
            digest,
            expected,
            "input {:?} with seed {} in {}",
            vector.input,
            vector.seed,
            path.display()
        );
    }

    Ok(())
}

#[test]
fn xxhash32_vectors_hold_byte_by_byte() -> Result<(), Box<dyn Error>> {
    for path in vector_files()? {
        let vector: TestVector = serde_json::from_str(&fs::read_to_string(&path)?)?;
        let seed = parse_seed(&vector.seed)?;
        let expected = u32::from_str_radix(&vector.expected_hash, 16)?;

        let mut hasher = Xxh32::with_seed(seed);
        for byte in vector.input.as_bytes() {
            hasher.write(std::slice::from_ref(byte))?;
        }
        assert_eq!(hasher.digest(), expected, "{}", path.display());
    }

    Ok(())
}
