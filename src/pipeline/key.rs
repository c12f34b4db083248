use crate::error::Result;
use crate::pipeline::mt19937::Mt19937;
use crate::pipeline::xxhash::checksum;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

/// Table key size in bytes
pub const TABLE_KEY_SIZE: usize = 8;

/// Raw archive password size in bytes (before base64)
pub const ARCHIVE_PASSWORD_SIZE: usize = 15;

/// Key used to decode the fields of one table
pub type TableKey = [u8; TABLE_KEY_SIZE];

/// Derive `size` key bytes from `name`
///
/// The name's UTF-8 bytes are hashed with xxHash32 (seed 0) and the digest
/// seeds an MT19937 stream, which supplies the bytes.
///
/// # Panics
///
/// Panics if `size` is 0.
pub fn derive_key(name: &str, size: usize) -> Result<Vec<u8>> {
    let seed = checksum(name.as_bytes())?;
    let key = Mt19937::new(seed).next_bytes(size);
    log::debug!(
        "derived {}-byte key for {:?} (seed {:#010x})",
        size,
        name,
        seed
    );
    Ok(key)
}

/// Derive the 8-byte key for a table name
pub fn derive_table_key(name: &str) -> Result<TableKey> {
    let seed = checksum(name.as_bytes())?;
    let mut key = [0u8; TABLE_KEY_SIZE];
    Mt19937::new(seed).fill_bytes(&mut key);
    log::debug!("derived table key for {:?} (seed {:#010x})", name, seed);
    Ok(key)
}

/// Derive the password for an archive name
///
/// The password is the base64 text of 15 derived bytes, not the bytes.
pub fn derive_archive_password(name: &str) -> Result<String> {
    let raw = derive_key(name, ARCHIVE_PASSWORD_SIZE)?;
    Ok(BASE64.encode(raw))
}

/// Archive password as the byte string handed to the archive reader
pub fn password_bytes(name: &str) -> Result<Vec<u8>> {
    Ok(derive_archive_password(name)?.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_key_fixture() {
        let key = derive_table_key("ExampleFieldName").unwrap();
        assert_eq!(hex::encode(key), "0b1cbe48a2d75762");
    }

    #[test]
    fn test_table_key_matches_derive_key() {
        for name in ["CharacterExcelTable", "ScenarioScriptExcelTable", ""] {
            let table = derive_table_key(name).unwrap();
            let generic = derive_key(name, TABLE_KEY_SIZE).unwrap();
            assert_eq!(table.to_vec(), generic);
        }
    }

    #[test]
    fn test_known_table_keys() {
        assert_eq!(
            hex::encode(derive_table_key("CharacterExcelTable").unwrap()),
            "c9327f62c1fbc53f"
        );
        assert_eq!(
            hex::encode(derive_table_key("ScenarioScriptExcelTable").unwrap()),
            "19c5067f078ec47f"
        );
    }

    #[test]
    fn test_empty_name() {
        // Seed is the digest of no input
        let key = derive_table_key("").unwrap();
        assert_eq!(hex::encode(key), "3e927e7cfe886e62");
    }

    #[test]
    fn test_archive_password() {
        assert_eq!(
            derive_archive_password("Excel.zip").unwrap(),
            "/wy5f3hIGGXLOIUDS9DZ"
        );
        assert_eq!(
            derive_archive_password("ExampleFieldName").unwrap(),
            "Cxy+SKLXV2Imv+kaY/pN"
        );
    }

    #[test]
    fn test_password_is_text_of_fifteen_bytes() {
        let password = derive_archive_password("Excel.zip").unwrap();
        let decoded = BASE64.decode(&password).unwrap();
        assert_eq!(decoded.len(), ARCHIVE_PASSWORD_SIZE);
        assert_eq!(decoded, derive_key("Excel.zip", ARCHIVE_PASSWORD_SIZE).unwrap());
        assert_eq!(password_bytes("Excel.zip").unwrap(), password.as_bytes());
    }

    #[test]
    fn test_password_prefix_matches_table_key() {
        // Same stream, different length
        let long = derive_key("ExampleFieldName", ARCHIVE_PASSWORD_SIZE).unwrap();
        let short = derive_table_key("ExampleFieldName").unwrap();
        assert_eq!(&long[..TABLE_KEY_SIZE], &short);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            derive_key("SomeTable", 32).unwrap(),
            derive_key("SomeTable", 32).unwrap()
        );
    }

    #[test]
    fn test_name_sensitive() {
        assert_ne!(
            derive_table_key("SomeTable").unwrap(),
            derive_table_key("SomeTablf").unwrap()
        );
    }

    #[test]
    #[should_panic]
    fn test_zero_size_panics() {
        let _ = derive_key("SomeTable", 0);
    }
}
