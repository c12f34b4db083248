//! fbscrypt - table key derivation and field decoding for obfuscated
//! FlatBuffers tables
//!
//! Every table is obfuscated with a key derived from its name. Scalar
//! fields are XORed with the key, floats are rescaled by a key-dependent
//! divisor, and strings are stored as base64 of XORed UTF-16.
//!
//! ## Key Pipeline
//!
//! ```text
//! Name → xxHash32 (seed 0) → MT19937 seed → 31-bit byte stream → Key
//! ```
//!
//! - **xxHash32**: streaming 32-bit hash of the name's UTF-8 bytes
//! - **MT19937**: 32-bit Mersenne Twister seeded with the digest
//! - **Table key**: first 8 bytes of the stream
//! - **Archive password**: base64 of the first 15 bytes
//!
//! ## Example
//!
//! ```
//! use fbscrypt::field::FieldValue;
//! use fbscrypt::pipeline::{convert, derive_table_key};
//!
//! let key = derive_table_key("ExampleFieldName").unwrap();
//! assert_eq!(convert(123_456_789i32, &key), 1_340_461_342);
//!
//! let name = FieldValue::String("QxzbSM7XO2JkHJJIgtdBLEdp".into());
//! assert_eq!(name.convert(&key), FieldValue::String("Hello, 世界".into()));
//! ```

pub mod cli;
pub mod error;
pub mod field;
pub mod pipeline;

pub use error::{FbsError, Result};
pub use field::{FieldKind, FieldValue};
pub use pipeline::{
    checksum, convert, derive_archive_password, derive_key, derive_table_key, hash32, Convert,
    Mt19937, TableKey, Xxh32,
};
