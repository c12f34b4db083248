use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

/// Base64 decoder for obfuscated strings
///
/// Standard alphabet with mandatory padding. Non-zero trailing bits are
/// accepted because the producer of these tables does not canonicalize them.
const FIELD_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

/// A field type that can be decoded with a table key
///
/// Implemented for every scalar type the table format obfuscates. There is
/// no fallback impl: an unsupported type is a compile error.
///
/// The integer impls are XOR involutions except around zero: `0` is never
/// touched, so a value whose XOR comes out as `0` does not decode back.
pub trait Convert: Sized {
    fn convert(self, key: &[u8]) -> Self;
}

/// Decode a single field value with `key`
pub fn convert<T: Convert>(value: T, key: &[u8]) -> T {
    value.convert(key)
}

/// XOR `value` against `key` repeated cyclically
///
/// An empty value or an empty key returns the value unchanged.
pub fn xor_bytes(value: &[u8], key: &[u8]) -> Vec<u8> {
    if value.is_empty() || key.is_empty() {
        return value.to_vec();
    }
    value
        .iter()
        .zip(key.iter().cycle())
        .map(|(v, k)| v ^ k)
        .collect()
}

macro_rules! impl_xor_convert {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Convert for $ty {
                fn convert(self, key: &[u8]) -> Self {
                    if self == 0 || key.is_empty() {
                        return self;
                    }
                    let mut bytes = self.to_le_bytes();
                    for (byte, k) in bytes.iter_mut().zip(key.iter().cycle()) {
                        *byte ^= k;
                    }
                    <$ty>::from_le_bytes(bytes)
                }
            }
        )*
    };
}

impl_xor_convert!(i32, i64, u32, u64, u8);

/// Divisor applied to positive floats, derived from the first key byte
///
/// `1` means "leave the value alone" and is only produced by an empty key.
pub fn float_modulus(key: &[u8]) -> i32 {
    let Some(&first) = key.first() else {
        return 1;
    };
    let mut modulus = (first % 10) as i32;
    if modulus <= 1 {
        modulus = 7;
    }
    if first & 1 == 1 {
        modulus = -modulus;
    }
    modulus
}

// Floats are rescaled, not XORed. Decoding twice does not restore the
// stored value, and non-positive values are never touched.
impl Convert for f32 {
    fn convert(self, key: &[u8]) -> Self {
        let modulus = float_modulus(key);
        if self > 0.0 && modulus != 1 {
            self / modulus as f32 / 10000.0
        } else {
            self
        }
    }
}

impl Convert for f64 {
    fn convert(self, key: &[u8]) -> Self {
        let modulus = float_modulus(key);
        if self > 0.0 && modulus != 1 {
            self / modulus as f64 / 10000.0
        } else {
            self
        }
    }
}

impl Convert for String {
    fn convert(self, key: &[u8]) -> Self {
        if self.is_empty() {
            return self;
        }
        match decode_text(&self, key) {
            Some(text) => text,
            None => self,
        }
    }
}

/// Decode an obfuscated string, or `None` if it is not base64
///
/// The XORed bytes are read as little-endian UTF-16; a dangling odd byte is
/// dropped and unpaired surrogates become U+FFFD.
pub fn decode_text(value: &str, key: &[u8]) -> Option<String> {
    // Line breaks inside the payload are ignored, as by standard decoders
    let compact: Vec<u8> = value
        .bytes()
        .filter(|&b| b != b'\r' && b != b'\n')
        .collect();
    let raw = match FIELD_BASE64.decode(&compact) {
        Ok(raw) => raw,
        Err(e) => {
            // Plain text in an obfuscated column is expected, not an error
            log::trace!("passing through non-base64 text ({})", e);
            return None;
        }
    };

    let xored = xor_bytes(&raw, key);
    let units: Vec<u16> = xored
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    Some(String::from_utf16_lossy(&units))
}

/// Inverse of `decode_text`, used to build obfuscated fixtures
pub fn encode_text(value: &str, key: &[u8]) -> String {
    if value.is_empty() {
        return String::new();
    }
    let raw: Vec<u8> = value.encode_utf16().flat_map(u16::to_le_bytes).collect();
    FIELD_BASE64.encode(xor_bytes(&raw, key))
}
