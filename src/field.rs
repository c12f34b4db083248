use crate::error::{FbsError, Result};
use crate::pipeline::convert::Convert;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar kinds stored obfuscated in a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Int32,
    Int64,
    Uint32,
    Uint64,
    Ubyte,
    Float32,
    Float64,
    String,
}

impl FieldKind {
    pub const ALL: [FieldKind; 8] = [
        FieldKind::Int32,
        FieldKind::Int64,
        FieldKind::Uint32,
        FieldKind::Uint64,
        FieldKind::Ubyte,
        FieldKind::Float32,
        FieldKind::Float64,
        FieldKind::String,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Ubyte => "ubyte",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
        }
    }

    /// Parse a textual value as this kind
    pub fn parse_value(&self, s: &str) -> Result<FieldValue> {
        let invalid = || FbsError::InvalidValue(format!("{:?} is not a valid {}", s, self.name()));
        let value = match self {
            Self::Int32 => FieldValue::Int32(s.parse().map_err(|_| invalid())?),
            Self::Int64 => FieldValue::Int64(s.parse().map_err(|_| invalid())?),
            Self::Uint32 => FieldValue::Uint32(s.parse().map_err(|_| invalid())?),
            Self::Uint64 => FieldValue::Uint64(s.parse().map_err(|_| invalid())?),
            Self::Ubyte => FieldValue::Ubyte(s.parse().map_err(|_| invalid())?),
            Self::Float32 => FieldValue::Float32(s.parse().map_err(|_| invalid())?),
            Self::Float64 => FieldValue::Float64(s.parse().map_err(|_| invalid())?),
            Self::String => FieldValue::String(s.to_string()),
        };
        Ok(value)
    }
}

impl std::str::FromStr for FieldKind {
    type Err = FbsError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "int32" | "int" | "i32" => Ok(Self::Int32),
            "int64" | "long" | "i64" => Ok(Self::Int64),
            "uint32" | "uint" | "u32" => Ok(Self::Uint32),
            "uint64" | "ulong" | "u64" => Ok(Self::Uint64),
            "ubyte" | "uint8" | "u8" => Ok(Self::Ubyte),
            "float32" | "float" | "f32" => Ok(Self::Float32),
            "float64" | "double" | "f64" => Ok(Self::Float64),
            "string" | "str" | "text" => Ok(Self::String),
            _ => Err(FbsError::UnsupportedKind(s.to_string())),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single field value as read from (or written to) a table
///
/// Serialized as `{"kind": "int32", "value": 42}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    Int32(i32),
    Int64(i64),
    Uint32(u32),
    Uint64(u64),
    Ubyte(u8),
    Float32(f32),
    Float64(f64),
    String(String),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Int32(_) => FieldKind::Int32,
            Self::Int64(_) => FieldKind::Int64,
            Self::Uint32(_) => FieldKind::Uint32,
            Self::Uint64(_) => FieldKind::Uint64,
            Self::Ubyte(_) => FieldKind::Ubyte,
            Self::Float32(_) => FieldKind::Float32,
            Self::Float64(_) => FieldKind::Float64,
            Self::String(_) => FieldKind::String,
        }
    }

    /// Decode this value with `key`, keeping its kind
    pub fn convert(&self, key: &[u8]) -> FieldValue {
        match self {
            Self::Int32(v) => Self::Int32(v.convert(key)),
            Self::Int64(v) => Self::Int64(v.convert(key)),
            Self::Uint32(v) => Self::Uint32(v.convert(key)),
            Self::Uint64(v) => Self::Uint64(v.convert(key)),
            Self::Ubyte(v) => Self::Ubyte(v.convert(key)),
            Self::Float32(v) => Self::Float32(v.convert(key)),
            Self::Float64(v) => Self::Float64(v.convert(key)),
            Self::String(v) => Self::String(v.clone().convert(key)),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int32(v) => write!(f, "{}", v),
            Self::Int64(v) => write!(f, "{}", v),
            Self::Uint32(v) => write!(f, "{}", v),
            Self::Uint64(v) => write!(f, "{}", v),
            Self::Ubyte(v) => write!(f, "{}", v),
            Self::Float32(v) => write!(f, "{}", v),
            Self::Float64(v) => write!(f, "{}", v),
            Self::String(v) => f.write_str(v),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar!(
    i32 => Int32,
    i64 => Int64,
    u32 => Uint32,
    u64 => Uint64,
    u8 => Ubyte,
    f32 => Float32,
    f64 => Float64,
    String => String,
);

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 8] = [0x0b, 0x1c, 0xbe, 0x48, 0xa2, 0xd7, 0x57, 0x62];

    #[test]
    fn test_kind_from_str() {
        assert_eq!("int32".parse::<FieldKind>().unwrap(), FieldKind::Int32);
        assert_eq!("Double".parse::<FieldKind>().unwrap(), FieldKind::Float64);
        assert_eq!("u8".parse::<FieldKind>().unwrap(), FieldKind::Ubyte);
        assert!(matches!(
            "bool".parse::<FieldKind>(),
            Err(FbsError::UnsupportedKind(_))
        ));
    }

    #[test]
    fn test_kind_name_roundtrip() {
        for kind in FieldKind::ALL {
            assert_eq!(kind.name().parse::<FieldKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(
            FieldKind::Int32.parse_value("-12").unwrap(),
            FieldValue::Int32(-12)
        );
        assert_eq!(
            FieldKind::Float64.parse_value("2.5").unwrap(),
            FieldValue::Float64(2.5)
        );
        assert_eq!(
            FieldKind::String.parse_value("abc").unwrap(),
            FieldValue::String("abc".into())
        );
        assert!(matches!(
            FieldKind::Ubyte.parse_value("256"),
            Err(FbsError::InvalidValue(_))
        ));
        assert!(FieldKind::Uint32.parse_value("-1").is_err());
    }

    #[test]
    fn test_convert_keeps_kind() {
        let values = vec![
            FieldValue::Int32(123_456_789),
            FieldValue::Int64(-5),
            FieldValue::Uint32(4_000_000_000),
            FieldValue::Uint64(1),
            FieldValue::Ubyte(200),
            FieldValue::Float32(35_000.0),
            FieldValue::Float64(70_000.0),
            FieldValue::String("QxzbSM7XO2JkHJJIgtdBLEdp".into()),
        ];
        for value in values {
            assert_eq!(value.convert(&KEY).kind(), value.kind());
        }
    }

    #[test]
    fn test_convert_dispatch() {
        assert_eq!(
            FieldValue::Int32(123_456_789).convert(&KEY),
            FieldValue::Int32(1_340_461_342)
        );
        assert_eq!(
            FieldValue::Ubyte(200).convert(&KEY),
            FieldValue::Ubyte(195)
        );
        assert_eq!(
            FieldValue::Float64(70_000.0).convert(&KEY),
            FieldValue::Float64(-1.0)
        );
        assert_eq!(
            FieldValue::String("QxzbSM7XO2JkHJJIgtdBLEdp".into()).convert(&KEY),
            FieldValue::String("Hello, 世界".into())
        );
        assert_eq!(
            FieldValue::String(String::new()).convert(&KEY),
            FieldValue::String(String::new())
        );
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&FieldValue::Int32(42)).unwrap();
        assert_eq!(json, r#"{"kind":"int32","value":42}"#);

        let parsed: FieldValue =
            serde_json::from_str(r#"{"kind":"string","value":"QUJD"}"#).unwrap();
        assert_eq!(parsed, FieldValue::String("QUJD".into()));

        let bad = serde_json::from_str::<FieldValue>(r#"{"kind":"ubyte","value":300}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_from_scalar() {
        assert_eq!(FieldValue::from(7u8), FieldValue::Ubyte(7));
        assert_eq!(FieldValue::from(1.5f32), FieldValue::Float32(1.5));
        assert_eq!(FieldValue::from("x".to_string()).kind(), FieldKind::String);
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Int64(-9).to_string(), "-9");
        assert_eq!(FieldValue::Float64(-1.0).to_string(), "-1");
        assert_eq!(FieldValue::String("hi".into()).to_string(), "hi");
    }
}
