use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::CodecError;

/// Byte order of raw values inside a buffer.
///
/// Parsing accepts long names (`native`, `little`, `big`), short names
/// (`le`, `be`) and the struct-packing characters `@`, `=`, `<`, `>`, `!`.
///
/// # Examples
/// ```
/// use fixreal_core::ByteOrder;
///
/// assert_eq!("<".parse::<ByteOrder>()?, ByteOrder::Little);
/// assert_eq!("BE".parse::<ByteOrder>()?, ByteOrder::Big);
/// assert_eq!(ByteOrder::default(), ByteOrder::Native);
/// # Ok::<(), fixreal_core::CodecError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Native,
    Little,
    Big,
}

impl ByteOrder {
    pub fn u16_from_bytes(self, bytes: [u8; 2]) -> u16 {
        match self {
            ByteOrder::Native => u16::from_ne_bytes(bytes),
            ByteOrder::Little => u16::from_le_bytes(bytes),
            ByteOrder::Big => u16::from_be_bytes(bytes),
        }
    }

    pub fn u32_from_bytes(self, bytes: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Native => u32::from_ne_bytes(bytes),
            ByteOrder::Little => u32::from_le_bytes(bytes),
            ByteOrder::Big => u32::from_be_bytes(bytes),
        }
    }

    pub fn u16_to_bytes(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrder::Native => value.to_ne_bytes(),
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }

    pub fn u32_to_bytes(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrder::Native => value.to_ne_bytes(),
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ByteOrder::Native => "native",
            ByteOrder::Little => "little",
            ByteOrder::Big => "big",
        };
        f.write_str(name)
    }
}

impl FromStr for ByteOrder {
    type Err = CodecError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "native" | "@" | "=" => Ok(ByteOrder::Native),
            "little" | "le" | "<" => Ok(ByteOrder::Little),
            "big" | "be" | ">" | "!" => Ok(ByteOrder::Big),
            _ => Err(CodecError::ByteOrder {
                value: value.to_string(),
            }),
        }
    }
}
