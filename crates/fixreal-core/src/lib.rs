//! fixreal core library: fixed-point <-> floating-point conversion.
//!
//! This crate converts between `f64` and the fixed-point layouts produced by
//! model-based signal-processing toolchains: signed (`fix`) or unsigned
//! (`ufix`), 8/16/32 bits wide, with a configurable binary point and an
//! optional decode scaling. A [`FormatDescriptor`] is built once per layout
//! (explicitly or from a name such as `ufix_16_10`) and then drives any number
//! of conversions.
//!
//! Conversions are pure and side-effect free; buffers are caller-owned byte
//! slices and byte order is always explicit. Descriptor construction and
//! buffer handling fail with typed errors, scalar decoding never fails.
//!
//! Invariants:
//! - A descriptor is immutable and satisfies `binary_point < bits`.
//! - Every raw code of a format decodes and re-encodes to itself when the
//!   scaling is 1.0.
//! - Encoding never applies the scaling used by decoding.
//!
//! # Examples
//! ```
//! use fixreal_core::{ByteOrder, decode_sequence, encode_value, parse_format_name};
//!
//! let fmt = parse_format_name("fix_8_7")?;
//! assert_eq!(encode_value(-0.9921875, &fmt)?, 0b1000_0001);
//!
//! let values = decode_sequence(&[0x81, 0x40], &fmt, ByteOrder::Native)?;
//! assert_eq!(values, vec![-0.9921875, 0.5]);
//! # Ok::<(), fixreal_core::ConversionError>(())
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod codec;
mod format;

pub use codec::{
    ByteOrder, CodecError, decode_buffer, decode_sequence, decode_value, encode_buffer,
    encode_sequence, encode_value,
};
pub use format::{DescriptorError, FormatDescriptor, Width, build_descriptor, parse_format_name};

/// Current conversion report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Any error raised by this crate.
///
/// # Examples
/// ```
/// use fixreal_core::{ConversionError, parse_format_name};
///
/// fn first_raw(name: &str, value: f64) -> Result<u32, ConversionError> {
///     let fmt = parse_format_name(name)?;
///     Ok(fixreal_core::encode_value(value, &fmt)?)
/// }
///
/// assert!(matches!(first_raw("int_8_0", 1.0), Err(ConversionError::Descriptor(_))));
/// assert!(matches!(first_raw("ufix_8_0", -1.0), Err(ConversionError::Codec(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Decoded buffer contents together with the format used to read them.
///
/// # Examples
/// ```
/// use fixreal_core::{ByteOrder, FormatDescriptor, make_report};
///
/// let fmt = FormatDescriptor::new(8, 0, false)?;
/// let report = make_report(&fmt, ByteOrder::Native, vec![1.0, 2.0]);
/// assert_eq!(report.report_version, fixreal_core::REPORT_VERSION);
/// assert_eq!(report.format.name, "ufix_8_0");
/// # Ok::<(), fixreal_core::DescriptorError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Format the values were decoded with.
    pub format: FormatInfo,
    /// Byte order the buffer was read in.
    pub byte_order: ByteOrder,
    /// Decoded values in buffer order.
    pub values: Vec<f64>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "fixreal").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Summary of a format as embedded in reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Canonical name, e.g. `fix_16_8`.
    pub name: String,
    pub bits: u32,
    pub binary_point: u32,
    pub signed: bool,
    /// Divisor applied to every decoded value.
    pub scaling: f64,
}

impl From<&FormatDescriptor> for FormatInfo {
    fn from(fmt: &FormatDescriptor) -> Self {
        Self {
            name: fmt.name(),
            bits: fmt.bits(),
            binary_point: fmt.binary_point(),
            signed: fmt.is_signed(),
            scaling: fmt.scaling(),
        }
    }
}

/// Build a report for values decoded with `fmt`.
pub fn make_report(fmt: &FormatDescriptor, byte_order: ByteOrder, values: Vec<f64>) -> ConversionReport {
    ConversionReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "fixreal".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        format: FormatInfo::from(fmt),
        byte_order,
        values,
    }
}
