use thiserror::Error;

/// Errors returned while building or parsing a format descriptor.
///
/// # Examples
/// ```
/// use fixreal_core::{DescriptorError, FormatDescriptor};
///
/// let err = FormatDescriptor::new(24, 3, true).unwrap_err();
/// assert!(matches!(err, DescriptorError::UnsupportedWidth { bits: 24 }));
/// assert!(err.to_string().contains("unsupported bit width"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DescriptorError {
    #[error("unsupported bit width: {bits} (expected 8, 16 or 32)")]
    UnsupportedWidth { bits: u32 },
    #[error("invalid binary point: {binary_point} (must be below the {bits}-bit width)")]
    InvalidBinaryPoint { binary_point: u32, bits: u32 },
    #[error("invalid scaling: {scaling} (must be finite and non-zero)")]
    InvalidScaling { scaling: f64 },
    #[error("cannot interpret format name '{name}' (expected fix_<bits>_<binary point> or ufix_<bits>_<binary point>)")]
    NameParse { name: String },
}
