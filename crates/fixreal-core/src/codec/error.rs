use thiserror::Error;

/// Errors returned by decoding and encoding.
///
/// # Examples
/// ```
/// use fixreal_core::{CodecError, FormatDescriptor, encode_value};
///
/// let fmt = FormatDescriptor::new(8, 7, false)?;
/// let err = encode_value(-0.5, &fmt).unwrap_err();
/// assert!(matches!(err, CodecError::Sign { .. }));
/// assert!(err.to_string().contains("unsigned"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    #[error("cannot encode {value} into an unsigned format")]
    Sign { value: f64 },
    #[error("cannot encode non-finite value {value}")]
    NonFinite { value: f64 },
    #[error("invalid buffer length: {len} bytes for {width_bytes}-byte elements")]
    Format { len: usize, width_bytes: usize },
    #[error("unknown byte order '{value}' (expected native, little, big, @, =, <, > or !)")]
    ByteOrder { value: String },
}
