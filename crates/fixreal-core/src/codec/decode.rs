use super::byte_order::ByteOrder;
use super::error::CodecError;
use super::reader::RawReader;
use crate::format::FormatDescriptor;

/// Decode a raw code into the real value it represents, divided by the
/// format's scaling.
///
/// Bits above the format width are ignored.
///
/// # Examples
/// ```
/// use fixreal_core::{FormatDescriptor, decode_value};
///
/// let fmt = FormatDescriptor::new(8, 7, true)?;
/// assert_eq!(decode_value(0b1000_0001, &fmt), -0.9921875);
/// # Ok::<(), fixreal_core::DescriptorError>(())
/// ```
pub fn decode_value(raw: u32, fmt: &FormatDescriptor) -> f64 {
    let integer = f64::from((raw & fmt.int_mask()) >> fmt.binary_point());
    let fraction = fmt.dec_step() * f64::from(raw & fmt.dec_mask());
    let value = if fmt.is_signed() && raw & fmt.sign_mask() != 0 {
        fmt.int_min() + integer + fraction
    } else {
        integer + fraction
    };
    value / fmt.scaling()
}

/// Decode a buffer holding exactly one raw value.
pub fn decode_buffer(
    bytes: &[u8],
    fmt: &FormatDescriptor,
    order: ByteOrder,
) -> Result<f64, CodecError> {
    let reader = RawReader::new(bytes, fmt.width(), order);
    reader.require_count(1)?;
    let raw = reader.read_raw(0)?;
    Ok(decode_value(raw, fmt))
}

/// Decode a buffer of consecutive raw values, preserving buffer order.
///
/// # Examples
/// ```
/// use fixreal_core::{ByteOrder, FormatDescriptor, decode_sequence};
///
/// let fmt = FormatDescriptor::new(16, 8, true)?;
/// let values = decode_sequence(&[0x01, 0x80, 0xff, 0xff], &fmt, ByteOrder::Big)?;
/// assert_eq!(values, vec![1.5, -0.00390625]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode_sequence(
    bytes: &[u8],
    fmt: &FormatDescriptor,
    order: ByteOrder,
) -> Result<Vec<f64>, CodecError> {
    let reader = RawReader::new(bytes, fmt.width(), order);
    let raws = reader.read_all()?;
    tracing::trace!(format = %fmt, %order, count = raws.len(), "decoding sequence");
    Ok(raws.into_iter().map(|raw| decode_value(raw, fmt)).collect())
}
