use super::byte_order::ByteOrder;
use super::error::CodecError;
use super::reader::write_raw;
use crate::format::FormatDescriptor;

/// 2^32; integer parts are reduced modulo this before masking.
const RAW_MODULUS: f64 = 4_294_967_296.0;

/// Encode a real value into the raw code of `fmt`.
///
/// The fractional part is truncated to the format's step and saturates at
/// the fractional mask. Integer parts outside the representable range wrap:
/// only the bits selected by the integer mask are kept. Negative values are
/// folded through `int_min`, so values below the signed range wrap too.
///
/// Scaling is not applied: encoding a value decoded through a descriptor
/// with `scaling != 1.0` does not reproduce the raw code it came from.
///
/// # Examples
/// ```
/// use fixreal_core::{FormatDescriptor, encode_value};
///
/// let fmt = FormatDescriptor::new(8, 7, true)?;
/// assert_eq!(encode_value(-0.9921875, &fmt)?, 129);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn encode_value(real: f64, fmt: &FormatDescriptor) -> Result<u32, CodecError> {
    if !real.is_finite() {
        return Err(CodecError::NonFinite { value: real });
    }
    if !fmt.is_signed() && real < 0.0 {
        return Err(CodecError::Sign { value: real });
    }

    let (negative, real) = if real < 0.0 {
        (true, real - fmt.int_min())
    } else {
        (false, real)
    };

    let magnitude = real.abs();
    let whole = magnitude.floor();
    let fraction = magnitude - whole;

    let int_val = ((whole % RAW_MODULUS) as u32) & (fmt.int_mask() >> fmt.binary_point());
    let dec = ((fraction / fmt.dec_step()).floor() as u32).min(fmt.dec_mask());

    // Nearest-step correction; compares truncation against the next step up.
    // Only a negative value below `int_min` can trigger it, and then the
    // sign bit is set, so the decrement never wraps below zero.
    let quantized = f64::from(int_val) + f64::from(dec) * fmt.dec_step();
    let step_back = quantized - real > real - quantized + fmt.dec_step();

    let int_bits = (int_val << fmt.binary_point()) & fmt.int_mask();
    let sign_bits = if negative { fmt.sign_mask() } else { 0 };
    let raw = sign_bits + int_bits + dec;
    Ok(if step_back { raw.wrapping_sub(1) } else { raw })
}

/// Encode one value into `bits / 8` bytes.
pub fn encode_buffer(
    real: f64,
    fmt: &FormatDescriptor,
    order: ByteOrder,
) -> Result<Vec<u8>, CodecError> {
    let raw = encode_value(real, fmt)?;
    let mut out = Vec::with_capacity(fmt.width_bytes());
    write_raw(&mut out, raw, fmt.width(), order);
    Ok(out)
}

/// Encode a sequence of values into one contiguous buffer.
///
/// Fails on the first value that cannot be encoded; no partial buffer is
/// returned.
///
/// # Examples
/// ```
/// use fixreal_core::{ByteOrder, FormatDescriptor, encode_sequence};
///
/// let fmt = FormatDescriptor::new(16, 8, true)?;
/// let bytes = encode_sequence(&[1.5, -0.00390625], &fmt, ByteOrder::Big)?;
/// assert_eq!(bytes, vec![0x01, 0x80, 0xff, 0xff]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn encode_sequence(
    values: &[f64],
    fmt: &FormatDescriptor,
    order: ByteOrder,
) -> Result<Vec<u8>, CodecError> {
    tracing::trace!(format = %fmt, %order, count = values.len(), "encoding sequence");
    let mut out = Vec::with_capacity(values.len() * fmt.width_bytes());
    for &value in values {
        let raw = encode_value(value, fmt)?;
        write_raw(&mut out, raw, fmt.width(), order);
    }
    Ok(out)
}
