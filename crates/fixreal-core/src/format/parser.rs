use super::descriptor::FormatDescriptor;
use super::error::DescriptorError;
use super::reader::NameReader;

/// Parse a toolchain type name (`fix_8_7`, `UFix_16_10`) into a descriptor.
///
/// Matching is case-insensitive and anchored at the start of the name only:
/// anything after the binary point digits is ignored, so `Fix_16_8_reg`
/// parses as `fix_16_8`. The descriptor uses the default scaling of 1.0.
///
/// The prefix decides signedness without regard to case, so `Fix_8_7` and
/// `FIX_8_7` are signed, the same as `fix_8_7`. Only `ufix` in any case is
/// unsigned.
///
/// A name fails with [`DescriptorError::NameParse`] only when it does not
/// match the `fix_<bits>_<binary point>` grammar. Digit groups that match but
/// are out of range, including ones too large for a `u32`, are reported by
/// the builder as [`DescriptorError::UnsupportedWidth`] or
/// [`DescriptorError::InvalidBinaryPoint`].
///
/// # Examples
/// ```
/// use fixreal_core::parse_format_name;
///
/// let fmt = parse_format_name("UFix_16_10")?;
/// assert!(!fmt.is_signed());
/// assert_eq!(fmt.bits(), 16);
/// assert_eq!(fmt.binary_point(), 10);
/// # Ok::<(), fixreal_core::DescriptorError>(())
/// ```
pub fn parse_format_name(name: &str) -> Result<FormatDescriptor, DescriptorError> {
    let parse_error = || DescriptorError::NameParse {
        name: name.to_string(),
    };

    let mut reader = NameReader::new(name);
    let signed = reader.read_signedness().ok_or_else(parse_error)?;
    reader.read_separator().ok_or_else(parse_error)?;
    let bits = reader.read_u32().ok_or_else(parse_error)?;
    reader.read_separator().ok_or_else(parse_error)?;
    let binary_point = reader.read_u32().ok_or_else(parse_error)?;

    tracing::debug!(name, bits, binary_point, signed, "parsed format name");
    FormatDescriptor::new(bits, binary_point, signed)
}
