use super::byte_order::ByteOrder;
use super::error::CodecError;
use crate::format::Width;

/// Reads fixed-width unsigned raw values out of a caller-owned buffer.
pub struct RawReader<'a> {
    bytes: &'a [u8],
    width: Width,
    order: ByteOrder,
}

impl<'a> RawReader<'a> {
    pub fn new(bytes: &'a [u8], width: Width, order: ByteOrder) -> Self {
        Self {
            bytes,
            width,
            order,
        }
    }

    fn length_error(&self) -> CodecError {
        CodecError::Format {
            len: self.bytes.len(),
            width_bytes: self.width.bytes(),
        }
    }

    /// Require the buffer to hold exactly `count` values.
    pub fn require_count(&self, count: usize) -> Result<(), CodecError> {
        let needed = count
            .checked_mul(self.width.bytes())
            .ok_or_else(|| self.length_error())?;
        if self.bytes.len() != needed {
            return Err(self.length_error());
        }
        Ok(())
    }

    /// Number of values in the buffer; the length must be a whole multiple
    /// of the element width.
    pub fn element_count(&self) -> Result<usize, CodecError> {
        let width_bytes = self.width.bytes();
        if self.bytes.len() % width_bytes != 0 {
            return Err(self.length_error());
        }
        Ok(self.bytes.len() / width_bytes)
    }

    pub fn read_raw(&self, index: usize) -> Result<u32, CodecError> {
        let width_bytes = self.width.bytes();
        let start = index
            .checked_mul(width_bytes)
            .ok_or_else(|| self.length_error())?;
        let chunk = self
            .bytes
            .get(start..start.saturating_add(width_bytes))
            .ok_or_else(|| self.length_error())?;
        self.decode_chunk(chunk)
    }

    pub fn read_all(&self) -> Result<Vec<u32>, CodecError> {
        self.element_count()?;
        self.bytes
            .chunks_exact(self.width.bytes())
            .map(|chunk| self.decode_chunk(chunk))
            .collect()
    }

    fn decode_chunk(&self, chunk: &[u8]) -> Result<u32, CodecError> {
        let raw = match self.width {
            Width::W8 => u32::from(*chunk.first().ok_or_else(|| self.length_error())?),
            Width::W16 => {
                let bytes: [u8; 2] = chunk.try_into().map_err(|_| self.length_error())?;
                u32::from(self.order.u16_from_bytes(bytes))
            }
            Width::W32 => {
                let bytes: [u8; 4] = chunk.try_into().map_err(|_| self.length_error())?;
                self.order.u32_from_bytes(bytes)
            }
        };
        Ok(raw)
    }
}

/// Appends raw values to a byte buffer, truncated to the element width.
pub(crate) fn write_raw(out: &mut Vec<u8>, raw: u32, width: Width, order: ByteOrder) {
    match width {
        Width::W8 => out.push(raw as u8),
        Width::W16 => out.extend_from_slice(&order.u16_to_bytes(raw as u16)),
        Width::W32 => out.extend_from_slice(&order.u32_to_bytes(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::{RawReader, write_raw};
    use crate::codec::byte_order::ByteOrder;
    use crate::codec::error::CodecError;
    use crate::format::Width;

    #[test]
    fn read_single_value() {
        let bytes = [0x12, 0x34];
        let reader = RawReader::new(&bytes, Width::W16, ByteOrder::Big);
        reader.require_count(1).unwrap();
        assert_eq!(reader.read_raw(0).unwrap(), 0x1234);
    }

    #[test]
    fn require_count_rejects_wrong_length() {
        let bytes = [0u8; 3];
        let reader = RawReader::new(&bytes, Width::W16, ByteOrder::Little);
        let err = reader.require_count(1).unwrap_err();
        assert_eq!(
            err,
            CodecError::Format {
                len: 3,
                width_bytes: 2
            }
        );
    }

    #[test]
    fn read_all_in_order() {
        let bytes = [1, 0, 0, 0, 2, 0, 0, 0];
        let reader = RawReader::new(&bytes, Width::W32, ByteOrder::Little);
        assert_eq!(reader.element_count().unwrap(), 2);
        assert_eq!(reader.read_all().unwrap(), vec![1, 2]);
    }

    #[test]
    fn read_all_rejects_partial_tail() {
        let bytes = [0u8; 5];
        let reader = RawReader::new(&bytes, Width::W32, ByteOrder::Native);
        assert!(matches!(
            reader.read_all(),
            Err(CodecError::Format { len: 5, .. })
        ));
    }

    #[test]
    fn read_raw_out_of_range() {
        let bytes = [0u8; 2];
        let reader = RawReader::new(&bytes, Width::W8, ByteOrder::Native);
        assert!(reader.read_raw(2).is_err());
    }

    #[test]
    fn write_raw_truncates_to_width() {
        let mut out = Vec::new();
        write_raw(&mut out, 0x1_0081, Width::W8, ByteOrder::Native);
        write_raw(&mut out, 0xbeef, Width::W16, ByteOrder::Big);
        assert_eq!(out, vec![0x81, 0xbe, 0xef]);
    }
}
