use super::layout;

/// Cursor over a toolchain type name such as `UFix_16_10`.
///
/// Every read consumes input only on success; a `None` means the name does
/// not follow the grammar at the current position.
pub struct NameReader<'a> {
    name: &'a str,
    pos: usize,
}

impl<'a> NameReader<'a> {
    pub fn new(name: &'a str) -> Self {
        Self { name, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.name[self.pos..]
    }

    fn read_keyword(&mut self, keyword: &str) -> bool {
        let matched = self
            .rest()
            .get(..keyword.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(keyword));
        if matched {
            self.pos += keyword.len();
        }
        matched
    }

    /// Read the `fix`/`ufix` prefix, returning whether the format is signed.
    pub fn read_signedness(&mut self) -> Option<bool> {
        if self.read_keyword(layout::UNSIGNED_PREFIX) {
            Some(false)
        } else if self.read_keyword(layout::SIGNED_PREFIX) {
            Some(true)
        } else {
            None
        }
    }

    pub fn read_separator(&mut self) -> Option<()> {
        let rest = self.rest();
        if rest.starts_with(layout::FIELD_SEPARATOR) {
            self.pos += layout::FIELD_SEPARATOR.len_utf8();
            Some(())
        } else {
            None
        }
    }

    /// Read a non-empty run of ASCII digits. Values too large for a `u32`
    /// saturate to `u32::MAX` so the builder rejects them by range.
    pub fn read_u32(&mut self) -> Option<u32> {
        let digits = self
            .rest()
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .collect::<Vec<u8>>();
        if digits.is_empty() {
            return None;
        }
        let value = digits.iter().fold(0u32, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u32::from(digit - b'0'))
        });
        self.pos += digits.len();
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::NameReader;

    #[test]
    fn signedness_is_case_insensitive() {
        assert_eq!(NameReader::new("UFix_8_0").read_signedness(), Some(false));
        assert_eq!(NameReader::new("FIX_8_0").read_signedness(), Some(true));
        assert_eq!(NameReader::new("fixed").read_signedness(), Some(true));
        assert_eq!(NameReader::new("sfix_8_0").read_signedness(), None);
    }

    #[test]
    fn read_u32_stops_at_non_digit() {
        let mut reader = NameReader::new("16_10");
        assert_eq!(reader.read_u32(), Some(16));
        assert_eq!(reader.read_separator(), Some(()));
        assert_eq!(reader.read_u32(), Some(10));
        assert_eq!(reader.read_u32(), None);
    }

    #[test]
    fn read_u32_saturates_on_overflow() {
        let mut reader = NameReader::new("99999999999_4294967295");
        assert_eq!(reader.read_u32(), Some(u32::MAX));
        assert_eq!(reader.read_separator(), Some(()));
        assert_eq!(reader.read_u32(), Some(u32::MAX));
        assert_eq!(reader.read_u32(), None);
    }

    #[test]
    fn multibyte_input_does_not_panic() {
        let mut reader = NameReader::new("fé_8_0");
        assert_eq!(reader.read_signedness(), None);
        let mut reader = NameReader::new("ü");
        assert_eq!(reader.read_signedness(), None);
    }
}
