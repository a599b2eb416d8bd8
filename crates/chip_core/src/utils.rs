#[inline(always)]
pub fn u16_from_two(a: u8, b: u8) -> u16 {
    (a as u16) << 8 | b as u16
}

#[inline(always)]
pub fn nibble(word: u16, index: u8) -> u8 {
    // index 0 is the most significant nibble
    ((word >> (12 - 4 * index as u16)) & 0x0F) as u8
}

/// Splits a value into its hundreds, tens and ones digits.
#[inline(always)]
pub fn bcd(value: u8) -> [u8; 3] {
    [value / 100, (value / 10) % 10, value % 10]
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn nibbles_msb_first() {
        let word = 0xA4C3;
        assert!(nibble(word, 0) == 0xA);
        assert!(nibble(word, 1) == 0x4);
        assert!(nibble(word, 2) == 0xC);
        assert!(nibble(word, 3) == 0x3);
    }
    #[test]
    fn two_bytes_big_endian() {
        assert!(u16_from_two(0x12, 0x34) == 0x1234);
    }
    #[test]
    fn bcd_digits() {
        assert!(bcd(0) == [0, 0, 0]);
        assert!(bcd(7) == [0, 0, 7]);
        assert!(bcd(42) == [0, 4, 2]);
        assert!(bcd(255) == [2, 5, 5]);
    }
}
