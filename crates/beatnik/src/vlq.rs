//! MIDI variable-length quantities.
//!
//! Seven value bits per byte, most significant group first. Every byte but
//! the last has its high bit set.

use thiserror::Error;

/// Largest value a MIDI VLQ can carry (28 bits).
pub const MAX: u32 = 0x0FFF_FFFF;

/// Longest encoding of a value up to [`MAX`].
pub const MAX_BYTES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VlqError {
    #[error("variable-length quantity ends after {0} bytes without a terminating byte")]
    Truncated(usize),

    #[error("variable-length quantity longer than {MAX_BYTES} bytes")]
    TooLong,
}

/// Encode a value as a variable-length quantity.
///
/// Values above [`MAX`] are written as [`MAX`].
pub fn encode(value: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_BYTES);
    write(&mut out, value);
    out
}

/// Append the encoding of `value` to `buf`.
pub fn write(buf: &mut Vec<u8>, value: u32) {
    let mut value = value.min(MAX);
    let mut bytes = [0u8; MAX_BYTES];
    let mut i = MAX_BYTES - 1;

    bytes[i] = (value & 0x7F) as u8;
    value >>= 7;

    while value > 0 {
        i -= 1;
        bytes[i] = ((value & 0x7F) | 0x80) as u8;
        value >>= 7;
    }

    buf.extend_from_slice(&bytes[i..]);
}

/// Decode a variable-length quantity from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed.
pub fn decode(bytes: &[u8]) -> Result<(u32, usize), VlqError> {
    let mut value = 0u32;
    for (i, &byte) in bytes.iter().enumerate() {
        if i == MAX_BYTES {
            return Err(VlqError::TooLong);
        }
        value = (value << 7) | (byte & 0x7F) as u32;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    if bytes.len() >= MAX_BYTES {
        Err(VlqError::TooLong)
    } else {
        Err(VlqError::Truncated(bytes.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_length_encoding() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(96), vec![0x60]);
        assert_eq!(encode(127), vec![0x7F]);
        assert_eq!(encode(128), vec![0x81, 0x00]);
        assert_eq!(encode(16383), vec![0xFF, 0x7F]);
        assert_eq!(encode(16384), vec![0x81, 0x80, 0x00]);
        assert_eq!(encode(MAX), vec![0xFF, 0xFF, 0xFF, 0x7F]);
    }

    #[test]
    fn test_write_appends() {
        let mut buf = vec![0x99];
        write(&mut buf, 384);
        assert_eq!(buf, vec![0x99, 0x83, 0x00]);
    }

    #[test]
    fn test_encode_saturates() {
        assert_eq!(encode(MAX + 1), encode(MAX));
        assert_eq!(encode(u32::MAX), vec![0xFF, 0xFF, 0xFF, 0x7F]);
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode(&[0x00]), Ok((0, 1)));
        assert_eq!(decode(&[0x7F, 0x42]), Ok((127, 1)));
        assert_eq!(decode(&[0x81, 0x00, 0x89]), Ok((128, 2)));
        assert_eq!(decode(&[0xFF, 0xFF, 0xFF, 0x7F]), Ok((MAX, 4)));
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode(&[]), Err(VlqError::Truncated(0)));
        assert_eq!(decode(&[0x81, 0x80]), Err(VlqError::Truncated(2)));
        assert_eq!(decode(&[0x80, 0x80, 0x80, 0x80]), Err(VlqError::TooLong));
        assert_eq!(decode(&[0x80, 0x80, 0x80, 0x80, 0x00]), Err(VlqError::TooLong));
    }

    #[test]
    fn test_roundtrip_across_range() {
        // Every group boundary plus a coarse sweep of the 28-bit range
        let mut values = vec![0, 1, MAX - 1, MAX];
        for shift in [7, 14, 21] {
            let edge = 1u32 << shift;
            values.extend([edge - 1, edge, edge + 1]);
        }
        values.extend((0..=MAX).step_by(65_521));

        for value in values {
            let bytes = encode(value);
            assert!(bytes.len() <= MAX_BYTES);
            assert_eq!(decode(&bytes), Ok((value, bytes.len())), "value {value}");
        }
    }
}
