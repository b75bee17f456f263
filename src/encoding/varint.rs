//! The prefix varint codec: a little-endian, self-delimiting encoding for
//! unsigned 64-bit integers whose length is signaled by the position of the
//! lowest set bit in the first byte.
//!
//! Ported from the bit-twiddling in `veriform`'s reference Python codec
//! (`varint.py`), restated in terms of `u64::trailing_zeros` rather than a
//! precomputed lookup table — the trailing-zero-count is a single instruction
//! on every architecture Rust targets, so the table buys nothing here.

use crate::error::{ParseError, ParseErrorKind};

/// The largest value representable by this encoding (all of `u64`'s range).
pub const MAX: u64 = u64::MAX;

/// Encode `value` as a prefix varint, appending the 1-9 bytes produced to `buf`.
///
/// For `value < 2^56` this emits the shortest `n` in `1..=8` bytes such that
/// `value < 2^(7*n)`, tagging the length in the trailing zero bits of the first
/// byte. Values `>= 2^56` always use the 9-byte form: a zero prefix byte
/// followed by the raw little-endian `u64`.
pub fn encode(value: u64, buf: &mut alloc::vec::Vec<u8>) {
    if value >= 1 << 56 {
        buf.push(0);
        buf.extend_from_slice(&value.to_le_bytes());
        return;
    }

    let mut n = 1usize;
    while value >= 1 << (7 * n) {
        n += 1;
    }
    let encoded = (value << n) | (1 << (n - 1));
    buf.extend_from_slice(&encoded.to_le_bytes()[..n]);
}

/// The number of bytes [`encode`] would produce for `value`.
pub fn encoded_len(value: u64) -> usize {
    if value >= 1 << 56 {
        return 9;
    }
    let mut n = 1usize;
    while value >= 1 << (7 * n) {
        n += 1;
    }
    n
}

/// Decode one prefix varint from the front of `input`, returning the decoded
/// value and the unconsumed remainder.
///
/// Rejects non-canonical (over-long) encodings: for an `n`-byte encoding with
/// `n > 1`, the decoded value must be at least `2^(7*(n-1))`, i.e. it must not
/// fit in a shorter encoding. The 9-byte form is always accepted for values
/// `>= 2^56`; whether a 9-byte encoding of a smaller value is also accepted is
/// controlled by the caller (see
/// [`Parser::reject_non_minimal_nine_byte_form`](crate::parser::Parser)) since
/// the bare varint codec, like the reference decoder, does not reject it by
/// default.
pub fn decode(input: &[u8]) -> Result<(u64, &[u8]), ParseError> {
    let Some(&b0) = input.first() else {
        return Err(ParseError::new(ParseErrorKind::Truncated));
    };

    let n = if b0 == 0 {
        9
    } else {
        (b0.trailing_zeros() + 1) as usize
    };

    if input.len() < n {
        return Err(ParseError::new(ParseErrorKind::Truncated));
    }

    let value = if b0 == 0 {
        u64::from_le_bytes(input[1..9].try_into().unwrap())
    } else {
        let mut padded = [0u8; 8];
        padded[..n].copy_from_slice(&input[..n]);
        u64::from_le_bytes(padded) >> n
    };

    if n > 1 && n < 9 && value < (1u64 << (7 * (n - 1))) {
        return Err(ParseError::with_reason(
            ParseErrorKind::Parse,
            "non-canonical varint encoding",
        ));
    }

    Ok((value, &input[n..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn enc(value: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        encode(value, &mut buf);
        buf
    }

    #[test]
    fn concrete_vectors() {
        assert_eq!(enc(0), vec![0x01]);
        assert_eq!(enc(42), vec![0x55]);
        assert_eq!(enc(127), vec![0xff]);
        assert_eq!(enc(128), vec![0x02, 0x02]);
        assert_eq!(
            enc(u64::MAX - 1),
            vec![0x00, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
        assert_eq!(
            enc(u64::MAX),
            vec![0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn decode_concrete_vectors() {
        assert_eq!(decode(&[0x01]).unwrap(), (0, &[][..]));
        assert_eq!(decode(&[0x55]).unwrap(), (42, &[][..]));
        assert_eq!(decode(&[0xff]).unwrap(), (127, &[][..]));
        assert_eq!(decode(&[0x02, 0x02]).unwrap(), (128, &[][..]));
    }

    #[test]
    fn decode_empty_is_truncated() {
        assert_eq!(decode(&[]).unwrap_err().kind(), ParseErrorKind::Truncated);
    }

    #[test]
    fn decode_preserves_suffix() {
        let mut buf = enc(300);
        buf.extend_from_slice(&[0xaa, 0xbb]);
        let (value, rest) = decode(&buf).unwrap();
        assert_eq!(value, 300);
        assert_eq!(rest, &[0xaa, 0xbb]);
    }

    #[test]
    fn decode_rejects_overlong_encoding() {
        // Two-byte form encoding the value 0, which fits in one byte.
        let err = decode(&[0x02, 0x00]).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::Parse);
    }

    #[test]
    fn encode_decode_round_trip_boundaries() {
        for &value in &[
            0u64,
            1,
            127,
            128,
            (1 << 14) - 1,
            1 << 14,
            (1 << 56) - 1,
            1 << 56,
            u64::MAX - 1,
            u64::MAX,
        ] {
            let encoded = enc(value);
            let (decoded, rest) = decode(&encoded).unwrap();
            assert_eq!(decoded, value, "round trip failed for {value}");
            assert!(rest.is_empty());
            assert_eq!(encoded.len(), encoded_len(value));
        }
    }
}
