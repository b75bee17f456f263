//! Wire-level concerns: the prefix varint codec and the wiretype tag it
//! carries alongside a field id in every field prefix.

pub mod varint;

use crate::error::{ParseError, ParseErrorKind};

/// The 3-bit tag co-encoded with a field id in a field prefix, identifying
/// the shape of that field's payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WireType {
    /// Payload is a single varint-encoded `u64`.
    Uint64,
    /// Payload is a length-prefixed, recursively-parsed nested message.
    Message,
    /// Payload is length-prefixed opaque binary data.
    Binary,
}

impl WireType {
    /// The raw 3-bit tag this wiretype is encoded as on the wire.
    pub fn tag(self) -> u8 {
        match self {
            Self::Uint64 => 0,
            Self::Message => 2,
            Self::Binary => 3,
        }
    }

    /// Recover a `WireType` from its raw 3-bit tag, rejecting anything other
    /// than `{0, 2, 3}`.
    pub fn from_tag(tag: u8) -> Result<Self, ParseError> {
        match tag {
            0 => Ok(Self::Uint64),
            2 => Ok(Self::Message),
            3 => Ok(Self::Binary),
            _ => Err(ParseError::with_reason(
                ParseErrorKind::Parse,
                "unknown wiretype",
            )),
        }
    }
}

/// Compute the field prefix varint value for `(field_id, wire_type)`: the
/// field id in the upper bits, the wiretype's tag in the low 3 bits.
pub fn field_prefix(field_id: u64, wire_type: WireType) -> u64 {
    (field_id << 3) | wire_type.tag() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_prefix_matches_spec_example() {
        // {1: 42}: prefix (1<<3)|0 = 8
        assert_eq!(field_prefix(1, WireType::Uint64), 8);
        // {2: binary}: prefix (2<<3)|3 = 19
        assert_eq!(field_prefix(2, WireType::Binary), 19);
        // {3: nested}: prefix (3<<3)|2 = 26
        assert_eq!(field_prefix(3, WireType::Message), 26);
    }

    #[test]
    fn from_tag_rejects_unknown_wiretypes() {
        for bad in [1u8, 4, 5, 6, 7] {
            assert_eq!(
                WireType::from_tag(bad).unwrap_err().kind(),
                ParseErrorKind::Parse
            );
        }
    }
}
