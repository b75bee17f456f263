//! The error taxonomy for parsing and decoding Veriform messages.
//!
//! Every condition that can arise from untrusted wire input is represented as a
//! [`ParseErrorKind`] wrapped in a [`ParseError`]. There is deliberately no separate
//! "programming error" type: the conditions the original Python implementation
//! raises as `TypeError`/`ValueError` (non-integer input, negative field ids,
//! out-of-range integers) are enforced by Rust's type system instead — a `u64`
//! cannot be negative or exceed `u64::MAX`, and `decode` takes `&[u8]` rather than
//! an arbitrary dynamically-typed value. See `DESIGN.md` for the full reasoning.

use core::fmt;

#[cfg(feature = "detailed-errors")]
use thin_vec::ThinVec;

/// The kind of parse failure that occurred.
///
/// These map directly onto the error hierarchy described in the format's
/// specification: truncated input, an oversize message, excessive nesting, a
/// handler invoked out of sequence, a duplicate field id, and the catch-all for
/// malformed wire data (unknown wiretypes, non-canonical varints, out-of-order
/// field ids).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// End of input was reached in the middle of a field prefix, varint, or
    /// length-prefixed payload.
    Truncated,
    /// A message (or nested message) exceeds the parser's configured
    /// `max_length`.
    Oversize,
    /// Nesting exceeded the parser's configured `max_depth`.
    Depth,
    /// The handler (or decoder) was invoked in a state that doesn't permit the
    /// operation, e.g. `end_nested` with no open frame, or `finish` with more
    /// than one frame remaining.
    State,
    /// A field id appeared more than once within the same (sub)message.
    Duplicate,
    /// A structural violation not covered by the other kinds: an unrecognized
    /// wiretype, a non-canonical (over-long) varint encoding, or field ids that
    /// are not strictly increasing when `require_sorted_fields` is enabled.
    Parse,
}

impl ParseErrorKind {
    fn description(self) -> &'static str {
        match self {
            Self::Truncated => "unexpected end of input",
            Self::Oversize => "message exceeds the configured maximum length",
            Self::Depth => "message nesting exceeds the configured maximum depth",
            Self::State => "handler invoked in an invalid state",
            Self::Duplicate => "duplicate field id in message",
            Self::Parse => "malformed message",
        }
    }
}

/// An error produced while parsing or decoding a Veriform message.
///
/// Carries a [`ParseErrorKind`] plus a short static description. Once a `parse`
/// call fails, the [`Parser`](crate::parser::Parser) that produced it is left in
/// a non-resumable state, matching the behavior described in the format's
/// specification: nothing is retried internally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    reason: &'static str,
    #[cfg(feature = "detailed-errors")]
    path: ThinVec<u64>,
}

impl ParseError {
    /// Construct a new error of the given kind, with its default description.
    pub fn new(kind: ParseErrorKind) -> Self {
        Self::with_reason(kind, kind.description())
    }

    /// Construct a new error of the given kind with a more specific reason.
    pub fn with_reason(kind: ParseErrorKind, reason: &'static str) -> Self {
        Self {
            kind,
            reason,
            #[cfg(feature = "detailed-errors")]
            path: ThinVec::new(),
        }
    }

    /// The kind of error that occurred.
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// The human-readable reason for the error.
    pub fn reason(&self) -> &'static str {
        self.reason
    }

    /// The breadcrumb trail of field ids from the message root down to the frame
    /// in which the error occurred, innermost first. Only populated when the
    /// `detailed-errors` feature is enabled.
    #[cfg(feature = "detailed-errors")]
    pub fn path(&self) -> &[u64] {
        &self.path
    }

    /// Record that this error is propagating out of a nested message identified
    /// by `field_id`. Called once per frame as the error unwinds through
    /// [`Parser::parse`](crate::parser::Parser::parse).
    #[cfg(feature = "detailed-errors")]
    pub(crate) fn push_frame(mut self, field_id: u64) -> Self {
        self.path.push(field_id);
        self
    }

    #[cfg(not(feature = "detailed-errors"))]
    pub(crate) fn push_frame(self, _field_id: u64) -> Self {
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[cfg(feature = "detailed-errors")]
        if !self.path.is_empty() {
            write!(f, "{} (at field path ", self.reason)?;
            for (i, id) in self.path.iter().rev().enumerate() {
                if i > 0 {
                    write!(f, ".")?;
                }
                write!(f, "{id}")?;
            }
            return write!(f, ")");
        }
        write!(f, "{}", self.reason)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_default_description() {
        let err = ParseError::new(ParseErrorKind::Truncated);
        assert_eq!(err.to_string(), "unexpected end of input");
    }

    #[test]
    fn kind_roundtrips() {
        let err = ParseError::new(ParseErrorKind::Duplicate);
        assert_eq!(err.kind(), ParseErrorKind::Duplicate);
    }
}
