//! The default parse-event handler: a stack-based builder that assembles the
//! [`Object`] tree the [`Parser`](crate::parser::Parser) describes.
//!
//! Ported from `veriform`'s reference `decoder.py`. The push-parser pattern
//! means the parser never touches an `Object` directly; it only calls through
//! the [`Handler`] trait, which is the seam a future hashing handler (or any
//! other consumer of the same parse events) plugs into instead.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::{ParseError, ParseErrorKind};
use crate::object::{Blob, FieldId, Object, Value};

/// The capability the [`Parser`](crate::parser::Parser) drives with typed
/// parse events.
///
/// Implementations other than [`Decoder`] are expected: a handler that feeds
/// a cryptographic hash instead of building a tree, for example, is the
/// motivating future use case named in the format's specification. The parser
/// makes no assumptions about a handler beyond this contract.
pub trait Handler<'a> {
    /// A `uint64`-wiretype field was decoded.
    fn uint64(&mut self, field_id: FieldId, value: u64) -> Result<(), ParseError>;

    /// A binary-wiretype field was decoded.
    fn binary(&mut self, field_id: FieldId, bytes: Blob<'a>) -> Result<(), ParseError>;

    /// A nested message is about to be parsed.
    fn begin_nested(&mut self) -> Result<(), ParseError>;

    /// A nested message finished parsing; fold it into the parent under
    /// `field_id`.
    fn end_nested(&mut self, field_id: FieldId) -> Result<(), ParseError>;

    /// Parsing is complete; produce the final result.
    fn finish(self) -> Result<Self::Output, ParseError>
    where
        Self: Sized;

    /// The type [`Handler::finish`] produces.
    type Output;
}

/// Builds an [`Object`] tree from parse events, maintaining a stack of
/// in-progress objects whose top is the message currently being built.
#[derive(Debug)]
pub struct Decoder<'a> {
    stack: Vec<Object<'a>>,
}

impl<'a> Decoder<'a> {
    /// Create a new decoder, ready to build a single top-level message.
    pub fn new() -> Self {
        Self {
            stack: vec![Object::new()],
        }
    }

    fn top_mut(&mut self) -> &mut Object<'a> {
        self.stack
            .last_mut()
            .expect("decoder stack is never empty between `new` and `finish`")
    }
}

impl<'a> Handler<'a> for Decoder<'a> {
    type Output = Object<'a>;

    fn uint64(&mut self, field_id: FieldId, value: u64) -> Result<(), ParseError> {
        self.top_mut().insert(field_id, Value::Uint64(value))
    }

    fn binary(&mut self, field_id: FieldId, bytes: Blob<'a>) -> Result<(), ParseError> {
        self.top_mut().insert(field_id, Value::Binary(bytes))
    }

    fn begin_nested(&mut self) -> Result<(), ParseError> {
        self.stack.push(Object::new());
        Ok(())
    }

    fn end_nested(&mut self, field_id: FieldId) -> Result<(), ParseError> {
        let nested = self.stack.pop().ok_or_else(|| {
            ParseError::with_reason(ParseErrorKind::State, "end_nested called with no open frame")
        })?;
        if self.stack.is_empty() {
            return Err(ParseError::with_reason(
                ParseErrorKind::State,
                "end_nested called with no open frame",
            ));
        }
        self.top_mut().insert(field_id, Value::Message(nested))
    }

    fn finish(mut self) -> Result<Object<'a>, ParseError> {
        if self.stack.len() > 1 {
            return Err(ParseError::with_reason(
                ParseErrorKind::State,
                "objects remaining on the decoder stack",
            ));
        }
        Ok(self
            .stack
            .pop()
            .expect("decoder stack always holds at least the root object"))
    }
}
