//! `veriform`: a minimalistic, protobuf-inspired binary serialization format
//! designed to support cryptographic authentication of messages via Merkle
//! tree hashing.
//!
//! The format is built around two tightly coupled subsystems: a
//! canonically-encoded [prefix varint](encoding::varint) codec, and a
//! streaming, depth-limited [`Parser`](parser::Parser) that dispatches typed
//! parse events to a pluggable [`Handler`](decoder::Handler), building a
//! self-describing [`Object`](object::Object) tree with strict field-id
//! uniqueness (and, by default, strict field-id ordering) invariants.
//!
//! ```
//! use veriform::decoder::Decoder;
//! use veriform::object::Value;
//! use veriform::parser::Parser;
//!
//! // { 1: 42 }
//! let message = [0x11, 0x55];
//! let object = Parser::new().parse(&message, Decoder::new()).unwrap();
//! assert_eq!(object.get(1), Some(&Value::Uint64(42)));
//! ```
//!
//! What's deliberately out of scope here: hashing messages for authentication
//! (a future layer atop this canonical encoding), encoding of signed
//! integers, floats, or strings beyond raw bytes, and any schema/IDL
//! compilation — this crate describes the wire format and its object tree,
//! not a code generator for typed messages built on top of it.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod decoder;
pub mod encode;
pub mod encoding;
pub mod error;
pub mod object;
pub mod parser;

pub use decoder::{Decoder, Handler};
pub use encode::encode;
pub use error::{ParseError, ParseErrorKind};
pub use object::{Blob, FieldId, Object, PlainValue, Value};
pub use parser::Parser;
