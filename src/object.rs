//! The self-describing object tree Veriform messages decode into.
//!
//! Ported from `veriform`'s reference `object.py`, which models a message as a
//! dict-like type keyed by non-negative field id with at-most-once semantics per
//! key. The Rust translation keeps the same contract but trades the dynamic
//! dict for a `BTreeMap` (giving deterministic, field-id-sorted iteration for
//! free) and borrows binary payloads from the input buffer by default, per the
//! zero-copy design note in the format's specification.

use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::ops::Deref;

use crate::error::{ParseError, ParseErrorKind};

/// A field id: a non-negative integer identifying a field within one message,
/// unique within that (sub)message.
pub type FieldId = u64;

/// A binary field's payload.
///
/// Borrows from the input buffer (`Blob::Borrowed`) whenever the parser has a
/// live slice to hand out, which is the common case; [`Object::into_owned`]
/// converts every blob in a tree to `Blob::Owned` for callers that need the
/// tree to outlive the wire buffer it was parsed from.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Blob<'a>(Cow<'a, [u8]>);

impl<'a> Blob<'a> {
    /// Wrap a borrowed byte slice without copying it.
    pub fn borrowed(bytes: &'a [u8]) -> Self {
        Self(Cow::Borrowed(bytes))
    }

    /// Wrap an owned byte vector.
    pub fn owned(bytes: Vec<u8>) -> Self {
        Self(Cow::Owned(bytes))
    }

    /// Copy the payload out, if it isn't already owned.
    pub fn into_owned(self) -> Blob<'static> {
        Blob(Cow::Owned(self.0.into_owned()))
    }
}

impl Deref for Blob<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl<'a> From<&'a [u8]> for Blob<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::borrowed(bytes)
    }
}

/// A single field's value: either a 64-bit unsigned integer, opaque binary
/// data, or a nested message.
#[derive(Clone, Debug, PartialEq)]
pub enum Value<'a> {
    Uint64(u64),
    Binary(Blob<'a>),
    Message(Object<'a>),
}

/// An ordered mapping of field id to [`Value`], with the invariant that every
/// field id appears at most once.
///
/// An `Object` is built up exclusively through [`Object::insert`] (directly, or
/// via the [`Decoder`](crate::decoder::Decoder) during parsing) and is
/// otherwise read-only: there is no in-place mutation of values, matching the
/// "finalized once built" lifecycle in the format's specification.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Object<'a> {
    fields: BTreeMap<FieldId, Value<'a>>,
}

impl<'a> Object<'a> {
    /// Construct a new, empty object.
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Insert `value` under `field_id`.
    ///
    /// Fails with [`ParseErrorKind::Duplicate`] if `field_id` is already
    /// present. Non-negativity of `field_id` is enforced by its type (`u64`),
    /// so unlike the reference implementation there is no separate domain
    /// check to perform here.
    pub fn insert(&mut self, field_id: FieldId, value: Value<'a>) -> Result<(), ParseError> {
        if self.fields.contains_key(&field_id) {
            return Err(ParseError::new(ParseErrorKind::Duplicate));
        }
        self.fields.insert(field_id, value);
        Ok(())
    }

    /// Look up the value stored under `field_id`, if any.
    pub fn get(&self, field_id: FieldId) -> Option<&Value<'a>> {
        self.fields.get(&field_id)
    }

    /// Remove and return the value stored under `field_id`, if any.
    pub fn remove(&mut self, field_id: FieldId) -> Option<Value<'a>> {
        self.fields.remove(&field_id)
    }

    /// The number of fields in this object.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether this object has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(field_id, value)` pairs in field-id order.
    ///
    /// Field-id order is this crate's in-memory representation detail, not a
    /// guarantee about wire layout: the format's specification explicitly
    /// disclaims stable field *iteration* order as a wire property, since the
    /// field-id set alone is a message's semantic identity.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &Value<'a>)> {
        self.fields.iter().map(|(&id, value)| (id, value))
    }

    /// Convert every borrowed [`Blob`] in this tree (including nested objects)
    /// into an owned one, detaching the tree from the lifetime of the buffer
    /// it was parsed from.
    pub fn into_owned(self) -> Object<'static> {
        let fields = self
            .fields
            .into_iter()
            .map(|(id, value)| {
                let value = match value {
                    Value::Uint64(v) => Value::Uint64(v),
                    Value::Binary(blob) => Value::Binary(blob.into_owned()),
                    Value::Message(obj) => Value::Message(obj.into_owned()),
                };
                (id, value)
            })
            .collect();
        Object { fields }
    }

    /// Recursively unwrap this object into a plain, comparison-friendly tree.
    ///
    /// This is the Rust analogue of the reference implementation's
    /// `to_dict()`: every nested [`Object`] becomes a [`PlainValue::Nested`],
    /// binary fields become owned byte vectors, and uint64 fields are left
    /// numeric. It exists purely to give tests (and any future conformance
    /// suite built atop the out-of-scope `.tjson` vector format) a plain value
    /// to assert equality against.
    pub fn to_plain(&self) -> PlainValue {
        let mut map = BTreeMap::new();
        for (id, value) in self.iter() {
            let plain = match value {
                Value::Uint64(v) => PlainValue::Uint64(*v),
                Value::Binary(blob) => PlainValue::Binary(blob.to_vec()),
                Value::Message(obj) => obj.to_plain(),
            };
            map.insert(id, plain);
        }
        PlainValue::Nested(map)
    }
}

/// The plain, owned tree produced by [`Object::to_plain`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlainValue {
    Uint64(u64),
    Binary(Vec<u8>),
    Nested(BTreeMap<FieldId, PlainValue>),
}
