//! Compound codecs built from an ordered list of named fields.
//!
//! ```
//! use na_codec::{Codec, JsonTranscoder, StructCodec, STRING};
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq)]
//! struct Inner {
//!     inner_value: String,
//! }
//!
//! #[derive(Debug, PartialEq)]
//! struct Outer {
//!     outer_value: String,
//!     inner: Inner,
//! }
//!
//! let inner = StructCodec::of(
//!     (STRING.field_of("inner_value", |i: &Inner| &i.inner_value),),
//!     |(inner_value,)| Inner { inner_value },
//! )
//! .unwrap();
//!
//! let outer = StructCodec::of(
//!     (
//!         STRING.field_of("outer_value", |o: &Outer| &o.outer_value),
//!         inner.inline_of(|o: &Outer| &o.inner),
//!     ),
//!     |(outer_value, inner)| Outer { outer_value, inner },
//! )
//! .unwrap();
//!
//! let value = Outer {
//!     outer_value: "test".into(),
//!     inner: Inner { inner_value: "x".into() },
//! };
//! let node = outer.encode(&JsonTranscoder::new(), &value).unwrap();
//! assert_eq!(node, json!({ "outer_value": "test", "inner_value": "x" }));
//! ```

use std::collections::HashSet;

use crate::{Codec, CompoundBuilder, Error, ErrorKind, NodeKind, Result, Transcoder, cold_path};

mod field;

pub use field::*;

/// A codec whose encoded form is always a compound with a known key set.
///
/// Only compound codecs can be flattened into a parent struct with
/// [`Codec::inline_of`].
pub trait CompoundCodec: Codec {
    fn keys(&self) -> Vec<&str>;
}

impl<C: CompoundCodec> CompoundCodec for &C {
    #[inline]
    fn keys(&self) -> Vec<&str> {
        (**self).keys()
    }
}

/// An ordered tuple of [`FieldSpec`]s reading the same source type.
///
/// Implemented for tuples of one to sixteen fields.
pub trait FieldSet: Send + Sync {
    type Source;
    /// The decoded values, one per field, in declaration order.
    type Values;

    fn keys(&self) -> Vec<&str>;

    fn encode_fields<T: Transcoder>(
        &self,
        transcoder: &T,
        source: &Self::Source,
        out: &mut CompoundBuilder<T::Node>,
    ) -> Result<()>;

    fn decode_fields<T: Transcoder>(
        &self,
        transcoder: &T,
        compound: &T::Node,
    ) -> Result<Self::Values>;
}

macro_rules! impl_field_set {
    ($(($F:ident, $idx:tt)),+) => {
        impl<S, $($F),+> FieldSet for ($($F,)+)
        where
            $($F: FieldSpec<Source = S>,)+
        {
            type Source = S;
            type Values = ($($F::Value,)+);

            fn keys(&self) -> Vec<&str> {
                let mut keys = Vec::new();
                $(keys.extend(self.$idx.keys());)+
                keys
            }

            #[inline]
            fn encode_fields<T: Transcoder>(
                &self,
                transcoder: &T,
                source: &S,
                out: &mut CompoundBuilder<T::Node>,
            ) -> Result<()> {
                $(self.$idx.encode_into(transcoder, source, out)?;)+
                Ok(())
            }

            #[inline]
            fn decode_fields<T: Transcoder>(
                &self,
                transcoder: &T,
                compound: &T::Node,
            ) -> Result<Self::Values> {
                Ok(($(self.$idx.decode_from(transcoder, compound)?,)+))
            }
        }
    };
}

impl_field_set!((F0, 0));
impl_field_set!((F0, 0), (F1, 1));
impl_field_set!((F0, 0), (F1, 1), (F2, 2));
impl_field_set!((F0, 0), (F1, 1), (F2, 2), (F3, 3));
impl_field_set!((F0, 0), (F1, 1), (F2, 2), (F3, 3), (F4, 4));
impl_field_set!((F0, 0), (F1, 1), (F2, 2), (F3, 3), (F4, 4), (F5, 5));
impl_field_set!((F0, 0), (F1, 1), (F2, 2), (F3, 3), (F4, 4), (F5, 5), (F6, 6));
impl_field_set!(
    (F0, 0), (F1, 1), (F2, 2), (F3, 3), (F4, 4), (F5, 5), (F6, 6), (F7, 7)
);
impl_field_set!(
    (F0, 0), (F1, 1), (F2, 2), (F3, 3), (F4, 4), (F5, 5), (F6, 6), (F7, 7),
    (F8, 8)
);
impl_field_set!(
    (F0, 0), (F1, 1), (F2, 2), (F3, 3), (F4, 4), (F5, 5), (F6, 6), (F7, 7),
    (F8, 8), (F9, 9)
);
impl_field_set!(
    (F0, 0), (F1, 1), (F2, 2), (F3, 3), (F4, 4), (F5, 5), (F6, 6), (F7, 7),
    (F8, 8), (F9, 9), (F10, 10)
);
impl_field_set!(
    (F0, 0), (F1, 1), (F2, 2), (F3, 3), (F4, 4), (F5, 5), (F6, 6), (F7, 7),
    (F8, 8), (F9, 9), (F10, 10), (F11, 11)
);
impl_field_set!(
    (F0, 0), (F1, 1), (F2, 2), (F3, 3), (F4, 4), (F5, 5), (F6, 6), (F7, 7),
    (F8, 8), (F9, 9), (F10, 10), (F11, 11), (F12, 12)
);
impl_field_set!(
    (F0, 0), (F1, 1), (F2, 2), (F3, 3), (F4, 4), (F5, 5), (F6, 6), (F7, 7),
    (F8, 8), (F9, 9), (F10, 10), (F11, 11), (F12, 12), (F13, 13)
);
impl_field_set!(
    (F0, 0), (F1, 1), (F2, 2), (F3, 3), (F4, 4), (F5, 5), (F6, 6), (F7, 7),
    (F8, 8), (F9, 9), (F10, 10), (F11, 11), (F12, 12), (F13, 13), (F14, 14)
);
impl_field_set!(
    (F0, 0), (F1, 1), (F2, 2), (F3, 3), (F4, 4), (F5, 5), (F6, 6), (F7, 7),
    (F8, 8), (F9, 9), (F10, 10), (F11, 11), (F12, 12), (F13, 13), (F14, 14),
    (F15, 15)
);

fn duplicate_key(keys: Vec<&str>) -> Option<String> {
    let mut seen = HashSet::with_capacity(keys.len());
    keys.into_iter()
        .find(|key| !seen.insert(*key))
        .map(str::to_owned)
}

/// A record codec: an ordered field list plus a constructor.
///
/// Encoding writes every field into one compound; inline fields merge their
/// own compound into it. Decoding requires a compound, decodes the fields in
/// declaration order (independent of the compound's key order), stops at the
/// first failing field and hands the values to the constructor.
pub struct StructCodec<F, K> {
    fields: F,
    constructor: K,
}

impl<F, K> StructCodec<F, K>
where
    F: FieldSet,
    K: Fn(F::Values) -> F::Source + Send + Sync,
{
    /// Builds the codec, rejecting field lists in which two fields (inline
    /// fields included) claim the same key.
    pub fn of(fields: F, constructor: K) -> Result<Self> {
        if let Some(key) = duplicate_key(fields.keys()) {
            cold_path();
            log::debug!("rejecting struct codec: duplicate field `{key}`");
            return Err(Error::new(ErrorKind::DuplicateField(key)));
        }
        Ok(Self {
            fields,
            constructor,
        })
    }

    #[inline]
    pub fn fields(&self) -> &F {
        &self.fields
    }
}

impl<F, K> Codec for StructCodec<F, K>
where
    F: FieldSet,
    K: Fn(F::Values) -> F::Source + Send + Sync,
{
    type Value = F::Source;

    fn encode<T: Transcoder>(&self, transcoder: &T, value: &F::Source) -> Result<T::Node> {
        let mut out = CompoundBuilder::new();
        self.fields.encode_fields(transcoder, value, &mut out)?;
        Ok(out.build(transcoder))
    }

    fn decode<T: Transcoder>(&self, transcoder: &T, node: &T::Node) -> Result<F::Source> {
        let kind = transcoder.kind(node);
        if kind != NodeKind::Compound {
            cold_path();
            return Err(Error::compound_expected(kind));
        }
        let values = self.fields.decode_fields(transcoder, node)?;
        Ok((self.constructor)(values))
    }
}

impl<F, K> CompoundCodec for StructCodec<F, K>
where
    F: FieldSet,
    K: Fn(F::Values) -> F::Source + Send + Sync,
{
    #[inline]
    fn keys(&self) -> Vec<&str> {
        self.fields.keys()
    }
}
