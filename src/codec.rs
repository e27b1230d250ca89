//! The value codec contract and its combinators.
//!
//! A [`Codec`] maps values of its [`Value`](Codec::Value) type to the nodes of
//! any [`Transcoder`] and back. Codecs are immutable and stateless, so one
//! instance can serve any number of threads and formats at once.
//!
//! Larger codecs are composed from the primitive codecs ([`INT`], [`STRING`],
//! ...) with the combinator methods of [`Codec`]:
//!
//! ```
//! use na_codec::{Codec, JsonTranscoder, STRING};
//! use serde_json::json;
//!
//! let tags = STRING.list_or_single(16);
//! let json = JsonTranscoder::new();
//!
//! assert_eq!(tags.decode(&json, &json!("solo")).unwrap(), vec!["solo"]);
//! assert_eq!(tags.decode(&json, &json!(["a", "b"])).unwrap(), vec!["a", "b"]);
//! assert_eq!(tags.encode(&json, &vec!["solo".to_owned()]).unwrap(), json!(["solo"]));
//! ```

use std::fmt::Display;

use crate::{CompoundBuilder, CompoundCodec, Field, InlineField, Result, Transcoder};

mod bounded;
mod either;
mod enumerated;
mod list;
mod map;
mod optional;
mod primitive;
mod xmap;

pub use bounded::*;
pub use either::*;
pub use enumerated::*;
pub use list::*;
pub use map::*;
pub use optional::*;
pub use primitive::*;
pub use xmap::*;

/// Encodes and decodes values of one logical type against any format.
///
/// The round-trip law holds for every implementation: for a value `v` the
/// codec accepts and a transcoder `t` supporting the kinds involved,
/// `decode(t, &encode(t, &v)?)?` is observably equal to `v`.
pub trait Codec: Send + Sync {
    type Value;

    fn encode<T: Transcoder>(&self, transcoder: &T, value: &Self::Value) -> Result<T::Node>;

    fn decode<T: Transcoder>(&self, transcoder: &T, node: &T::Node) -> Result<Self::Value>;

    /// Writes `value` as the compound entry `name`.
    ///
    /// Codecs that tolerate absence override this to omit the entry.
    #[inline]
    fn encode_field<T: Transcoder>(
        &self,
        transcoder: &T,
        name: &str,
        value: &Self::Value,
        out: &mut CompoundBuilder<T::Node>,
    ) -> Result<()> {
        out.insert(name, self.encode(transcoder, value)?);
        Ok(())
    }

    /// Reads the compound entry `name` of `compound`.
    ///
    /// Fails with [`ErrorKind::FieldMissing`](crate::ErrorKind::FieldMissing)
    /// unless the codec tolerates absence.
    #[inline]
    fn decode_field<T: Transcoder>(
        &self,
        transcoder: &T,
        compound: &T::Node,
        name: &str,
    ) -> Result<Self::Value> {
        self.decode(transcoder, transcoder.get_field(compound, name)?)
    }

    /// Maps this codec to another value type with a pair of total functions.
    ///
    /// Failures of this codec propagate unchanged.
    fn xmap<B, F, G>(self, to: F, from: G) -> XMap<Self, F, G>
    where
        Self: Sized,
        F: Fn(Self::Value) -> B + Send + Sync,
        G: Fn(&B) -> Self::Value + Send + Sync,
    {
        XMap::new(self, to, from)
    }

    /// Maps this codec with functions that may reject a value.
    fn try_xmap<B, F, G>(self, to: F, from: G) -> TryXMap<Self, F, G>
    where
        Self: Sized,
        F: Fn(Self::Value) -> std::result::Result<B, String> + Send + Sync,
        G: Fn(&B) -> std::result::Result<Self::Value, String> + Send + Sync,
    {
        TryXMap::new(self, to, from)
    }

    /// A missing or null field decodes to `None`; `None` is not written.
    fn optional(self) -> Optional<Self>
    where
        Self: Sized,
    {
        Optional::new(self)
    }

    /// A missing or null field decodes to `default`; values are always written.
    fn optional_or(self, default: Self::Value) -> OptionalOr<Self>
    where
        Self: Sized,
        Self::Value: Clone + Send + Sync,
    {
        OptionalOr::new(self, default)
    }

    /// A sequence of at most `max` elements.
    fn list(self, max: usize) -> ListCodec<Self>
    where
        Self: Sized,
    {
        ListCodec::new(self, max)
    }

    /// A set of at most `max` elements, encoded as a sequence.
    fn set(self, max: usize) -> SetCodec<Self>
    where
        Self: Sized,
        Self::Value: Eq + std::hash::Hash,
    {
        SetCodec::new(self, max)
    }

    /// Like [`list`](Self::list), but a bare element decodes as a one-element
    /// list.
    fn list_or_single(self, max: usize) -> ListOrSingle<Self>
    where
        Self: Sized,
    {
        ListOrSingle::new(self, max)
    }

    /// A string-keyed map encoded as a compound.
    fn map_value(self) -> ValueMap<Self>
    where
        Self: Sized,
    {
        ValueMap::new(self)
    }

    /// Rejects values outside `min..=max` in both directions.
    fn bounded(self, min: Self::Value, max: Self::Value) -> Bounded<Self>
    where
        Self: Sized,
        Self::Value: PartialOrd + Display + Send + Sync,
    {
        Bounded::new(self, min, max)
    }

    /// A struct field named `name` whose value is read with `getter`.
    fn field_of<S, G>(self, name: &'static str, getter: G) -> Field<S, Self, G>
    where
        Self: Sized,
        G: Fn(&S) -> &Self::Value + Send + Sync,
    {
        Field::new(name, self, getter)
    }

    /// A struct field whose compound is merged into the parent compound.
    fn inline_of<S, G>(self, getter: G) -> InlineField<S, Self, G>
    where
        Self: CompoundCodec + Sized,
        G: Fn(&S) -> &Self::Value + Send + Sync,
    {
        InlineField::new(self, getter)
    }
}

impl<C: Codec> Codec for &C {
    type Value = C::Value;

    #[inline]
    fn encode<T: Transcoder>(&self, transcoder: &T, value: &Self::Value) -> Result<T::Node> {
        (**self).encode(transcoder, value)
    }

    #[inline]
    fn decode<T: Transcoder>(&self, transcoder: &T, node: &T::Node) -> Result<Self::Value> {
        (**self).decode(transcoder, node)
    }

    #[inline]
    fn encode_field<T: Transcoder>(
        &self,
        transcoder: &T,
        name: &str,
        value: &Self::Value,
        out: &mut CompoundBuilder<T::Node>,
    ) -> Result<()> {
        (**self).encode_field(transcoder, name, value, out)
    }

    #[inline]
    fn decode_field<T: Transcoder>(
        &self,
        transcoder: &T,
        compound: &T::Node,
        name: &str,
    ) -> Result<Self::Value> {
        (**self).decode_field(transcoder, compound, name)
    }
}
