use std::marker::PhantomData;

use crate::{Codec, CompoundBuilder, CompoundCodec, Error, Result, ResultExt, Transcoder};

/// One entry of a [`StructCodec`](crate::StructCodec) field list.
pub trait FieldSpec: Send + Sync {
    /// The struct the field is read from.
    type Source;
    /// The decoded field value.
    type Value;

    /// The compound keys this field occupies.
    fn keys(&self) -> Vec<&str>;

    fn encode_into<T: Transcoder>(
        &self,
        transcoder: &T,
        source: &Self::Source,
        out: &mut CompoundBuilder<T::Node>,
    ) -> Result<()>;

    fn decode_from<T: Transcoder>(&self, transcoder: &T, compound: &T::Node)
    -> Result<Self::Value>;
}

/// A named field. See [`Codec::field_of`].
pub struct Field<S, C, G> {
    name: &'static str,
    codec: C,
    getter: G,
    _marker: PhantomData<fn(&S)>,
}

impl<S, C, G> Field<S, C, G> {
    #[inline]
    pub(crate) fn new(name: &'static str, codec: C, getter: G) -> Self {
        Self {
            name,
            codec,
            getter,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<S, C, G> FieldSpec for Field<S, C, G>
where
    C: Codec,
    G: Fn(&S) -> &C::Value + Send + Sync,
{
    type Source = S;
    type Value = C::Value;

    #[inline]
    fn keys(&self) -> Vec<&str> {
        vec![self.name]
    }

    #[inline]
    fn encode_into<T: Transcoder>(
        &self,
        transcoder: &T,
        source: &S,
        out: &mut CompoundBuilder<T::Node>,
    ) -> Result<()> {
        self.codec
            .encode_field(transcoder, self.name, (self.getter)(source), out)
            .at_field(self.name)
    }

    #[inline]
    fn decode_from<T: Transcoder>(&self, transcoder: &T, compound: &T::Node) -> Result<C::Value> {
        self.codec
            .decode_field(transcoder, compound, self.name)
            .at_field(self.name)
    }
}

/// A field whose compound is flattened into the parent. See
/// [`Codec::inline_of`].
pub struct InlineField<S, C, G> {
    codec: C,
    getter: G,
    _marker: PhantomData<fn(&S)>,
}

impl<S, C, G> InlineField<S, C, G> {
    #[inline]
    pub(crate) fn new(codec: C, getter: G) -> Self {
        Self {
            codec,
            getter,
            _marker: PhantomData,
        }
    }
}

impl<S, C, G> FieldSpec for InlineField<S, C, G>
where
    C: CompoundCodec,
    G: Fn(&S) -> &C::Value + Send + Sync,
{
    type Source = S;
    type Value = C::Value;

    #[inline]
    fn keys(&self) -> Vec<&str> {
        self.codec.keys()
    }

    fn encode_into<T: Transcoder>(
        &self,
        transcoder: &T,
        source: &S,
        out: &mut CompoundBuilder<T::Node>,
    ) -> Result<()> {
        let node = self.codec.encode(transcoder, (self.getter)(source))?;
        let kind = transcoder.kind(&node);
        if kind != crate::NodeKind::Compound {
            return Err(Error::compound_expected(kind));
        }
        out.merge(transcoder, node)
    }

    #[inline]
    fn decode_from<T: Transcoder>(&self, transcoder: &T, compound: &T::Node) -> Result<C::Value> {
        self.codec.decode(transcoder, compound)
    }
}
