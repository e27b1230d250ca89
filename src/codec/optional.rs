use crate::{Codec, CompoundBuilder, Error, NodeKind, Result, Transcoder, cold_path};

/// See [`Codec::optional`].
///
/// As a struct field, a missing entry and an explicit null both decode to
/// `None`, while a present value of the wrong kind is still an error. `None`
/// is omitted on encode unless the transcoder
/// [writes nulls for absent values](Transcoder::writes_null_for_absent).
///
/// Used outside a compound, `None` is the null node. Formats without null
/// (NBT) reject it with
/// [`ErrorKind::UnsupportedConversion`](crate::ErrorKind::UnsupportedConversion).
#[derive(Clone, Debug)]
pub struct Optional<C> {
    inner: C,
}

impl<C> Optional<C> {
    #[inline]
    pub(crate) fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: Codec> Codec for Optional<C> {
    type Value = Option<C::Value>;

    fn encode<T: Transcoder>(&self, transcoder: &T, value: &Self::Value) -> Result<T::Node> {
        match value {
            Some(value) => self.inner.encode(transcoder, value),
            None if transcoder.supports(NodeKind::Null) => Ok(transcoder.create_null()),
            None => {
                cold_path();
                Err(Error::unsupported(
                    NodeKind::Null,
                    "the format has no null to stand for an absent value",
                ))
            }
        }
    }

    fn decode<T: Transcoder>(&self, transcoder: &T, node: &T::Node) -> Result<Self::Value> {
        if transcoder.is_null(node) {
            return Ok(None);
        }
        self.inner.decode(transcoder, node).map(Some)
    }

    fn encode_field<T: Transcoder>(
        &self,
        transcoder: &T,
        name: &str,
        value: &Self::Value,
        out: &mut CompoundBuilder<T::Node>,
    ) -> Result<()> {
        match value {
            Some(value) => self.inner.encode_field(transcoder, name, value, out),
            None if transcoder.writes_null_for_absent() => {
                out.insert(name, transcoder.create_null());
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn decode_field<T: Transcoder>(
        &self,
        transcoder: &T,
        compound: &T::Node,
        name: &str,
    ) -> Result<Self::Value> {
        match transcoder.get_field_opt(compound, name)? {
            Some(node) if !transcoder.is_null(node) => self.inner.decode(transcoder, node).map(Some),
            _ => Ok(None),
        }
    }
}

/// See [`Codec::optional_or`].
///
/// A missing or null field decodes to the default. Encoding always writes the
/// value, even when it equals the default.
#[derive(Clone, Debug)]
pub struct OptionalOr<C: Codec> {
    inner: C,
    default: C::Value,
}

impl<C: Codec> OptionalOr<C> {
    #[inline]
    pub(crate) fn new(inner: C, default: C::Value) -> Self {
        Self { inner, default }
    }

    #[inline]
    pub fn default_value(&self) -> &C::Value {
        &self.default
    }
}

impl<C> Codec for OptionalOr<C>
where
    C: Codec,
    C::Value: Clone + Send + Sync,
{
    type Value = C::Value;

    #[inline]
    fn encode<T: Transcoder>(&self, transcoder: &T, value: &Self::Value) -> Result<T::Node> {
        self.inner.encode(transcoder, value)
    }

    fn decode<T: Transcoder>(&self, transcoder: &T, node: &T::Node) -> Result<Self::Value> {
        if transcoder.is_null(node) {
            return Ok(self.default.clone());
        }
        self.inner.decode(transcoder, node)
    }

    #[inline]
    fn encode_field<T: Transcoder>(
        &self,
        transcoder: &T,
        name: &str,
        value: &Self::Value,
        out: &mut CompoundBuilder<T::Node>,
    ) -> Result<()> {
        self.inner.encode_field(transcoder, name, value, out)
    }

    fn decode_field<T: Transcoder>(
        &self,
        transcoder: &T,
        compound: &T::Node,
        name: &str,
    ) -> Result<Self::Value> {
        match transcoder.get_field_opt(compound, name)? {
            Some(node) if !transcoder.is_null(node) => self.inner.decode(transcoder, node),
            _ => Ok(self.default.clone()),
        }
    }
}
