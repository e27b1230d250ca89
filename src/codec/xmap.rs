use crate::{Codec, CompoundBuilder, CompoundCodec, Error, Result, Transcoder};

/// See [`Codec::xmap`].
#[derive(Clone, Debug)]
pub struct XMap<C, F, G> {
    inner: C,
    to: F,
    from: G,
}

impl<C, F, G> XMap<C, F, G> {
    #[inline]
    pub(crate) fn new(inner: C, to: F, from: G) -> Self {
        Self { inner, to, from }
    }
}

impl<C, F, G, B> Codec for XMap<C, F, G>
where
    C: Codec,
    F: Fn(C::Value) -> B + Send + Sync,
    G: Fn(&B) -> C::Value + Send + Sync,
{
    type Value = B;

    #[inline]
    fn encode<T: Transcoder>(&self, transcoder: &T, value: &B) -> Result<T::Node> {
        self.inner.encode(transcoder, &(self.from)(value))
    }

    #[inline]
    fn decode<T: Transcoder>(&self, transcoder: &T, node: &T::Node) -> Result<B> {
        self.inner.decode(transcoder, node).map(&self.to)
    }

    #[inline]
    fn encode_field<T: Transcoder>(
        &self,
        transcoder: &T,
        name: &str,
        value: &B,
        out: &mut CompoundBuilder<T::Node>,
    ) -> Result<()> {
        self.inner
            .encode_field(transcoder, name, &(self.from)(value), out)
    }

    #[inline]
    fn decode_field<T: Transcoder>(
        &self,
        transcoder: &T,
        compound: &T::Node,
        name: &str,
    ) -> Result<B> {
        self.inner
            .decode_field(transcoder, compound, name)
            .map(&self.to)
    }
}

impl<C, F, G, B> CompoundCodec for XMap<C, F, G>
where
    C: CompoundCodec,
    F: Fn(C::Value) -> B + Send + Sync,
    G: Fn(&B) -> C::Value + Send + Sync,
{
    #[inline]
    fn keys(&self) -> Vec<&str> {
        self.inner.keys()
    }
}

/// See [`Codec::try_xmap`].
#[derive(Clone, Debug)]
pub struct TryXMap<C, F, G> {
    inner: C,
    to: F,
    from: G,
}

impl<C, F, G> TryXMap<C, F, G> {
    #[inline]
    pub(crate) fn new(inner: C, to: F, from: G) -> Self {
        Self { inner, to, from }
    }
}

impl<C, F, G, B> Codec for TryXMap<C, F, G>
where
    C: Codec,
    F: Fn(C::Value) -> std::result::Result<B, String> + Send + Sync,
    G: Fn(&B) -> std::result::Result<C::Value, String> + Send + Sync,
{
    type Value = B;

    fn encode<T: Transcoder>(&self, transcoder: &T, value: &B) -> Result<T::Node> {
        let inner = (self.from)(value).map_err(Error::message)?;
        self.inner.encode(transcoder, &inner)
    }

    fn decode<T: Transcoder>(&self, transcoder: &T, node: &T::Node) -> Result<B> {
        (self.to)(self.inner.decode(transcoder, node)?).map_err(Error::message)
    }

    fn encode_field<T: Transcoder>(
        &self,
        transcoder: &T,
        name: &str,
        value: &B,
        out: &mut CompoundBuilder<T::Node>,
    ) -> Result<()> {
        let inner = (self.from)(value).map_err(Error::message)?;
        self.inner.encode_field(transcoder, name, &inner, out)
    }

    fn decode_field<T: Transcoder>(
        &self,
        transcoder: &T,
        compound: &T::Node,
        name: &str,
    ) -> Result<B> {
        (self.to)(self.inner.decode_field(transcoder, compound, name)?)
            .map_err(Error::message)
    }
}
