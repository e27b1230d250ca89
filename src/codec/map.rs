use indexmap::IndexMap;

use crate::{Codec, Result, ResultExt, Transcoder};

/// See [`Codec::map_value`].
///
/// Every entry of the compound is decoded with the inner codec; keys are
/// passed through verbatim and keep their order.
#[derive(Clone, Debug)]
pub struct ValueMap<C> {
    inner: C,
}

impl<C> ValueMap<C> {
    #[inline]
    pub(crate) fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: Codec> Codec for ValueMap<C> {
    type Value = IndexMap<String, C::Value>;

    fn encode<T: Transcoder>(&self, transcoder: &T, value: &Self::Value) -> Result<T::Node> {
        let mut entries = Vec::with_capacity(value.len());
        for (key, value) in value {
            entries.push((key.clone(), self.inner.encode(transcoder, value).at_field(key)?));
        }
        Ok(transcoder.create_compound(entries))
    }

    fn decode<T: Transcoder>(&self, transcoder: &T, node: &T::Node) -> Result<Self::Value> {
        transcoder
            .get_compound(node)?
            .into_iter()
            .map(|(key, node)| {
                let value = self.inner.decode(transcoder, node).at_field(key)?;
                Ok((key.to_owned(), value))
            })
            .collect()
    }
}
