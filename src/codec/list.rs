use std::{collections::HashSet, hash::Hash};

use crate::{Codec, Error, Result, ResultExt, Transcoder, cold_path};

#[inline]
fn check_size(max: usize, len: usize) -> Result<()> {
    if len > max {
        cold_path();
        return Err(Error::size_exceeded(max, len));
    }
    Ok(())
}

fn encode_elements<'a, C, T, I>(inner: &C, transcoder: &T, values: I) -> Result<T::Node>
where
    C: Codec,
    C::Value: 'a,
    T: Transcoder,
    I: IntoIterator<Item = &'a C::Value>,
{
    let items = values
        .into_iter()
        .enumerate()
        .map(|(i, value)| inner.encode(transcoder, value).at_index(i))
        .collect::<Result<Vec<_>>>()?;
    Ok(transcoder.create_list(items))
}

fn decode_elements<C, T>(inner: &C, transcoder: &T, items: &[T::Node]) -> Result<Vec<C::Value>>
where
    C: Codec,
    T: Transcoder,
{
    items
        .iter()
        .enumerate()
        .map(|(i, item)| inner.decode(transcoder, item).at_index(i))
        .collect()
}

/// See [`Codec::list`].
///
/// The size cap applies in both directions and is checked before any element
/// is decoded.
#[derive(Clone, Debug)]
pub struct ListCodec<C> {
    inner: C,
    max: usize,
}

impl<C> ListCodec<C> {
    #[inline]
    pub(crate) fn new(inner: C, max: usize) -> Self {
        Self { inner, max }
    }

    #[inline]
    pub fn max_size(&self) -> usize {
        self.max
    }
}

impl<C: Codec> Codec for ListCodec<C> {
    type Value = Vec<C::Value>;

    fn encode<T: Transcoder>(&self, transcoder: &T, value: &Self::Value) -> Result<T::Node> {
        check_size(self.max, value.len())?;
        encode_elements(&self.inner, transcoder, value)
    }

    fn decode<T: Transcoder>(&self, transcoder: &T, node: &T::Node) -> Result<Self::Value> {
        let items = transcoder.get_list(node)?;
        check_size(self.max, items.len())?;
        decode_elements(&self.inner, transcoder, &items)
    }
}

/// See [`Codec::set`].
///
/// Duplicate elements in the input collapse into one.
#[derive(Clone, Debug)]
pub struct SetCodec<C> {
    inner: C,
    max: usize,
}

impl<C> SetCodec<C> {
    #[inline]
    pub(crate) fn new(inner: C, max: usize) -> Self {
        Self { inner, max }
    }

    #[inline]
    pub fn max_size(&self) -> usize {
        self.max
    }
}

impl<C> Codec for SetCodec<C>
where
    C: Codec,
    C::Value: Eq + Hash,
{
    type Value = HashSet<C::Value>;

    fn encode<T: Transcoder>(&self, transcoder: &T, value: &Self::Value) -> Result<T::Node> {
        check_size(self.max, value.len())?;
        encode_elements(&self.inner, transcoder, value)
    }

    fn decode<T: Transcoder>(&self, transcoder: &T, node: &T::Node) -> Result<Self::Value> {
        let items = transcoder.get_list(node)?;
        check_size(self.max, items.len())?;
        let decoded = decode_elements(&self.inner, transcoder, &items)?;
        let len = decoded.len();
        let set: HashSet<_> = decoded.into_iter().collect();
        if set.len() != len {
            log::debug!("collapsed {} duplicate set elements", len - set.len());
        }
        Ok(set)
    }
}

/// See [`Codec::list_or_single`].
///
/// Decoding accepts a bare element as well as a sequence. Encoding always
/// writes a sequence, even for a single element.
#[derive(Clone, Debug)]
pub struct ListOrSingle<C> {
    inner: C,
    max: usize,
}

impl<C> ListOrSingle<C> {
    #[inline]
    pub(crate) fn new(inner: C, max: usize) -> Self {
        Self { inner, max }
    }
}

impl<C: Codec> Codec for ListOrSingle<C> {
    type Value = Vec<C::Value>;

    fn encode<T: Transcoder>(&self, transcoder: &T, value: &Self::Value) -> Result<T::Node> {
        check_size(self.max, value.len())?;
        encode_elements(&self.inner, transcoder, value)
    }

    fn decode<T: Transcoder>(&self, transcoder: &T, node: &T::Node) -> Result<Self::Value> {
        if !transcoder.kind(node).is_sequence() {
            return self.inner.decode(transcoder, node).map(|value| vec![value]);
        }
        let items = transcoder.get_list(node)?;
        check_size(self.max, items.len())?;
        decode_elements(&self.inner, transcoder, &items)
    }
}
