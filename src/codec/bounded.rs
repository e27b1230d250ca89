use std::fmt::Display;

use crate::{Codec, CompoundBuilder, Error, Result, Transcoder, cold_path};

/// See [`Codec::bounded`].
#[derive(Clone, Debug)]
pub struct Bounded<C: Codec> {
    inner: C,
    min: C::Value,
    max: C::Value,
}

impl<C: Codec> Bounded<C> {
    #[inline]
    pub(crate) fn new(inner: C, min: C::Value, max: C::Value) -> Self {
        Self { inner, min, max }
    }
}

impl<C> Bounded<C>
where
    C: Codec,
    C::Value: PartialOrd + Display,
{
    fn check(&self, value: &C::Value) -> Result<()> {
        if *value < self.min || *value > self.max {
            cold_path();
            return Err(Error::out_of_range(
                value,
                format_args!("[{}, {}]", self.min, self.max),
            ));
        }
        Ok(())
    }
}

impl<C> Codec for Bounded<C>
where
    C: Codec,
    C::Value: PartialOrd + Display + Send + Sync,
{
    type Value = C::Value;

    fn encode<T: Transcoder>(&self, transcoder: &T, value: &Self::Value) -> Result<T::Node> {
        self.check(value)?;
        self.inner.encode(transcoder, value)
    }

    fn decode<T: Transcoder>(&self, transcoder: &T, node: &T::Node) -> Result<Self::Value> {
        let value = self.inner.decode(transcoder, node)?;
        self.check(&value)?;
        Ok(value)
    }

    fn encode_field<T: Transcoder>(
        &self,
        transcoder: &T,
        name: &str,
        value: &Self::Value,
        out: &mut CompoundBuilder<T::Node>,
    ) -> Result<()> {
        self.check(value)?;
        self.inner.encode_field(transcoder, name, value, out)
    }

    fn decode_field<T: Transcoder>(
        &self,
        transcoder: &T,
        compound: &T::Node,
        name: &str,
    ) -> Result<Self::Value> {
        let value = self.inner.decode_field(transcoder, compound, name)?;
        self.check(&value)?;
        Ok(value)
    }
}
