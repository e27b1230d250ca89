use std::fmt;

use crate::{Codec, NodeKind, Result, Transcoder, convert};

/// A node captured together with the transcoder that understands it.
///
/// A raw value can be converted to any other format without knowing the
/// logical type it encodes, and converted any number of times.
///
/// ```
/// use na_codec::{JsonTranscoder, NbtTranscoder, RawValue, Tag};
/// use serde_json::json;
///
/// let raw = RawValue::of(JsonTranscoder::new(), json!({ "name": "quest", "level": 3 }));
/// let nbt = raw.convert_to(&NbtTranscoder).unwrap();
///
/// let compound = nbt.as_compound().unwrap();
/// assert_eq!(compound.get("name"), Some(&Tag::String("quest".into())));
/// assert_eq!(compound.get("level"), Some(&Tag::Long(3)));
/// ```
pub struct RawValue<T: Transcoder> {
    transcoder: T,
    node: T::Node,
}

impl<T: Transcoder> RawValue<T> {
    #[inline]
    pub fn of(transcoder: T, node: T::Node) -> Self {
        Self { transcoder, node }
    }

    /// Encodes `value` with `codec` and captures the result.
    pub fn encode<C: Codec>(transcoder: T, codec: &C, value: &C::Value) -> Result<Self> {
        let node = codec.encode(&transcoder, value)?;
        Ok(Self { transcoder, node })
    }

    #[inline]
    pub fn node(&self) -> &T::Node {
        &self.node
    }

    #[inline]
    pub fn transcoder(&self) -> &T {
        &self.transcoder
    }

    #[inline]
    pub fn into_node(self) -> T::Node {
        self.node
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.transcoder.kind(&self.node)
    }

    /// Decodes the captured node with `codec`.
    #[inline]
    pub fn decode<C: Codec>(&self, codec: &C) -> Result<C::Value> {
        codec.decode(&self.transcoder, &self.node)
    }

    /// Rebuilds the captured node in the format of `target`.
    ///
    /// Fails with
    /// [`ErrorKind::UnsupportedConversion`](crate::ErrorKind::UnsupportedConversion)
    /// when the node contains a kind `target` cannot represent.
    #[inline]
    pub fn convert_to<U: Transcoder>(&self, target: &U) -> Result<U::Node> {
        convert(&self.transcoder, &self.node, target)
    }

    /// Like [`convert_to`](Self::convert_to), capturing the result with
    /// `target`.
    pub fn convert<U: Transcoder>(&self, target: U) -> Result<RawValue<U>> {
        let node = convert(&self.transcoder, &self.node, &target)?;
        Ok(RawValue::of(target, node))
    }
}

impl<T: Transcoder + Clone> Clone for RawValue<T> {
    fn clone(&self) -> Self {
        Self {
            transcoder: self.transcoder.clone(),
            node: self.node.clone(),
        }
    }
}

impl<T: Transcoder> fmt::Debug for RawValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawValue").field(&self.node).finish()
    }
}

impl<T: Transcoder> PartialEq for RawValue<T>
where
    T::Node: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}
