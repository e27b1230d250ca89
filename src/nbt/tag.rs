use indexmap::IndexMap;

use crate::TagID;

/// An owned NBT value.
///
/// `End` only appears as the payload of an empty root or as the stand-in for
/// an absent value; it is never stored inside a compound.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Tag {
    #[default]
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<Tag>),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    pub const fn id(&self) -> TagID {
        match self {
            Tag::End => TagID::End,
            Tag::Byte(_) => TagID::Byte,
            Tag::Short(_) => TagID::Short,
            Tag::Int(_) => TagID::Int,
            Tag::Long(_) => TagID::Long,
            Tag::Float(_) => TagID::Float,
            Tag::Double(_) => TagID::Double,
            Tag::ByteArray(_) => TagID::ByteArray,
            Tag::String(_) => TagID::String,
            Tag::List(_) => TagID::List,
            Tag::Compound(_) => TagID::Compound,
            Tag::IntArray(_) => TagID::IntArray,
            Tag::LongArray(_) => TagID::LongArray,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::String(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Tag]> {
        match self {
            Tag::List(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Tag::Compound(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Tag::Compound(value) => Some(value),
            _ => None,
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Tag {
                #[inline]
                fn from(value: $ty) -> Self {
                    Tag::$variant(value)
                }
            }
        )*
    };
}

impl_from!(
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<i8> => ByteArray,
    String => String,
    Vec<Tag> => List,
    Compound => Compound,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
);

impl From<&str> for Tag {
    #[inline]
    fn from(value: &str) -> Self {
        Tag::String(value.to_owned())
    }
}

impl From<bool> for Tag {
    #[inline]
    fn from(value: bool) -> Self {
        Tag::Byte(value as i8)
    }
}

/// An insertion-ordered NBT compound.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Compound(IndexMap<String, Tag>);

impl Compound {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.0.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Tag> {
        self.0.get_mut(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Inserts an entry, returning the value it replaced. An `End` value
    /// removes the entry instead.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Tag>) -> Option<Tag> {
        let key = key.into();
        match value.into() {
            Tag::End => self.0.shift_remove(&key),
            value => self.0.insert(key, value),
        }
    }

    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        self.0.shift_remove(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Tag> {
        self.0.iter()
    }

    #[inline]
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Tag> {
        self.0.keys()
    }
}

impl<K: Into<String>, V: Into<Tag>> FromIterator<(K, V)> for Compound {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut compound = Compound::new();
        for (key, value) in iter {
            compound.insert(key, value);
        }
        compound
    }
}

impl IntoIterator for Compound {
    type Item = (String, Tag);
    type IntoIter = indexmap::map::IntoIter<String, Tag>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Tag);
    type IntoIter = indexmap::map::Iter<'a, String, Tag>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A root tag together with its name, as stored in binary NBT.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NamedTag {
    pub name: String,
    pub tag: Tag,
}

impl NamedTag {
    #[inline]
    pub fn new(name: impl Into<String>, tag: impl Into<Tag>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_keeps_insertion_order() {
        let compound: Compound = [("b", 1), ("a", 2), ("c", 3)].into_iter().collect();
        let keys: Vec<_> = compound.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn inserting_end_removes() {
        let mut compound = Compound::new();
        compound.insert("a", 1i32);
        compound.insert("b", 2i32);
        assert_eq!(compound.insert("a", Tag::End), Some(Tag::Int(1)));
        assert!(!compound.contains_key("a"));
        assert_eq!(compound.len(), 1);
    }
}
