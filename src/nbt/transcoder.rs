use std::borrow::Cow;

use crate::{
    Compound, Error, NodeKind, Result, ResultExt, Tag, Transcoder, cold_path,
    transcoder::narrow_float,
};

/// A [`Transcoder`] over the owned NBT tree [`Tag`].
///
/// * Booleans are stored as bytes `0`/`1`; every integral tag reads back as a
///   boolean (non-zero is `true`).
/// * Integral getters accept any integral tag and fail with
///   [`ErrorKind::OutOfRange`](crate::ErrorKind::OutOfRange) when the value
///   does not fit. Float getters accept any numeric tag.
/// * There is no null: [`create_null`](Transcoder::create_null) yields
///   [`Tag::End`], which compounds never store.
/// * Lists are homogeneous. A list built from elements of different tag
///   types is stored as a list of compounds, each non-compound element
///   wrapped as `{"": element}`. [`get_list`](Transcoder::get_list) unwraps
///   such elements again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NbtTranscoder;

const WRAPPER_KEY: &str = "";

fn kind_of(tag: &Tag) -> NodeKind {
    match tag {
        Tag::End => NodeKind::Null,
        Tag::Byte(_) => NodeKind::Byte,
        Tag::Short(_) => NodeKind::Short,
        Tag::Int(_) => NodeKind::Int,
        Tag::Long(_) => NodeKind::Long,
        Tag::Float(_) => NodeKind::Float,
        Tag::Double(_) => NodeKind::Double,
        Tag::ByteArray(_) => NodeKind::ByteArray,
        Tag::String(_) => NodeKind::String,
        Tag::List(_) => NodeKind::List,
        Tag::Compound(_) => NodeKind::Compound,
        Tag::IntArray(_) => NodeKind::IntArray,
        Tag::LongArray(_) => NodeKind::LongArray,
    }
}

#[inline]
fn integral(tag: &Tag) -> Option<i64> {
    match *tag {
        Tag::Byte(value) => Some(value.into()),
        Tag::Short(value) => Some(value.into()),
        Tag::Int(value) => Some(value.into()),
        Tag::Long(value) => Some(value),
        _ => None,
    }
}

#[inline]
fn numeric(tag: &Tag) -> Option<f64> {
    match *tag {
        Tag::Float(value) => Some(value.into()),
        Tag::Double(value) => Some(value),
        _ => integral(tag).map(|value| value as f64),
    }
}

macro_rules! narrow {
    ($tag:expr, $ty:ty, $kind:ident) => {{
        let tag = $tag;
        match integral(tag) {
            Some(value) => <$ty>::try_from(value).map_err(|_| {
                cold_path();
                Error::out_of_range(value, NodeKind::$kind)
            }),
            None => {
                cold_path();
                Err(Error::type_mismatch(NodeKind::$kind, kind_of(tag)))
            }
        }
    }};
}

fn is_wrapper(compound: &Compound) -> bool {
    compound.len() == 1 && compound.contains_key(WRAPPER_KEY)
}

fn wrap_element(tag: Tag) -> Tag {
    match tag {
        Tag::Compound(compound) if !is_wrapper(&compound) => Tag::Compound(compound),
        tag => {
            let mut wrapper = Compound::with_capacity(1);
            wrapper.insert(WRAPPER_KEY, tag);
            Tag::Compound(wrapper)
        }
    }
}

fn unwrap_element(tag: &Tag) -> Tag {
    match tag {
        Tag::Compound(compound) if is_wrapper(compound) => compound
            .get(WRAPPER_KEY)
            .cloned()
            .unwrap_or_default(),
        tag => tag.clone(),
    }
}

impl NbtTranscoder {
    fn sequence<V>(
        &self,
        tag: &Tag,
        expected: NodeKind,
        get: impl Fn(&Tag) -> Result<V>,
    ) -> Result<Vec<V>> {
        match tag {
            Tag::List(_) => self
                .get_list(tag)?
                .iter()
                .enumerate()
                .map(|(index, item)| get(item).at_index(index))
                .collect(),
            _ => {
                cold_path();
                Err(Error::type_mismatch(expected, kind_of(tag)))
            }
        }
    }
}

impl Transcoder for NbtTranscoder {
    type Node = Tag;

    #[inline]
    fn kind(&self, node: &Tag) -> NodeKind {
        kind_of(node)
    }

    #[inline]
    fn create_null(&self) -> Tag {
        Tag::End
    }

    #[inline]
    fn is_null(&self, node: &Tag) -> bool {
        matches!(node, Tag::End)
    }

    #[inline]
    fn create_bool(&self, value: bool) -> Tag {
        Tag::Byte(value as i8)
    }

    fn get_bool(&self, node: &Tag) -> Result<bool> {
        match integral(node) {
            Some(value) => Ok(value != 0),
            None => {
                cold_path();
                Err(Error::type_mismatch(NodeKind::Bool, kind_of(node)))
            }
        }
    }

    #[inline]
    fn create_byte(&self, value: i8) -> Tag {
        Tag::Byte(value)
    }

    #[inline]
    fn get_byte(&self, node: &Tag) -> Result<i8> {
        narrow!(node, i8, Byte)
    }

    #[inline]
    fn create_short(&self, value: i16) -> Tag {
        Tag::Short(value)
    }

    #[inline]
    fn get_short(&self, node: &Tag) -> Result<i16> {
        narrow!(node, i16, Short)
    }

    #[inline]
    fn create_int(&self, value: i32) -> Tag {
        Tag::Int(value)
    }

    #[inline]
    fn get_int(&self, node: &Tag) -> Result<i32> {
        narrow!(node, i32, Int)
    }

    #[inline]
    fn create_long(&self, value: i64) -> Tag {
        Tag::Long(value)
    }

    #[inline]
    fn get_long(&self, node: &Tag) -> Result<i64> {
        narrow!(node, i64, Long)
    }

    #[inline]
    fn create_float(&self, value: f32) -> Tag {
        Tag::Float(value)
    }

    fn get_float(&self, node: &Tag) -> Result<f32> {
        match *node {
            Tag::Float(value) => Ok(value),
            _ => match numeric(node) {
                Some(value) => narrow_float(value),
                None => {
                    cold_path();
                    Err(Error::type_mismatch(NodeKind::Float, kind_of(node)))
                }
            },
        }
    }

    #[inline]
    fn create_double(&self, value: f64) -> Tag {
        Tag::Double(value)
    }

    fn get_double(&self, node: &Tag) -> Result<f64> {
        numeric(node).ok_or_else(|| {
            cold_path();
            Error::type_mismatch(NodeKind::Double, kind_of(node))
        })
    }

    #[inline]
    fn create_string(&self, value: &str) -> Tag {
        Tag::String(value.to_owned())
    }

    fn get_string<'n>(&self, node: &'n Tag) -> Result<Cow<'n, str>> {
        match node {
            Tag::String(value) => Ok(Cow::Borrowed(value)),
            _ => {
                cold_path();
                Err(Error::type_mismatch(NodeKind::String, kind_of(node)))
            }
        }
    }

    fn create_list(&self, items: Vec<Tag>) -> Tag {
        let homogeneous = items
            .first()
            .is_none_or(|first| items.iter().all(|item| item.id() == first.id()));
        let wrapped_compounds = items
            .iter()
            .any(|item| matches!(item, Tag::Compound(compound) if is_wrapper(compound)));
        if homogeneous && !wrapped_compounds {
            return Tag::List(items);
        }
        log::trace!(
            "wrapping {} list elements of mixed tag types in compounds",
            items.len()
        );
        Tag::List(items.into_iter().map(wrap_element).collect())
    }

    fn get_list<'n>(&self, node: &'n Tag) -> Result<Cow<'n, [Tag]>> {
        match node {
            Tag::List(items) => {
                let wrapped = items
                    .iter()
                    .any(|item| matches!(item, Tag::Compound(compound) if is_wrapper(compound)));
                if wrapped {
                    Ok(Cow::Owned(items.iter().map(unwrap_element).collect()))
                } else {
                    Ok(Cow::Borrowed(items))
                }
            }
            Tag::ByteArray(values) => Ok(values.iter().map(|&v| Tag::Byte(v)).collect()),
            Tag::IntArray(values) => Ok(values.iter().map(|&v| Tag::Int(v)).collect()),
            Tag::LongArray(values) => Ok(values.iter().map(|&v| Tag::Long(v)).collect()),
            _ => {
                cold_path();
                Err(Error::type_mismatch(NodeKind::List, kind_of(node)))
            }
        }
    }

    fn create_compound(&self, entries: Vec<(String, Tag)>) -> Tag {
        // Compound::insert drops End values
        Tag::Compound(entries.into_iter().collect())
    }

    fn get_compound<'n>(&self, node: &'n Tag) -> Result<Vec<(&'n str, &'n Tag)>> {
        match node {
            Tag::Compound(compound) => Ok(compound
                .iter()
                .map(|(key, value)| (key.as_str(), value))
                .collect()),
            _ => {
                cold_path();
                Err(Error::compound_expected(kind_of(node)))
            }
        }
    }

    fn get_field_opt<'n>(&self, node: &'n Tag, name: &str) -> Result<Option<&'n Tag>> {
        match node {
            Tag::Compound(compound) => Ok(compound.get(name)),
            _ => {
                cold_path();
                Err(Error::compound_expected(kind_of(node)))
            }
        }
    }

    fn take_compound(&self, node: Tag) -> Result<Vec<(String, Tag)>> {
        match node {
            Tag::Compound(compound) => Ok(compound.into_iter().collect()),
            other => {
                cold_path();
                Err(Error::compound_expected(kind_of(&other)))
            }
        }
    }

    #[inline]
    fn supports(&self, kind: NodeKind) -> bool {
        kind != NodeKind::Null
    }

    #[inline]
    fn create_byte_array(&self, values: &[i8]) -> Tag {
        Tag::ByteArray(values.to_vec())
    }

    fn get_byte_array(&self, node: &Tag) -> Result<Vec<i8>> {
        match node {
            Tag::ByteArray(values) => Ok(values.clone()),
            _ => self.sequence(node, NodeKind::ByteArray, |item| self.get_byte(item)),
        }
    }

    #[inline]
    fn create_int_array(&self, values: &[i32]) -> Tag {
        Tag::IntArray(values.to_vec())
    }

    fn get_int_array(&self, node: &Tag) -> Result<Vec<i32>> {
        match node {
            Tag::IntArray(values) => Ok(values.clone()),
            _ => self.sequence(node, NodeKind::IntArray, |item| self.get_int(item)),
        }
    }

    #[inline]
    fn create_long_array(&self, values: &[i64]) -> Tag {
        Tag::LongArray(values.to_vec())
    }

    fn get_long_array(&self, node: &Tag) -> Result<Vec<i64>> {
        match node {
            Tag::LongArray(values) => Ok(values.clone()),
            _ => self.sequence(node, NodeKind::LongArray, |item| self.get_long(item)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn integral_getters_widen_and_narrow() {
        let nbt = NbtTranscoder;
        assert_eq!(nbt.get_long(&Tag::Byte(-3)).unwrap(), -3);
        assert_eq!(nbt.get_byte(&Tag::Long(100)).unwrap(), 100);
        let err = nbt.get_byte(&Tag::Int(300)).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OutOfRange { .. }));
        let err = nbt.get_int(&Tag::Double(1.0)).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::TypeMismatch {
                expected: NodeKind::Int,
                found: NodeKind::Double
            }
        ));
    }

    #[test]
    fn mixed_list_is_wrapped_and_unwrapped() {
        let nbt = NbtTranscoder;
        let items = vec![Tag::Int(1), Tag::String("two".into())];
        let list = nbt.create_list(items.clone());

        let Tag::List(stored) = &list else {
            panic!("expected a list, got {list:?}");
        };
        assert!(stored.iter().all(|item| item.id() == crate::TagID::Compound));
        assert_eq!(nbt.get_list(&list).unwrap().into_owned(), items);
    }

    #[test]
    fn homogeneous_list_is_borrowed() {
        let nbt = NbtTranscoder;
        let list = nbt.create_list(vec![Tag::Int(1), Tag::Int(2)]);
        assert!(matches!(nbt.get_list(&list).unwrap(), Cow::Borrowed(_)));
    }

    #[test]
    fn compound_skips_end_values() {
        let nbt = NbtTranscoder;
        let compound = nbt.create_compound(vec![
            ("a".into(), Tag::Int(1)),
            ("b".into(), nbt.create_null()),
        ]);
        assert_eq!(nbt.get_compound(&compound).unwrap().len(), 1);
        assert_eq!(nbt.get_field_opt(&compound, "b").unwrap(), None);
    }
}
