use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, SeqAccess, Visitor},
    ser::{SerializeMap, SerializeSeq},
};

use crate::{Compound, Tag};

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Tag::End => serializer.serialize_unit(),
            Tag::Byte(value) => serializer.serialize_i8(*value),
            Tag::Short(value) => serializer.serialize_i16(*value),
            Tag::Int(value) => serializer.serialize_i32(*value),
            Tag::Long(value) => serializer.serialize_i64(*value),
            Tag::Float(value) => serializer.serialize_f32(*value),
            Tag::Double(value) => serializer.serialize_f64(*value),
            Tag::ByteArray(values) => values.serialize(serializer),
            Tag::String(value) => serializer.serialize_str(value),
            Tag::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Tag::Compound(compound) => compound.serialize(serializer),
            Tag::IntArray(values) => values.serialize(serializer),
            Tag::LongArray(values) => values.serialize(serializer),
        }
    }
}

impl Serialize for Compound {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct TagVisitor;

impl<'de> Visitor<'de> for TagVisitor {
    type Value = Tag;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an NBT value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Tag, E> {
        Ok(Tag::Byte(v as i8))
    }

    fn visit_i8<E: de::Error>(self, v: i8) -> Result<Tag, E> {
        Ok(Tag::Byte(v))
    }

    fn visit_i16<E: de::Error>(self, v: i16) -> Result<Tag, E> {
        Ok(Tag::Short(v))
    }

    fn visit_i32<E: de::Error>(self, v: i32) -> Result<Tag, E> {
        Ok(Tag::Int(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Tag, E> {
        Ok(Tag::Long(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Tag, E> {
        i64::try_from(v)
            .map(Tag::Long)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &"a signed 64-bit integer"))
    }

    fn visit_f32<E: de::Error>(self, v: f32) -> Result<Tag, E> {
        Ok(Tag::Float(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Tag, E> {
        Ok(Tag::Double(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Tag, E> {
        Ok(Tag::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Tag, E> {
        Ok(Tag::String(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Tag, E> {
        Ok(Tag::ByteArray(v.iter().map(|&b| b as i8).collect()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Tag, E> {
        Ok(Tag::End)
    }

    fn visit_none<E: de::Error>(self) -> Result<Tag, E> {
        Ok(Tag::End)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Tag, D::Error>
    where
        D: Deserializer<'de>,
    {
        Tag::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Tag, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Tag::List(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Tag, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut compound = Compound::new();
        while let Some((key, value)) = map.next_entry::<String, Tag>()? {
            compound.insert(key, value);
        }
        Ok(Tag::Compound(compound))
    }
}

/// Self-describing formats only: integers keep the width the deserializer
/// reports (JSON reports every integer as a long), sequences become lists
/// and `null` becomes [`Tag::End`].
impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Tag, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TagVisitor)
    }
}

impl<'de> Deserialize<'de> for Compound {
    fn deserialize<D>(deserializer: D) -> Result<Compound, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Tag::deserialize(deserializer)? {
            Tag::Compound(compound) => Ok(compound),
            other => Err(de::Error::invalid_type(
                de::Unexpected::Other(other.id().name()),
                &"an NBT compound",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn json_round_trip() {
        let value = json!({ "name": "Steve", "pos": [1.5, 64.0, -2.5], "level": 7 });
        let tag: Tag = serde_json::from_value(value.clone()).unwrap();

        let compound = tag.as_compound().unwrap();
        assert_eq!(compound.get("level"), Some(&Tag::Long(7)));
        assert_eq!(serde_json::to_value(&tag).unwrap(), value);
    }
}
