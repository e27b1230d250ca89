use na_codec::{
    BigEndian, Codec, INT, JsonTranscoder, LittleEndian, NamedTag, NbtTranscoder, STRING,
    StructCodec, Tag, convert, nbt,
};

const JSON: JsonTranscoder = JsonTranscoder::new();

struct Simple {
    value: i32,
    name: String,
    tags: Vec<String>,
}

fn simple_codec() -> Option<impl Codec<Value = Simple>> {
    StructCodec::of(
        (
            INT.optional_or(0).field_of("value", |s: &Simple| &s.value),
            STRING.optional_or(String::new()).field_of("name", |s: &Simple| &s.name),
            STRING.list(64).field_of("tags", |s: &Simple| &s.tags),
        ),
        |(value, name, tags)| Simple { value, name, tags },
    )
    .ok()
}

// a written tree must read back and write to the same bytes
fn rewrite(named: &NamedTag) {
    if let Ok(be) = nbt::write::<BigEndian>(named) {
        let again = nbt::read::<BigEndian>(&be).and_then(|read| nbt::write::<BigEndian>(&read));
        assert_eq!(again.ok(), Some(be));
    }
    if let Ok(le) = nbt::write::<LittleEndian>(named) {
        let again =
            nbt::read::<LittleEndian>(&le).and_then(|read| nbt::write::<LittleEndian>(&read));
        assert_eq!(again.ok(), Some(le));
    }
}

fn exercise(tag: &Tag) {
    if let Ok(json) = convert(&NbtTranscoder, tag, &JSON) {
        let _ = convert(&JSON, &json, &NbtTranscoder);
        let _ = serde_json::to_vec(&json);
    }
    if let Some(codec) = simple_codec() {
        if let Ok(simple) = codec.decode(&NbtTranscoder, tag) {
            let _ = codec.encode(&NbtTranscoder, &simple);
            let _ = codec.encode(&JSON, &simple);
        }
    }
}

pub fn test_binary(data: &[u8]) {
    if let Ok(named) = nbt::read::<BigEndian>(data) {
        rewrite(&named);
        exercise(&named.tag);
    }
    if let Ok(named) = nbt::read::<LittleEndian>(data) {
        rewrite(&named);
        exercise(&named.tag);
    }
}

pub fn test_json(data: &[u8]) {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        if let Ok(tag) = convert(&JSON, &json, &NbtTranscoder) {
            rewrite(&NamedTag::new("", tag));
        }
    }
}

pub fn test(data: &[u8]) {
    test_binary(data);
    test_json(data);
}
