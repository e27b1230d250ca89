use std::collections::HashSet;

use indexmap::IndexMap;
use na_codec::{
    BOOL, BYTE, BYTE_ARRAY, Codec, DOUBLE, EnumCodec, Either, Enumerated, ErrorKind, FLOAT, INT,
    INT_ARRAY, JsonTranscoder, LONG, LONG_ARRAY, NbtTranscoder, NodeKind, SHORT, STRING, Tag,
    Transcoder, convert, either, enumerated, unit,
};
use serde_json::json;

const JSON: JsonTranscoder = JsonTranscoder::new();
const NBT: NbtTranscoder = NbtTranscoder;

fn round_trip<C, T>(codec: &C, transcoder: &T, value: &C::Value) -> C::Value
where
    C: Codec,
    T: Transcoder,
{
    let node = codec.encode(transcoder, value).unwrap();
    codec.decode(transcoder, &node).unwrap()
}

// ==================== Primitives ====================

#[test]
fn test_primitives_json() {
    assert!(round_trip(&BOOL, &JSON, &true));
    assert_eq!(round_trip(&BYTE, &JSON, &-12), -12);
    assert_eq!(round_trip(&SHORT, &JSON, &1234), 1234);
    assert_eq!(round_trip(&INT, &JSON, &i32::MIN), i32::MIN);
    assert_eq!(round_trip(&LONG, &JSON, &i64::MAX), i64::MAX);
    assert_eq!(round_trip(&FLOAT, &JSON, &0.1), 0.1);
    assert_eq!(round_trip(&DOUBLE, &JSON, &-2.5), -2.5);
    assert_eq!(round_trip(&STRING, &JSON, &"héllo".to_owned()), "héllo");
}

#[test]
fn test_primitives_nbt() {
    assert!(!round_trip(&BOOL, &NBT, &false));
    assert_eq!(round_trip(&BYTE, &NBT, &i8::MIN), i8::MIN);
    assert_eq!(round_trip(&SHORT, &NBT, &-1), -1);
    assert_eq!(round_trip(&INT, &NBT, &42), 42);
    assert_eq!(round_trip(&LONG, &NBT, &i64::MIN), i64::MIN);
    assert!(round_trip(&FLOAT, &NBT, &f32::NAN).is_nan());
    assert_eq!(round_trip(&DOUBLE, &NBT, &f64::INFINITY), f64::INFINITY);
    assert_eq!(round_trip(&STRING, &NBT, &String::new()), "");
}

#[test]
fn test_primitive_nodes() {
    assert_eq!(INT.encode(&NBT, &7).unwrap(), Tag::Int(7));
    assert_eq!(BOOL.encode(&NBT, &true).unwrap(), Tag::Byte(1));
    assert_eq!(BOOL.encode(&JSON, &true).unwrap(), json!(true));
    assert_eq!(SHORT.encode(&JSON, &7).unwrap(), json!(7));

    let node = DOUBLE.encode(&JSON, &1.5).unwrap();
    assert!(JSON.kind(&node).is_numeric());
    assert!(!JSON.kind(&json!("1.5")).is_numeric());
}

#[test]
fn test_non_finite_floats_rejected_by_json() {
    let err = FLOAT.encode(&JSON, &f32::NAN).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::UnsupportedConversion {
            kind: NodeKind::Float,
            ..
        }
    ));
    let err = DOUBLE.encode(&JSON, &f64::NEG_INFINITY).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::UnsupportedConversion {
            kind: NodeKind::Double,
            ..
        }
    ));

    let err = DOUBLE.list(4).encode(&JSON, &vec![1.0, f64::NAN]).unwrap_err();
    assert_eq!(err.path_string(), "[1]");
}

#[test]
fn test_float_overflow_is_out_of_range() {
    let err = FLOAT.decode(&JSON, &json!(1e300)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::OutOfRange { .. }));
    let err = FLOAT.decode(&NBT, &Tag::Double(-1e300)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::OutOfRange { .. }));

    assert_eq!(FLOAT.decode(&JSON, &json!(1.5)).unwrap(), 1.5);
    assert_eq!(FLOAT.decode(&NBT, &Tag::Long(3)).unwrap(), 3.0);
    assert_eq!(
        FLOAT.decode(&NBT, &Tag::Double(f64::INFINITY)).unwrap(),
        f32::INFINITY
    );
}

#[test]
fn test_json_bool_accepts_zero_and_one_only() {
    assert!(BOOL.decode(&JSON, &json!(1)).unwrap());
    assert!(!BOOL.decode(&JSON, &json!(0)).unwrap());

    let err = BOOL.decode(&JSON, &json!(5)).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::TypeMismatch {
            expected: NodeKind::Bool,
            found: NodeKind::Long
        }
    ));
    let err = BOOL.decode(&JSON, &json!(0.5)).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::TypeMismatch {
            expected: NodeKind::Bool,
            found: NodeKind::Double
        }
    ));

    // NBT stores booleans as bytes
    let tag = BOOL.encode(&NBT, &true).unwrap();
    let json = convert(&NBT, &tag, &JSON).unwrap();
    assert!(BOOL.decode(&JSON, &json).unwrap());
}

#[test]
fn test_primitive_type_mismatch() {
    let err = INT.decode(&JSON, &json!("7")).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::TypeMismatch {
            expected: NodeKind::Int,
            found: NodeKind::String
        }
    ));
    assert_eq!(err.path_string(), "");

    let err = STRING.decode(&NBT, &Tag::Int(7)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
}

#[test]
fn test_primitive_out_of_range() {
    let err = BYTE.decode(&JSON, &json!(1000)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::OutOfRange { .. }));
    let err = SHORT.decode(&NBT, &Tag::Long(1 << 40)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::OutOfRange { .. }));
}

#[test]
fn test_arrays() {
    let bytes = vec![1i8, -2, 3];
    let ints = vec![i32::MIN, 0, i32::MAX];
    let longs = vec![i64::MIN, 0, i64::MAX];

    assert_eq!(BYTE_ARRAY.encode(&NBT, &bytes).unwrap(), Tag::ByteArray(bytes.clone()));
    assert_eq!(INT_ARRAY.encode(&NBT, &ints).unwrap(), Tag::IntArray(ints.clone()));
    assert_eq!(LONG_ARRAY.encode(&NBT, &longs).unwrap(), Tag::LongArray(longs.clone()));

    assert_eq!(INT_ARRAY.encode(&JSON, &ints).unwrap(), json!([i32::MIN, 0, i32::MAX]));
    assert_eq!(round_trip(&BYTE_ARRAY, &JSON, &bytes), bytes);
    assert_eq!(round_trip(&LONG_ARRAY, &JSON, &longs), longs);
}

#[test]
fn test_array_reads_plain_lists() {
    let list = Tag::List(vec![Tag::Int(1), Tag::Int(2)]);
    assert_eq!(INT_ARRAY.decode(&NBT, &list).unwrap(), vec![1, 2]);

    let err = INT_ARRAY.decode(&JSON, &json!([1, "two"])).unwrap_err();
    assert_eq!(err.path_string(), "[1]");
}

#[test]
fn test_unit() {
    let codec = unit("constant");
    assert_eq!(codec.encode(&JSON, &"constant").unwrap(), json!({}));
    assert_eq!(codec.decode(&JSON, &json!(12)).unwrap(), "constant");
}

// ==================== xmap / try_xmap ====================

#[derive(Debug, PartialEq, Clone, Copy)]
struct Celsius(f64);

#[test]
fn test_xmap() {
    let codec = DOUBLE.xmap(Celsius, |c: &Celsius| c.0);
    assert_eq!(codec.encode(&JSON, &Celsius(21.5)).unwrap(), json!(21.5));
    assert_eq!(codec.decode(&NBT, &Tag::Double(-4.0)).unwrap(), Celsius(-4.0));
}

#[test]
fn test_xmap_propagates_inner_failure() {
    let codec = DOUBLE.xmap(Celsius, |c: &Celsius| c.0);
    let err = codec.decode(&JSON, &json!("warm")).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
}

#[test]
fn test_try_xmap() {
    let even = INT.try_xmap(
        |v| {
            if v % 2 == 0 {
                Ok(v as u32)
            } else {
                Err(format!("{v} is odd"))
            }
        },
        |v: &u32| i32::try_from(*v).map_err(|e| e.to_string()),
    );
    assert_eq!(even.decode(&JSON, &json!(4)).unwrap(), 4);

    let err = even.decode(&JSON, &json!(5)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Message(msg) if msg == "5 is odd"));

    assert!(even.encode(&JSON, &u32::MAX).is_err());
}

// ==================== bounded ====================

#[test]
fn test_bounded() {
    let codec = INT.bounded(1, 10);
    assert_eq!(codec.decode(&JSON, &json!(10)).unwrap(), 10);

    let err = codec.decode(&JSON, &json!(11)).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::OutOfRange { value, target } if value == "11" && target == "[1, 10]"
    ));
    assert!(codec.encode(&NBT, &0).is_err());
}

// ==================== lists and sets ====================

#[test]
fn test_list_size_cap() {
    let codec = INT.list(3);
    assert_eq!(codec.decode(&JSON, &json!([1, 2, 3])).unwrap(), vec![1, 2, 3]);

    let err = codec.decode(&JSON, &json!([1, 2, 3, 4])).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::SizeExceeded { max: 3, len: 4 }));

    let err = codec.encode(&NBT, &vec![1, 2, 3, 4]).unwrap_err();
    assert_eq!(codec.max_size(), 3);
    match err.into_kind() {
        ErrorKind::SizeExceeded { max, len } => assert_eq!((max, len), (3, 4)),
        other => panic!("expected SizeExceeded, got {other:?}"),
    }
}

#[test]
fn test_list_element_path() {
    let codec = STRING.list(8);
    let err = codec.decode(&JSON, &json!(["a", "b", 3])).unwrap_err();
    assert_eq!(err.path_string(), "[2]");
}

#[test]
fn test_nested_lists() {
    let codec = INT.list(4).list(4);
    let value = vec![vec![1, 2], vec![], vec![3]];
    assert_eq!(round_trip(&codec, &NBT, &value), value);
    assert_eq!(round_trip(&codec, &JSON, &value), value);
}

#[test]
fn test_list_not_a_sequence() {
    let err = INT.list(4).decode(&JSON, &json!({"a": 1})).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::TypeMismatch {
            expected: NodeKind::List,
            found: NodeKind::Compound
        }
    ));
}

#[test]
fn test_set_collapses_duplicates() {
    let codec = STRING.set(4);
    let set = codec.decode(&JSON, &json!(["a", "b", "a"])).unwrap();
    assert_eq!(set, HashSet::from(["a".to_owned(), "b".to_owned()]));

    let node = codec.encode(&NBT, &set).unwrap();
    assert_eq!(NBT.get_list(&node).unwrap().len(), 2);
    assert!(codec.decode(&JSON, &json!(["a", "b", "c", "d", "e"])).is_err());
}

#[test]
fn test_list_or_single() {
    let codec = INT.list_or_single(2);
    assert_eq!(codec.decode(&NBT, &Tag::Int(5)).unwrap(), vec![5]);
    assert_eq!(codec.decode(&JSON, &json!([5, 6])).unwrap(), vec![5, 6]);
    assert_eq!(codec.encode(&JSON, &vec![5]).unwrap(), json!([5]));
    assert!(codec.decode(&JSON, &json!([1, 2, 3])).is_err());
}

// ==================== maps ====================

#[test]
fn test_map_value() {
    let codec = INT.map_value();
    let mut value = IndexMap::new();
    value.insert("zeta".to_owned(), 1);
    value.insert("alpha".to_owned(), 2);

    let node = codec.encode(&JSON, &value).unwrap();
    assert_eq!(serde_json::to_string(&node).unwrap(), r#"{"zeta":1,"alpha":2}"#);
    assert_eq!(round_trip(&codec, &NBT, &value), value);
}

#[test]
fn test_map_value_error_path() {
    let err = INT
        .map_value()
        .decode(&JSON, &json!({"ok": 1, "bad": "x"}))
        .unwrap_err();
    assert_eq!(err.path_string(), "bad");
}

// ==================== either ====================

#[test]
fn test_either() {
    let codec = either(INT, STRING);

    let left = codec.encode(&JSON, &Either::Left(3)).unwrap();
    assert_eq!(left, json!({"left": true, "value": 3}));
    let right = codec.encode(&JSON, &Either::Right("x".to_owned())).unwrap();
    assert_eq!(right, json!({"left": false, "value": "x"}));

    assert_eq!(codec.decode(&JSON, &left).unwrap(), Either::Left(3));
    let nbt = codec.encode(&NBT, &Either::Right("x".to_owned())).unwrap();
    assert_eq!(codec.decode(&NBT, &nbt).unwrap(), Either::Right("x".to_owned()));
}

#[test]
fn test_either_errors() {
    let codec = either(INT, STRING);

    let err = codec.decode(&JSON, &json!({"value": 3})).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::FieldMissing(name) if name == "left"));
    assert_eq!(err.path_string(), "left");

    let err = codec.decode(&JSON, &json!({"left": true, "value": "3"})).unwrap_err();
    assert_eq!(err.path_string(), "value");

    let err = codec.decode(&JSON, &json!([1])).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::CompoundExpected(NodeKind::List)));
}

// ==================== enums ====================

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum GameMode {
    Survival,
    Creative,
    Adventure,
    Spectator,
}

enumerated!(GameMode {
    Survival => "survival",
    Creative => "creative",
    Adventure => "adventure",
    Spectator => "spectator",
});

#[test]
fn test_enum_by_ordinal() {
    let codec = EnumCodec::<GameMode>::new();
    assert_eq!(codec.encode(&NBT, &GameMode::Adventure).unwrap(), Tag::Int(2));
    assert_eq!(codec.decode(&JSON, &json!(3)).unwrap(), GameMode::Spectator);

    let err = codec.decode(&JSON, &json!(4)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnknownVariant(v) if v == "4"));
    let err = codec.decode(&JSON, &json!(-1)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnknownVariant(_)));
}

#[test]
fn test_enum_by_name() {
    let codec = EnumCodec::<GameMode>::by_name();
    assert_eq!(codec.encode(&JSON, &GameMode::Creative).unwrap(), json!("creative"));
    assert_eq!(
        codec.decode(&NBT, &Tag::String("survival".into())).unwrap(),
        GameMode::Survival
    );

    let err = codec.decode(&JSON, &json!("hardcore")).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnknownVariant(v) if v == "hardcore"));
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Weather {
    Clear,
    Rain,
    Thunder,
}

// Thunder is deliberately left out of the variant list
impl Enumerated for Weather {
    const VARIANTS: &'static [Self] = &[Weather::Clear, Weather::Rain];

    fn name(self) -> &'static str {
        match self {
            Weather::Clear => "clear",
            Weather::Rain => "rain",
            Weather::Thunder => "thunder",
        }
    }
}

#[test]
fn test_enum_unlisted_variant() {
    assert_eq!(Weather::Rain.ordinal(), Some(1));
    assert_eq!(Weather::Thunder.ordinal(), None);

    for codec in [EnumCodec::<Weather>::new(), EnumCodec::<Weather>::by_name()] {
        let err = codec.encode(&JSON, &Weather::Thunder).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnknownVariant(v) if v == "thunder"));
        assert_eq!(round_trip(&codec, &NBT, &Weather::Rain), Weather::Rain);
    }
}

#[test]
fn test_enum_set() {
    let codec = EnumCodec::<GameMode>::by_name().set(4);
    assert_eq!(codec.max_size(), 4);
    let modes = HashSet::from([GameMode::Survival, GameMode::Spectator]);
    assert_eq!(round_trip(&codec, &JSON, &modes), modes);
}

// ==================== optional outside a compound ====================

#[test]
fn test_optional_as_value() {
    let codec = INT.optional();
    assert_eq!(codec.encode(&JSON, &None).unwrap(), json!(null));
    assert_eq!(codec.decode(&JSON, &json!(null)).unwrap(), None);
    assert_eq!(codec.decode(&JSON, &json!(1)).unwrap(), Some(1));
}

#[test]
fn test_optional_none_in_list() {
    let codec = INT.optional().list(4);
    let value = vec![Some(1), None];
    assert_eq!(codec.encode(&JSON, &value).unwrap(), json!([1, null]));
    assert_eq!(round_trip(&codec, &JSON, &value), value);

    let err = codec.encode(&NBT, &value).unwrap_err();
    assert_eq!(err.path_string(), "[1]");
    assert!(matches!(
        err.kind(),
        ErrorKind::UnsupportedConversion {
            kind: NodeKind::Null,
            ..
        }
    ));
    assert!(codec.encode(&NBT, &vec![None, None]).is_err());
    assert_eq!(round_trip(&codec, &NBT, &vec![Some(1), Some(2)]), vec![Some(1), Some(2)]);
}

#[test]
fn test_optional_none_in_either() {
    let codec = either(INT.optional(), STRING);
    let value = Either::Left(None);
    assert_eq!(round_trip(&codec, &JSON, &value), value);

    let err = codec.encode(&NBT, &value).unwrap_err();
    assert_eq!(err.path_string(), "value");
    assert!(matches!(
        err.kind(),
        ErrorKind::UnsupportedConversion {
            kind: NodeKind::Null,
            ..
        }
    ));
}

#[test]
fn test_codecs_are_shareable_across_threads() {
    let codec = INT.list(16);
    std::thread::scope(|scope| {
        for i in 0..4 {
            let codec = &codec;
            scope.spawn(move || {
                let value = vec![i; 4];
                let node = codec.encode(&NBT, &value).unwrap();
                assert_eq!(codec.decode(&NBT, &node).unwrap(), value);
            });
        }
    });
}
