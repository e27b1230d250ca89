//! The JSON backend, over [`serde_json::Value`].
//!
//! JSON has a single number type. Integers that fit in 64 bits report as
//! [`NodeKind::Long`] and every other number as [`NodeKind::Double`]; the
//! integral getters narrow with a range check, so a codec for `i8` reads any
//! JSON integer in `-128..=127`. Arrays are lists of numbers.
//!
//! NaN and infinity have no JSON form. [`create_float`](Transcoder::create_float)
//! and [`create_double`](Transcoder::create_double) write `null` for them (the
//! behaviour of [`serde_json::json!`]); the [`FLOAT`](crate::FLOAT) and
//! [`DOUBLE`](crate::DOUBLE) codecs and raw conversion into JSON reject them.

use std::borrow::Cow;

use serde_json::{Map, Number, Value};

use crate::{Error, NodeKind, Result, Transcoder, cold_path, transcoder::narrow_float};

/// A [`Transcoder`] over [`serde_json::Value`].
///
/// ```
/// use na_codec::{Codec, JsonTranscoder, INT, StructCodec};
/// use serde_json::json;
///
/// struct Limits {
///     soft: Option<i32>,
/// }
///
/// let codec = StructCodec::of(
///     (INT.optional().field_of("soft", |l: &Limits| &l.soft),),
///     |(soft,)| Limits { soft },
/// )
/// .unwrap();
///
/// let absent = Limits { soft: None };
/// assert_eq!(codec.encode(&JsonTranscoder::new(), &absent).unwrap(), json!({}));
/// assert_eq!(
///     codec.encode(&JsonTranscoder::with_nulls(), &absent).unwrap(),
///     json!({ "soft": null })
/// );
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsonTranscoder {
    write_nulls: bool,
}

impl JsonTranscoder {
    /// Absent optional fields are omitted.
    #[inline]
    pub const fn new() -> Self {
        Self { write_nulls: false }
    }

    /// Absent optional fields are written as `null`.
    #[inline]
    pub const fn with_nulls() -> Self {
        Self { write_nulls: true }
    }
}

fn kind_of(value: &Value) -> NodeKind {
    match value {
        Value::Null => NodeKind::Null,
        Value::Bool(_) => NodeKind::Bool,
        Value::Number(number) if number.is_i64() || number.is_u64() => NodeKind::Long,
        Value::Number(_) => NodeKind::Double,
        Value::String(_) => NodeKind::String,
        Value::Array(_) => NodeKind::List,
        Value::Object(_) => NodeKind::Compound,
    }
}

fn integral(value: &Value, expected: NodeKind) -> Result<i64> {
    match value {
        Value::Number(number) => {
            if let Some(value) = number.as_i64() {
                Ok(value)
            } else if let Some(value) = number.as_u64() {
                cold_path();
                Err(Error::out_of_range(value, expected))
            } else {
                cold_path();
                Err(Error::type_mismatch(expected, NodeKind::Double))
            }
        }
        _ => {
            cold_path();
            Err(Error::type_mismatch(expected, kind_of(value)))
        }
    }
}

fn float(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

macro_rules! narrow {
    ($value:expr, $ty:ty, $kind:ident) => {{
        let value = integral($value, NodeKind::$kind)?;
        <$ty>::try_from(value).map_err(|_| {
            cold_path();
            Error::out_of_range(value, NodeKind::$kind)
        })
    }};
}

impl Transcoder for JsonTranscoder {
    type Node = Value;

    #[inline]
    fn kind(&self, node: &Value) -> NodeKind {
        kind_of(node)
    }

    #[inline]
    fn create_null(&self) -> Value {
        Value::Null
    }

    #[inline]
    fn is_null(&self, node: &Value) -> bool {
        node.is_null()
    }

    #[inline]
    fn create_bool(&self, value: bool) -> Value {
        Value::Bool(value)
    }

    fn get_bool(&self, node: &Value) -> Result<bool> {
        match node {
            Value::Bool(value) => Ok(*value),
            // booleans that went through a format without them come back as 0/1
            Value::Number(number) => match number.as_i64() {
                Some(0) => Ok(false),
                Some(1) => Ok(true),
                _ => {
                    cold_path();
                    Err(Error::type_mismatch(NodeKind::Bool, kind_of(node)))
                }
            },
            _ => {
                cold_path();
                Err(Error::type_mismatch(NodeKind::Bool, kind_of(node)))
            }
        }
    }

    #[inline]
    fn create_byte(&self, value: i8) -> Value {
        Value::from(value)
    }

    #[inline]
    fn get_byte(&self, node: &Value) -> Result<i8> {
        narrow!(node, i8, Byte)
    }

    #[inline]
    fn create_short(&self, value: i16) -> Value {
        Value::from(value)
    }

    #[inline]
    fn get_short(&self, node: &Value) -> Result<i16> {
        narrow!(node, i16, Short)
    }

    #[inline]
    fn create_int(&self, value: i32) -> Value {
        Value::from(value)
    }

    #[inline]
    fn get_int(&self, node: &Value) -> Result<i32> {
        narrow!(node, i32, Int)
    }

    #[inline]
    fn create_long(&self, value: i64) -> Value {
        Value::from(value)
    }

    #[inline]
    fn get_long(&self, node: &Value) -> Result<i64> {
        integral(node, NodeKind::Long)
    }

    #[inline]
    fn create_float(&self, value: f32) -> Value {
        float(value.into())
    }

    fn get_float(&self, node: &Value) -> Result<f32> {
        match node {
            Value::Number(_) => narrow_float(self.get_double(node)?),
            _ => {
                cold_path();
                Err(Error::type_mismatch(NodeKind::Float, kind_of(node)))
            }
        }
    }

    #[inline]
    fn create_double(&self, value: f64) -> Value {
        float(value)
    }

    fn get_double(&self, node: &Value) -> Result<f64> {
        match node {
            Value::Number(number) => number.as_f64().ok_or_else(|| {
                cold_path();
                Error::out_of_range(number, NodeKind::Double)
            }),
            _ => {
                cold_path();
                Err(Error::type_mismatch(NodeKind::Double, kind_of(node)))
            }
        }
    }

    #[inline]
    fn create_string(&self, value: &str) -> Value {
        Value::String(value.to_owned())
    }

    fn get_string<'n>(&self, node: &'n Value) -> Result<Cow<'n, str>> {
        match node {
            Value::String(value) => Ok(Cow::Borrowed(value)),
            _ => {
                cold_path();
                Err(Error::type_mismatch(NodeKind::String, kind_of(node)))
            }
        }
    }

    #[inline]
    fn create_list(&self, items: Vec<Value>) -> Value {
        Value::Array(items)
    }

    fn get_list<'n>(&self, node: &'n Value) -> Result<Cow<'n, [Value]>> {
        match node {
            Value::Array(items) => Ok(Cow::Borrowed(items)),
            _ => {
                cold_path();
                Err(Error::type_mismatch(NodeKind::List, kind_of(node)))
            }
        }
    }

    fn create_compound(&self, entries: Vec<(String, Value)>) -> Value {
        Value::Object(entries.into_iter().collect::<Map<_, _>>())
    }

    fn get_compound<'n>(&self, node: &'n Value) -> Result<Vec<(&'n str, &'n Value)>> {
        match node {
            Value::Object(map) => Ok(map
                .iter()
                .map(|(key, value)| (key.as_str(), value))
                .collect()),
            _ => {
                cold_path();
                Err(Error::compound_expected(kind_of(node)))
            }
        }
    }

    fn get_field_opt<'n>(&self, node: &'n Value, name: &str) -> Result<Option<&'n Value>> {
        match node {
            Value::Object(map) => Ok(map.get(name)),
            _ => {
                cold_path();
                Err(Error::compound_expected(kind_of(node)))
            }
        }
    }

    fn take_compound(&self, node: Value) -> Result<Vec<(String, Value)>> {
        match node {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => {
                cold_path();
                Err(Error::compound_expected(kind_of(&other)))
            }
        }
    }

    #[inline]
    fn supports_non_finite(&self) -> bool {
        false
    }

    #[inline]
    fn writes_null_for_absent(&self) -> bool {
        self.write_nulls
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn numbers_classify_by_representation() {
        let json = JsonTranscoder::new();
        assert_eq!(json.kind(&json!(3)), NodeKind::Long);
        assert_eq!(json.kind(&json!(u64::MAX)), NodeKind::Long);
        assert_eq!(json.kind(&json!(3.5)), NodeKind::Double);
    }

    #[test]
    fn integral_getters_narrow() {
        let json = JsonTranscoder::new();
        assert_eq!(json.get_byte(&json!(-128)).unwrap(), -128);
        assert!(matches!(
            json.get_byte(&json!(128)).unwrap_err().kind(),
            ErrorKind::OutOfRange { .. }
        ));
        assert!(matches!(
            json.get_long(&json!(u64::MAX)).unwrap_err().kind(),
            ErrorKind::OutOfRange { .. }
        ));
        assert!(matches!(
            json.get_int(&json!(1.5)).unwrap_err().kind(),
            ErrorKind::TypeMismatch {
                expected: NodeKind::Int,
                found: NodeKind::Double
            }
        ));
    }

    #[test]
    fn float_getters_accept_integers() {
        let json = JsonTranscoder::new();
        assert_eq!(json.get_double(&json!(2)).unwrap(), 2.0);
        assert_eq!(json.get_float(&json!(0.5)).unwrap(), 0.5);
        assert!(matches!(
            json.get_float(&json!("0.5")).unwrap_err().kind(),
            ErrorKind::TypeMismatch {
                expected: NodeKind::Float,
                found: NodeKind::String
            }
        ));
    }

    #[test]
    fn float_getter_rejects_overflow() {
        let json = JsonTranscoder::new();
        assert!(matches!(
            json.get_float(&json!(1e39)).unwrap_err().kind(),
            ErrorKind::OutOfRange { .. }
        ));
        assert_eq!(json.get_float(&json!(f32::MAX as f64)).unwrap(), f32::MAX);
    }

    #[test]
    fn bool_getter_accepts_zero_and_one() {
        let json = JsonTranscoder::new();
        assert!(json.get_bool(&json!(true)).unwrap());
        assert!(json.get_bool(&json!(1)).unwrap());
        assert!(!json.get_bool(&json!(0)).unwrap());
        assert!(json.get_bool(&json!(2)).is_err());
        assert!(json.get_bool(&json!(-1)).is_err());
        assert!(json.get_bool(&json!(1.0)).is_err());
    }

    #[test]
    fn non_finite_floats_become_null() {
        let json = JsonTranscoder::new();
        assert_eq!(json.create_double(f64::NAN), Value::Null);
        assert_eq!(json.create_float(f32::INFINITY), Value::Null);
    }

    #[test]
    fn absent_policy() {
        assert!(!JsonTranscoder::new().writes_null_for_absent());
        assert!(JsonTranscoder::with_nulls().writes_null_for_absent());
    }
}
