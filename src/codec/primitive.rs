use crate::{Codec, Error, NodeKind, Result, Transcoder, cold_path};

macro_rules! define_primitive_codec {
    ($($(#[$meta:meta])* $name:ident => $konst:ident: $ty:ty, $create:ident, $get:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default)]
            pub struct $name;

            $(#[$meta])*
            pub const $konst: $name = $name;

            impl Codec for $name {
                type Value = $ty;

                #[inline]
                fn encode<T: Transcoder>(&self, transcoder: &T, value: &$ty) -> Result<T::Node> {
                    Ok(transcoder.$create(*value))
                }

                #[inline]
                fn decode<T: Transcoder>(&self, transcoder: &T, node: &T::Node) -> Result<$ty> {
                    transcoder.$get(node)
                }
            }
        )*
    };
}

define_primitive_codec! {
    /// `bool`.
    BoolCodec => BOOL: bool, create_bool, get_bool;
    /// `i8`, the NBT byte.
    ByteCodec => BYTE: i8, create_byte, get_byte;
    /// `i16`.
    ShortCodec => SHORT: i16, create_short, get_short;
    /// `i32`.
    IntCodec => INT: i32, create_int, get_int;
    /// `i64`.
    LongCodec => LONG: i64, create_long, get_long;
}

macro_rules! define_float_codec {
    ($($(#[$meta:meta])* $name:ident => $konst:ident: $ty:ty, $kind:ident, $create:ident, $get:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default)]
            pub struct $name;

            $(#[$meta])*
            pub const $konst: $name = $name;

            impl Codec for $name {
                type Value = $ty;

                #[inline]
                fn encode<T: Transcoder>(&self, transcoder: &T, value: &$ty) -> Result<T::Node> {
                    if !value.is_finite() && !transcoder.supports_non_finite() {
                        cold_path();
                        return Err(Error::unsupported(
                            NodeKind::$kind,
                            "the format cannot represent NaN or infinity",
                        ));
                    }
                    Ok(transcoder.$create(*value))
                }

                #[inline]
                fn decode<T: Transcoder>(&self, transcoder: &T, node: &T::Node) -> Result<$ty> {
                    transcoder.$get(node)
                }
            }
        )*
    };
}

define_float_codec! {
    /// `f32`. NaN and infinity are rejected by formats that cannot hold them.
    FloatCodec => FLOAT: f32, Float, create_float, get_float;
    /// `f64`. NaN and infinity are rejected by formats that cannot hold them.
    DoubleCodec => DOUBLE: f64, Double, create_double, get_double;
}

/// UTF-8 strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct StringCodec;

/// UTF-8 strings.
pub const STRING: StringCodec = StringCodec;

impl Codec for StringCodec {
    type Value = String;

    #[inline]
    fn encode<T: Transcoder>(&self, transcoder: &T, value: &String) -> Result<T::Node> {
        Ok(transcoder.create_string(value))
    }

    #[inline]
    fn decode<T: Transcoder>(&self, transcoder: &T, node: &T::Node) -> Result<String> {
        transcoder.get_string(node).map(|s| s.into_owned())
    }
}

macro_rules! define_array_codec {
    ($($(#[$meta:meta])* $name:ident => $konst:ident: $elem:ty, $create:ident, $get:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default)]
            pub struct $name;

            $(#[$meta])*
            pub const $konst: $name = $name;

            impl Codec for $name {
                type Value = Vec<$elem>;

                #[inline]
                fn encode<T: Transcoder>(&self, transcoder: &T, value: &Vec<$elem>) -> Result<T::Node> {
                    Ok(transcoder.$create(value))
                }

                #[inline]
                fn decode<T: Transcoder>(&self, transcoder: &T, node: &T::Node) -> Result<Vec<$elem>> {
                    transcoder.$get(node)
                }
            }
        )*
    };
}

define_array_codec! {
    /// Packed bytes; an NBT byte array, a list of numbers elsewhere.
    ByteArrayCodec => BYTE_ARRAY: i8, create_byte_array, get_byte_array;
    /// Packed ints; an NBT int array, a list of numbers elsewhere.
    IntArrayCodec => INT_ARRAY: i32, create_int_array, get_int_array;
    /// Packed longs; an NBT long array, a list of numbers elsewhere.
    LongArrayCodec => LONG_ARRAY: i64, create_long_array, get_long_array;
}

/// A codec for a constant: it writes an empty compound and decodes any node
/// to a clone of its value.
#[derive(Clone, Debug)]
pub struct Unit<V> {
    value: V,
}

/// See [`Unit`].
pub fn unit<V: Clone + Send + Sync>(value: V) -> Unit<V> {
    Unit { value }
}

impl<V: Clone + Send + Sync> Codec for Unit<V> {
    type Value = V;

    #[inline]
    fn encode<T: Transcoder>(&self, transcoder: &T, _: &V) -> Result<T::Node> {
        Ok(transcoder.create_compound(Vec::new()))
    }

    #[inline]
    fn decode<T: Transcoder>(&self, _: &T, _: &T::Node) -> Result<V> {
        Ok(self.value.clone())
    }
}
