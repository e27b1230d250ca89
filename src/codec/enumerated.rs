use std::marker::PhantomData;

use crate::{Codec, Error, Result, Transcoder, cold_path};

/// A closed set of named variants.
///
/// Usually implemented with [`enumerated!`](crate::enumerated).
pub trait Enumerated: Copy + PartialEq + Send + Sync + 'static {
    /// Every variant, in ordinal order.
    const VARIANTS: &'static [Self];

    fn name(self) -> &'static str;

    /// Position in [`VARIANTS`](Self::VARIANTS), or `None` for a variant the
    /// list leaves out.
    #[inline]
    fn ordinal(self) -> Option<usize> {
        Self::VARIANTS.iter().position(|&variant| variant == self)
    }

    fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::VARIANTS.get(ordinal).copied()
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.name() == name)
    }
}

/// Implements [`Enumerated`] for a field-less enum.
///
/// ```
/// use na_codec::{Codec, EnumCodec, JsonTranscoder, enumerated};
/// use serde_json::json;
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum Difficulty {
///     Peaceful,
///     Easy,
///     Hard,
/// }
///
/// enumerated!(Difficulty {
///     Peaceful => "peaceful",
///     Easy => "easy",
///     Hard => "hard",
/// });
///
/// let json = JsonTranscoder::new();
/// let by_ordinal = EnumCodec::<Difficulty>::new();
/// let by_name = EnumCodec::<Difficulty>::by_name();
///
/// assert_eq!(by_ordinal.encode(&json, &Difficulty::Hard).unwrap(), json!(2));
/// assert_eq!(by_name.encode(&json, &Difficulty::Hard).unwrap(), json!("hard"));
/// assert!(by_name.decode(&json, &json!("nightmare")).is_err());
/// ```
#[macro_export]
macro_rules! enumerated {
    ($ty:ty { $($variant:ident => $name:literal),* $(,)? }) => {
        impl $crate::Enumerated for $ty {
            const VARIANTS: &'static [Self] = &[$(Self::$variant),*];

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }
        }
    };
}

/// Encodes an [`Enumerated`] value by ordinal (an int), or by name (a string)
/// when built with [`by_name`](EnumCodec::by_name).
///
/// An ordinal or name outside the set fails with
/// [`ErrorKind::UnknownVariant`](crate::ErrorKind::UnknownVariant); no default
/// variant is ever substituted.
pub struct EnumCodec<E> {
    by_name: bool,
    _marker: PhantomData<fn() -> E>,
}

impl<E> Clone for EnumCodec<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EnumCodec<E> {}

impl<E> std::fmt::Debug for EnumCodec<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnumCodec")
            .field("by_name", &self.by_name)
            .finish()
    }
}

impl<E: Enumerated> EnumCodec<E> {
    /// Ordinal encoding.
    #[inline]
    pub const fn new() -> Self {
        Self {
            by_name: false,
            _marker: PhantomData,
        }
    }

    /// Name encoding.
    #[inline]
    pub const fn by_name() -> Self {
        Self {
            by_name: true,
            _marker: PhantomData,
        }
    }
}

impl<E: Enumerated> Default for EnumCodec<E> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Enumerated> Codec for EnumCodec<E> {
    type Value = E;

    fn encode<T: Transcoder>(&self, transcoder: &T, value: &E) -> Result<T::Node> {
        // only variants listed in VARIANTS can be decoded again
        let Some(ordinal) = value.ordinal() else {
            cold_path();
            return Err(Error::unknown_variant(value.name()));
        };
        if self.by_name {
            return Ok(transcoder.create_string(value.name()));
        }
        let ordinal = i32::try_from(ordinal).map_err(|_| Error::out_of_range(ordinal, "int"))?;
        Ok(transcoder.create_int(ordinal))
    }

    fn decode<T: Transcoder>(&self, transcoder: &T, node: &T::Node) -> Result<E> {
        if self.by_name {
            let name = transcoder.get_string(node)?;
            return E::from_name(&name).ok_or_else(|| {
                cold_path();
                Error::unknown_variant(&name)
            });
        }
        let ordinal = transcoder.get_int(node)?;
        usize::try_from(ordinal)
            .ok()
            .and_then(E::from_ordinal)
            .ok_or_else(|| {
                cold_path();
                Error::unknown_variant(ordinal)
            })
    }
}
