use crate::{Codec, Error, Result, ResultExt, Transcoder};

/// Compound key holding the discriminant of an encoded [`Either`].
pub const EITHER_DISCRIMINANT: &str = "left";

/// Compound key holding the active side of an encoded [`Either`].
pub const EITHER_VALUE: &str = "value";

/// A value of one of two types.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Either<L, R> {
    #[inline]
    pub fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    #[inline]
    pub fn left(self) -> Option<L> {
        match self {
            Self::Left(value) => Some(value),
            Self::Right(_) => None,
        }
    }

    #[inline]
    pub fn right(self) -> Option<R> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }
}

/// A tagged union of two codecs.
///
/// Encodes as `{"left": true, "value": ...}` or `{"left": false, "value":
/// ...}`. Decoding reads the discriminant first and dispatches to one side.
#[derive(Clone, Debug)]
pub struct EitherCodec<L, R> {
    left: L,
    right: R,
}

/// See [`EitherCodec`].
#[inline]
pub fn either<L: Codec, R: Codec>(left: L, right: R) -> EitherCodec<L, R> {
    EitherCodec { left, right }
}

impl<L: Codec, R: Codec> Codec for EitherCodec<L, R> {
    type Value = Either<L::Value, R::Value>;

    fn encode<T: Transcoder>(&self, transcoder: &T, value: &Self::Value) -> Result<T::Node> {
        let (is_left, node) = match value {
            Either::Left(value) => (true, self.left.encode(transcoder, value)),
            Either::Right(value) => (false, self.right.encode(transcoder, value)),
        };
        Ok(transcoder.create_compound(vec![
            (
                EITHER_DISCRIMINANT.to_owned(),
                transcoder.create_bool(is_left),
            ),
            (EITHER_VALUE.to_owned(), node.at_field(EITHER_VALUE)?),
        ]))
    }

    fn decode<T: Transcoder>(&self, transcoder: &T, node: &T::Node) -> Result<Self::Value> {
        let discriminant = required(transcoder, node, EITHER_DISCRIMINANT)?;
        let is_left = transcoder
            .get_bool(discriminant)
            .at_field(EITHER_DISCRIMINANT)?;
        let value = required(transcoder, node, EITHER_VALUE)?;
        if is_left {
            self.left
                .decode(transcoder, value)
                .map(Either::Left)
                .at_field(EITHER_VALUE)
        } else {
            self.right
                .decode(transcoder, value)
                .map(Either::Right)
                .at_field(EITHER_VALUE)
        }
    }
}

fn required<'n, T: Transcoder>(
    transcoder: &T,
    node: &'n T::Node,
    name: &str,
) -> Result<&'n T::Node> {
    transcoder
        .get_field_opt(node, name)?
        .ok_or_else(|| Error::field_missing(name).at_field(name))
}
