//! The NBT backend.
//!
//! NBT (Named Binary Tag) is the tree format Minecraft uses for worlds,
//! players and network payloads. This module provides an owned tag tree
//! ([`Tag`]), a [`Transcoder`](crate::Transcoder) over it ([`NbtTranscoder`])
//! and the binary rendering of the tree in either byte order ([`read`],
//! [`write`]).
//!
//! ```
//! use na_codec::{BigEndian, Codec, NbtTranscoder, INT, nbt};
//!
//! let tag = INT.list(4).encode(&NbtTranscoder, &vec![1, 2, 3]).unwrap();
//! let bytes = nbt::write::<BigEndian>(&nbt::NamedTag::new("", tag.clone())).unwrap();
//!
//! let read = nbt::read::<BigEndian>(&bytes).unwrap();
//! assert_eq!(read.tag, tag);
//! ```
//!
//! NBT has no null. An absent value is an absent compound entry, so
//! optional fields are always omitted and null entries are dropped when a
//! tree from another format is converted into NBT.

use crate::{Error, ErrorKind};

mod read;
#[cfg(feature = "serde")]
mod serde_impl;
mod tag;
mod transcoder;
mod write;

pub use read::read;
pub use tag::*;
pub use transcoder::NbtTranscoder;
pub use write::{write, write_to_writer};

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum TagID {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl TagID {
    pub const fn name(self) -> &'static str {
        match self {
            Self::End => "TAG_End",
            Self::Byte => "TAG_Byte",
            Self::Short => "TAG_Short",
            Self::Int => "TAG_Int",
            Self::Long => "TAG_Long",
            Self::Float => "TAG_Float",
            Self::Double => "TAG_Double",
            Self::ByteArray => "TAG_Byte_Array",
            Self::String => "TAG_String",
            Self::List => "TAG_List",
            Self::Compound => "TAG_Compound",
            Self::IntArray => "TAG_Int_Array",
            Self::LongArray => "TAG_Long_Array",
        }
    }

    /// Returns `true` if this is a primitive tag type.
    ///
    /// Primitive tags are: End, Byte, Short, Int, Long, Float, Double.
    /// These tags store their values directly without additional structure.
    ///
    /// # Example
    ///
    /// ```
    /// use na_codec::TagID;
    ///
    /// assert!(TagID::Int.is_primitive());
    /// assert!(TagID::Double.is_primitive());
    /// assert!(!TagID::List.is_primitive());
    /// assert!(!TagID::ByteArray.is_primitive());
    /// ```
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::End
                | Self::Byte
                | Self::Short
                | Self::Int
                | Self::Long
                | Self::Float
                | Self::Double
        )
    }

    /// Returns `true` if this is an array tag type.
    ///
    /// Array tags are: ByteArray, IntArray, LongArray.
    /// These store contiguous sequences of primitive values.
    pub const fn is_array(self) -> bool {
        matches!(self, Self::ByteArray | Self::IntArray | Self::LongArray)
    }

    /// Returns `true` if this is a composite tag type.
    ///
    /// Composite tags are: List, Compound.
    /// These contain other NBT values as children.
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::List | Self::Compound)
    }

    /// Fixed payload width of a primitive tag, or the smallest possible
    /// payload of a variable-width one.
    pub(crate) const fn min_payload_size(self) -> usize {
        match self {
            Self::End => 0,
            Self::Byte => 1,
            Self::Short | Self::String => 2,
            Self::Int | Self::Float | Self::ByteArray | Self::IntArray | Self::LongArray => 4,
            Self::Long | Self::Double => 8,
            Self::List => 1 + 4,
            Self::Compound => 1,
        }
    }
}

impl TryFrom<u8> for TagID {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        Ok(match value {
            0 => Self::End,
            1 => Self::Byte,
            2 => Self::Short,
            3 => Self::Int,
            4 => Self::Long,
            5 => Self::Float,
            6 => Self::Double,
            7 => Self::ByteArray,
            8 => Self::String,
            9 => Self::List,
            10 => Self::Compound,
            11 => Self::IntArray,
            12 => Self::LongArray,
            _ => return Err(Error::new(ErrorKind::InvalidTagType(value))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_id_from_u8() {
        for id in 0..=12u8 {
            assert_eq!(TagID::try_from(id).unwrap() as u8, id);
        }
        assert!(matches!(
            TagID::try_from(13).unwrap_err().kind(),
            ErrorKind::InvalidTagType(13)
        ));
    }

    #[test]
    fn tag_id_classes() {
        assert!(TagID::End.is_primitive());
        assert!(TagID::LongArray.is_array());
        assert!(TagID::Compound.is_composite());
        assert!(!TagID::String.is_primitive());
        assert!(!TagID::String.is_array());
        assert!(!TagID::String.is_composite());
    }
}
