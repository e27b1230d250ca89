use std::marker::PhantomData;

use zerocopy::byteorder;

use crate::{
    ByteOrder, Compound, Error, ErrorKind, MAX_DEPTH, NamedTag, Result, Tag, TagID, cold_path,
};

/// Parses one named root tag from `bytes`.
///
/// The whole input must be consumed; leftover bytes fail with
/// [`ErrorKind::TrailingData`]. A root of type `End` is a single `0x00` byte
/// and yields an empty name with [`Tag::End`].
///
/// Lengths are checked against the remaining input before anything is
/// allocated, so a forged length prefix fails with
/// [`ErrorKind::EndOfFile`] instead of exhausting memory.
pub fn read<O: ByteOrder>(bytes: &[u8]) -> Result<NamedTag> {
    let mut reader = Reader::<O>::new(bytes);
    let id = TagID::try_from(reader.u8()?)?;
    let named = if id == TagID::End {
        NamedTag::default()
    } else {
        let name = reader.string()?;
        let tag = reader.payload(id, 0)?;
        NamedTag { name, tag }
    };
    let remaining = reader.remaining();
    if remaining > 0 {
        cold_path();
        return Err(Error::new(ErrorKind::TrailingData(remaining)));
    }
    Ok(named)
}

struct Reader<'a, O> {
    data: &'a [u8],
    pos: usize,
    _marker: PhantomData<O>,
}

macro_rules! read_number {
    ($name:ident, $ty:ident, $out:ty, $size:literal) => {
        #[inline]
        fn $name(&mut self) -> Result<$out> {
            Ok(byteorder::$ty::<O>::from_bytes(self.array::<$size>()?).get())
        }
    };
}

impl<'a, O: ByteOrder> Reader<'a, O> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            _marker: PhantomData,
        }
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            cold_path();
            return Err(Error::new(ErrorKind::EndOfFile));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    #[inline]
    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        match self.data[self.pos..].first_chunk::<N>() {
            Some(chunk) => {
                self.pos += N;
                Ok(*chunk)
            }
            None => {
                cold_path();
                Err(Error::new(ErrorKind::EndOfFile))
            }
        }
    }

    #[inline]
    fn u8(&mut self) -> Result<u8> {
        Ok(self.array::<1>()?[0])
    }

    read_number!(u16, U16, u16, 2);
    read_number!(i16, I16, i16, 2);
    read_number!(i32, I32, i32, 4);
    read_number!(u32, U32, u32, 4);
    read_number!(i64, I64, i64, 8);
    read_number!(f32, F32, f32, 4);
    read_number!(f64, F64, f64, 8);

    fn string(&mut self) -> Result<String> {
        let len = self.u16()? as usize;
        let bytes = self.take(len)?;
        Ok(simd_cesu8::mutf8::decode_lossy(bytes).into_owned())
    }

    /// Reads a length prefix and checks that `len` elements of at least
    /// `element_size` bytes fit in the rest of the input.
    fn length(&mut self, element_size: usize) -> Result<usize> {
        let len = self.u32()? as usize;
        if len.saturating_mul(element_size) > self.remaining() {
            cold_path();
            return Err(Error::new(ErrorKind::EndOfFile));
        }
        Ok(len)
    }

    fn payload(&mut self, id: TagID, depth: usize) -> Result<Tag> {
        Ok(match id {
            TagID::End => Tag::End,
            TagID::Byte => Tag::Byte(self.u8()? as i8),
            TagID::Short => Tag::Short(self.i16()?),
            TagID::Int => Tag::Int(self.i32()?),
            TagID::Long => Tag::Long(self.i64()?),
            TagID::Float => Tag::Float(self.f32()?),
            TagID::Double => Tag::Double(self.f64()?),
            TagID::ByteArray => {
                let len = self.length(1)?;
                Tag::ByteArray(self.take(len)?.iter().map(|&b| b as i8).collect())
            }
            TagID::String => Tag::String(self.string()?),
            TagID::List => self.list(depth + 1)?,
            TagID::Compound => self.compound(depth + 1)?,
            TagID::IntArray => {
                let len = self.length(4)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(self.i32()?);
                }
                Tag::IntArray(values)
            }
            TagID::LongArray => {
                let len = self.length(8)?;
                let mut values = Vec::with_capacity(len);
                for _ in 0..len {
                    values.push(self.i64()?);
                }
                Tag::LongArray(values)
            }
        })
    }

    fn list(&mut self, depth: usize) -> Result<Tag> {
        check_depth(depth)?;
        let element = TagID::try_from(self.u8()?)?;
        let len = self.length(element.min_payload_size())?;
        if element == TagID::End && len > 0 {
            cold_path();
            return Err(Error::new(ErrorKind::InvalidTagType(0)));
        }
        let mut items = Vec::with_capacity(len);
        for index in 0..len {
            items.push(
                self.payload(element, depth)
                    .map_err(|e| e.at_index(index))?,
            );
        }
        Ok(Tag::List(items))
    }

    fn compound(&mut self, depth: usize) -> Result<Tag> {
        check_depth(depth)?;
        let mut compound = Compound::new();
        loop {
            let id = TagID::try_from(self.u8()?)?;
            if id == TagID::End {
                return Ok(Tag::Compound(compound));
            }
            let name = self.string()?;
            let value = self.payload(id, depth).map_err(|e| e.at_field(&name))?;
            compound.insert(name, value);
        }
    }
}

#[inline]
fn check_depth(depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        cold_path();
        return Err(Error::new(ErrorKind::DepthExceeded(MAX_DEPTH)));
    }
    Ok(())
}
