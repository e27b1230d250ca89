use std::{io::Write, marker::PhantomData};

use zerocopy::{IntoBytes, byteorder};

use crate::{ByteOrder, Error, ErrorKind, MAX_DEPTH, NamedTag, Result, Tag, TagID, cold_path};

/// Renders a named root tag as binary NBT.
#[inline]
pub fn write<O: ByteOrder>(named: &NamedTag) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(128);
    write_to_writer::<O>(named, &mut buf)?;
    Ok(buf)
}

/// Like [`write`], streaming into `writer`.
///
/// Fails with [`ErrorKind::TagMismatch`] on a list whose elements are not all
/// of one tag type, and with [`ErrorKind::StringTooLong`] or
/// [`ErrorKind::ListTooLong`] when a length does not fit its prefix.
pub fn write_to_writer<O: ByteOrder>(named: &NamedTag, writer: impl Write) -> Result<()> {
    let mut writer = Writer::<O, _> {
        inner: writer,
        _marker: PhantomData,
    };
    let id = named.tag.id();
    writer.u8(id as u8)?;
    if id != TagID::End {
        writer.string(&named.name)?;
        writer.payload(&named.tag, 0)?;
    }
    Ok(())
}

struct Writer<O, W> {
    inner: W,
    _marker: PhantomData<O>,
}

macro_rules! write_number {
    ($name:ident, $ty:ident, $value:ty) => {
        #[inline]
        fn $name(&mut self, value: $value) -> Result<()> {
            self.bytes(&byteorder::$ty::<O>::new(value).to_bytes())
        }
    };
}

impl<O: ByteOrder, W: Write> Writer<O, W> {
    #[inline]
    fn bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes).map_err(Error::from)
    }

    #[inline]
    fn u8(&mut self, value: u8) -> Result<()> {
        self.bytes(&[value])
    }

    write_number!(u16, U16, u16);
    write_number!(i16, I16, i16);
    write_number!(i32, I32, i32);
    write_number!(i64, I64, i64);
    write_number!(f32, F32, f32);
    write_number!(f64, F64, f64);

    fn string(&mut self, value: &str) -> Result<()> {
        let encoded = simd_cesu8::mutf8::encode(value);
        let len = u16::try_from(encoded.len()).map_err(|_| {
            cold_path();
            Error::new(ErrorKind::StringTooLong(encoded.len()))
        })?;
        self.u16(len)?;
        self.bytes(&encoded)
    }

    fn length(&mut self, len: usize) -> Result<()> {
        let len = i32::try_from(len).map_err(|_| {
            cold_path();
            Error::new(ErrorKind::ListTooLong(len))
        })?;
        self.i32(len)
    }

    fn payload(&mut self, tag: &Tag, depth: usize) -> Result<()> {
        match tag {
            Tag::End => Ok(()),
            Tag::Byte(value) => self.u8(*value as u8),
            Tag::Short(value) => self.i16(*value),
            Tag::Int(value) => self.i32(*value),
            Tag::Long(value) => self.i64(*value),
            Tag::Float(value) => self.f32(*value),
            Tag::Double(value) => self.f64(*value),
            Tag::ByteArray(values) => {
                self.length(values.len())?;
                self.bytes(values.as_bytes())
            }
            Tag::String(value) => self.string(value),
            Tag::List(items) => self.list(items, depth + 1),
            Tag::Compound(compound) => {
                check_depth(depth + 1)?;
                for (key, value) in compound {
                    // End entries carry no payload and would terminate the compound early
                    if value.id() == TagID::End {
                        continue;
                    }
                    self.u8(value.id() as u8)?;
                    self.string(key)?;
                    self.payload(value, depth + 1)
                        .map_err(|e| e.at_field(key))?;
                }
                self.u8(TagID::End as u8)
            }
            Tag::IntArray(values) => {
                self.length(values.len())?;
                for &value in values {
                    self.i32(value)?;
                }
                Ok(())
            }
            Tag::LongArray(values) => {
                self.length(values.len())?;
                for &value in values {
                    self.i64(value)?;
                }
                Ok(())
            }
        }
    }

    fn list(&mut self, items: &[Tag], depth: usize) -> Result<()> {
        check_depth(depth)?;
        let element = items.first().map_or(TagID::End, Tag::id);
        if element == TagID::End && !items.is_empty() {
            cold_path();
            return Err(Error::new(ErrorKind::InvalidTagType(0)));
        }
        self.u8(element as u8)?;
        self.length(items.len())?;
        for (index, item) in items.iter().enumerate() {
            if item.id() != element {
                cold_path();
                return Err(
                    Error::new(ErrorKind::TagMismatch(element as u8, item.id() as u8))
                        .at_index(index),
                );
            }
            self.payload(item, depth).map_err(|e| e.at_index(index))?;
        }
        Ok(())
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

#[cfg(test)]
mod tests {
    use zerocopy::{BigEndian, LittleEndian};

    use super::*;

    #[test]
    fn int_root_big_endian() {
        let bytes = write::<BigEndian>(&NamedTag::new("x", 42i32)).unwrap();
        assert_eq!(bytes, [3, 0, 1, b'x', 0, 0, 0, 0x2a]);
    }

    #[test]
    fn int_root_little_endian() {
        let bytes = write::<LittleEndian>(&NamedTag::new("x", 42i32)).unwrap();
        assert_eq!(bytes, [3, 1, 0, b'x', 0x2a, 0, 0, 0]);
    }

    #[test]
    fn empty_list_has_end_element_type() {
        let bytes = write::<BigEndian>(&NamedTag::new("", Tag::List(vec![]))).unwrap();
        assert_eq!(bytes, [9, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn heterogeneous_list_is_rejected() {
        let tag = Tag::List(vec![Tag::Int(1), Tag::String("two".into())]);
        let err = write::<BigEndian>(&NamedTag::new("", tag)).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TagMismatch(3, 8)));
        assert_eq!(err.path_string(), "[1]");
    }

    #[test]
    fn nul_is_encoded_as_two_bytes() {
        let bytes = write::<BigEndian>(&NamedTag::new("", "\0")).unwrap();
        assert_eq!(bytes, [8, 0, 0, 0, 2, 0xc0, 0x80]);
    }
}
