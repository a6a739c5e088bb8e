//! Archive implementations for Rust primitive types.
//!
//! # Encodings
//!
//! * `u8` and `i8` are a single byte, and `bool` is a single byte that must be `0` or `1`.
//! * Wider integers are biased towards small values (lengths, counts, indices), so they are
//!   written as LEB128 varints: unsigned types as unsigned LEB128, signed types as signed
//!   LEB128. `usize` and `isize` share the encoding of the 64-bit types, and reading a value
//!   that does not fit the host's pointer width is invalid input.
//! * Floats are their IEEE-754 bit pattern, little-endian.
//! * `char` is its scalar value as an unsigned LEB128 varint.
//! * `()` is written as nothing at all.
//!
//! Every implementation accepts any context and ignores it; containers pass it through to
//! their elements.

use crate::{Archivable, Endianness, Error, Reader, Writer};

// Single-byte implementation
macro_rules! impl_byte {
    ($type:ty) => {
        impl<C: ?Sized> Archivable<C> for $type {
            #[inline]
            fn encode(&self, writer: &mut Writer, _: &mut C) -> Result<(), Error> {
                writer.write_byte(*self as u8);
                Ok(())
            }

            #[inline]
            fn decode(reader: &mut Reader, _: &mut C) -> Result<Self, Error> {
                Ok(reader.read_byte()? as $type)
            }
        }
    };
}

impl_byte!(u8);
impl_byte!(i8);

// Varint implementation
macro_rules! impl_varint {
    ($type:ty, $read_method:ident, $write_method:ident) => {
        impl<C: ?Sized> Archivable<C> for $type {
            #[inline]
            fn encode(&self, writer: &mut Writer, _: &mut C) -> Result<(), Error> {
                writer.$write_method(*self);
                Ok(())
            }

            #[inline]
            fn decode(reader: &mut Reader, _: &mut C) -> Result<Self, Error> {
                reader.$read_method()
            }
        }
    };
}

impl_varint!(u16, read_unsigned_leb128, write_unsigned_leb128);
impl_varint!(u32, read_unsigned_leb128, write_unsigned_leb128);
impl_varint!(u64, read_unsigned_leb128, write_unsigned_leb128);
impl_varint!(u128, read_unsigned_leb128, write_unsigned_leb128);
impl_varint!(usize, read_unsigned_leb128, write_unsigned_leb128);
impl_varint!(i16, read_signed_leb128, write_signed_leb128);
impl_varint!(i32, read_signed_leb128, write_signed_leb128);
impl_varint!(i64, read_signed_leb128, write_signed_leb128);
impl_varint!(i128, read_signed_leb128, write_signed_leb128);
impl_varint!(isize, read_signed_leb128, write_signed_leb128);

// Float implementation
macro_rules! impl_float {
    ($type:ty) => {
        impl<C: ?Sized> Archivable<C> for $type {
            #[inline]
            fn encode(&self, writer: &mut Writer, _: &mut C) -> Result<(), Error> {
                writer.write_float(*self, Endianness::Little);
                Ok(())
            }

            #[inline]
            fn decode(reader: &mut Reader, _: &mut C) -> Result<Self, Error> {
                reader.read_float(Endianness::Little)
            }
        }
    };
}

impl_float!(f32);
impl_float!(f64);

// Bool implementation
impl<C: ?Sized> Archivable<C> for bool {
    #[inline]
    fn encode(&self, writer: &mut Writer, _: &mut C) -> Result<(), Error> {
        writer.write_byte(if *self { 1 } else { 0 });
        Ok(())
    }

    #[inline]
    fn decode(reader: &mut Reader, _: &mut C) -> Result<Self, Error> {
        match reader.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::InvalidInput("bool", "must be 0 or 1")),
        }
    }
}

// Char implementation
impl<C: ?Sized> Archivable<C> for char {
    #[inline]
    fn encode(&self, writer: &mut Writer, _: &mut C) -> Result<(), Error> {
        writer.write_unsigned_leb128(u32::from(*self));
        Ok(())
    }

    #[inline]
    fn decode(reader: &mut Reader, _: &mut C) -> Result<Self, Error> {
        let scalar: u32 = reader.read_unsigned_leb128()?;
        char::from_u32(scalar).ok_or(Error::InvalidInput("char", "not a unicode scalar value"))
    }
}

// Unit implementation
impl<C: ?Sized> Archivable<C> for () {
    #[inline]
    fn encode(&self, _: &mut Writer, _: &mut C) -> Result<(), Error> {
        Ok(())
    }

    #[inline]
    fn decode(_: &mut Reader, _: &mut C) -> Result<Self, Error> {
        Ok(())
    }
}

// Constant-size array implementation
impl<C: ?Sized, const N: usize> Archivable<C> for [u8; N] {
    #[inline]
    fn encode(&self, writer: &mut Writer, _: &mut C) -> Result<(), Error> {
        writer.write_bytes(&self[..]);
        Ok(())
    }

    #[inline]
    fn decode(reader: &mut Reader, _: &mut C) -> Result<Self, Error> {
        let bytes = reader.read_bytes(N)?;
        let mut dst = [0; N];
        dst.copy_from_slice(&bytes);
        Ok(dst)
    }
}

// Option implementation
impl<C: ?Sized, T: Archivable<C>> Archivable<C> for Option<T> {
    #[inline]
    fn encode(&self, writer: &mut Writer, context: &mut C) -> Result<(), Error> {
        writer.write(&self.is_some(), context)?;
        if let Some(inner) = self {
            writer.write(inner, context)?;
        }
        Ok(())
    }

    #[inline]
    fn decode(reader: &mut Reader, context: &mut C) -> Result<Self, Error> {
        if reader.read::<bool, C>(context)? {
            Ok(Some(reader.read(context)?))
        } else {
            Ok(None)
        }
    }
}

// Box implementation
impl<C: ?Sized, T: Archivable<C>> Archivable<C> for Box<T> {
    #[inline]
    fn encode(&self, writer: &mut Writer, context: &mut C) -> Result<(), Error> {
        writer.write(self.as_ref(), context)
    }

    #[inline]
    fn decode(reader: &mut Reader, context: &mut C) -> Result<Self, Error> {
        reader.read(context).map(Box::new)
    }
}
