//! Fixed-width integers and floats with an explicit byte order.
//!
//! Integers are written as exactly `WIDTH` bytes. Floats are never written directly: their
//! IEEE-754 bit pattern is reinterpreted as an unsigned integer of the same width and written by
//! the integer codec, so both share one byte layout.

use bytes::{Buf, BufMut};

/// The order in which the bytes of a fixed-width value are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endianness {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
}

/// A primitive integer with a fixed encoded width.
pub trait Integer: Copy {
    /// The number of bytes in the encoding.
    const WIDTH: usize;

    /// Writes the bit pattern of `self` to `buf` in the given byte order.
    fn put(self, buf: &mut impl BufMut, endianness: Endianness);

    /// Reads a value from `buf` in the given byte order.
    ///
    /// Callers must ensure at least [Integer::WIDTH] bytes remain.
    fn get(buf: &mut impl Buf, endianness: Endianness) -> Self;
}

// Implements `Integer` for a primitive with its big- and little-endian `bytes` accessors.
macro_rules! impl_integer {
    ($type:ty, $get:ident, $get_le:ident, $put:ident, $put_le:ident) => {
        impl Integer for $type {
            const WIDTH: usize = std::mem::size_of::<$type>();

            #[inline]
            fn put(self, buf: &mut impl BufMut, endianness: Endianness) {
                match endianness {
                    Endianness::Big => buf.$put(self),
                    Endianness::Little => buf.$put_le(self),
                }
            }

            #[inline]
            fn get(buf: &mut impl Buf, endianness: Endianness) -> Self {
                match endianness {
                    Endianness::Big => buf.$get(),
                    Endianness::Little => buf.$get_le(),
                }
            }
        }
    };
}

// Single bytes have no order.
impl_integer!(u8, get_u8, get_u8, put_u8, put_u8);
impl_integer!(i8, get_i8, get_i8, put_i8, put_i8);
impl_integer!(u16, get_u16, get_u16_le, put_u16, put_u16_le);
impl_integer!(u32, get_u32, get_u32_le, put_u32, put_u32_le);
impl_integer!(u64, get_u64, get_u64_le, put_u64, put_u64_le);
impl_integer!(u128, get_u128, get_u128_le, put_u128, put_u128_le);
impl_integer!(i16, get_i16, get_i16_le, put_i16, put_i16_le);
impl_integer!(i32, get_i32, get_i32_le, put_i32, put_i32_le);
impl_integer!(i64, get_i64, get_i64_le, put_i64, put_i64_le);
impl_integer!(i128, get_i128, get_i128_le, put_i128, put_i128_le);

/// An IEEE-754 floating point number, archived through the integer holding its bits.
pub trait Float: Copy {
    /// The unsigned integer of equal width.
    type Bits: Integer;

    /// Returns the raw bit pattern.
    fn to_bits(self) -> Self::Bits;

    /// Reinterprets a raw bit pattern.
    fn from_bits(bits: Self::Bits) -> Self;
}

macro_rules! impl_float {
    ($type:ty, $bits:ty) => {
        impl Float for $type {
            type Bits = $bits;

            #[inline]
            fn to_bits(self) -> $bits {
                <$type>::to_bits(self)
            }

            #[inline]
            fn from_bits(bits: $bits) -> Self {
                <$type>::from_bits(bits)
            }
        }
    };
}

impl_float!(f32, u32);
impl_float!(f64, u64);
