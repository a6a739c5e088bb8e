//! Fixed-width integer wrappers.
//!
//! Integers are archived as varints by default. Wrapping one in [BigEndian] or [LittleEndian]
//! archives it as exactly `WIDTH` bytes in that order instead, which suits values that are
//! uniformly distributed (hashes, identifiers) or formats that must match an external layout.

use crate::{endian::Integer, Archivable, Endianness, Error, Reader, Writer};

/// An integer archived as its big-endian bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigEndian<T: Integer>(pub T);

/// An integer archived as its little-endian bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LittleEndian<T: Integer>(pub T);

macro_rules! impl_fixed {
    ($wrapper:ident, $endianness:expr) => {
        impl<T: Integer> $wrapper<T> {
            /// Reads a wrapped integer and returns it as its original (primitive) type.
            pub fn read_into(reader: &mut Reader) -> Result<T, Error> {
                reader.read_integer($endianness)
            }
        }

        impl<C: ?Sized, T: Integer> Archivable<C> for $wrapper<T> {
            #[inline]
            fn encode(&self, writer: &mut Writer, _: &mut C) -> Result<(), Error> {
                writer.write_integer(self.0, $endianness);
                Ok(())
            }

            #[inline]
            fn decode(reader: &mut Reader, _: &mut C) -> Result<Self, Error> {
                reader.read_integer($endianness).map($wrapper)
            }
        }
    };
}

impl_fixed!(BigEndian, Endianness::Big);
impl_fixed!(LittleEndian, Endianness::Little);
