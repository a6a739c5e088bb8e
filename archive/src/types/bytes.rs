//! Archive implementations for byte strings and text.
//!
//! Both are written as a length prefix (an unsigned LEB128 varint) followed by the bytes
//! themselves. The length is bounded by [crate::Config::max_length] and by what is left in the
//! input, so a hostile prefix can't trigger a large allocation.

use crate::{varint, Archivable, Error, Reader, Writer};
use bytes::Bytes;

impl<C: ?Sized> Archivable<C> for Bytes {
    #[inline]
    fn encode(&self, writer: &mut Writer, _: &mut C) -> Result<(), Error> {
        writer.reserve(varint::size_unsigned(self.len()) + self.len());
        writer.write_length(self.len())?;
        writer.write_bytes(self);
        Ok(())
    }

    #[inline]
    fn decode(reader: &mut Reader, _: &mut C) -> Result<Self, Error> {
        let len = reader.read_length(1)?;
        reader.read_bytes(len)
    }
}

impl<C: ?Sized> Archivable<C> for String {
    #[inline]
    fn encode(&self, writer: &mut Writer, _: &mut C) -> Result<(), Error> {
        writer.reserve(varint::size_unsigned(self.len()) + self.len());
        writer.write_length(self.len())?;
        writer.write_bytes(self.as_bytes());
        Ok(())
    }

    #[inline]
    fn decode(reader: &mut Reader, _: &mut C) -> Result<Self, Error> {
        let len = reader.read_length(1)?;
        let bytes = reader.read_bytes(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| Error::InvalidInput("String", "invalid utf-8"))
    }
}
