//! Decodes values from an immutable buffer.

use crate::{
    endian::{Endianness, Float, Integer},
    varint::{self, SInt, UInt},
    Archivable, Config, Error, RawRepresentable,
};
use bytes::{Buf, Bytes};
use tracing::{debug, trace};

/// A cursor over a buffer being consumed.
///
/// The cursor always satisfies `0 <= position <= len`. Every read advances it by exactly the
/// number of bytes consumed on success and leaves it unchanged on failure. Callers that need
/// speculative parsing across several reads can snapshot [Reader::position] and restore it with
/// [Reader::set_position].
#[derive(Clone, Debug)]
pub struct Reader {
    data: Bytes,
    cursor: usize,
    depth: usize,
    config: Config,
}

impl Reader {
    /// Creates a reader positioned at the start of `buffer`, with the default [Config].
    pub fn new(buffer: impl Into<Bytes>) -> Self {
        Self {
            data: buffer.into(),
            cursor: 0,
            depth: 0,
            config: Config::default(),
        }
    }

    /// Replaces the limits applied while reading.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Returns the limits applied while reading.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the current offset into the buffer.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor to `position`, typically one previously returned by [Reader::position].
    ///
    /// Fails with invalid input, leaving the cursor unchanged, if `position` is past the end of
    /// the buffer.
    pub fn set_position(&mut self, position: usize) -> Result<(), Error> {
        if position > self.data.len() {
            return Err(Error::InvalidInput("position", "out of bounds"));
        }
        self.cursor = position;
        Ok(())
    }

    /// Returns the number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// Returns true if every byte has been read.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the unread bytes.
    fn unread(&self) -> &[u8] {
        &self.data[self.cursor..]
    }

    /// Returns an error unless at least `len` bytes remain.
    #[inline]
    fn at_least(&self, len: usize) -> Result<(), Error> {
        if self.remaining() < len {
            return Err(Error::InputExhausted);
        }
        Ok(())
    }

    /// Reads one byte.
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8, Error> {
        self.at_least(1)?;
        let byte = self.data[self.cursor];
        self.cursor += 1;
        Ok(byte)
    }

    /// Reads `len` bytes as-is, without copying.
    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes, Error> {
        self.at_least(len)?;
        let bytes = self.data.slice(self.cursor..self.cursor + len);
        self.cursor += len;
        Ok(bytes)
    }

    /// Reads the discriminant of a tagged union.
    ///
    /// The caller maps it to a case and rejects indices without one.
    #[inline]
    pub fn read_discriminant(&mut self) -> Result<u8, Error> {
        self.read_byte()
    }

    /// Reads a fixed-width integer in the given byte order.
    #[inline]
    pub fn read_integer<T: Integer>(&mut self, endianness: Endianness) -> Result<T, Error> {
        self.at_least(T::WIDTH)?;
        let mut unread = self.unread();
        let value = T::get(&mut unread, endianness);
        self.cursor += T::WIDTH;
        Ok(value)
    }

    /// Reads an IEEE-754 float in the given byte order.
    #[inline]
    pub fn read_float<T: Float>(&mut self, endianness: Endianness) -> Result<T, Error> {
        let bits = self.read_integer::<T::Bits>(endianness)?;
        Ok(T::from_bits(bits))
    }

    /// Reads an unsigned LEB128 varint.
    pub fn read_unsigned_leb128<T: UInt>(&mut self) -> Result<T, Error> {
        let mut unread = self.unread();
        let before = unread.remaining();
        let value = varint::read_unsigned(&mut unread)?;
        let consumed = before - unread.remaining();
        self.cursor += consumed;
        Ok(value)
    }

    /// Reads a signed LEB128 varint.
    pub fn read_signed_leb128<T: SInt>(&mut self) -> Result<T, Error> {
        let mut unread = self.unread();
        let before = unread.remaining();
        let value = varint::read_signed(&mut unread)?;
        let consumed = before - unread.remaining();
        self.cursor += consumed;
        Ok(value)
    }

    /// Reads a length prefix.
    ///
    /// Fails with invalid input if the length exceeds [Config::max_length], and with input
    /// exhausted if it exceeds what is left in the buffer while `min_item_size` is nonzero
    /// (every item needs at least that many bytes).
    pub fn read_length(&mut self, min_item_size: usize) -> Result<usize, Error> {
        let start = self.cursor;
        let len = self.read_unsigned_leb128::<usize>()?;
        if len > self.config.max_length {
            debug!(
                len,
                max = self.config.max_length,
                position = start,
                "length prefix exceeds limit"
            );
            self.cursor = start;
            return Err(Error::InvalidInput("length", "exceeds maximum"));
        }
        if len.saturating_mul(min_item_size) > self.remaining() {
            self.cursor = start;
            return Err(Error::InputExhausted);
        }
        Ok(len)
    }

    /// Reads a raw value with the raw type's own decoding and maps it to a case of `T`.
    ///
    /// Fails with invalid input if no case of `T` has that raw value.
    pub fn read_raw_value<T: RawRepresentable>(&mut self) -> Result<T, Error> {
        let start = self.cursor;
        let raw = self.read::<T::RawValue, ()>(&mut ())?;
        match T::from_raw_value(raw) {
            Some(value) => Ok(value),
            None => {
                debug!(
                    type_name = std::any::type_name::<T>(),
                    position = start,
                    "no case matches raw value"
                );
                self.cursor = start;
                Err(Error::InvalidInput("raw value", "no matching case"))
            }
        }
    }

    /// Reads a raw value like [Reader::read_raw_value], for call sites that thread a context.
    ///
    /// Raw values never consult the context; errors propagate unchanged.
    #[inline]
    pub fn read_raw_value_in<T: RawRepresentable, C: ?Sized>(
        &mut self,
        _context: &mut C,
    ) -> Result<T, Error> {
        self.read_raw_value()
    }

    /// Reads a `T` by delegating to its [Archivable::decode], threading `context` through.
    ///
    /// If decoding fails, the cursor is restored to where it was before the call.
    pub fn read<T: Archivable<C>, C: ?Sized>(&mut self, context: &mut C) -> Result<T, Error> {
        if self.depth >= self.config.max_depth {
            debug!(
                type_name = std::any::type_name::<T>(),
                max = self.config.max_depth,
                "nesting exceeds limit"
            );
            return Err(Error::InvalidInput("depth", "exceeds maximum"));
        }

        let start = self.cursor;
        self.depth += 1;
        let result = T::decode(self, context);
        self.depth -= 1;
        if let Err(err) = &result {
            trace!(
                type_name = std::any::type_name::<T>(),
                position = start,
                ?err,
                "failed to read value"
            );
            self.cursor = start;
        }
        result
    }
}

impl From<crate::Buffer> for Reader {
    fn from(buffer: crate::Buffer) -> Self {
        Self::new(buffer)
    }
}
