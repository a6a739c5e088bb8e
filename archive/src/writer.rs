//! Appends encoded values to a [Buffer].

use crate::{
    endian::{Endianness, Float, Integer},
    varint::{self, SInt, UInt},
    Archivable, Buffer, Config, Error, RawRepresentable,
};
use bytes::BufMut;
use tracing::{debug, trace};

/// A cursor over a [Buffer] being built.
///
/// Primitive writes never fail. Composite writes go through [Writer::write], which hands the
/// writer and the caller's context to the value's own [Archivable::encode].
///
/// A writer enforces the same [Config] limits as a [crate::Reader], so it never produces an
/// archive that a reader with the same configuration would reject.
#[derive(Debug, Default)]
pub struct Writer {
    buffer: Buffer,
    depth: usize,
    config: Config,
}

impl Writer {
    /// Creates a writer over an empty buffer, with the default [Config].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer over an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Buffer::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Replaces the limits applied while writing.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Returns the limits applied while writing.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Reserves room for at least `additional` more bytes.
    pub fn reserve(&mut self, additional: usize) {
        self.buffer.bytes_mut().reserve(additional);
    }

    /// Appends one byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buffer.bytes_mut().put_u8(byte);
    }

    /// Appends `bytes` as-is, without a length prefix.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.append(bytes);
    }

    /// Appends the discriminant of a tagged union: the zero-based index of the active case.
    #[inline]
    pub fn write_discriminant(&mut self, index: u8) {
        self.write_byte(index);
    }

    /// Appends the `WIDTH` bytes of `value` in the given byte order.
    #[inline]
    pub fn write_integer<T: Integer>(&mut self, value: T, endianness: Endianness) {
        value.put(self.buffer.bytes_mut(), endianness);
    }

    /// Appends the IEEE-754 bit pattern of `value` in the given byte order.
    #[inline]
    pub fn write_float<T: Float>(&mut self, value: T, endianness: Endianness) {
        self.write_integer(value.to_bits(), endianness);
    }

    /// Appends `value` as an unsigned LEB128 varint.
    #[inline]
    pub fn write_unsigned_leb128<T: UInt>(&mut self, value: T) {
        varint::write_unsigned(value, self.buffer.bytes_mut());
    }

    /// Appends `value` as a signed LEB128 varint.
    #[inline]
    pub fn write_signed_leb128<T: SInt>(&mut self, value: T) {
        varint::write_signed(value, self.buffer.bytes_mut());
    }

    /// Appends a length prefix.
    ///
    /// Fails with invalid input if `len` exceeds [Config::max_length].
    pub fn write_length(&mut self, len: usize) -> Result<(), Error> {
        if len > self.config.max_length {
            debug!(
                len,
                max = self.config.max_length,
                position = self.len(),
                "length exceeds limit"
            );
            return Err(Error::InvalidInput("length", "exceeds maximum"));
        }
        self.write_unsigned_leb128(len);
        Ok(())
    }

    /// Appends the raw value of `value` using the raw type's own encoding.
    pub fn write_raw_value<T: RawRepresentable>(&mut self, value: &T) -> Result<(), Error> {
        self.write(&value.raw_value(), &mut ())
    }

    /// Appends `value` by delegating to its [Archivable::encode], threading `context` through.
    ///
    /// Fails with invalid input if nesting exceeds [Config::max_depth]. If encoding fails,
    /// anything `value` appended is removed.
    pub fn write<T: Archivable<C>, C: ?Sized>(
        &mut self,
        value: &T,
        context: &mut C,
    ) -> Result<(), Error> {
        if self.depth >= self.config.max_depth {
            debug!(
                type_name = std::any::type_name::<T>(),
                max = self.config.max_depth,
                "nesting exceeds limit"
            );
            return Err(Error::InvalidInput("depth", "exceeds maximum"));
        }

        let start = self.len();
        self.depth += 1;
        let result = value.encode(self, context);
        self.depth -= 1;
        if let Err(err) = &result {
            trace!(
                type_name = std::any::type_name::<T>(),
                position = start,
                ?err,
                "failed to write value"
            );
            self.buffer.bytes_mut().truncate(start);
        }
        result
    }

    /// Consumes the writer, returning the completed buffer.
    pub fn finalize(self) -> Buffer {
        self.buffer
    }
}

impl From<Buffer> for Writer {
    /// Continues appending to an existing buffer.
    fn from(buffer: Buffer) -> Self {
        Self {
            buffer,
            ..Self::default()
        }
    }
}
