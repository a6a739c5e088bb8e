//! Core archive traits

use crate::{Buffer, Error, Reader, Writer};
use bytes::Bytes;

/// Trait for types that can be archived to a [Writer] and restored from a [Reader].
///
/// The `C` type parameter is the context threaded by mutable reference through every nested
/// call of one archive session. The engine never inspects it; types use it to coordinate
/// state across a whole pass (for example, a table of values already written so later
/// occurrences can refer back to them). Types that need no context implement `Archivable<C>`
/// for every `C`.
///
/// # Wire layout
///
/// Conformances are written by hand, and their field lists are part of the wire format:
/// - A struct writes each archived field in declaration order, with no prefixes or tags.
///   A field is archived unless it is derived from other fields or is a constant that no
///   constructor can change; such fields are rebuilt on decode. Mutable fields with a
///   default value are archived.
/// - An enum writes the zero-based index of its active case as a single byte (so at most 256
///   cases), then each associated value of that case in declaration order. Decoding an index
///   with no case fails with [Error::InvalidInput].
pub trait Archivable<C: ?Sized = ()>: Sized {
    /// Writes `self` to `writer`.
    fn encode(&self, writer: &mut Writer, context: &mut C) -> Result<(), Error>;

    /// Reads a value from `reader`.
    ///
    /// Nested values should be read with [Reader::read] so the cursor is restored if any of
    /// them fail.
    fn decode(reader: &mut Reader, context: &mut C) -> Result<Self, Error>;

    /// Archives `self` into a new buffer.
    ///
    /// (Provided method).
    fn archive(&self, context: &mut C) -> Result<Buffer, Error> {
        let mut writer = Writer::new();
        writer.write(self, context)?;
        Ok(writer.finalize())
    }

    /// Restores a value from `buffer`, ensuring the buffer is fully consumed.
    ///
    /// (Provided method).
    fn unarchive(buffer: impl Into<Bytes>, context: &mut C) -> Result<Self, Error> {
        let mut reader = Reader::new(buffer);
        let value = reader.read(context)?;
        if !reader.is_empty() {
            return Err(Error::InvalidInput("archive", "trailing bytes"));
        }
        Ok(value)
    }
}

/// Extension trait providing ergonomic methods for types requiring no context.
pub trait ArchiveExt: Archivable<()> {
    /// Archives `self` into a new buffer using the unit context.
    fn to_buffer(&self) -> Result<Buffer, Error> {
        self.archive(&mut ())
    }

    /// Restores a value from `buffer` using the unit context.
    fn from_buffer(buffer: impl Into<Bytes>) -> Result<Self, Error> {
        Self::unarchive(buffer, &mut ())
    }
}

// Automatically implement `ArchiveExt` for types that implement `Archivable` with no context.
impl<T: Archivable<()>> ArchiveExt for T {}

/// Trait for enumerations whose cases each correspond to a distinct primitive value.
///
/// The raw value is the wire encoding: see [Writer::write_raw_value] and
/// [Reader::read_raw_value].
pub trait RawRepresentable: Sized {
    /// The primitive type backing each case.
    type RawValue: Archivable;

    /// Returns the raw value of this case.
    fn raw_value(&self) -> Self::RawValue;

    /// Returns the case with the given raw value, if any.
    fn from_raw_value(raw: Self::RawValue) -> Option<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Suit {
        Hearts,
        Spades,
    }

    impl RawRepresentable for Suit {
        type RawValue = String;

        fn raw_value(&self) -> String {
            match self {
                Self::Hearts => "hearts".into(),
                Self::Spades => "spades".into(),
            }
        }

        fn from_raw_value(raw: String) -> Option<Self> {
            match raw.as_str() {
                "hearts" => Some(Self::Hearts),
                "spades" => Some(Self::Spades),
                _ => None,
            }
        }
    }

    impl<C: ?Sized> Archivable<C> for Suit {
        fn encode(&self, writer: &mut Writer, _: &mut C) -> Result<(), Error> {
            writer.write_raw_value(self)
        }

        fn decode(reader: &mut Reader, context: &mut C) -> Result<Self, Error> {
            reader.read_raw_value_in(context)
        }
    }

    #[test]
    fn test_archive_round_trip() {
        let buffer = Suit::Spades.to_buffer().unwrap();
        assert_eq!(buffer.as_slice(), b"\x06spades");
        assert_eq!(Suit::from_buffer(buffer).unwrap(), Suit::Spades);
    }

    #[test]
    fn test_trailing_bytes() {
        let mut buffer = Suit::Hearts.to_buffer().unwrap();
        buffer.append(&[0]);
        assert!(matches!(
            Suit::from_buffer(buffer),
            Err(Error::InvalidInput("archive", "trailing bytes"))
        ));
    }

    #[test]
    fn test_unknown_raw_value() {
        let buffer = "clubs".to_string().to_buffer().unwrap();
        assert!(matches!(
            Suit::from_buffer(buffer),
            Err(Error::InvalidInput("raw value", _))
        ));
    }

    #[test]
    fn test_context_is_threaded() {
        // A context that counts how many values were written.
        struct Counter(usize);

        struct Counted(u8);

        impl Archivable<Counter> for Counted {
            fn encode(&self, writer: &mut Writer, context: &mut Counter) -> Result<(), Error> {
                context.0 += 1;
                writer.write_byte(self.0);
                Ok(())
            }

            fn decode(reader: &mut Reader, context: &mut Counter) -> Result<Self, Error> {
                context.0 += 1;
                reader.read_byte().map(Counted)
            }
        }

        let mut counter = Counter(0);
        let values = vec![Counted(1), Counted(2), Counted(3)];
        let buffer = values.archive(&mut counter).unwrap();
        assert_eq!(counter.0, 3);

        let mut counter = Counter(0);
        let decoded = Vec::<Counted>::unarchive(buffer, &mut counter).unwrap();
        assert_eq!(counter.0, 3);
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[2].0, 3);
    }
}
