//! An owned, growable sequence of bytes.
//!
//! A [Buffer] is appended to while a [crate::Writer] builds it and frozen once handed to a
//! [crate::Reader].

use crate::Error;
use bytes::{Bytes, BytesMut};
use std::{fmt, str::FromStr};

/// An owned, growable sequence of bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Buffer {
    bytes: BytesMut,
}

impl Buffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: BytesMut::with_capacity(capacity),
        }
    }

    /// Creates a buffer holding a copy of `bytes`.
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            bytes: BytesMut::from(bytes.as_ref()),
        }
    }

    /// Creates a buffer from a string of hexadecimal digit pairs (`"abcd"` is `[0xab, 0xcd]`).
    ///
    /// Returns `None` if `hex` has an odd length or contains anything other than hex digits.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.as_bytes();
        if hex.len() % 2 != 0 {
            return None;
        }

        let mut bytes = BytesMut::with_capacity(hex.len() / 2);
        for pair in hex.chunks_exact(2) {
            let high = hex_digit(pair[0])?;
            let low = hex_digit(pair[1])?;
            bytes.extend_from_slice(&[(high << 4) | low]);
        }
        Some(Self { bytes })
    }

    /// Appends `bytes` to the end of the buffer.
    pub fn append(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Returns the number of bytes in the buffer.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the contents of the buffer.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the contents of the buffer as lowercase hexadecimal digits.
    pub fn to_hex(&self) -> String {
        format!("{self:x}")
    }

    /// Converts the buffer into immutable [Bytes] without copying.
    pub fn freeze(self) -> Bytes {
        self.bytes.freeze()
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut BytesMut {
        &mut self.bytes
    }
}

/// Returns the value of an ASCII hexadecimal digit.
fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl FromStr for Buffer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or(Error::InvalidInput("Buffer", "invalid hex string"))
    }
}

impl fmt::LowerHex for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.bytes.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            bytes: BytesMut::from(&bytes[..]),
        }
    }
}

impl From<&[u8]> for Buffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Bytes> for Buffer {
    fn from(bytes: Bytes) -> Self {
        Self {
            bytes: BytesMut::from(&bytes[..]),
        }
    }
}

impl From<Buffer> for Bytes {
    fn from(buffer: Buffer) -> Self {
        buffer.freeze()
    }
}
