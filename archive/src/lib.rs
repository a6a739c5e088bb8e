//! Archive structured values into a compact binary format.
//!
//! # Overview
//!
//! A binary archive engine designed to:
//! - Write structured values (primitives, enums, structs) into a compact byte representation
//! - Read untrusted bytes back into structured values, failing cleanly when they are truncated or
//!   malformed
//!
//! A [Writer] appends to a [Buffer]; [Writer::finalize] hands the buffer over to a [Reader],
//! which consumes it with a cursor that only moves on success.
//!
//! # Supported Types
//!
//! Natively supports:
//! - Primitives: `u8`..`u128`, `i8`..`i128`, `usize`, `isize`, `f32`, `f64`, `bool`, `char`, `()`
//! - Text and bytes: `String`, [bytes::Bytes], `[u8; N]`
//! - Containers: `Option<T>`, `Box<T>`, `Vec<T>`, `BTreeMap<K, V>`, tuples
//! - Fixed-width integers in either byte order via [BigEndian] and [LittleEndian]
//!
//! User-defined types participate by implementing [Archivable]. Enumerations backed by primitive
//! values can implement [RawRepresentable] and archive their raw value instead.
//!
//! # Context
//!
//! Every [Archivable] call receives a mutable context chosen by the caller, and passes the same
//! context to the values nested inside it. Types that need no context implement `Archivable<C>`
//! for every `C`; [ArchiveExt] provides shorthands using the unit context.
//!
//! # Example (Enum)
//!
//! ```
//! use archivist::{ArchiveExt, Archivable, Error, Reader, Writer};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Shape {
//!     Point,
//!     Circle(f64),
//!     Rect { width: u32, height: u32 },
//! }
//!
//! impl<C: ?Sized> Archivable<C> for Shape {
//!     fn encode(&self, writer: &mut Writer, context: &mut C) -> Result<(), Error> {
//!         match self {
//!             Self::Point => writer.write_discriminant(0),
//!             Self::Circle(radius) => {
//!                 writer.write_discriminant(1);
//!                 writer.write(radius, context)?;
//!             }
//!             Self::Rect { width, height } => {
//!                 writer.write_discriminant(2);
//!                 writer.write(width, context)?;
//!                 writer.write(height, context)?;
//!             }
//!         }
//!         Ok(())
//!     }
//!
//!     fn decode(reader: &mut Reader, context: &mut C) -> Result<Self, Error> {
//!         match reader.read_discriminant()? {
//!             0 => Ok(Self::Point),
//!             1 => Ok(Self::Circle(reader.read(context)?)),
//!             2 => Ok(Self::Rect {
//!                 width: reader.read(context)?,
//!                 height: reader.read(context)?,
//!             }),
//!             _ => Err(Error::InvalidInput("Shape", "invalid discriminant")),
//!         }
//!     }
//! }
//!
//! let shape = Shape::Rect { width: 3, height: 300 };
//! let buffer = shape.to_buffer().unwrap();
//! assert_eq!(buffer.to_hex(), "0203ac02");
//! assert_eq!(Shape::from_buffer(buffer).unwrap(), shape);
//! ```
//!
//! # Example (Struct)
//!
//! ```
//! use archivist::{ArchiveExt, Archivable, Error, Reader, Writer};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Account {
//!     id: u64,
//!     name: String,
//!     // Rebuilt from `name`, never archived
//!     name_len: usize,
//! }
//!
//! impl<C: ?Sized> Archivable<C> for Account {
//!     fn encode(&self, writer: &mut Writer, context: &mut C) -> Result<(), Error> {
//!         writer.write(&self.id, context)?;
//!         writer.write(&self.name, context)
//!     }
//!
//!     fn decode(reader: &mut Reader, context: &mut C) -> Result<Self, Error> {
//!         let id = reader.read(context)?;
//!         let name: String = reader.read(context)?;
//!         let name_len = name.len();
//!         Ok(Self { id, name, name_len })
//!     }
//! }
//!
//! let account = Account { id: 7, name: "ada".into(), name_len: 3 };
//! let buffer = account.to_buffer().unwrap();
//! assert_eq!(buffer.as_slice(), b"\x07\x03ada");
//! assert_eq!(Account::from_buffer(buffer).unwrap(), account);
//! ```

pub mod archivable;
pub mod buffer;
pub mod config;
pub mod endian;
pub mod error;
pub mod reader;
pub mod types;
pub mod varint;
pub mod writer;

// Re-export main types and traits
pub use archivable::{ArchiveExt, Archivable, RawRepresentable};
pub use buffer::Buffer;
pub use config::Config;
pub use endian::{Endianness, Float, Integer};
pub use error::Error;
pub use reader::Reader;
pub use types::fixed::{BigEndian, LittleEndian};
pub use writer::Writer;
