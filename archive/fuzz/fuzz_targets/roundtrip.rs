#![no_main]

use arbitrary::Arbitrary;
use archivist::{
    varint, ArchiveExt, Archivable, BigEndian, Error, LittleEndian, Reader, Writer,
};
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use std::{collections::BTreeMap, fmt::Debug};

fn roundtrip<T: Archivable + PartialEq + Debug>(value: T) {
    let encoded = value.to_buffer().expect("Failed to encode!");
    let decoded = T::from_buffer(encoded).expect("Failed to decode a successfully encoded input!");
    assert_eq!(value, decoded);
}

fn roundtrip_f32(value: f32) {
    let encoded = value.to_buffer().unwrap();
    assert_eq!(encoded.len(), 4);
    let decoded = f32::from_buffer(encoded).unwrap();
    assert_eq!(value.to_bits(), decoded.to_bits());
}

fn roundtrip_f64(value: f64) {
    let encoded = value.to_buffer().unwrap();
    assert_eq!(encoded.len(), 8);
    let decoded = f64::from_buffer(encoded).unwrap();
    assert_eq!(value.to_bits(), decoded.to_bits());
}

fn roundtrip_leb128(value: i128, unsigned: u128) {
    let mut writer = Writer::new();
    writer.write_signed_leb128(value);
    writer.write_unsigned_leb128(unsigned);
    assert_eq!(
        writer.len(),
        varint::size_signed(value) + varint::size_unsigned(unsigned)
    );
    let mut reader = Reader::new(writer.finalize());
    assert_eq!(reader.read_signed_leb128::<i128>().unwrap(), value);
    assert_eq!(reader.read_unsigned_leb128::<u128>().unwrap(), unsigned);
    assert!(reader.is_empty());
}

fn varint_overflow(continuation_bytes: u8, last_byte: u8) {
    let mut bytes = vec![0xffu8; continuation_bytes as usize % 12];
    bytes.push(last_byte & 0x7f);
    let mut reader = Reader::new(bytes);
    match reader.read_unsigned_leb128::<u32>() {
        Ok(value) => {
            // Re-encoding never produces more bytes than were read
            let mut writer = Writer::new();
            writer.write_unsigned_leb128(value);
            assert!(writer.len() <= reader.position());
        }
        Err(Error::InvalidInput(_, _)) => assert_eq!(reader.position(), 0),
        Err(err) => panic!("unexpected error: {err}"),
    }
}

#[derive(Arbitrary, Debug)]
enum FuzzInput<'a> {
    Bytes(&'a [u8]),
    String(String),

    // Collections
    Vec(Vec<u16>),
    Nested(Vec<Vec<i32>>),
    BTreeMap(BTreeMap<u32, String>),

    // Arrays
    ByteArray4([u8; 4]),
    ByteArray32([u8; 32]),

    // Option and tuples
    Option(Option<u64>),
    Tuple2(u8, u16),
    Tuple3(u32, i64, bool),

    // Varints
    Leb128(i128, u128),
    VarIntOverflow {
        continuation_bytes: u8,
        last_byte: u8,
    },

    // Fixed-width
    BigEndian(u64),
    LittleEndian(i32),

    // Primitives
    Bool(bool),
    Char(char),
    Unit,
    Usize(usize),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    F32(f32),
    F64(f64),
}

fn fuzz(input: FuzzInput) {
    match input {
        FuzzInput::Bytes(it) => roundtrip(Bytes::from(it.to_vec())),
        FuzzInput::String(it) => roundtrip(it),
        FuzzInput::Vec(it) => roundtrip(it),
        FuzzInput::Nested(it) => roundtrip(it),
        FuzzInput::BTreeMap(it) => roundtrip(it),
        FuzzInput::ByteArray4(it) => roundtrip(it),
        FuzzInput::ByteArray32(it) => roundtrip(it),
        FuzzInput::Option(it) => roundtrip(it),
        FuzzInput::Tuple2(a, b) => roundtrip((a, b)),
        FuzzInput::Tuple3(a, b, c) => roundtrip((a, b, c)),
        FuzzInput::Leb128(value, unsigned) => roundtrip_leb128(value, unsigned),
        FuzzInput::VarIntOverflow {
            continuation_bytes,
            last_byte,
        } => varint_overflow(continuation_bytes, last_byte),
        FuzzInput::BigEndian(v) => roundtrip(BigEndian(v)),
        FuzzInput::LittleEndian(v) => roundtrip(LittleEndian(v)),
        FuzzInput::Bool(v) => roundtrip(v),
        FuzzInput::Char(v) => roundtrip(v),
        FuzzInput::Unit => roundtrip(()),
        FuzzInput::Usize(v) => roundtrip(v),
        FuzzInput::Isize(v) => roundtrip(v),
        FuzzInput::U8(v) => roundtrip(v),
        FuzzInput::U16(v) => roundtrip(v),
        FuzzInput::U32(v) => roundtrip(v),
        FuzzInput::U64(v) => roundtrip(v),
        FuzzInput::U128(v) => roundtrip(v),
        FuzzInput::I8(v) => roundtrip(v),
        FuzzInput::I16(v) => roundtrip(v),
        FuzzInput::I32(v) => roundtrip(v),
        FuzzInput::I64(v) => roundtrip(v),
        FuzzInput::I128(v) => roundtrip(v),
        FuzzInput::F32(v) => roundtrip_f32(v),
        FuzzInput::F64(v) => roundtrip_f64(v),
    };
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
