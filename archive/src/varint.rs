//! Variable-length integer encoding and decoding (LEB128)
//!
//! Each byte uses:
//! - 7 bits for the value (least-significant group first)
//! - 1 "continuation" bit to indicate if more bytes follow
//!
//! Unsigned values stop once the remaining value is zero. Signed values use two's complement and
//! stop once the remaining value is fully described by the sign bit (bit 6) of the last byte.
//!
//! Decoding never wraps: a value that does not fit the target type, or an encoding with more
//! groups than the type can hold, is rejected as invalid input.

use crate::Error;
use bytes::{Buf, BufMut};

const DATA_BITS_PER_BYTE: u32 = 7;
const DATA_BITS_MASK: u8 = 0x7F;
const CONTINUATION_BIT_MASK: u8 = 0x80;
const SIGN_BIT_MASK: u8 = 0x40;

/// A trait for unsigned integers that can be varint encoded.
pub trait UInt: Copy {
    /// The width of the integer in bits.
    const BITS: u32;

    /// Widens the integer without loss.
    fn widen(self) -> u128;

    /// Narrows a widened integer, returning `None` if it does not fit.
    fn narrow(value: u128) -> Option<Self>;
}

// Implements the `UInt` trait for all unsigned integer types.
macro_rules! impl_uint {
    ($type:ty) => {
        impl UInt for $type {
            const BITS: u32 = <$type>::BITS;

            #[inline]
            fn widen(self) -> u128 {
                self as u128
            }

            #[inline]
            fn narrow(value: u128) -> Option<Self> {
                <$type>::try_from(value).ok()
            }
        }
    };
}
impl_uint!(u8);
impl_uint!(u16);
impl_uint!(u32);
impl_uint!(u64);
impl_uint!(u128);
impl_uint!(usize);

/// A trait for signed integers that can be varint encoded.
pub trait SInt: Copy {
    /// The width of the integer in bits.
    const BITS: u32;

    /// Widens the integer without loss (sign-extending).
    fn widen(self) -> i128;

    /// Narrows a widened integer, returning `None` if it does not fit.
    fn narrow(value: i128) -> Option<Self>;
}

// Implements the `SInt` trait for all signed integer types.
macro_rules! impl_sint {
    ($type:ty) => {
        impl SInt for $type {
            const BITS: u32 = <$type>::BITS;

            #[inline]
            fn widen(self) -> i128 {
                self as i128
            }

            #[inline]
            fn narrow(value: i128) -> Option<Self> {
                <$type>::try_from(value).ok()
            }
        }
    };
}
impl_sint!(i8);
impl_sint!(i16);
impl_sint!(i32);
impl_sint!(i64);
impl_sint!(i128);
impl_sint!(isize);

/// Encodes an unsigned integer as a varint.
pub fn write_unsigned<T: UInt>(value: T, buf: &mut impl BufMut) {
    let mut val = value.widen();
    loop {
        let byte = (val as u8) & DATA_BITS_MASK;
        val >>= DATA_BITS_PER_BYTE;
        if val == 0 {
            buf.put_u8(byte);
            return;
        }
        buf.put_u8(byte | CONTINUATION_BIT_MASK);
    }
}

/// Encodes a signed integer as a varint.
pub fn write_signed<T: SInt>(value: T, buf: &mut impl BufMut) {
    let mut val = value.widen();
    loop {
        let byte = (val as u8) & DATA_BITS_MASK;

        // Arithmetic shift (sign-extending).
        val >>= DATA_BITS_PER_BYTE;
        let sign_clear = byte & SIGN_BIT_MASK == 0;
        if (val == 0 && sign_clear) || (val == -1 && !sign_clear) {
            buf.put_u8(byte);
            return;
        }
        buf.put_u8(byte | CONTINUATION_BIT_MASK);
    }
}

/// Decodes an unsigned integer from a varint.
///
/// The buffer is consumed up to and including the terminating byte, even on error. Callers that
/// need to keep their position on failure should read from a copy.
pub fn read_unsigned<T: UInt>(buf: &mut impl Buf) -> Result<T, Error> {
    let mut result: u128 = 0;
    let mut shift = 0;

    // Loop over all the bytes.
    loop {
        // All groups the type can hold have been read, yet the last one asked for more.
        if shift >= T::BITS {
            return Err(Error::InvalidInput("varint", "too many bytes"));
        }

        // Read the next byte.
        if !buf.has_remaining() {
            return Err(Error::InputExhausted);
        }
        let byte = buf.get_u8();
        let group = byte & DATA_BITS_MASK;

        // If this must be the last group, check for set bits beyond the size of T.
        let remaining_bits = T::BITS - shift;
        if remaining_bits < DATA_BITS_PER_BYTE && (group >> remaining_bits) != 0 {
            return Err(Error::InvalidInput("varint", "overflow"));
        }

        // Write the 7 bits of data to the result.
        result |= (group as u128) << shift;

        // If the continuation bit is not set, return.
        if byte & CONTINUATION_BIT_MASK == 0 {
            return T::narrow(result).ok_or(Error::InvalidInput("varint", "overflow"));
        }

        // Each byte has 7 bits of data.
        shift += DATA_BITS_PER_BYTE;
    }
}

/// Decodes a signed integer from a varint.
///
/// The buffer is consumed up to and including the terminating byte, even on error. Callers that
/// need to keep their position on failure should read from a copy.
pub fn read_signed<T: SInt>(buf: &mut impl Buf) -> Result<T, Error> {
    let mut result: i128 = 0;
    let mut shift = 0;

    loop {
        if shift >= T::BITS {
            return Err(Error::InvalidInput("varint", "too many bytes"));
        }
        if !buf.has_remaining() {
            return Err(Error::InputExhausted);
        }
        let byte = buf.get_u8();
        let group = byte & DATA_BITS_MASK;

        // The last group may only carry as many bits as T has left, and every bit above those
        // must repeat the sign.
        let remaining_bits = T::BITS - shift;
        if remaining_bits < DATA_BITS_PER_BYTE {
            let value = ((group << 1) as i8) >> 1;
            let limit = 1i8 << (remaining_bits - 1);
            if value < -limit || value >= limit {
                return Err(Error::InvalidInput("varint", "overflow"));
            }
        }

        result |= (group as i128) << shift;
        shift += DATA_BITS_PER_BYTE;

        if byte & CONTINUATION_BIT_MASK == 0 {
            // Sign-extend from the last group.
            if shift < i128::BITS && byte & SIGN_BIT_MASK != 0 {
                result |= -1i128 << shift;
            }
            return T::narrow(result).ok_or(Error::InvalidInput("varint", "overflow"));
        }
    }
}

/// Calculates the number of bytes needed to encode an unsigned integer as a varint.
pub fn size_unsigned<T: UInt>(value: T) -> usize {
    let data_bits = u128::BITS - value.widen().leading_zeros();
    usize::max(1, data_bits.div_ceil(DATA_BITS_PER_BYTE) as usize)
}

/// Calculates the number of bytes needed to encode a signed integer as a varint.
pub fn size_signed<T: SInt>(value: T) -> usize {
    let value = value.widen();

    // Magnitude bits (ones for negative values, zeros for positive ones) plus the sign bit.
    let data_bits = u128::BITS - (value ^ (value >> (i128::BITS - 1))).leading_zeros() + 1;
    data_bits.div_ceil(DATA_BITS_PER_BYTE) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Buffer, Error};
    use bytes::Bytes;

    fn encode_signed<T: SInt>(value: T) -> Vec<u8> {
        let mut buf = Vec::new();
        write_signed(value, &mut buf);
        buf
    }

    fn encode_unsigned<T: UInt>(value: T) -> Vec<u8> {
        let mut buf = Vec::new();
        write_unsigned(value, &mut buf);
        buf
    }

    fn hex(value: &str) -> Vec<u8> {
        Buffer::from_hex(value).unwrap().as_slice().to_vec()
    }

    #[test]
    fn test_known_signed_vectors() {
        assert_eq!(encode_signed(42i64), hex("2a"));
        assert_eq!(encode_signed(-2i64), hex("7e"));
        assert_eq!(encode_signed(128i64), hex("8001"));
        assert_eq!(encode_signed(-1i64), hex("7f"));
        assert_eq!(encode_signed(63i64), hex("3f"));
        assert_eq!(encode_signed(64i64), hex("c000"));
        assert_eq!(encode_signed(-64i64), hex("40"));
        assert_eq!(encode_signed(-65i64), hex("bf7f"));
        assert_eq!(
            encode_signed(-1719174423445531335i64),
            hex("b9aadefc86ff909268")
        );

        let value: i64 = read_signed(&mut &hex("b9aadefc86ff909268")[..]).unwrap();
        assert_eq!(value, -1719174423445531335);
    }

    #[test]
    fn test_known_unsigned_vectors() {
        assert_eq!(encode_unsigned(0u32), hex("00"));
        assert_eq!(encode_unsigned(42u32), hex("2a"));
        assert_eq!(encode_unsigned(127u32), hex("7f"));
        assert_eq!(encode_unsigned(128u32), hex("8001"));
        assert_eq!(encode_unsigned(300u32), hex("ac02"));
        assert_eq!(encode_unsigned(u32::MAX), hex("ffffffff0f"));
    }

    #[test]
    fn test_small_widths() {
        let val = read_unsigned::<u8>(&mut &[0x81, 0x01][..]);
        assert_eq!(val.unwrap(), 0x81);

        let val = read_unsigned::<u8>(&mut &[0x01][..]);
        assert_eq!(val.unwrap(), 0x01);

        let val = read_unsigned::<u8>(&mut &[0xAC, 0x01][..]);
        assert_eq!(val.unwrap(), 0xAC);

        let val = read_signed::<i8>(&mut &[0x80, 0x7F][..]);
        assert_eq!(val.unwrap(), i8::MIN);

        let val = read_signed::<i8>(&mut &[0xFF, 0x00][..]);
        assert_eq!(val.unwrap(), i8::MAX);
    }

    #[test]
    fn test_varint_encoding() {
        let test_cases = [
            0u64,
            1,
            127,
            128,
            129,
            0xFF,
            0x100,
            0x3FFF,
            0x4000,
            0x1FFFFF,
            0xFFFFFF,
            0x1FFFFFFF,
            0xFFFFFFFF,
            0x1FFFFFFFFFF,
            0xFFFFFFFFFFFFFF,
            u64::MAX,
        ];

        for &value in &test_cases {
            let buf = encode_unsigned(value);
            assert_eq!(buf.len(), size_unsigned(value));

            let mut read_buf = &buf[..];
            let decoded: u64 = read_unsigned(&mut read_buf).unwrap();

            assert_eq!(decoded, value);
            assert_eq!(read_buf.len(), 0);
        }
    }

    #[test]
    fn test_signed_encoding() {
        let test_cases = [
            0i64,
            1,
            -1,
            2,
            -2,
            63,
            -64,
            64,
            -65,
            127,
            -127,
            128,
            -128,
            129,
            -129,
            0x7FFFFFFF,
            -0x7FFFFFFF,
            i64::MIN,
            i64::MAX,
        ];

        for &value in &test_cases {
            let buf = encode_signed(value);
            assert_eq!(buf.len(), size_signed(value));

            let mut read_buf = &buf[..];
            let decoded: i64 = read_signed(&mut read_buf).unwrap();

            assert_eq!(decoded, value);
            assert_eq!(read_buf.len(), 0);
        }
    }

    #[test]
    fn test_extremes_128() {
        for value in [u128::MIN, u128::MAX, 1 << 126, (1 << 127) + 5] {
            let buf = encode_unsigned(value);
            assert_eq!(buf.len(), size_unsigned(value));
            assert_eq!(read_unsigned::<u128>(&mut &buf[..]).unwrap(), value);
        }
        for value in [i128::MIN, i128::MAX, -1, 0, 1 << 120, -(1 << 120)] {
            let buf = encode_signed(value);
            assert_eq!(buf.len(), size_signed(value));
            assert_eq!(read_signed::<i128>(&mut &buf[..]).unwrap(), value);
        }
        assert_eq!(size_unsigned(u128::MAX), 19);
        assert_eq!(size_signed(i128::MIN), 19);
    }

    #[test]
    fn test_minimal_length() {
        // Every value that fits in `7 * n` bits takes exactly `n` bytes.
        for n in 1..=9u32 {
            let largest = (1u64 << (7 * n)) - 1;
            assert_eq!(encode_unsigned(largest).len(), n as usize);
            if n < 9 {
                assert_eq!(encode_unsigned(largest + 1).len(), n as usize + 1);
            }

            // Signed values have one bit less of magnitude per byte count.
            let positive = (1i64 << (7 * n - 1)) - 1;
            assert_eq!(encode_signed(positive).len(), n as usize);
            assert_eq!(encode_signed(-positive - 1).len(), n as usize);
        }
    }

    #[test]
    fn test_varint_insufficient_buffer() {
        let mut buf = Bytes::from_static(&[0x80]);
        assert!(matches!(
            read_unsigned::<u64>(&mut buf),
            Err(Error::InputExhausted)
        ));

        let mut buf = Bytes::from_static(&[0xFF, 0xFF]);
        assert!(matches!(
            read_signed::<i64>(&mut buf),
            Err(Error::InputExhausted)
        ));

        let mut buf = Bytes::new();
        assert!(matches!(
            read_unsigned::<u8>(&mut buf),
            Err(Error::InputExhausted)
        ));
    }

    #[test]
    fn test_varint_overflow() {
        // Bits set beyond 64
        let mut buf =
            Bytes::from_static(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x02]);
        assert!(matches!(
            read_unsigned::<u64>(&mut buf),
            Err(Error::InvalidInput(_, _))
        ));

        // 256 in a u8
        assert!(matches!(
            read_unsigned::<u8>(&mut &[0x80, 0x02][..]),
            Err(Error::InvalidInput(_, _))
        ));

        // 128 and -129 in an i8
        assert!(matches!(
            read_signed::<i8>(&mut &[0x80, 0x01][..]),
            Err(Error::InvalidInput(_, _))
        ));
        assert!(matches!(
            read_signed::<i8>(&mut &[0xFF, 0x7E][..]),
            Err(Error::InvalidInput(_, _))
        ));
    }

    #[test]
    fn test_varint_too_long() {
        // A u32 holds at most 5 groups.
        const OVERLONG_U32: [u8; 6] = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x01];
        assert!(matches!(
            read_unsigned::<u32>(&mut &OVERLONG_U32[..]),
            Err(Error::InvalidInput(_, _))
        ));

        // Padding within the group budget is accepted.
        assert_eq!(read_unsigned::<u32>(&mut &[0x81, 0x80, 0x00][..]).unwrap(), 1);
        assert_eq!(read_signed::<i32>(&mut &[0xFF, 0x7F][..]).unwrap(), -1);
    }
}
