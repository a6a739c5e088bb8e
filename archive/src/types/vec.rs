//! Archive implementations for collections.
//!
//! Collections are written as a length prefix (an unsigned LEB128 varint) followed by each
//! element. Elements are read through [Reader::read], so the caller's context reaches every one
//! of them.

use crate::{Archivable, Error, Reader, Writer};
use std::{collections::BTreeMap, mem};

// Vec implementation
impl<C: ?Sized, T: Archivable<C>> Archivable<C> for Vec<T> {
    #[inline]
    fn encode(&self, writer: &mut Writer, context: &mut C) -> Result<(), Error> {
        writer.write_length(self.len())?;
        for item in self {
            writer.write(item, context)?;
        }
        Ok(())
    }

    #[inline]
    fn decode(reader: &mut Reader, context: &mut C) -> Result<Self, Error> {
        // Items may occupy no input at all (`Vec<()>`), so the length is bounded by
        // `Config::max_length` rather than by the remaining input. That also bounds the reads.
        let len = reader.read_length(0)?;

        // Reserve no more items than the remaining input could hold.
        let fit = reader.remaining() / mem::size_of::<T>().max(1);
        let mut vec = Vec::with_capacity(len.min(fit));
        for _ in 0..len {
            vec.push(reader.read(context)?);
        }
        Ok(vec)
    }
}

// BTreeMap implementation
impl<C: ?Sized, K: Archivable<C> + Ord, V: Archivable<C>> Archivable<C> for BTreeMap<K, V> {
    #[inline]
    fn encode(&self, writer: &mut Writer, context: &mut C) -> Result<(), Error> {
        writer.write_length(self.len())?;
        for (key, value) in self {
            writer.write(key, context)?;
            writer.write(value, context)?;
        }
        Ok(())
    }

    #[inline]
    fn decode(reader: &mut Reader, context: &mut C) -> Result<Self, Error> {
        let len = reader.read_length(0)?;
        let mut map = BTreeMap::new();
        for _ in 0..len {
            let key: K = reader.read(context)?;

            // Keys must be written in ascending order, without duplicates.
            if let Some((last, _)) = map.last_key_value() {
                if key <= *last {
                    return Err(Error::InvalidInput("BTreeMap", "keys not ascending"));
                }
            }
            let value: V = reader.read(context)?;
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArchiveExt, Config};

    #[test]
    fn test_vec() {
        let vec_values = [vec![], vec![1u8], vec![1u8, 2u8, 3u8]];
        for value in vec_values {
            let encoded = value.to_buffer().unwrap();
            assert_eq!(encoded.len(), value.len() + 1);
            assert_eq!(Vec::<u8>::from_buffer(encoded).unwrap(), value);
        }
    }

    #[test]
    fn test_nested_vec() {
        let value = vec![vec![300u32], vec![], vec![1, 2]];
        let encoded = value.to_buffer().unwrap();
        assert_eq!(encoded.to_hex(), "0301ac0200020102");
        assert_eq!(Vec::<Vec<u32>>::from_buffer(encoded).unwrap(), value);
    }

    #[test]
    fn test_vec_truncated() {
        assert!(matches!(
            Vec::<u8>::from_buffer(vec![3u8, 1, 2]),
            Err(Error::InputExhausted)
        ));
    }

    #[test]
    fn test_vec_of_units() {
        let value = vec![(); 1000];
        let encoded = value.to_buffer().unwrap();
        assert_eq!(encoded.to_hex(), "e807");
        assert_eq!(Vec::<()>::from_buffer(encoded).unwrap().len(), 1000);
    }

    #[test]
    fn test_btree_map() {
        let mut value = BTreeMap::new();
        value.insert(3u8, "c".to_string());
        value.insert(1u8, "a".to_string());
        let encoded = value.to_buffer().unwrap();
        assert_eq!(encoded.to_hex(), "02010161030163");
        assert_eq!(BTreeMap::<u8, String>::from_buffer(encoded).unwrap(), value);
    }

    #[test]
    fn test_btree_map_unordered() {
        // Keys 3 then 1
        let encoded = vec![2u8, 3, 0, 1, 0];
        assert!(matches!(
            BTreeMap::<u8, u8>::from_buffer(encoded),
            Err(Error::InvalidInput("BTreeMap", _))
        ));

        // Duplicate keys
        let encoded = vec![2u8, 1, 0, 1, 0];
        assert!(matches!(
            BTreeMap::<u8, u8>::from_buffer(encoded),
            Err(Error::InvalidInput("BTreeMap", _))
        ));
    }

    #[test]
    fn test_vec_large_items_oversized_length() {
        // A million 64 KiB items announced, 1 KiB present
        let mut writer = Writer::new();
        writer.write_length(1 << 20).unwrap();
        writer.write_bytes(&[0; 1024]);
        assert!(matches!(
            Vec::<[u8; 1 << 16]>::from_buffer(writer.finalize()),
            Err(Error::InputExhausted)
        ));
    }

    #[test]
    fn test_vec_of_units_bounded_by_max_length() {
        let mut writer = Writer::new();
        writer.write_length(u32::MAX as usize).unwrap();
        let mut reader =
            Reader::new(writer.finalize()).with_config(Config::new().with_max_length(1 << 16));
        assert!(matches!(
            reader.read::<Vec<()>, ()>(&mut ()),
            Err(Error::InvalidInput("length", _))
        ));
        assert_eq!(reader.position(), 0);

        // Within the limit, every unit is read
        let encoded = vec![(); 1 << 16].to_buffer().unwrap();
        let mut reader = Reader::new(encoded).with_config(Config::new().with_max_length(1 << 16));
        assert_eq!(reader.read::<Vec<()>, ()>(&mut ()).unwrap().len(), 1 << 16);
    }
}
