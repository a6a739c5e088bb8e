//! Archive implementations for tuples.
//!
//! A tuple is written like a struct: each element in order, with nothing in between.

use crate::{Archivable, Error, Reader, Writer};
use paste::paste;

// Tuple implementation
// Every element shares the caller's context.
macro_rules! impl_archivable_for_tuple {
    ($($index:literal),*) => {
        paste! {
            impl<C: ?Sized, $( [<T $index>]: Archivable<C> ),*> Archivable<C> for ( $( [<T $index>], )* ) {
                #[inline]
                fn encode(&self, writer: &mut Writer, context: &mut C) -> Result<(), Error> {
                    $( writer.write(&self.$index, context)?; )*
                    Ok(())
                }

                #[inline]
                fn decode(reader: &mut Reader, context: &mut C) -> Result<Self, Error> {
                    Ok(( $( reader.read::<[<T $index>], C>(context)?, )* ))
                }
            }
        }
    };
}

// Generate implementations for tuple sizes 1 through 12
impl_archivable_for_tuple!(0);
impl_archivable_for_tuple!(0, 1);
impl_archivable_for_tuple!(0, 1, 2);
impl_archivable_for_tuple!(0, 1, 2, 3);
impl_archivable_for_tuple!(0, 1, 2, 3, 4);
impl_archivable_for_tuple!(0, 1, 2, 3, 4, 5);
impl_archivable_for_tuple!(0, 1, 2, 3, 4, 5, 6);
impl_archivable_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7);
impl_archivable_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8);
impl_archivable_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9);
impl_archivable_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10);
impl_archivable_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11);

#[cfg(test)]
mod tests {
    use crate::{ArchiveExt, Error};

    #[test]
    fn test_tuple() {
        let tuple_values = [(1u16, None), (1u16, Some(2u32))];
        for value in tuple_values {
            let encoded = value.to_buffer().unwrap();
            let decoded = <(u16, Option<u32>)>::from_buffer(encoded).unwrap();
            assert_eq!(value, decoded);
        }
    }

    #[test]
    fn test_tuple_layout() {
        let value = (true, -1i32, "x".to_string());
        assert_eq!(value.to_buffer().unwrap().to_hex(), "017f0178");
    }

    #[test]
    fn test_tuple_truncated() {
        assert!(matches!(
            <(u8, u8)>::from_buffer(vec![1u8]),
            Err(Error::InputExhausted)
        ));
    }
}
