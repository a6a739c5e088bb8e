#![no_main]

use archivist::{Archivable, Config, Error, Reader};
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeMap;

type Mixed = (
    Option<String>,
    Vec<(u32, i64)>,
    BTreeMap<u16, Bytes>,
    Box<Option<Box<bool>>>,
);

// Decoding arbitrary bytes must never panic, and a failed read must leave the cursor in place.
fn decode<T: Archivable>(data: &[u8]) {
    let config = Config::new().with_max_length(1 << 16).with_max_depth(64);
    let mut reader = Reader::new(data.to_vec()).with_config(config);
    while !reader.is_empty() {
        let before = reader.position();
        match reader.read::<T, ()>(&mut ()) {
            Ok(_) => assert!(reader.position() > before),
            Err(Error::InputExhausted | Error::InvalidInput(_, _)) => {
                assert_eq!(reader.position(), before);
                return;
            }
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let Some((selector, data)) = data.split_first() else {
        return;
    };
    match selector % 6 {
        0 => decode::<Mixed>(data),
        1 => decode::<String>(data),
        2 => decode::<Vec<char>>(data),
        3 => decode::<BTreeMap<u64, Vec<u8>>>(data),
        4 => decode::<(f64, i128, u128)>(data),
        _ => decode::<Option<[u8; 3]>>(data),
    }
});
