#![no_main]

use libfuzzer_sys::fuzz_target;
use mbus_telegen::payload::size_table::{size_class, SizeClass};
use mbus_telegen::payload::data_encoding::{decode_field, encode_data};
use mbus_telegen::Code;

fuzz_target!(|data: &[u8]| {
    if data.len() < 9 {
        return;
    }
    let dib = Code(data[0]);
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&data[1..9]);
    let value = u64::from_le_bytes(raw);

    match (size_class(dib), encode_data(dib, value)) {
        (SizeClass::Fixed { width, format }, Ok(encoded)) => {
            assert_eq!(encoded.bytes.len(), width);
            let restored = decode_field(&encoded.bytes, format).expect("valid field");
            assert_eq!(Ok(restored), encoded.truncated.parse::<u64>());
        }
        (SizeClass::Fixed { .. }, Err(e)) => panic!("fixed class failed: {e}"),
        (_, Ok(_)) => panic!("non-fixed class encoded"),
        (_, Err(_)) => {}
    }
});
