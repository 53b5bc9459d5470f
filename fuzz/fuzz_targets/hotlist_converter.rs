#![no_main]
use libfuzzer_sys::fuzz_target;
use xbel::{convert, decode_input, Category};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = decode_input(data, None) {
        if let Err(err) = convert(&text) {
            // malformed input may only ever produce data format errors
            assert_eq!(err.category(), Category::DataFormat, "{err}");
        }
    }
});
