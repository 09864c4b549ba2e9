#![no_main]

use libfuzzer_sys::fuzz_target;
use sparrow_syntax::parse;

const MAX_SOURCE_BYTES: usize = 8192;

fuzz_target!(|data: &[u8]| {
    let capped = &data[..data.len().min(MAX_SOURCE_BYTES)];
    let source = String::from_utf8_lossy(capped);

    let parsed = parse(&source);
    // Error recovery must keep every byte of the input.
    assert_eq!(parsed.syntax().text().to_string(), source);
});
