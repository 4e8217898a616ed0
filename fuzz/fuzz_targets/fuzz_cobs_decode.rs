#![no_main]

use libfuzzer_sys::fuzz_target;
use packetlink_rs::cobs::decode;

fuzz_target!(|data: &[u8]| {
    // The decoder must handle arbitrary bytes without panicking, whatever
    // delimiter the caller configured.
    let _ = decode(data, 0);
    let _ = decode(data, 0xFF);

    if !data.is_empty() {
        let _ = decode(data, data[0]);
    }
});
