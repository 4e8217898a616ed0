#![no_main]

use libfuzzer_sys::fuzz_target;
use packetlink_rs::clock::VirtualClock;
use packetlink_rs::transport::serial_mock::MockSerialPort;
use packetlink_rs::transport::{self, Residual};
use packetlink_rs::TransportConfig;

// `timeout_us = 0` so an incomplete packet fails fast instead of waiting —
// the fuzzer feeds all available bytes up front, so there is never more
// data coming and a real timeout would just stall each run.
fn config() -> TransportConfig {
    TransportConfig {
        start_byte: 0x81,
        timeout_us: 0,
        ..Default::default()
    }
}

fuzz_target!(|data: &[u8]| {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();

    rt.block_on(async {
        let mut port = MockSerialPort::new();
        port.queue_rx_data(data);
        let mut residual = Residual::new();
        let clock = VirtualClock::new();
        let config = config();

        // However this resolves — a full packet, an error, or "nothing
        // obtainable" — it must never panic.
        let _ = transport::receiver::receive(&mut port, &mut residual, &clock, &config).await;
    });
});
