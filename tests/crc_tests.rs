use packetlink_rs::crc::CrcEngine;
use packetlink_rs::{CrcConfig, CrcWidth};

fn round_trips(config: CrcConfig) {
    let engine = CrcEngine::new(config);
    let mut framed = b"a stream of bytes".to_vec();
    engine.append(b"a stream of bytes", &mut framed);
    assert_eq!(engine.verify(&framed), Ok(true));

    let last = framed.len() - 1;
    framed[last] ^= 0x01;
    assert_eq!(engine.verify(&framed), Ok(false));
}

#[test]
fn crc8_round_trips() {
    round_trips(CrcConfig {
        width: CrcWidth::Eight,
        polynomial: 0x07,
        initial_value: 0x00,
        final_xor: 0x00,
    });
}

#[test]
fn crc16_ccitt_round_trips() {
    round_trips(CrcConfig::default());
}

#[test]
fn crc32_round_trips() {
    round_trips(CrcConfig {
        width: CrcWidth::ThirtyTwo,
        polynomial: 0x04C11DB7,
        initial_value: 0xFFFFFFFF,
        final_xor: 0xFFFFFFFF,
    });
}

#[test]
fn postamble_sizes_match_width() {
    assert_eq!(CrcWidth::Eight.postamble_size(), 1);
    assert_eq!(CrcWidth::Sixteen.postamble_size(), 2);
    assert_eq!(CrcWidth::ThirtyTwo.postamble_size(), 4);
}
