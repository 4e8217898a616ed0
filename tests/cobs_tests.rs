use packetlink_rs::cobs::{decode, encode};
use packetlink_rs::CobsError;

#[test]
fn payload_size_boundaries() {
    assert_eq!(encode(&[], 0), Err(CobsError::PayloadTooShort));
    assert!(encode(&[1], 0).is_ok());
    assert!(encode(&vec![1u8; 254], 0).is_ok());
    assert_eq!(encode(&vec![1u8; 255], 0), Err(CobsError::PayloadTooLong));
}

#[test]
fn every_delimiter_value_round_trips_a_representative_payload() {
    let payload = [0x00, 0x01, 0xFE, 0xFF, 0x00, 0x00];
    for delim in [0u8, 1, 0x7F, 0xFE, 0xFF] {
        let encoded = encode(&payload, delim).unwrap();
        assert_eq!(decode(&encoded, delim).unwrap(), payload);
        assert!(!encoded[..encoded.len() - 1].contains(&delim));
    }
}

#[test]
fn noise_prefix_does_not_confuse_a_standalone_decode() {
    // decode() itself has no notion of a start byte; an extra leading
    // byte desynchronizes the overhead chain from the trailing delimiter.
    let mut encoded = encode(&[1, 2, 3], 0).unwrap();
    encoded.insert(0, 0xAA);
    assert_eq!(decode(&encoded, 0), Err(CobsError::Corrupted));
}
