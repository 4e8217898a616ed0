use packetlink_rs::transport::parser::{step, Outcome, ParseState};
use packetlink_rs::{CrcConfig, TransportConfig};

fn config() -> TransportConfig {
    TransportConfig {
        start_byte: 0x81,
        crc: CrcConfig::default(),
        ..Default::default()
    }
}

/// Feeds `stream` to the parser split at every chunk boundary in `splits`,
/// one `step` call per chunk, threading `state` through. Returns the final
/// `Done` payload, or `None` if the stream never completes.
fn drive(stream: &[u8], splits: &[usize], config: &TransportConfig) -> Option<(u8, Vec<u8>)> {
    let mut state = ParseState::NeedStart;
    let mut offset = 0;
    for &len in splits {
        let chunk = stream[offset..offset + len].to_vec();
        offset += len;
        let result = step(state, chunk, config).unwrap();
        if let Outcome::Done {
            payload_size,
            framed,
        } = result.outcome
        {
            return Some((payload_size, framed));
        }
        state = result.state;
    }
    None
}

#[test]
fn a_packet_completes_identically_regardless_of_how_its_bytes_are_chunked() {
    // payload_size=1, framed region [0xAA, 0x00, CRC_hi, CRC_lo]
    let stream = vec![0x81, 1, 0xAA, 0x00, 0x11, 0x22];
    let cfg = config();

    let whole = drive(&stream, &[stream.len()], &cfg).unwrap();
    let byte_at_a_time = drive(&stream, &vec![1; stream.len()], &cfg).unwrap();
    let uneven = drive(&stream, &[2, 1, 3], &cfg).unwrap();

    assert_eq!(whole, byte_at_a_time);
    assert_eq!(whole, uneven);
}

#[test]
fn bytes_left_over_after_one_packet_begin_the_next_without_loss() {
    let cfg = config();
    let mut stream = vec![0x81, 1, 0xAA, 0x00, 0x11, 0x22];
    stream.extend_from_slice(&[0x81, 1, 0xBB, 0x00, 0x33, 0x44]);

    let result = step(ParseState::NeedStart, stream, &cfg).unwrap();
    let (first_size, first_framed) = match result.outcome {
        Outcome::Done {
            payload_size,
            framed,
        } => (payload_size, framed),
        other => panic!("expected Done, got {other:?}"),
    };
    assert_eq!(first_size, 1);
    assert_eq!(first_framed, vec![0xAA, 0x00, 0x11, 0x22]);

    let second = step(ParseState::NeedStart, result.leftover, &cfg).unwrap();
    match second.outcome {
        Outcome::Done {
            payload_size,
            framed,
        } => {
            assert_eq!(payload_size, 1);
            assert_eq!(framed, vec![0xBB, 0x00, 0x33, 0x44]);
        }
        other => panic!("expected Done, got {other:?}"),
    }
}
