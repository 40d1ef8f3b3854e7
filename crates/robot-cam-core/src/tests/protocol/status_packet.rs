use crate::{CoreError, STATUS_PACKET_LEN, StatusPacket};

/// WHAT: Big-endian fields decode into the matching struct members
/// WHY: The controller sends `>IBBBBB`; byte order mistakes silently corrupt tx_count
#[test]
#[allow(clippy::unwrap_used)]
fn given_valid_datagram_when_decoding_then_fields_are_big_endian() {
    // Given: tx_count = 0x01020304 followed by five status bytes
    let data = [0x01, 0x02, 0x03, 0x04, 0x01, 0x02, 0x03, 0x04, 0x05];

    // When: Decoding
    let packet = StatusPacket::decode(&data).unwrap();

    // Then: Each field holds its wire value
    assert_eq!(
        packet,
        StatusPacket {
            tx_count: 0x0102_0304,
            status: 0x01,
            fault: 0x02,
            pc_err: 0x03,
            camera_err: 0x04,
            arm_err_num: 0x05,
        }
    );
}

/// WHAT: Decoding then re-encoding reproduces the original nine bytes
/// WHY: Tests craft datagrams with encode, so both directions must agree
#[test]
#[allow(clippy::unwrap_used)]
fn given_wire_bytes_when_decoded_and_reencoded_then_bytes_identical() {
    // Given: A handful of representative datagrams, including extremes
    let samples: [[u8; STATUS_PACKET_LEN]; 3] = [
        [0, 0, 0, 42, 0x01, 0, 0, 0, 0],
        [0xFF; STATUS_PACKET_LEN],
        [0x80, 0x00, 0x00, 0x01, 0x06, 0x01, 0xFE, 0x7F, 0x10],
    ];

    for data in samples {
        // When: Round-tripping through decode and encode
        let encoded = StatusPacket::decode(&data).unwrap().encode();

        // Then: Output equals input
        assert_eq!(encoded, data);
    }
}

/// WHAT: Trailing bytes after the first nine are ignored
/// WHY: Controllers may pad datagrams; padding must not cause rejection
#[test]
#[allow(clippy::unwrap_used)]
fn given_datagram_with_trailing_bytes_when_decoding_then_prefix_used() {
    // Given: A valid packet followed by padding
    let mut data = vec![0, 0, 0, 7, 0x05, 0, 0, 0, 0];
    data.extend_from_slice(&[0xAA; 32]);

    // When: Decoding
    let packet = StatusPacket::decode(&data).unwrap();

    // Then: Only the first nine bytes matter
    assert_eq!(packet.tx_count, 7);
    assert_eq!(packet.status, 0x05);
}

/// WHAT: Every buffer shorter than nine bytes is rejected as malformed
/// WHY: Short datagrams must be discarded without panicking the loop
#[test]
fn given_short_buffer_when_decoding_then_malformed_packet() {
    let data = [0x11u8; STATUS_PACKET_LEN];

    for len in 0..STATUS_PACKET_LEN {
        // Given: A truncated datagram
        let short = &data[..len];

        // When: Decoding
        let result = StatusPacket::decode(short);

        // Then: MalformedPacket reports the received length
        match result {
            Err(CoreError::MalformedPacket {
                len: got, expected, ..
            }) => {
                assert_eq!(got, len);
                assert_eq!(expected, STATUS_PACKET_LEN);
            }
            other => unreachable!("expected MalformedPacket for {len} bytes, got {other:?}"),
        }
    }
}
