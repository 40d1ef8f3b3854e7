use crate::{Command, StatusCode};

/// WHAT: In-progress statuses map to Start
/// WHY: Recording must begin when the arm starts connecting or removing
#[test]
fn given_in_progress_status_when_mapping_then_start_command() {
    for byte in [0x01u8, 0x02] {
        // Given/When: Converting the raw status byte
        let code = StatusCode::try_from(byte);

        // Then: It is recognised and drives Start
        assert_eq!(code.map(StatusCode::command), Ok(Command::Start));
    }
}

/// WHAT: Terminal statuses map to Stop
/// WHY: Any success or failure outcome ends the recording
#[test]
fn given_terminal_status_when_mapping_then_stop_command() {
    for byte in [0x03u8, 0x04, 0x05, 0x06] {
        let code = StatusCode::try_from(byte);
        assert_eq!(code.map(StatusCode::command), Ok(Command::Stop));
    }
}

/// WHAT: Unassigned status bytes are rejected with the raw value
/// WHY: Unknown statuses must never change recording state
#[test]
fn given_unknown_status_when_converting_then_raw_byte_returned() {
    for byte in [0x00u8, 0x07, 0x10, 0xFF] {
        assert_eq!(StatusCode::try_from(byte), Err(byte));
    }
}

/// WHAT: Each assigned byte maps to its named status
/// WHY: Connect/remove failure codes are not in numeric order on the wire
#[test]
fn given_assigned_bytes_when_converting_then_named_status() {
    assert_eq!(StatusCode::try_from(0x01), Ok(StatusCode::Connecting));
    assert_eq!(StatusCode::try_from(0x02), Ok(StatusCode::Removing));
    assert_eq!(StatusCode::try_from(0x03), Ok(StatusCode::ConnectSucceeded));
    assert_eq!(StatusCode::try_from(0x04), Ok(StatusCode::RemoveSucceeded));
    assert_eq!(StatusCode::try_from(0x05), Ok(StatusCode::ConnectFailed));
    assert_eq!(StatusCode::try_from(0x06), Ok(StatusCode::RemoveFailed));
}
