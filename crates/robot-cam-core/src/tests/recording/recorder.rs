use crate::{Command, CoreError, Recorder, StatusCode, Transition, recording_file_name};

use std::fs;

use tempfile::TempDir;

fn recording_count(dir: &TempDir) -> usize {
    fs::read_dir(dir.path())
        .map(|entries| entries.filter_map(Result::ok).count())
        .unwrap_or_default()
}

/// WHAT: Recording file name embeds the unix timestamp
/// WHY: Operators locate recordings by start time
#[test]
fn given_timestamp_when_naming_recording_then_pattern_matches() {
    assert_eq!(recording_file_name(1_700_000_000), "recording_1700000000.h264");
}

/// WHAT: Start from Idle opens a new file in the output directory
/// WHY: Core Idle -> Recording transition
#[test]
#[allow(clippy::unwrap_used)]
fn given_idle_recorder_when_started_then_file_created() {
    // Given: An idle recorder in an empty directory
    let dir = TempDir::new().unwrap();
    let mut recorder = Recorder::new(dir.path());

    // When: Starting at a fixed timestamp
    let transition = recorder.start_at(1234).unwrap();

    // Then: The timestamped file exists and the recorder is active
    let expected = dir.path().join("recording_1234.h264");
    assert!(matches!(transition, Transition::Started { ref path, .. } if *path == expected));
    assert!(recorder.is_recording());
    assert_eq!(recorder.current_path(), Some(expected.as_path()));
    assert!(expected.exists());
}

/// WHAT: A second start while recording leaves exactly one session
/// WHY: Held hotkeys re-issue start every loop iteration
#[test]
#[allow(clippy::unwrap_used)]
fn given_recording_when_started_again_then_unchanged_and_single_file() {
    // Given: A recorder that is already recording
    let dir = TempDir::new().unwrap();
    let mut recorder = Recorder::new(dir.path());
    recorder.start_at(100).unwrap();

    // When: Starting again (even with a later timestamp)
    let transition = recorder.start_at(101).unwrap();

    // Then: No new file, original session kept
    assert_eq!(transition, Transition::Unchanged);
    assert_eq!(recording_count(&dir), 1);
    assert_eq!(
        recorder.current_path(),
        Some(dir.path().join("recording_100.h264").as_path())
    );
}

/// WHAT: Stop while idle is a no-op
/// WHY: Terminal statuses may arrive without a preceding start
#[test]
#[allow(clippy::unwrap_used)]
fn given_idle_recorder_when_stopped_then_unchanged_and_no_files() {
    // Given: An idle recorder
    let dir = TempDir::new().unwrap();
    let mut recorder = Recorder::new(dir.path());

    // When: Stopping
    let transition = recorder.apply(Command::Stop).unwrap();

    // Then: Nothing happened on disk
    assert_eq!(transition, Transition::Unchanged);
    assert!(!recorder.is_recording());
    assert_eq!(recording_count(&dir), 0);
}

/// WHAT: Chunks are appended verbatim and counted
/// WHY: The output is a raw elementary stream with no framing
#[test]
#[allow(clippy::unwrap_used)]
fn given_recording_when_chunks_written_then_file_holds_concatenation() {
    // Given: An active recording
    let dir = TempDir::new().unwrap();
    let mut recorder = Recorder::new(dir.path());
    recorder.start_at(7).unwrap();

    // When: Writing two chunks and stopping
    recorder.write_chunk(&[0, 0, 0, 1, 0x67]).unwrap();
    recorder.write_chunk(&[0, 0, 0, 1, 0x65, 0xAA]).unwrap();
    let transition = recorder.apply(Command::Stop).unwrap();

    // Then: Summary and file contents match
    let Transition::Stopped(summary) = transition else {
        unreachable!("expected Stopped, got {transition:?}");
    };
    assert_eq!(summary.chunks, 2);
    assert_eq!(summary.bytes_written, 11);
    assert_eq!(
        fs::read(&summary.path).unwrap(),
        vec![0, 0, 0, 1, 0x67, 0, 0, 0, 1, 0x65, 0xAA]
    );
    assert!(!recorder.is_recording());
}

/// WHAT: Chunks offered while idle are dropped
/// WHY: Only an open session may receive bitstream data
#[test]
#[allow(clippy::unwrap_used)]
fn given_idle_recorder_when_chunk_written_then_nothing_created() {
    let dir = TempDir::new().unwrap();
    let mut recorder = Recorder::new(dir.path());

    recorder.write_chunk(&[1, 2, 3]).unwrap();

    assert_eq!(recording_count(&dir), 0);
}

/// WHAT: Status bytes drive the full state table
/// WHY: 0x01/0x02 start, 0x03-0x06 stop, anything else is ignored
#[test]
#[allow(clippy::unwrap_used)]
fn given_each_status_byte_when_applied_then_state_follows_table() {
    for byte in 0x00u8..=0x08 {
        for start_recording in [false, true] {
            // Given: A recorder in the chosen state
            let dir = TempDir::new().unwrap();
            let mut recorder = Recorder::new(dir.path());
            if start_recording {
                recorder.start_at(1).unwrap();
            }

            // When: Applying the status
            if let Ok(code) = StatusCode::try_from(byte) {
                recorder.apply(code.command()).unwrap();
            }

            // Then: The resulting state matches the table
            let expected = match byte {
                0x01 | 0x02 => true,
                0x03..=0x06 => false,
                _ => start_recording,
            };
            assert_eq!(
                recorder.is_recording(),
                expected,
                "status {byte:#04x}, started recording: {start_recording}"
            );
        }
    }
}

/// WHAT: Starting when the target file already exists fails and stays idle
/// WHY: Recordings are opened exclusively and never overwritten
#[test]
#[allow(clippy::unwrap_used)]
fn given_existing_file_when_started_then_open_error_and_idle() {
    // Given: A file already occupying the target name
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(recording_file_name(55)), b"keep").unwrap();
    let mut recorder = Recorder::new(dir.path());

    // When: Starting at the same timestamp
    let result = recorder.start_at(55);

    // Then: Open fails, recorder remains idle, existing data untouched
    assert!(matches!(result, Err(CoreError::RecordingOpen { .. })));
    assert!(!recorder.is_recording());
    assert_eq!(
        fs::read(dir.path().join(recording_file_name(55))).unwrap(),
        b"keep"
    );
}

/// WHAT: Missing output directories are created on start
/// WHY: The configured output directory may not exist on first run
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_output_dir_when_started_then_directory_created() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("captures").join("rig-a");
    let mut recorder = Recorder::new(&nested);

    recorder.start_at(9).unwrap();

    assert!(nested.join("recording_9.h264").exists());
}

/// WHAT: Close flushes and releases an active recording
/// WHY: Shutdown must never leave a recording open
#[test]
#[allow(clippy::unwrap_used)]
fn given_recording_when_closed_then_summary_returned_and_idle() {
    let dir = TempDir::new().unwrap();
    let mut recorder = Recorder::new(dir.path());
    recorder.start_at(3).unwrap();
    recorder.write_chunk(&[9; 16]).unwrap();

    let summary = recorder.close().unwrap();

    assert_eq!(summary.map(|s| s.bytes_written), Some(16));
    assert!(!recorder.is_recording());
    assert_eq!(recorder.close().unwrap(), None);
}

/// WHAT: A failed write aborts only the session; the next start opens a new file
/// WHY: Disk errors must not stop the loop or leave a half-open recording
#[cfg(target_os = "linux")]
#[test]
#[allow(clippy::unwrap_used)]
fn given_recording_when_write_fails_then_session_aborted_and_restart_works() {
    // Given: A recording whose output is redirected to a full device
    let dir = TempDir::new().unwrap();
    let mut recorder = Recorder::new(dir.path());
    recorder.start_at(5).unwrap();
    let full = fs::OpenOptions::new().write(true).open("/dev/full").unwrap();
    recorder.redirect_active_output(full);

    // When: Writing a chunk larger than the write buffer
    let result = recorder.write_chunk(&[0xAB; 16 * 1024]);

    // Then: RecordingWrite for the aborted file, and the recorder is idle
    let aborted = dir.path().join("recording_5.h264");
    assert!(matches!(result, Err(CoreError::RecordingWrite { ref path, .. }) if *path == aborted));
    assert!(!recorder.is_recording());
    assert_eq!(recorder.current_path(), None);

    // And: A later start opens a fresh file
    let transition = recorder.start_at(6).unwrap();
    assert!(matches!(transition, Transition::Started { .. }));
    assert!(recorder.is_recording());
    assert!(dir.path().join("recording_6.h264").exists());
    assert_eq!(recording_count(&dir), 2);
}
