//! Robot-cam Core Library
//!
//! Status packet decoding and the recording state machine for the robot
//! camera rig.
//!
//! # Example
//!
//! ```no_run
//! use robot_cam_core::{CoreResult, Recorder, StatusCode, StatusPacket};
//!
//! fn main() -> CoreResult<()> {
//!     let mut recorder = Recorder::new(".");
//!
//!     let packet = StatusPacket::decode(&[0, 0, 0, 42, 0x01, 0, 0, 0, 0])?;
//!     if let Ok(code) = StatusCode::try_from(packet.status) {
//!         recorder.apply(code.command())?;
//!     }
//!
//!     recorder.write_chunk(&[0x00, 0x00, 0x00, 0x01])?;
//!     recorder.close()?;
//!     Ok(())
//! }
//! ```

mod error;
mod protocol;
mod recording;

pub use {
    error::CoreError,
    error::Result as CoreResult,
    protocol::{STATUS_PACKET_LEN, StatusCode, StatusPacket},
    recording::{Command, Recorder, RecordingSummary, Transition, recording_file_name},
};
