use crate::{CoreError, CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Wire size of a status packet: `>IBBBBB`.
pub const STATUS_PACKET_LEN: usize = 9;

/// Status report sent by the robot controller over UDP.
///
/// Laid out big-endian as a `u32` transmit counter followed by five `u8`
/// fields. Bytes beyond the first [`STATUS_PACKET_LEN`] are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPacket {
    /// Controller transmit counter.
    pub tx_count: u32,
    /// Robot status code, see [`crate::StatusCode`].
    pub status: u8,
    /// Robot fault flag.
    pub fault: u8,
    /// Controller PC error code.
    pub pc_err: u8,
    /// Camera error code.
    pub camera_err: u8,
    /// Arm error number.
    pub arm_err_num: u8,
}

impl StatusPacket {
    /// Decode a packet from the start of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedPacket`] when `data` holds fewer than
    /// [`STATUS_PACKET_LEN`] bytes.
    #[track_caller]
    pub fn decode(data: &[u8]) -> CoreResult<Self> {
        let Some(&[a, b, c, d, status, fault, pc_err, camera_err, arm_err_num]) =
            data.first_chunk::<STATUS_PACKET_LEN>()
        else {
            return Err(CoreError::MalformedPacket {
                len: data.len(),
                expected: STATUS_PACKET_LEN,
                location: ErrorLocation::from(Location::caller()),
            });
        };

        Ok(Self {
            tx_count: u32::from_be_bytes([a, b, c, d]),
            status,
            fault,
            pc_err,
            camera_err,
            arm_err_num,
        })
    }

    /// Encode the packet into its 9-byte wire form.
    pub fn encode(&self) -> [u8; STATUS_PACKET_LEN] {
        let [a, b, c, d] = self.tx_count.to_be_bytes();
        [
            a,
            b,
            c,
            d,
            self.status,
            self.fault,
            self.pc_err,
            self.camera_err,
            self.arm_err_num,
        ]
    }
}
