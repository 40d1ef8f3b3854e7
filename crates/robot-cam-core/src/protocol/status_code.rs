use crate::Command;

/// Robot connection status carried in [`crate::StatusPacket::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// Arm is connecting to the camera mount.
    Connecting,
    /// Arm is removing the camera mount.
    Removing,
    /// Connect finished successfully.
    ConnectSucceeded,
    /// Remove finished successfully.
    RemoveSucceeded,
    /// Connect failed.
    ConnectFailed,
    /// Remove failed.
    RemoveFailed,
}

impl StatusCode {
    /// Recording command this status drives.
    ///
    /// An operation in progress starts a recording, any terminal outcome
    /// stops it.
    pub fn command(self) -> Command {
        match self {
            StatusCode::Connecting | StatusCode::Removing => Command::Start,
            StatusCode::ConnectSucceeded
            | StatusCode::RemoveSucceeded
            | StatusCode::ConnectFailed
            | StatusCode::RemoveFailed => Command::Stop,
        }
    }
}

impl TryFrom<u8> for StatusCode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(StatusCode::Connecting),
            0x02 => Ok(StatusCode::Removing),
            0x03 => Ok(StatusCode::ConnectSucceeded),
            0x04 => Ok(StatusCode::RemoveSucceeded),
            0x05 => Ok(StatusCode::ConnectFailed),
            0x06 => Ok(StatusCode::RemoveFailed),
            other => Err(other),
        }
    }
}
