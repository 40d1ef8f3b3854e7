mod status_code;
pub(crate) mod status_packet;

pub use {
    status_code::StatusCode,
    status_packet::{STATUS_PACKET_LEN, StatusPacket},
};
