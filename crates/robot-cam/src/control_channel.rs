//! UDP control channel carrying robot status packets.

use crate::{AppError, AppResult};

use std::{io, net::SocketAddr, panic::Location, time::Duration};

use error_location::ErrorLocation;
use robot_cam_core::StatusPacket;
use tokio::net::UdpSocket;
use tracing::{info, instrument, warn};

/// Receive buffer size; longer datagrams are truncated.
pub(crate) const MAX_DATAGRAM_LEN: usize = 1024;

/// Bound UDP socket receiving status packets from any sender.
///
/// Dropping the channel closes the socket.
pub struct ControlChannel {
    socket: UdpSocket,
    buf: [u8; MAX_DATAGRAM_LEN],
}

impl ControlChannel {
    /// Bind the control socket.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::SocketUnavailable`] if the address cannot be bound.
    #[instrument]
    pub async fn bind(address: SocketAddr) -> AppResult<Self> {
        let socket = UdpSocket::bind(address)
            .await
            .map_err(|source| AppError::SocketUnavailable {
                address: address.to_string(),
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(address = %address, "Listening for status packets");

        Ok(Self {
            socket,
            buf: [0; MAX_DATAGRAM_LEN],
        })
    }

    /// Address the socket is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Wait up to `timeout` for one datagram and decode it.
    ///
    /// Returns `None` when nothing arrived in time, or when the datagram was
    /// malformed or the receive failed; both are logged and otherwise ignored.
    pub async fn poll(&mut self, timeout: Duration) -> Option<StatusPacket> {
        let (len, sender) =
            match tokio::time::timeout(timeout, self.socket.recv_from(&mut self.buf)).await {
                Err(_) => return None,
                Ok(Err(e)) => {
                    warn!(error = %e, "Failed to receive status datagram");
                    return None;
                }
                Ok(Ok(received)) => received,
            };

        match StatusPacket::decode(&self.buf[..len]) {
            Ok(packet) => {
                info!(
                    sender = %sender,
                    tx_cnt = packet.tx_count,
                    sts = packet.status,
                    fault = packet.fault,
                    pc_err = packet.pc_err,
                    camera_err = packet.camera_err,
                    arm_err_num = packet.arm_err_num,
                    "Received status packet"
                );
                Some(packet)
            }
            Err(e) => {
                warn!(sender = %sender, len, error = %e, "Discarding malformed status packet");
                None
            }
        }
    }
}
