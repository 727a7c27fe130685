use std::io;

use thiserror::Error;

use crate::core::InvalidPacketError;

/// Errors surfaced by the transport, the listeners and the dispatcher.
#[derive(Error, Debug)]
pub enum Error {
    /// A datagram was received but is not a valid ICMP packet.
    #[error(transparent)]
    InvalidPacket(#[from] InvalidPacketError),

    /// Socket creation, bind, read, write or shutdown failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The local interface addresses could not be enumerated.
    #[error("Failed to enumerate interface addresses: {0}")]
    Interfaces(String),
}

impl Error {
    pub fn is_invalid_packet(&self) -> bool {
        matches!(self, Error::InvalidPacket(_))
    }
}
