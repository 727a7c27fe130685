pub mod constants;
pub mod header_options;
pub mod packet;
pub mod utils;

#[cfg(test)]
pub(crate) mod fixtures;

pub use header_options::HeaderOptions;
pub use packet::{InvalidPacketError, Packet};
pub use utils::{calculate_internet_checksum, strip_ipv4_header};
