pub mod dispatcher;
pub mod done;
pub mod error;
pub mod interfaces;
pub mod listener;
pub mod socket;

pub use dispatcher::{listener_all, Dispatcher, ListenerGroup};
pub use done::{done_channel, Done, DoneSender};
pub use error::Error;
pub use interfaces::{AddressSource, InterfaceAddrs};
pub use listener::{listener, IpPacket, Listener, ListenerConfig};
pub use socket::{dial, listen, send, IcmpConn};
