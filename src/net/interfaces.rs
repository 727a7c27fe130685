use std::net::{IpAddr, Ipv4Addr};

use pnet::datalink;

use super::error::Error;

/// Source of the local IPv4 addresses the dispatcher listens on.
pub trait AddressSource {
    fn ipv4_addrs(&self) -> Result<Vec<Ipv4Addr>, Error>;
}

/// Every IPv4 address assigned to a local network interface.
///
/// `datalink::interfaces()` has no failure mode, so this source never errors;
/// a host without IPv4 addresses yields an empty list.
#[derive(Debug, Default, Clone, Copy)]
pub struct InterfaceAddrs;

impl AddressSource for InterfaceAddrs {
    fn ipv4_addrs(&self) -> Result<Vec<Ipv4Addr>, Error> {
        let interfaces = datalink::interfaces();
        let mut addrs: Vec<Ipv4Addr> = Vec::new();
        for ip in interfaces.iter().flat_map(|iface| iface.ips.iter()) {
            if let IpAddr::V4(v4) = ip.ip() {
                // The same address can show up on aliased interfaces
                if !addrs.contains(&v4) {
                    addrs.push(v4);
                }
            }
        }
        Ok(addrs)
    }
}

impl<F> AddressSource for F
where
    F: Fn() -> Result<Vec<Ipv4Addr>, Error>,
{
    fn ipv4_addrs(&self) -> Result<Vec<Ipv4Addr>, Error> {
        self()
    }
}
