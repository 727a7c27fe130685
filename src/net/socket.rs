use std::io;
use std::mem::MaybeUninit;
use std::net::{Ipv4Addr, Shutdown, SocketAddr, SocketAddrV4};
use std::time::Duration;

use socket2::{Domain, Protocol, SockAddr, Socket, Type};

use super::error::Error;

/// A raw IPv4 socket bound to the ICMP protocol number.
#[derive(Debug)]
pub struct IcmpConn {
    socket: Socket,
    local: Ipv4Addr,
}

/// Opens an ICMP socket from `local` to `remote`.
///
/// `None` leaves the local address unspecified. Fails when `local` is not an
/// address of this host.
pub fn dial(local: Option<Ipv4Addr>, remote: Ipv4Addr) -> io::Result<IcmpConn> {
    let socket = raw_icmp_socket()?;
    if let Some(local) = local {
        socket.bind(&sock_addr(local))?;
    }
    socket.connect(&sock_addr(remote))?;
    Ok(IcmpConn {
        socket,
        local: local.unwrap_or(Ipv4Addr::UNSPECIFIED),
    })
}

/// Opens an ICMP socket bound to `local` that receives from any peer.
pub fn listen(local: Ipv4Addr) -> io::Result<IcmpConn> {
    let socket = raw_icmp_socket()?;
    socket.bind(&sock_addr(local))?;
    Ok(IcmpConn { socket, local })
}

/// Sends one already-encoded ICMP packet from `local` to `remote`.
///
/// The socket is opened for this write only and closed afterwards whatever
/// the outcome. A dial failure is returned before any write is attempted.
pub fn send(local: Option<Ipv4Addr>, remote: Ipv4Addr, packet: &[u8]) -> Result<(), Error> {
    let conn = dial(local, remote)?;
    conn.write(packet)?;
    Ok(())
}

fn raw_icmp_socket() -> io::Result<Socket> {
    Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::ICMPV4))
}

fn sock_addr(addr: Ipv4Addr) -> SockAddr {
    // Raw sockets carry no port
    SockAddr::from(SocketAddr::V4(SocketAddrV4::new(addr, 0)))
}

impl IcmpConn {
    pub fn local_addr(&self) -> Ipv4Addr {
        self.local
    }

    /// Writes `packet` to the connected peer.
    pub fn write(&self, packet: &[u8]) -> io::Result<usize> {
        self.socket.send(packet)
    }

    /// Blocks until a datagram arrives and returns it along with its sender.
    ///
    /// On raw IPv4 sockets the datagram starts with the IP header. The returned
    /// slice borrows the front of `buf`.
    pub fn read_from<'a>(
        &self,
        buf: &'a mut [MaybeUninit<u8>],
    ) -> io::Result<(&'a [u8], Ipv4Addr)> {
        let (len, addr) = self.socket.recv_from(buf)?;
        // SAFETY: `recv_from` initialised the first `len` bytes of `buf`.
        let datagram = unsafe { std::slice::from_raw_parts(buf.as_ptr().cast::<u8>(), len) };
        let remote = addr
            .as_socket_ipv4()
            .map(|addr| *addr.ip())
            .unwrap_or(Ipv4Addr::UNSPECIFIED);
        Ok((datagram, remote))
    }

    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        self.socket.set_read_timeout(timeout)
    }

    /// Shuts the receive side down, waking a read blocked in another thread.
    ///
    /// Unconnected raw sockets report `NotConnected` here even though the
    /// shutdown took effect, so that result is not an error.
    pub fn close(&self) -> io::Result<()> {
        match self.socket.shutdown(Shutdown::Read) {
            Err(err) if err.kind() != io::ErrorKind::NotConnected => Err(err),
            _ => Ok(()),
        }
    }
}
