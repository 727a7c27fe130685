use std::io;
use std::mem::MaybeUninit;
use std::net::Ipv4Addr;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::mpsc;

use crate::core::{constants, strip_ipv4_header, Packet};

use super::done::Done;
use super::error::Error;
use super::socket::IcmpConn;

/// A decoded packet together with the addresses of the socket that saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpPacket {
    pub packet: Packet,
    pub local_addr: Ipv4Addr,
    pub remote_addr: Ipv4Addr,
}

impl Deref for IpPacket {
    type Target = Packet;

    fn deref(&self) -> &Packet {
        &self.packet
    }
}

/// Tunables for a `Listener`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerConfig {
    buffer_size: usize,
    read_timeout: Option<Duration>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        ListenerConfig {
            buffer_size: constants::DEFAULT_READ_BUFFER_SIZE,
            read_timeout: Some(Duration::from_millis(constants::DEFAULT_READ_TIMEOUT_MS)),
        }
    }
}

impl ListenerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the reusable read buffer. Datagrams longer than this are
    /// truncated by the kernel and will fail checksum validation.
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Socket read timeout. Each expiry lets the reader re-check cancellation
    /// and is not reported as an error. `None` blocks until a datagram arrives
    /// or the socket is shut down.
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout
    }
}

/// Reads datagrams from one ICMP socket and publishes the decoded packets.
pub struct Listener {
    conn: IcmpConn,
    config: ListenerConfig,
}

impl Listener {
    pub fn new(conn: IcmpConn) -> Self {
        Listener {
            conn,
            config: ListenerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ListenerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn local_addr(&self) -> Ipv4Addr {
        self.conn.local_addr()
    }

    /// Runs until `done` fires.
    ///
    /// A blocking reader thread decodes every datagram. Decode and read errors
    /// go to `errors`; decoded packets are handed to this task, which forwards
    /// them to `packets` in arrival order. On cancellation the socket is shut
    /// down, the reader is joined, and the shutdown result is returned. Nothing
    /// is written to either channel after this returns.
    pub async fn run(
        self,
        packets: mpsc::Sender<IpPacket>,
        errors: mpsc::Sender<Error>,
        mut done: Done,
    ) -> Result<(), Error> {
        let local = self.conn.local_addr();
        self.conn.set_read_timeout(self.config.read_timeout)?;

        let conn = Arc::new(self.conn);
        let (handoff_tx, mut handoff_rx) = mpsc::channel(constants::HANDOFF_CHANNEL_CAPACITY);
        let reader = {
            let conn = Arc::clone(&conn);
            let done = done.clone();
            let buffer_size = self.config.buffer_size;
            tokio::task::spawn_blocking(move || {
                read_loop(&conn, buffer_size, handoff_tx, errors, done)
            })
        };
        debug!("listening for ICMP on {}", local);

        loop {
            tokio::select! {
                _ = done.wait() => break,
                received = handoff_rx.recv() => {
                    let Some(packet) = received else {
                        // Reader is gone, nothing more will arrive
                        done.wait().await;
                        break;
                    };
                    tokio::select! {
                        _ = done.wait() => break,
                        sent = packets.send(packet) => {
                            if sent.is_err() {
                                debug!("packet receiver for {} dropped", local);
                            }
                        }
                    }
                }
            }
        }

        // Fail any pending hand-off, then wake a read blocked in the kernel
        drop(handoff_rx);
        let closed = conn.close();
        if let Err(err) = reader.await {
            warn!("ICMP reader on {} did not exit cleanly: {}", local, err);
        }
        debug!("stopped listening for ICMP on {}", local);
        closed.map_err(Error::from)
    }
}

/// Runs a `Listener` with the default configuration.
pub async fn listener(
    conn: IcmpConn,
    packets: mpsc::Sender<IpPacket>,
    errors: mpsc::Sender<Error>,
    done: Done,
) -> Result<(), Error> {
    Listener::new(conn).run(packets, errors, done).await
}

fn read_loop(
    conn: &IcmpConn,
    buffer_size: usize,
    handoff: mpsc::Sender<IpPacket>,
    errors: mpsc::Sender<Error>,
    done: Done,
) {
    let local = conn.local_addr();
    let mut buf = vec![MaybeUninit::<u8>::uninit(); buffer_size];

    while !done.is_done() {
        let (datagram, remote) = match conn.read_from(&mut buf) {
            Ok(read) => read,
            Err(err) => {
                if !is_shutdown_error(&err, &done) {
                    report(&errors, err.into());
                }
                continue;
            }
        };
        // A shut down socket wakes the reader with an empty read
        if datagram.is_empty() {
            continue;
        }

        match Packet::parse(strip_ipv4_header(datagram)) {
            Ok(packet) => {
                let packet = IpPacket {
                    packet,
                    local_addr: local,
                    remote_addr: remote,
                };
                if handoff.blocking_send(packet).is_err() {
                    return;
                }
            }
            Err(err) => {
                debug!("dropping {} byte datagram from {}: {}", datagram.len(), remote, err);
                report(&errors, err.into());
            }
        }
    }
}

fn is_shutdown_error(err: &io::Error, done: &Done) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
    ) || done.is_done()
}

fn report(errors: &mpsc::Sender<Error>, err: Error) {
    if errors.blocking_send(err).is_err() {
        debug!("error receiver dropped");
    }
}
