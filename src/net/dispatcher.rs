use std::net::Ipv4Addr;

use log::{debug, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::done::Done;
use super::error::Error;
use super::interfaces::{AddressSource, InterfaceAddrs};
use super::listener::{IpPacket, Listener, ListenerConfig};
use super::socket;

/// The listeners started by a `Dispatcher`.
///
/// The tasks keep running after this value is dropped; they stop when the
/// shared `Done` fires.
#[derive(Debug)]
pub struct ListenerGroup {
    addrs: Vec<Ipv4Addr>,
    tasks: Vec<JoinHandle<()>>,
}

impl ListenerGroup {
    /// Addresses actually being listened on.
    pub fn addrs(&self) -> &[Ipv4Addr] {
        &self.addrs
    }

    pub fn into_addrs(self) -> Vec<Ipv4Addr> {
        self.addrs
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    pub(crate) fn push_task(&mut self, task: JoinHandle<()>) {
        self.tasks.push(task);
    }

    /// Waits for every listener in the group to exit.
    pub async fn join(self) {
        for task in self.tasks {
            if let Err(err) = task.await {
                warn!("listener task failed: {}", err);
            }
        }
    }
}

/// Starts one `Listener` per local IPv4 address, all feeding the same pair
/// of channels.
#[derive(Debug, Clone)]
pub struct Dispatcher<S = InterfaceAddrs> {
    source: S,
    config: ListenerConfig,
}

impl Dispatcher<InterfaceAddrs> {
    pub fn new() -> Self {
        Dispatcher {
            source: InterfaceAddrs,
            config: ListenerConfig::default(),
        }
    }
}

impl Default for Dispatcher<InterfaceAddrs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AddressSource> Dispatcher<S> {
    pub fn with_source(source: S) -> Self {
        Dispatcher {
            source,
            config: ListenerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ListenerConfig) -> Self {
        self.config = config;
        self
    }

    /// Listens on every address the source reports.
    ///
    /// Fails only when the addresses cannot be enumerated. Addresses that
    /// cannot be listened on are skipped. The error a listener returns when it
    /// stops is sent to `errors`. There is no ordering between packets from
    /// different addresses.
    ///
    /// Listener tasks are spawned onto the current Tokio runtime, so this must
    /// be called from within one.
    pub fn listen_all(
        &self,
        packets: mpsc::Sender<IpPacket>,
        errors: mpsc::Sender<Error>,
        done: Done,
    ) -> Result<ListenerGroup, Error> {
        let candidates = self.source.ipv4_addrs()?;

        let mut group = ListenerGroup {
            addrs: Vec::with_capacity(candidates.len()),
            tasks: Vec::with_capacity(candidates.len()),
        };
        for addr in candidates {
            let conn = match socket::listen(addr) {
                Ok(conn) => conn,
                Err(err) => {
                    debug!("not listening on {}: {}", addr, err);
                    continue;
                }
            };

            let listener = Listener::new(conn).with_config(self.config);
            let packets = packets.clone();
            let errors = errors.clone();
            let done = done.clone();
            group.push_task(tokio::spawn(async move {
                if let Err(err) = listener.run(packets, errors.clone(), done).await {
                    let _ = errors.send(err).await;
                }
            }));
            group.addrs.push(addr);
        }
        Ok(group)
    }
}

/// Listens on every local IPv4 address with the default configuration.
pub fn listener_all(
    packets: mpsc::Sender<IpPacket>,
    errors: mpsc::Sender<Error>,
    done: Done,
) -> Result<ListenerGroup, Error> {
    Dispatcher::new().listen_all(packets, errors, done)
}
