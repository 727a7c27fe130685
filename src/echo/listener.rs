use std::net::Ipv4Addr;

use log::warn;
use tokio::sync::mpsc;

use crate::core::constants;
use crate::net::{self, Done, Error, IcmpConn, IpPacket, ListenerGroup};

use super::packet::EchoPacket;

/// An Echo Reply together with the addresses of the socket that saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoReply {
    pub packet: EchoPacket,
    pub local_addr: Ipv4Addr,
    pub remote_addr: Ipv4Addr,
}

/// Sends an Echo Request with `identifier` and `sequence` from `local` to `remote`.
pub fn send(
    local: Option<Ipv4Addr>,
    remote: Ipv4Addr,
    identifier: u16,
    sequence: u16,
) -> Result<(), Error> {
    let mut request = EchoPacket::request(identifier, sequence);
    net::send(local, remote, &request.marshal())
}

/// Like `net::listener`, but only Echo Replies reach `replies`.
pub async fn listener(
    conn: IcmpConn,
    replies: mpsc::Sender<EchoReply>,
    errors: mpsc::Sender<Error>,
    done: Done,
) -> Result<(), Error> {
    let (packets_tx, packets_rx) = mpsc::channel(constants::ECHO_FILTER_CHANNEL_CAPACITY);
    let filter = tokio::spawn(filter_replies(packets_rx, replies));
    let result = net::listener(conn, packets_tx, errors, done).await;
    // The listener has dropped its sender, so the filter drains and exits
    if let Err(err) = filter.await {
        warn!("echo reply filter failed: {}", err);
    }
    result
}

/// Like `net::listener_all`, but only Echo Replies reach `replies`.
///
/// The filter task is part of the returned group. Must be called from within
/// a Tokio runtime.
pub fn listener_all(
    replies: mpsc::Sender<EchoReply>,
    errors: mpsc::Sender<Error>,
    done: Done,
) -> Result<ListenerGroup, Error> {
    let (packets_tx, packets_rx) = mpsc::channel(constants::ECHO_FILTER_CHANNEL_CAPACITY);
    let filter = tokio::spawn(filter_replies(packets_rx, replies));
    let mut group = net::listener_all(packets_tx, errors, done)?;
    group.push_task(filter);
    Ok(group)
}

async fn filter_replies(mut packets: mpsc::Receiver<IpPacket>, replies: mpsc::Sender<EchoReply>) {
    while let Some(received) = packets.recv().await {
        let IpPacket {
            packet,
            local_addr,
            remote_addr,
        } = received;
        let Some(packet) = EchoPacket::from_packet(packet).filter(EchoPacket::is_reply) else {
            continue;
        };
        let reply = EchoReply {
            packet,
            local_addr,
            remote_addr,
        };
        if replies.send(reply).await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Packet;
    use crate::net::done_channel;
    use crate::net::listener::tests::recv_matching;
    use crate::net::socket::tests::raw_sockets_available;

    #[tokio::test]
    async fn test_filter_keeps_only_replies() {
        let (packets_tx, packets_rx) = mpsc::channel(8);
        let (replies_tx, mut replies_rx) = mpsc::channel(8);
        let filter = tokio::spawn(filter_replies(packets_rx, replies_tx));

        let wrap = |packet: Packet| IpPacket {
            packet,
            local_addr: Ipv4Addr::LOCALHOST,
            remote_addr: Ipv4Addr::new(10, 1, 2, 3),
        };
        packets_tx.send(wrap(EchoPacket::request(7, 1).into_packet())).await.unwrap();
        packets_tx.send(wrap(Packet::new(3, 3, 0u32))).await.unwrap();
        packets_tx.send(wrap(Packet::new(0, 1, 0u32))).await.unwrap();
        packets_tx.send(wrap(EchoPacket::reply(7, 2).into_packet())).await.unwrap();
        drop(packets_tx);

        filter.await.unwrap();
        let reply = replies_rx.recv().await.unwrap();
        assert_eq!((reply.packet.identifier(), reply.packet.sequence()), (7, 2));
        assert_eq!(reply.remote_addr, Ipv4Addr::new(10, 1, 2, 3));
        assert!(replies_rx.recv().await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_echo_listener_receives_kernel_reply() {
        if !raw_sockets_available() {
            return;
        }
        let conn = net::listen(Ipv4Addr::LOCALHOST).unwrap();
        let (replies_tx, mut replies_rx) = mpsc::channel(16);
        let (errors_tx, _errors_rx) = mpsc::channel(16);
        let (done_tx, done) = done_channel();
        let running = tokio::spawn(listener(conn, replies_tx, errors_tx, done));

        // The kernel answers our request; the request itself is filtered out
        send(None, Ipv4Addr::LOCALHOST, 0x5EED, 42).unwrap();
        let reply = recv_matching(&mut replies_rx, |r| r.packet.identifier() == 0x5EED)
            .await
            .expect("no echo reply");
        assert!(reply.packet.is_reply());
        assert_eq!(reply.packet.sequence(), 42);
        assert_eq!(reply.remote_addr, Ipv4Addr::LOCALHOST);

        done_tx.close();
        let stopped = tokio::time::timeout(net::listener::tests::TEST_TIMEOUT, running).await;
        assert!(matches!(stopped, Ok(Ok(Ok(())))));
    }
}
