use std::time::Duration;

use icmpv4::echo::{self, EchoReply};
use icmpv4::net::{done_channel, Error};
use tokio::sync::mpsc;

const LISTEN_FOR: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (replies_tx, mut replies_rx) = mpsc::channel::<EchoReply>(64);
    let (errors_tx, mut errors_rx) = mpsc::channel::<Error>(64);
    let (done_tx, done) = done_channel();

    let group = echo::listener_all(replies_tx, errors_tx, done)?;
    println!("Listening for echo replies on: {:?}", group.addrs());

    let identifier = std::process::id() as u16;
    for (sequence, addr) in group.addrs().iter().enumerate() {
        if let Err(e) = echo::send(None, *addr, identifier, sequence as u16) {
            eprintln!("Failed to ping {}: {}", addr, e);
        }
    }

    let deadline = tokio::time::sleep(LISTEN_FOR);
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            Some(reply) = replies_rx.recv() => {
                println!(
                    "{} -> {}: id={} seq={} bytes={}",
                    reply.remote_addr,
                    reply.local_addr,
                    reply.packet.identifier(),
                    reply.packet.sequence(),
                    reply.packet.data.len(),
                );
            }
            Some(err) = errors_rx.recv() => eprintln!("Error: {}", err),
        }
    }

    done_tx.close();
    // Nobody reads from here on; let blocked senders fail instead of waiting
    drop(replies_rx);
    drop(errors_rx);
    group.join().await;
    Ok(())
}
