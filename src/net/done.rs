use tokio::sync::watch;

/// Creates a cancellation signal.
///
/// The `Done` half can be cloned and handed to any number of listeners; a
/// single `DoneSender::close` (or dropping the sender) is observed by all of
/// them.
pub fn done_channel() -> (DoneSender, Done) {
    let (tx, rx) = watch::channel(false);
    (DoneSender { tx }, Done { rx })
}

#[derive(Debug)]
pub struct DoneSender {
    tx: watch::Sender<bool>,
}

impl DoneSender {
    /// Signals cancellation. Closing twice is a no-op.
    pub fn close(&self) {
        self.tx.send_replace(true);
    }
}

#[derive(Debug, Clone)]
pub struct Done {
    rx: watch::Receiver<bool>,
}

impl Done {
    /// Non-blocking check, usable from blocking threads.
    pub fn is_done(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves once cancellation has been signalled.
    pub async fn wait(&mut self) {
        // An Err means the sender is gone, which also counts as done
        let _ = self.rx.wait_for(|done| *done).await;
    }
}
