use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::trace;

use crate::events::Message;

#[derive(Clone, Debug, PartialEq)]
pub enum AppMessage {
    Event(Message),
    Shutdown,
}

/// Cloneable sender half of the host loop's queue.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    tx: mpsc::Sender<AppMessage>,
}

impl Dispatcher {
    pub(crate) fn new(tx: mpsc::Sender<AppMessage>) -> Self {
        Self { tx }
    }

    /// Queues a message without waiting. Dropped if the loop is gone or
    /// backed up.
    pub fn send(&self, message: Message) {
        match self.tx.try_send(AppMessage::Event(message)) {
            Ok(_) => trace!("message queued"),
            Err(TrySendError::Full(_)) => trace!("message dropped because channel is full"),
            Err(TrySendError::Closed(_)) => trace!("message dropped because channel closed"),
        }
    }

    pub fn shutdown(&self) {
        let _ = self.tx.try_send(AppMessage::Shutdown);
    }

    pub(crate) fn sender(&self) -> mpsc::Sender<AppMessage> {
        self.tx.clone()
    }
}
