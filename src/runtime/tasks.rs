use std::time::Duration;

use crossterm::event::EventStream;
use futures::StreamExt;
use tokio::signal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::events::{BlinkTick, Message, map_terminal_event};

use super::dispatcher::AppMessage;

/// Sources of messages for the host loop. Swappable so the loop can run
/// against scripted input.
pub trait RuntimeDriver: Send + Sync {
    fn spawn_terminal_events(&self, tx: mpsc::Sender<AppMessage>) -> JoinHandle<()>;
    fn spawn_shutdown_watcher(&self, tx: mpsc::Sender<AppMessage>) -> JoinHandle<()>;

    fn spawn_blink_timer(
        &self,
        tx: mpsc::Sender<AppMessage>,
        tick: BlinkTick,
        after: Duration,
    ) -> JoinHandle<()> {
        spawn_blink_timer(tx, tick, after)
    }
}

#[derive(Default)]
pub struct DefaultRuntimeDriver;

impl RuntimeDriver for DefaultRuntimeDriver {
    fn spawn_terminal_events(&self, tx: mpsc::Sender<AppMessage>) -> JoinHandle<()> {
        spawn_terminal_events(tx)
    }

    fn spawn_shutdown_watcher(&self, tx: mpsc::Sender<AppMessage>) -> JoinHandle<()> {
        spawn_shutdown_watcher(tx)
    }
}

fn spawn_terminal_events(tx: mpsc::Sender<AppMessage>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut events = EventStream::new();
        while let Some(event) = events.next().await {
            match event {
                Ok(evt) => {
                    if let Some(mapped) = map_terminal_event(evt) {
                        if tx.send(AppMessage::Event(mapped)).await.is_err() {
                            break;
                        }
                    }
                }
                Err(err) => {
                    warn!(error = ?err, "terminal event stream failed");
                    let _ = tx.send(AppMessage::Shutdown).await;
                    break;
                }
            }
        }
    })
}

fn spawn_shutdown_watcher(tx: mpsc::Sender<AppMessage>) -> JoinHandle<()> {
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            let _ = tx.send(AppMessage::Shutdown).await;
        }
    })
}

fn spawn_blink_timer(
    tx: mpsc::Sender<AppMessage>,
    tick: BlinkTick,
    after: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        let _ = tx.send(AppMessage::Event(Message::Blink(tick))).await;
    })
}
