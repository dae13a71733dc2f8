use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::config::AppConfig;
use crate::events::{Command, Completion, Message};
use crate::keymap::{Action, KeyChord, KeyMap};
use crate::renderer::Renderer;
use crate::styles::Theme;
use crate::view::{Fragment, Layout};

use super::component::Widget;
use super::dispatcher::{AppMessage, Dispatcher};
use super::tasks::{DefaultRuntimeDriver, RuntimeDriver};

/// How a hosted run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Completed(Completion),
    Quit,
}

impl Outcome {
    pub fn completion(&self) -> Option<&Completion> {
        match self {
            Outcome::Completed(completion) => Some(completion),
            Outcome::Quit => None,
        }
    }
}

#[derive(Clone, Copy)]
enum RendererMode {
    Interactive,
    Headless { width: u16, height: u16 },
}

/// Full-screen host for a single widget.
pub struct DisplayCase<W> {
    widget: W,
    config: AppConfig,
    theme: Theme,
    keymap: KeyMap,
    driver: Arc<dyn RuntimeDriver>,
    renderer_mode: RendererMode,
    dispatcher: Dispatcher,
    inbox: mpsc::Receiver<AppMessage>,
}

impl<W: Widget> DisplayCase<W> {
    pub fn new(widget: W) -> Self {
        let (tx, inbox) = mpsc::channel(128);
        Self {
            widget,
            config: AppConfig::default(),
            theme: Theme::default(),
            keymap: KeyMap::default(),
            driver: Arc::new(DefaultRuntimeDriver),
            renderer_mode: RendererMode::Interactive,
            dispatcher: Dispatcher::new(tx),
            inbox,
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Chords the host treats as quit before the widget sees them. Also
    /// names the keys in the quit hint.
    pub fn with_keymap(mut self, keymap: KeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    pub fn with_driver<D>(mut self, driver: D) -> Self
    where
        D: RuntimeDriver + 'static,
    {
        self.driver = Arc::new(driver);
        self
    }

    /// Draw into an off-screen buffer instead of the terminal.
    pub fn headless(mut self, width: u16, height: u16) -> Self {
        self.renderer_mode = RendererMode::Headless { width, height };
        self
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Handle for feeding the hosted widget from outside the loop, e.g. an
    /// asynchronous check reporting `Message::Error`. Messages queued
    /// before `run` are delivered once it starts.
    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    /// Everything the host draws for the current widget state.
    pub fn layout(&self) -> Layout {
        let mut layout = self.widget.view(&self.theme);
        if self.config.quit_hint {
            layout
                .add_row([Fragment::text(self.keymap.quit.hint())])
                .with_style(self.theme.hint);
        }
        layout
    }

    pub async fn run(mut self) -> anyhow::Result<Outcome> {
        let title = self.config.title.clone();
        info!(app = %title, "starting display case");
        let dispatcher = self.dispatcher.clone();
        let mut renderer = match self.renderer_mode {
            RendererMode::Interactive => Renderer::new(&title).context("initialize renderer")?,
            RendererMode::Headless { width, height } => {
                Renderer::headless(width, height).context("initialize renderer")?
            }
        };

        let event_task = self.driver.spawn_terminal_events(dispatcher.sender());
        let shutdown_task = self.driver.spawn_shutdown_watcher(dispatcher.sender());
        let mut timers: Vec<JoinHandle<()>> = Vec::new();
        let mut last_layout: Option<Layout> = None;
        let mut pending = self.widget.init();

        let outcome = loop {
            match pending.take() {
                Some(Command::Quit) => {
                    info!(app = %title, "widget requested quit");
                    break Outcome::Quit;
                }
                Some(Command::Complete(completion)) => {
                    info!(app = %title, id = %completion.id, "widget completed");
                    break Outcome::Completed(completion);
                }
                Some(Command::Blink { tick, after }) => {
                    timers.retain(|timer| !timer.is_finished());
                    trace!(app = %title, tag = tick.tag, ?after, "blink scheduled");
                    timers.push(
                        self.driver
                            .spawn_blink_timer(dispatcher.sender(), tick, after),
                    );
                }
                None => {}
            }

            let layout = self.layout();
            if last_layout.as_ref() != Some(&layout) {
                renderer.draw(&layout).map_err(|err| {
                    warn!(app = %title, error = ?err, "renderer draw failed");
                    err
                })?;
                trace!(app = %title, "frame drawn");
                last_layout = Some(layout);
            }

            let Some(message) = self.inbox.recv().await else {
                break Outcome::Quit;
            };
            match message {
                AppMessage::Shutdown => {
                    info!(app = %title, "shutdown requested");
                    break Outcome::Quit;
                }
                AppMessage::Event(Message::Key(key))
                    if self.keymap.action_for(&key) == Some(Action::Quit) =>
                {
                    let chord = KeyChord::new(key.code, key.modifiers);
                    info!(app = %title, key = %chord, "quit key pressed");
                    break Outcome::Quit;
                }
                AppMessage::Event(event) => {
                    if matches!(event, Message::Resize(..)) {
                        last_layout = None;
                    }
                    debug!(app = %title, event = ?event, "forwarding event");
                    pending = self.widget.update(event);
                }
            }
        };

        drop(renderer);
        trace!(app = %title, "tearing down runtime tasks");
        abort_and_log("terminal_events", event_task).await;
        abort_and_log("shutdown_watcher", shutdown_task).await;
        for timer in timers {
            abort_and_log("blink_timer", timer).await;
        }
        info!(app = %title, ?outcome, "display case stopped");
        Ok(outcome)
    }
}

async fn abort_and_log(label: &str, handle: JoinHandle<()>) {
    handle.abort();
    match handle.await {
        Ok(_) => trace!(task = label, "task finished before abort"),
        Err(err) if err.is_cancelled() => trace!(task = label, "task cancellation confirmed"),
        Err(err) => warn!(task = label, error = ?err, "task join failed"),
    }
}
