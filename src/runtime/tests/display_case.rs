use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::AppConfig;
use crate::events::{BlinkTick, Command, Completion, Message};
use crate::keymap::{KeyBinding, KeyChord, KeyMap};
use crate::prompt::{TextPrompt, TextPromptArgs};
use crate::runtime::{AppMessage, DisplayCase, Outcome, RuntimeDriver, Widget};
use crate::styles::Theme;
use crate::validation::ValidationError;
use crate::view::{Fragment, Layout};

/// Replays a fixed list of messages, then optionally asks for shutdown.
struct ScriptedDriver {
    script: Vec<Message>,
    shutdown_after: bool,
    blinks: Arc<AtomicUsize>,
}

impl ScriptedDriver {
    fn new(script: Vec<Message>) -> Self {
        Self {
            script,
            shutdown_after: false,
            blinks: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn then_shutdown(mut self) -> Self {
        self.shutdown_after = true;
        self
    }
}

impl RuntimeDriver for ScriptedDriver {
    fn spawn_terminal_events(&self, tx: mpsc::Sender<AppMessage>) -> JoinHandle<()> {
        let script = self.script.clone();
        let shutdown_after = self.shutdown_after;
        tokio::spawn(async move {
            for message in script {
                if tx.send(AppMessage::Event(message)).await.is_err() {
                    return;
                }
            }
            if shutdown_after {
                let _ = tx.send(AppMessage::Shutdown).await;
            }
        })
    }

    fn spawn_shutdown_watcher(&self, _tx: mpsc::Sender<AppMessage>) -> JoinHandle<()> {
        tokio::spawn(async {})
    }

    fn spawn_blink_timer(
        &self,
        _tx: mpsc::Sender<AppMessage>,
        _tick: BlinkTick,
        _after: Duration,
    ) -> JoinHandle<()> {
        self.blinks.fetch_add(1, Ordering::SeqCst);
        tokio::spawn(async {})
    }
}

fn key(code: KeyCode) -> Message {
    Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn focused_prompt() -> TextPrompt {
    let mut prompt = TextPrompt::new(
        "name",
        TextPromptArgs {
            prompt: "Name?".into(),
            tag: "app".into(),
            placeholder: "default".into(),
            ..TextPromptArgs::default()
        },
    );
    let _ = prompt.focus();
    prompt
}

#[tokio::test]
async fn typed_value_completes_the_run() {
    let driver = ScriptedDriver::new(vec![
        key(KeyCode::Char('a')),
        key(KeyCode::Char('b')),
        key(KeyCode::Enter),
    ]);
    let blinks = driver.blinks.clone();

    let outcome = DisplayCase::new(focused_prompt())
        .with_driver(driver)
        .headless(40, 8)
        .run()
        .await
        .expect("run succeeds");

    assert_eq!(
        outcome,
        Outcome::Completed(Completion {
            id: "name".into(),
            value: "ab".into(),
        })
    );
    // init plus one restart per edited key
    assert_eq!(blinks.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn empty_confirm_completes_with_placeholder() {
    let driver = ScriptedDriver::new(vec![key(KeyCode::Enter)]);

    let outcome = DisplayCase::new(focused_prompt())
        .with_driver(driver)
        .headless(40, 8)
        .run()
        .await
        .expect("run succeeds");

    assert_eq!(
        outcome.completion().map(|c| c.value.as_str()),
        Some("default")
    );
}

#[tokio::test]
async fn ctrl_c_is_intercepted_before_the_widget() {
    let driver = ScriptedDriver::new(vec![
        key(KeyCode::Char('a')),
        Message::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        key(KeyCode::Enter),
    ]);

    let outcome = DisplayCase::new(focused_prompt())
        .with_driver(driver)
        .headless(40, 8)
        .run()
        .await
        .expect("run succeeds");

    assert_eq!(outcome, Outcome::Quit);
    assert!(outcome.completion().is_none());
}

#[tokio::test]
async fn shutdown_message_stops_the_loop() {
    let driver = ScriptedDriver::new(vec![key(KeyCode::Char('z'))]).then_shutdown();

    let outcome = DisplayCase::new(focused_prompt())
        .with_driver(driver)
        .headless(40, 8)
        .run()
        .await
        .expect("run succeeds");

    assert_eq!(outcome, Outcome::Quit);
}

/// Quits as soon as it is initialised.
struct Impatient;

impl Widget for Impatient {
    fn init(&mut self) -> Option<Command> {
        Some(Command::Quit)
    }

    fn update(&mut self, _message: Message) -> Option<Command> {
        None
    }

    fn view(&self, _theme: &Theme) -> Layout {
        Layout::new()
    }
}

#[tokio::test]
async fn init_command_runs_before_any_input() {
    let driver = ScriptedDriver::new(Vec::new());

    let outcome = DisplayCase::new(Impatient)
        .with_driver(driver)
        .headless(10, 2)
        .run()
        .await
        .expect("run succeeds");

    assert_eq!(outcome, Outcome::Quit);
}

#[test]
fn quit_hint_row_follows_config() {
    let shown = DisplayCase::new(focused_prompt());
    let rows = shown.layout();
    let last = rows.rows().last().expect("hint row");
    assert_eq!(
        last.fragments,
        vec![Fragment::text("(ctrl+c to quit)")]
    );
    assert_eq!(last.style, Theme::default().hint);

    let hidden = DisplayCase::new(focused_prompt()).with_config(AppConfig {
        quit_hint: false,
        ..AppConfig::default()
    });
    assert_eq!(hidden.layout().rows().len(), 2);
}

/// Hosts a prompt and keeps a copy of the last layout the host asked for.
struct Snapshotting {
    prompt: TextPrompt,
    last: Arc<Mutex<Option<Layout>>>,
}

impl Widget for Snapshotting {
    fn init(&mut self) -> Option<Command> {
        Widget::init(&mut self.prompt)
    }

    fn update(&mut self, message: Message) -> Option<Command> {
        self.prompt.handle(message)
    }

    fn view(&self, theme: &Theme) -> Layout {
        let layout = self.prompt.render(theme);
        *self.last.lock().expect("snapshot lock") = Some(layout.clone());
        layout
    }
}

fn fragment_texts(layout: &Layout) -> Vec<String> {
    layout
        .rows()
        .iter()
        .flat_map(|row| row.fragments.iter())
        .filter_map(|fragment| match fragment {
            Fragment::Text { content, .. } => Some(content.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn dispatcher_injects_errors_into_the_hosted_widget() {
    let last = Arc::new(Mutex::new(None));
    let case = DisplayCase::new(Snapshotting {
        prompt: focused_prompt(),
        last: last.clone(),
    })
    .with_driver(ScriptedDriver::new(Vec::new()))
    .headless(40, 8);

    let dispatcher = case.dispatcher();
    dispatcher.send(Message::Error(ValidationError::new("name taken")));
    dispatcher.shutdown();

    let outcome = case.run().await.expect("run succeeds");

    assert_eq!(outcome, Outcome::Quit);
    let drawn = last.lock().expect("snapshot lock").clone().expect("layout drawn");
    assert!(fragment_texts(&drawn).contains(&"name taken".to_string()));
}

#[tokio::test]
async fn custom_quit_binding_replaces_ctrl_c() {
    let keymap = KeyMap {
        quit: KeyBinding::new([KeyChord::plain(KeyCode::Esc)], "leave"),
        ..KeyMap::default()
    };
    let mut prompt = TextPrompt::new(
        "name",
        TextPromptArgs {
            placeholder: "default".into(),
            keymap: keymap.clone(),
            ..TextPromptArgs::default()
        },
    );
    let _ = prompt.focus();
    let driver = ScriptedDriver::new(vec![
        Message::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        key(KeyCode::Enter),
    ]);

    let case = DisplayCase::new(prompt).with_keymap(keymap);
    assert_eq!(
        case.layout().rows().last().map(|row| row.fragments.clone()),
        Some(vec![Fragment::text("(esc to leave)")])
    );

    let outcome = case
        .with_driver(driver)
        .headless(40, 8)
        .run()
        .await
        .expect("run succeeds");

    assert_eq!(
        outcome.completion().map(|c| c.value.as_str()),
        Some("default")
    );
}
