use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};

use crate::validation::ValidationError;

/// Everything a prompt can be fed, one message at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    Key(KeyEvent),
    Paste(String),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Cursor blink timer fired.
    Blink(BlinkTick),
    /// Out-of-band error, e.g. from a validator running elsewhere.
    Error(ValidationError),
}

/// Identifies which blink cycle a timer belongs to. Ticks from a
/// superseded cycle are ignored by the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlinkTick {
    pub tag: u64,
}

/// Emitted once per successful submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub id: String,
    pub value: String,
}

/// Follow-up work the host loop performs on behalf of a prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Deliver `Message::Blink(tick)` after `after` has elapsed.
    Blink { tick: BlinkTick, after: Duration },
    Complete(Completion),
}

pub fn map_terminal_event(event: CrosstermEvent) -> Option<Message> {
    match event {
        CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Some(Message::Key(key)),
        CrosstermEvent::Key(_) => None,
        CrosstermEvent::Mouse(mouse) => Some(Message::Mouse(mouse)),
        CrosstermEvent::Resize(cols, rows) => Some(Message::Resize(cols, rows)),
        CrosstermEvent::Paste(text) => Some(Message::Paste(text)),
        CrosstermEvent::FocusGained | CrosstermEvent::FocusLost => None,
    }
}

pub const DEFAULT_BLINK_INTERVAL: Duration = Duration::from_millis(530);
