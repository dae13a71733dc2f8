use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::trace;
use unicode_width::UnicodeWidthStr;

use crate::events::{BlinkTick, Command, DEFAULT_BLINK_INTERVAL, Message};

pub const DEFAULT_CHAR_LIMIT: usize = 156;
pub const DEFAULT_WIDTH: u16 = 20;

/// Single-line character buffer with a cursor, placeholder and blinking
/// caret. Positions are counted in chars, never bytes.
#[derive(Clone, Debug)]
pub struct TextInput {
    value: Vec<char>,
    cursor: usize,
    offset: usize,
    placeholder: String,
    char_limit: usize,
    width: u16,
    focused: bool,
    blink: BlinkState,
}

#[derive(Clone, Copy, Debug)]
struct BlinkState {
    tag: u64,
    visible: bool,
    interval: Duration,
}

/// What the buffer looks like right now, ready to be styled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputView {
    pub text: String,
    pub placeholder: bool,
    /// Display column of the caret inside `text`, when it should be drawn.
    pub cursor: Option<u16>,
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput {
    pub fn new() -> Self {
        Self {
            value: Vec::new(),
            cursor: 0,
            offset: 0,
            placeholder: String::new(),
            char_limit: DEFAULT_CHAR_LIMIT,
            width: DEFAULT_WIDTH,
            focused: false,
            blink: BlinkState {
                tag: 0,
                visible: false,
                interval: DEFAULT_BLINK_INTERVAL,
            },
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = limit;
        self.truncate_to_limit();
        self.scroll_to_cursor();
        self
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width.max(1);
        self.scroll_to_cursor();
        self
    }

    pub fn with_blink_interval(mut self, interval: Duration) -> Self {
        self.blink.interval = interval;
        self
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn char_limit(&self) -> usize {
        self.char_limit
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replaces the content and parks the cursor at the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.truncate_to_limit();
        self.cursor = self.value.len();
        self.scroll_to_cursor();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.value.len());
        self.scroll_to_cursor();
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    pub fn cursor_visible(&self) -> bool {
        self.focused && self.blink.visible
    }

    /// Starts accepting keys and restarts the caret blink cycle.
    pub fn focus(&mut self) -> Command {
        self.focused = true;
        self.restart_blink()
    }

    /// Stops accepting keys. Any pending blink tick becomes stale.
    pub fn blur(&mut self) {
        self.focused = false;
        self.blink.visible = false;
        self.blink.tag = self.blink.tag.wrapping_add(1);
    }

    /// Arms the blink timer for the current cycle without resetting it.
    pub fn blink(&self) -> Command {
        Command::Blink {
            tick: BlinkTick {
                tag: self.blink.tag,
            },
            after: self.blink.interval,
        }
    }

    pub fn update(&mut self, message: &Message) -> Option<Command> {
        match message {
            Message::Key(key) => {
                if !self.focused {
                    return None;
                }
                if self.handle_key(key) {
                    Some(self.restart_blink())
                } else {
                    None
                }
            }
            Message::Paste(text) => {
                if !self.focused {
                    return None;
                }
                self.insert_str(text);
                Some(self.restart_blink())
            }
            Message::Blink(tick) => self.on_blink(*tick),
            Message::Mouse(_) | Message::Resize(..) | Message::Error(_) => None,
        }
    }

    pub fn view(&self) -> InputView {
        if self.value.is_empty() {
            let text: String = self
                .placeholder
                .chars()
                .take(self.width as usize)
                .collect();
            return InputView {
                text,
                placeholder: !self.placeholder.is_empty(),
                cursor: self.cursor_visible().then_some(0),
            };
        }

        let end = (self.offset + self.width as usize).min(self.value.len());
        let text: String = self.value[self.offset..end].iter().collect();
        let cursor = if self.cursor_visible() {
            let before: String = self.value[self.offset..self.cursor].iter().collect();
            Some(UnicodeWidthStr::width(before.as_str()) as u16)
        } else {
            None
        };
        InputView {
            text,
            placeholder: false,
            cursor,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('a') if ctrl => self.set_cursor(0),
            KeyCode::Char('e') if ctrl => self.set_cursor(self.value.len()),
            KeyCode::Char('b') if ctrl => self.set_cursor(self.cursor.saturating_sub(1)),
            KeyCode::Char('f') if ctrl => self.set_cursor(self.cursor + 1),
            KeyCode::Char('u') if ctrl => self.delete_before_cursor(),
            KeyCode::Char('k') if ctrl => self.delete_after_cursor(),
            KeyCode::Char('w') if ctrl => self.delete_word_backward(),
            KeyCode::Char('d') if ctrl => self.delete_forward(),
            KeyCode::Char(_) if ctrl || alt => return false,
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace if alt || ctrl => self.delete_word_backward(),
            KeyCode::Backspace => self.delete_backward(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left if alt || ctrl => self.word_left(),
            KeyCode::Left => self.set_cursor(self.cursor.saturating_sub(1)),
            KeyCode::Right if alt || ctrl => self.word_right(),
            KeyCode::Right => self.set_cursor(self.cursor + 1),
            KeyCode::Home => self.set_cursor(0),
            KeyCode::End => self.set_cursor(self.value.len()),
            _ => return false,
        }
        true
    }

    fn insert_char(&mut self, c: char) {
        if self.value.len() >= self.char_limit {
            return;
        }
        self.value.insert(self.cursor, c);
        self.set_cursor(self.cursor + 1);
    }

    fn insert_str(&mut self, text: &str) {
        let available = self.char_limit.saturating_sub(self.value.len());
        let chars: Vec<char> = text
            .chars()
            .filter(|c| !c.is_control())
            .take(available)
            .collect();
        let inserted = chars.len();
        self.value.splice(self.cursor..self.cursor, chars);
        self.set_cursor(self.cursor + inserted);
    }

    fn delete_backward(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.value.remove(self.cursor - 1);
        self.set_cursor(self.cursor - 1);
    }

    fn delete_forward(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
            self.scroll_to_cursor();
        }
    }

    fn delete_before_cursor(&mut self) {
        self.value.drain(..self.cursor);
        self.offset = 0;
        self.set_cursor(0);
    }

    fn delete_after_cursor(&mut self) {
        self.value.truncate(self.cursor);
        self.scroll_to_cursor();
    }

    fn delete_word_backward(&mut self) {
        let start = self.word_start_before(self.cursor);
        self.value.drain(start..self.cursor);
        self.set_cursor(start);
    }

    fn word_left(&mut self) {
        let start = self.word_start_before(self.cursor);
        self.set_cursor(start);
    }

    fn word_right(&mut self) {
        let mut pos = self.cursor;
        while pos < self.value.len() && self.value[pos].is_whitespace() {
            pos += 1;
        }
        while pos < self.value.len() && !self.value[pos].is_whitespace() {
            pos += 1;
        }
        self.set_cursor(pos);
    }

    fn word_start_before(&self, from: usize) -> usize {
        let mut pos = from;
        while pos > 0 && self.value[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !self.value[pos - 1].is_whitespace() {
            pos -= 1;
        }
        pos
    }

    fn truncate_to_limit(&mut self) {
        self.value.truncate(self.char_limit);
        self.cursor = self.cursor.min(self.value.len());
    }

    fn scroll_to_cursor(&mut self) {
        let width = self.width as usize;
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor > self.offset + width {
            self.offset = self.cursor - width;
        }
        let max_offset = self.value.len().saturating_sub(width);
        if self.offset > max_offset {
            self.offset = max_offset;
        }
    }

    fn restart_blink(&mut self) -> Command {
        self.blink.tag = self.blink.tag.wrapping_add(1);
        self.blink.visible = true;
        self.blink()
    }

    fn on_blink(&mut self, tick: BlinkTick) -> Option<Command> {
        if !self.focused || tick.tag != self.blink.tag {
            trace!(tag = tick.tag, current = self.blink.tag, "stale blink tick ignored");
            return None;
        }
        self.blink.visible = !self.blink.visible;
        Some(self.blink())
    }
}
