use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};


/// Semantic actions a prompt reacts to before handing keys to its buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    Confirm,
}

/// One physical key chord, e.g. `ctrl+c`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        // Shift is folded into the char itself for printable keys.
        let modifiers = match key.code {
            KeyCode::Char(_) => key.modifiers.difference(KeyModifiers::SHIFT),
            _ => key.modifiers,
        };
        key.code == self.code && modifiers == self.modifiers
    }
}

/// Renders as `ctrl+c`, `alt+enter`, `esc`.
impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (modifier, name) in [
            (KeyModifiers::CONTROL, "ctrl"),
            (KeyModifiers::ALT, "alt"),
            (KeyModifiers::SHIFT, "shift"),
        ] {
            if self.modifiers.contains(modifier) {
                write!(f, "{name}+")?;
            }
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::F(n) => write!(f, "f{n}"),
            KeyCode::Enter => f.write_str("enter"),
            KeyCode::Esc => f.write_str("esc"),
            KeyCode::Tab => f.write_str("tab"),
            KeyCode::Backspace => f.write_str("backspace"),
            KeyCode::Delete => f.write_str("delete"),
            other => write!(f, "{}", format!("{other:?}").to_ascii_lowercase()),
        }
    }
}

/// A named group of chords that trigger the same action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBinding {
    keys: Vec<KeyChord>,
    help: &'static str,
}

impl KeyBinding {
    pub fn new(keys: impl Into<Vec<KeyChord>>, help: &'static str) -> Self {
        Self {
            keys: keys.into(),
            help,
        }
    }

    pub fn keys(&self) -> &[KeyChord] {
        &self.keys
    }

    pub fn help(&self) -> &'static str {
        self.help
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.keys.iter().any(|chord| chord.matches(key))
    }

    /// Footer text such as `(ctrl+c to quit)`.
    pub fn hint(&self) -> String {
        let keys: Vec<String> = self.keys.iter().map(ToString::to_string).collect();
        format!("({} to {})", keys.join("/"), self.help)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMap {
    pub quit: KeyBinding,
    pub enter: KeyBinding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            quit: KeyBinding::new([KeyChord::ctrl('c')], "quit"),
            enter: KeyBinding::new([KeyChord::plain(KeyCode::Enter)], "confirm"),
        }
    }
}

impl KeyMap {
    pub fn matches(&self, key: &KeyEvent, action: Action) -> bool {
        match action {
            Action::Quit => self.quit.matches(key),
            Action::Confirm => self.enter.matches(key),
        }
    }

    /// First action bound to `key`, quit taking precedence.
    pub fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        [Action::Quit, Action::Confirm]
            .into_iter()
            .find(|action| self.matches(key, *action))
    }
}
