use crate::events::{Command, Message};
use crate::prompt::TextPrompt;
use crate::styles::Theme;
use crate::view::Layout;

/// Anything a [`DisplayCase`](super::DisplayCase) can host.
pub trait Widget {
    /// Commands to run once before the first message arrives.
    fn init(&mut self) -> Option<Command>;
    fn update(&mut self, message: Message) -> Option<Command>;
    fn view(&self, theme: &Theme) -> Layout;
}

impl Widget for TextPrompt {
    fn init(&mut self) -> Option<Command> {
        Some(TextPrompt::init(self))
    }

    fn update(&mut self, message: Message) -> Option<Command> {
        self.handle(message)
    }

    fn view(&self, theme: &Theme) -> Layout {
        self.render(theme)
    }
}
