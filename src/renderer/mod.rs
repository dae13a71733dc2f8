use std::io::{self, Stdout, stdout};

use anyhow::Context;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::{CrosstermBackend, TestBackend};
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};

use crate::view::Layout;

mod compose;
#[cfg(test)]
mod tests;

pub use compose::compose;

pub struct Renderer {
    target: Target,
}

enum Target {
    Terminal(Terminal<CrosstermBackend<Stdout>>),
    /// Off-screen buffer for runs without a tty.
    Headless(Terminal<TestBackend>),
}

impl Renderer {
    pub fn new(title: &str) -> anyhow::Result<Self> {
        enable_raw_mode().context("enable raw mode")?;
        let mut stdout = stdout();
        or_undo(
            execute!(
                stdout,
                EnterAlternateScreen,
                EnableBracketedPaste,
                Hide,
                SetTitle(title)
            ),
            restore_terminal,
        )
        .context("prepare terminal")?;
        let backend = CrosstermBackend::new(stdout);
        let terminal =
            or_undo(Terminal::new(backend), restore_terminal).context("build terminal")?;
        Ok(Self {
            target: Target::Terminal(terminal),
        })
    }

    pub fn headless(width: u16, height: u16) -> anyhow::Result<Self> {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).context("build headless terminal")?;
        Ok(Self {
            target: Target::Headless(terminal),
        })
    }

    pub fn draw(&mut self, layout: &Layout) -> anyhow::Result<()> {
        let draw = |frame: &mut Frame<'_>| {
            let area = frame.size();
            render_layout(frame, area, layout);
        };
        match &mut self.target {
            Target::Terminal(terminal) => terminal.draw(draw).map(|_| ()),
            Target::Headless(terminal) => terminal.draw(draw).map(|_| ()),
        }
        .context("draw frame")
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        if matches!(self.target, Target::Headless(_)) {
            return;
        }
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = stdout();
    let _ = execute!(
        stdout,
        Show,
        DisableBracketedPaste,
        LeaveAlternateScreen,
        SetTitle("Terminal")
    );
}

/// Runs `undo` when a setup step fails, since `Drop` only covers a
/// fully built renderer.
fn or_undo<T>(result: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    result.inspect_err(|_| undo())
}

pub fn render_layout(frame: &mut Frame<'_>, area: Rect, layout: &Layout) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    frame.render_widget(Paragraph::new(compose(layout)), area);
}
