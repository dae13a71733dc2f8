use std::cell::Cell;
use std::io;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Text;

use crate::prompt::{TextPrompt, TextPromptArgs};
use crate::styles::{FragmentStyle, Theme};
use crate::text_input::InputView;
use crate::validation::max_len;
use crate::view::{Fragment, Layout};

use super::{compose, or_undo, render_layout};

fn plain(text: &Text<'_>) -> Vec<String> {
    text.lines
        .iter()
        .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
        .collect()
}

#[test]
fn rows_honour_margins_and_fixed_widths() {
    let mut layout = Layout::new();
    layout
        .add_row([
            Fragment::text("tag").with_style(
                FragmentStyle::default()
                    .width(7)
                    .align(Alignment::Center),
            ),
            Fragment::text("prompt").with_style(FragmentStyle::default().margin_left(2)),
        ])
        .with_style(FragmentStyle::default().margin_top(1));
    layout
        .add_row([
            Fragment::text("value"),
            Fragment::text("oops").with_style(FragmentStyle::default().margin_top(1)),
        ])
        .with_style(FragmentStyle::default().margin_left(4));

    let text = compose(&layout);

    assert_eq!(
        plain(&text),
        vec!["", "  tag    prompt", "    value", "    oops"]
    );
}

#[test]
fn fixed_width_clips_long_content() {
    let mut layout = Layout::new();
    layout.add_row([Fragment::text("abcdefgh").with_style(
        FragmentStyle::default().width(3).align(Alignment::Right),
    )]);
    assert_eq!(plain(&compose(&layout)), vec!["abc"]);
}

#[test]
fn caret_cell_takes_cursor_style() {
    let view = InputView {
        text: "abc".into(),
        placeholder: false,
        cursor: Some(1),
    };
    let cursor = FragmentStyle::new(Style::default().add_modifier(Modifier::REVERSED));
    let mut layout = Layout::new();
    layout.add_row([Fragment::input(
        view,
        FragmentStyle::new(Style::default().fg(Color::Green)),
        cursor,
    )]);

    let text = compose(&layout);
    let spans = &text.lines[0].spans;

    assert_eq!(plain(&text), vec!["abc"]);
    assert_eq!(spans[1].content, "b");
    assert!(spans[1].style.add_modifier.contains(Modifier::REVERSED));
    assert_eq!(spans[1].style.fg, Some(Color::Green));
    assert!(!spans[0].style.add_modifier.contains(Modifier::REVERSED));
}

#[test]
fn caret_at_end_draws_a_blank_cell() {
    let view = InputView {
        text: "ab".into(),
        placeholder: false,
        cursor: Some(2),
    };
    let mut layout = Layout::new();
    layout.add_row([Fragment::input(
        view,
        FragmentStyle::default(),
        FragmentStyle::default(),
    )]);
    assert_eq!(plain(&compose(&layout)), vec!["ab "]);
}

#[test]
fn prompt_renders_onto_a_terminal_buffer() {
    let mut prompt = TextPrompt::new(
        "name",
        TextPromptArgs {
            prompt: "Name?".into(),
            tag: "app".into(),
            placeholder: "demo".into(),
            in_flight_validator: max_len(2, "too long"),
            ..TextPromptArgs::default()
        },
    );
    prompt.set_value("abc");
    let layout = prompt.render(&Theme::default());

    let mut terminal = Terminal::new(TestBackend::new(30, 4)).expect("test terminal");
    terminal
        .draw(|frame| {
            let area = frame.size();
            render_layout(frame, area, &layout);
        })
        .expect("draw");

    let buffer = terminal.backend().buffer();
    let row = |y: u16| -> String {
        (0..buffer.area.width)
            .map(|x| buffer.get(x, y).symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    };
    assert_eq!(row(0), "");
    assert_eq!(row(1), "  app     Name?");
    assert_eq!(row(2), "          abc");
}

#[test]
fn failed_setup_step_runs_undo() {
    let undone = Cell::new(false);
    let result: io::Result<()> = or_undo(Err(io::Error::other("no tty")), || undone.set(true));
    assert!(result.is_err());
    assert!(undone.get());

    let undone = Cell::new(false);
    let value = or_undo(Ok(7), || undone.set(true)).expect("setup succeeded");
    assert_eq!(value, 7);
    assert!(!undone.get());
}
