use ratatui::layout::Alignment;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::styles::FragmentStyle;
use crate::text_input::InputView;
use crate::view::{Fragment, Layout};

/// Flattens a layout into styled terminal lines.
///
/// Rows stack vertically, preceded by `margin_top` blank lines and indented
/// by `margin_left`. Inside a row, fragments flow left to right; a fragment
/// with a `margin_top` drops that many lines below and restarts at the
/// row's indent.
pub fn compose(layout: &Layout) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    for row in layout.rows() {
        lines.extend((0..row.style.margin_top).map(|_| Line::default()));
        let mut line = LineBuilder::new(row.style.margin_left);
        for fragment in &row.fragments {
            let (own, content) = match fragment {
                Fragment::Text { content, style } => (*style, Content::Text(content)),
                Fragment::Input {
                    view,
                    style,
                    cursor,
                } => (*style, Content::Input(view, *cursor)),
                Fragment::Empty => continue,
            };
            if own.margin_top > 0 {
                lines.push(line.finish());
                lines.extend((1..own.margin_top).map(|_| Line::default()));
                line = LineBuilder::new(row.style.margin_left);
            }
            line.indent(own.margin_left);
            let style = row.style.style.patch(own.style);
            match content {
                Content::Text(text) => line.push_cell(text, style, own),
                Content::Input(view, cursor) => line.push_input(view, style, cursor.style),
            }
        }
        lines.push(line.finish());
    }
    Text::from(lines)
}

enum Content<'a> {
    Text(&'a str),
    Input(&'a InputView, FragmentStyle),
}

struct LineBuilder {
    spans: Vec<Span<'static>>,
}

impl LineBuilder {
    fn new(indent: u16) -> Self {
        let mut builder = Self { spans: Vec::new() };
        builder.indent(indent);
        builder
    }

    fn indent(&mut self, width: u16) {
        if width > 0 {
            self.spans.push(Span::raw(" ".repeat(width as usize)));
        }
    }

    fn push_cell(&mut self, text: &str, style: Style, fragment: FragmentStyle) {
        let Some(width) = fragment.width else {
            self.spans.push(Span::styled(text.to_string(), style));
            return;
        };
        let width = width as usize;
        let clipped = clip(text, width);
        let slack = width.saturating_sub(UnicodeWidthStr::width(clipped.as_str()));
        let (left, right) = match fragment.align {
            Alignment::Left => (0, slack),
            Alignment::Center => (slack / 2, slack - slack / 2),
            Alignment::Right => (slack, 0),
        };
        let padded = format!("{}{}{}", " ".repeat(left), clipped, " ".repeat(right));
        self.spans.push(Span::styled(padded, style));
    }

    fn push_input(&mut self, view: &InputView, style: Style, cursor: Style) {
        let Some(column) = view.cursor else {
            self.spans.push(Span::styled(view.text.clone(), style));
            return;
        };

        let mut before = String::new();
        let mut chars = view.text.chars().peekable();
        let mut used = 0usize;
        while let Some(&c) = chars.peek() {
            if used >= column as usize {
                break;
            }
            used += UnicodeWidthChar::width(c).unwrap_or(0);
            before.push(c);
            chars.next();
        }
        let under = chars.next().map_or_else(|| " ".to_string(), String::from);
        let after: String = chars.collect();

        if !before.is_empty() {
            self.spans.push(Span::styled(before, style));
        }
        self.spans.push(Span::styled(under, style.patch(cursor)));
        if !after.is_empty() {
            self.spans.push(Span::styled(after, style));
        }
    }

    fn finish(self) -> Line<'static> {
        Line::from(self.spans)
    }
}

fn clip(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += UnicodeWidthChar::width(*c).unwrap_or(0);
            used <= width
        })
        .collect()
}
