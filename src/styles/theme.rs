use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};

use super::computed::ComputedStyle;
use super::stylesheet::{StyleQuery, Stylesheet};

const PURPLE: Color = Color::Rgb(124, 58, 237);

/// Style plus box-model hints for one fragment or row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FragmentStyle {
    pub style: Style,
    /// Fixed cell width; content is padded or clipped to fit.
    pub width: Option<u16>,
    pub align: Alignment,
    pub margin_left: u16,
    pub margin_top: u16,
}

impl FragmentStyle {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn margin_left(mut self, margin: u16) -> Self {
        self.margin_left = margin;
        self
    }

    pub fn margin_top(mut self, margin: u16) -> Self {
        self.margin_top = margin;
        self
    }

    fn apply(mut self, computed: &ComputedStyle) -> Self {
        if let Some(color) = computed.color("color") {
            self.style = self.style.fg(color);
        }
        if let Some(color) = computed.color("background") {
            self.style = self.style.bg(color);
        }
        if let Some(bold) = computed.bool("bold") {
            self.style = toggle(self.style, Modifier::BOLD, bold);
        }
        if let Some(italic) = computed.bool("italic") {
            self.style = toggle(self.style, Modifier::ITALIC, italic);
        }
        if let Some(width) = computed.u16("width") {
            self.width = (width > 0).then_some(width);
        }
        if let Some(align) = computed.alignment("align") {
            self.align = align;
        }
        if let Some(margin) = computed.u16("margin-left") {
            self.margin_left = margin;
        }
        if let Some(margin) = computed.u16("margin-top") {
            self.margin_top = margin;
        }
        self
    }
}

fn toggle(style: Style, modifier: Modifier, on: bool) -> Style {
    if on {
        style.add_modifier(modifier)
    } else {
        style.remove_modifier(modifier)
    }
}

/// Everything the prompt needs to know about colours and spacing. Handed
/// to `render`, never read from globals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Row holding the tag badge and prompt text.
    pub label: FragmentStyle,
    pub tag: FragmentStyle,
    pub prompt: FragmentStyle,
    /// Row holding the value and the error.
    pub value_row: FragmentStyle,
    /// Live-editing text.
    pub input: FragmentStyle,
    pub placeholder: FragmentStyle,
    pub cursor: FragmentStyle,
    /// Static value shown once the field loses focus.
    pub text: FragmentStyle,
    pub error: FragmentStyle,
    pub hint: FragmentStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            label: FragmentStyle::default().margin_top(1),
            tag: FragmentStyle::new(Style::default().bg(PURPLE).fg(Color::White))
                .width(8)
                .align(Alignment::Center),
            prompt: FragmentStyle::default().margin_left(2),
            value_row: FragmentStyle::default().margin_left(10),
            input: FragmentStyle::default(),
            placeholder: FragmentStyle::new(Style::default().fg(Color::DarkGray)),
            cursor: FragmentStyle::new(Style::default().add_modifier(Modifier::REVERSED)),
            text: FragmentStyle::new(Style::default().fg(Color::Gray)),
            error: FragmentStyle::new(
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::ITALIC),
            )
            .margin_top(1),
            hint: FragmentStyle::new(Style::default().fg(Color::DarkGray)).margin_top(1),
        }
    }
}

impl Theme {
    /// Overlays sheet rules onto the default theme. Each slot is queried by
    /// element name (`tag`, `prompt`, `error`, ...), with `id` scoping
    /// rules to a single prompt.
    pub fn from_stylesheet(sheet: &Stylesheet, id: Option<&str>) -> Self {
        let lookup = |element: &str| {
            let query = StyleQuery::element(element);
            sheet.query(match id {
                Some(id) => query.with_id(id),
                None => query,
            })
        };
        let base = Theme::default();
        Self {
            label: base.label.apply(&lookup("label")),
            tag: base.tag.apply(&lookup("tag")),
            prompt: base.prompt.apply(&lookup("prompt")),
            value_row: base.value_row.apply(&lookup("value-row")),
            input: base.input.apply(&lookup("input")),
            placeholder: base.placeholder.apply(&lookup("placeholder")),
            cursor: base.cursor.apply(&lookup("cursor")),
            text: base.text.apply(&lookup("text")),
            error: base.error.apply(&lookup("error")),
            hint: base.hint.apply(&lookup("hint")),
        }
    }
}
