use crate::styles::FragmentStyle;
use crate::text_input::InputView;


/// Rows of styled fragments, laid out top to bottom by the renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    rows: Vec<Row>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row<I>(&mut self, fragments: I) -> &mut Row
    where
        I: IntoIterator<Item = Fragment>,
    {
        self.rows.push(Row {
            fragments: fragments
                .into_iter()
                .filter(|fragment| !matches!(fragment, Fragment::Empty))
                .collect(),
            style: FragmentStyle::default(),
        });
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    /// Appends another layout's rows below this one.
    pub fn extend(&mut self, other: Layout) {
        self.rows.extend(other.rows);
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub fragments: Vec<Fragment>,
    pub style: FragmentStyle,
}

impl Row {
    pub fn with_style(&mut self, style: FragmentStyle) -> &mut Self {
        self.style = style;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    Text {
        content: String,
        style: FragmentStyle,
    },
    /// Live buffer contents; `cursor` styles the caret cell.
    Input {
        view: InputView,
        style: FragmentStyle,
        cursor: FragmentStyle,
    },
    Empty,
}

impl Fragment {
    pub fn text(content: impl Into<String>) -> Self {
        Fragment::Text {
            content: content.into(),
            style: FragmentStyle::default(),
        }
    }

    pub fn input(view: InputView, style: FragmentStyle, cursor: FragmentStyle) -> Self {
        Fragment::Input {
            view,
            style,
            cursor,
        }
    }

    /// Replaces the style of a text fragment; other kinds are unchanged.
    pub fn with_style(self, style: FragmentStyle) -> Self {
        match self {
            Fragment::Text { content, .. } => Fragment::Text { content, style },
            other => other,
        }
    }
}

pub fn when(condition: bool, fragment: impl FnOnce() -> Fragment) -> Fragment {
    if condition { fragment() } else { Fragment::Empty }
}

pub fn when_or(
    condition: bool,
    then: impl FnOnce() -> Fragment,
    otherwise: impl FnOnce() -> Fragment,
) -> Fragment {
    if condition { then() } else { otherwise() }
}
