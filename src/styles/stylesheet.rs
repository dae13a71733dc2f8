use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use super::computed::ComputedStyle;
use super::parser::{parse_declarations, strip_comments};

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("empty selector")]
    EmptySelector,
    #[error("selector `{0}` already has an id")]
    DuplicateId(String),
    #[error("unsupported selector `{0}`: only `element`, `#id` and `element#id` are allowed")]
    Unsupported(String),
    #[error("read stylesheet {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Theme overrides written in a tiny CSS subset:
///
/// ```css
/// :root { color: gray; }
/// tag { background: #7c3aed; width: 10; }
/// error#email { color: yellow; }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Stylesheet {
    root: HashMap<String, String>,
    rules: Vec<StyleRule>,
}

#[derive(Clone, Copy, Debug)]
pub struct StyleQuery<'a> {
    element: &'a str,
    id: Option<&'a str>,
}

impl<'a> StyleQuery<'a> {
    pub fn element(element: &'a str) -> Self {
        Self { element, id: None }
    }

    pub fn with_id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }
}

impl Stylesheet {
    pub fn parse(input: &str) -> Result<Self, StyleError> {
        let mut sheet = Stylesheet::default();
        let cleaned = strip_comments(input);
        for block in cleaned.split('}') {
            let Some((selectors, body)) = block.split_once('{') else {
                continue;
            };
            let declarations = parse_declarations(body);
            for selector in selectors.split(',').map(str::trim) {
                if selector.is_empty() {
                    continue;
                }
                if selector == ":root" {
                    sheet.root.extend(declarations.clone());
                    continue;
                }
                let order = sheet.rules.len();
                sheet.rules.push(StyleRule {
                    selector: Selector::parse(selector)?,
                    declarations: declarations.clone(),
                    order,
                });
            }
        }
        Ok(sheet)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StyleError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| StyleError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&source)
    }

    pub fn root(&self) -> ComputedStyle {
        ComputedStyle::from_props(self.root.clone())
    }

    /// Root properties, overlaid by matching rules in specificity then
    /// source order.
    pub fn query(&self, query: StyleQuery<'_>) -> ComputedStyle {
        let mut matches: Vec<&StyleRule> = self
            .rules
            .iter()
            .filter(|rule| rule.selector.matches(&query))
            .collect();
        matches.sort_by_key(|rule| (rule.selector.specificity(), rule.order));

        let mut props = self.root.clone();
        for rule in matches {
            props.extend(rule.declarations.clone());
        }
        ComputedStyle::from_props(props)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty() && self.rules.is_empty()
    }
}

#[derive(Clone, Debug)]
struct StyleRule {
    selector: Selector,
    declarations: HashMap<String, String>,
    order: usize,
}

#[derive(Clone, Debug, Default)]
struct Selector {
    element: Option<String>,
    id: Option<String>,
}

impl Selector {
    fn parse(raw: &str) -> Result<Self, StyleError> {
        if raw.is_empty() {
            return Err(StyleError::EmptySelector);
        }
        if raw
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '.' | ':' | '>' | '[' | '*'))
        {
            return Err(StyleError::Unsupported(raw.to_string()));
        }
        let mut parts = raw.split('#');
        let element = parts
            .next()
            .filter(|element| !element.is_empty())
            .map(str::to_ascii_lowercase);
        let id = parts.next().map(str::to_string);
        if parts.next().is_some() {
            return Err(StyleError::DuplicateId(raw.to_string()));
        }
        if id.as_deref() == Some("") {
            return Err(StyleError::EmptySelector);
        }
        Ok(Self { element, id })
    }

    fn matches(&self, query: &StyleQuery<'_>) -> bool {
        let element_ok = self
            .element
            .as_deref()
            .is_none_or(|element| element.eq_ignore_ascii_case(query.element));
        let id_ok = self.id.as_deref().is_none_or(|id| query.id == Some(id));
        element_ok && id_ok
    }

    fn specificity(&self) -> (u8, u8) {
        (u8::from(self.id.is_some()), u8::from(self.element.is_some()))
    }
}
