//! Live preview of learner-written markup.
//!
//! The markup is embedded as-is into a sandboxed `srcdoc` frame. Nothing is
//! validated or sanitized here; isolation belongs to the frame sandbox.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewFrame {
    markup: String,
}

impl PreviewFrame {
    pub fn load(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// The frame element carrying the markup in its `srcdoc` attribute.
    pub fn to_iframe(&self) -> String {
        let mut html = String::from("<iframe class=\"preview-frame\" sandbox srcdoc=\"");
        for c in self.markup.chars() {
            match c {
                '&' => html.push_str("&amp;"),
                '"' => html.push_str("&quot;"),
                _ => html.push(c),
            }
        }
        html.push_str("\"></iframe>");
        html
    }
}
