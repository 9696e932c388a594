//! Topic rendering.
//!
//! Renders a [`TopicDocument`] into an HTML fragment. Output is a pure
//! function of the content store and topic id, so rendering twice yields
//! identical bytes.
//!
//! Only section `code` is escaped. Titles, descriptions, section content and
//! feature items are authored markup and may carry inline emphasis.

mod page;

pub use page::{PageContext, QUIZ_PAGE, render_page, render_quiz};

use crate::{
    content::{ContentStore, Section, TopicDocument},
    log,
};
use std::{borrow::Cow, fmt::Write};

/// Label of the copy button in its resting state.
pub const COPY_LABEL: &str = "Copy Code";

/// A rendered HTML fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Render the topic `id`, or `None` if the store has no such topic.
pub fn render_topic(store: &ContentStore, id: &str) -> Option<Fragment> {
    store.get(id).map(render_document)
}

fn render_document(topic: &TopicDocument) -> Fragment {
    let mut html = String::new();
    // `fmt::Write` for `String` is infallible.
    let _ = write!(
        html,
        "<div class=\"topic-content\">\n\
         <h1 class=\"topic-title\">{}</h1>\n\
         <p class=\"topic-description\">{}</p>\n",
        topic.title, topic.description
    );
    for section in &topic.sections {
        render_section(&mut html, section);
    }
    html.push_str("</div>\n");
    Fragment(html)
}

fn render_section(html: &mut String, section: &Section) {
    let _ = write!(
        html,
        "<div class=\"section\">\n\
         <h2 class=\"section-title\">{}</h2>\n\
         <p class=\"section-content\">{}</p>\n",
        section.title, section.content
    );

    if let Some(features) = &section.features {
        html.push_str("<ul class=\"feature-list\">");
        for feature in features {
            let _ = write!(html, "<li>{feature}</li>");
        }
        html.push_str("</ul>\n");
    }

    if let Some(code) = &section.code {
        let _ = write!(
            html,
            "<div class=\"code-example\">\n\
             <div class=\"code-header\">\n\
             <h4>Example</h4>\n\
             <button class=\"copy-btn\">{COPY_LABEL}</button>\n\
             </div>\n\
             <div class=\"code-block\"><code>{}</code></div>\n\
             </div>\n",
            html_escape(code)
        );
    }

    html.push_str("</div>\n");
}

/// The display container whose contents are replaced on each render.
#[derive(Debug, Clone, Default)]
pub struct RenderTarget {
    contents: Fragment,
}

impl RenderTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn contents(&self) -> &Fragment {
        &self.contents
    }

    /// Replace the contents with topic `id`.
    ///
    /// Unknown ids leave the contents as they were and return `false`.
    pub fn render(&mut self, store: &ContentStore, id: &str) -> bool {
        match render_topic(store, id) {
            Some(fragment) => {
                self.contents = fragment;
                true
            }
            None => {
                log!("warn"; "no topic to render: {}", id);
                false
            }
        }
    }

    /// Replace the contents with an already rendered fragment.
    pub fn show(&mut self, fragment: Fragment) {
        self.contents = fragment;
    }
}

/// Escape HTML special characters.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
pub fn html_escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['<', '>', '&', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_store() -> ContentStore {
        ContentStore::from_topics([
            (
                "introduction".to_string(),
                TopicDocument {
                    title: "Introduction to C".into(),
                    description: "Learn the <em>fundamentals</em>.".into(),
                    sections: vec![
                        Section {
                            title: "What is C?".into(),
                            content: "A <strong>procedural</strong> language.".into(),
                            features: Some(vec!["Fast".into(), "Portable".into()]),
                            code: None,
                        },
                        Section {
                            title: "Hello World".into(),
                            content: "The classic first program.".into(),
                            features: None,
                            code: Some("#include <stdio.h>\nprintf(\"hi & bye\");".into()),
                        },
                    ],
                },
            ),
            (
                "history".to_string(),
                TopicDocument {
                    title: "History and Features".into(),
                    description: "Where C came from.".into(),
                    sections: vec![],
                },
            ),
        ])
        .unwrap()
    }

    fn title_of(fragment: &Fragment) -> &str {
        let html = fragment.as_str();
        let start = html.find("<h1 class=\"topic-title\">").unwrap() + "<h1 class=\"topic-title\">".len();
        let end = html[start..].find("</h1>").unwrap() + start;
        &html[start..end]
    }

    #[test]
    fn test_rendered_title_matches_store() {
        let store = sample_store();
        for (id, doc) in store.iter() {
            let fragment = render_topic(&store, id).unwrap();
            assert_eq!(title_of(&fragment), doc.title);
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let store = sample_store();
        let first = render_topic(&store, "introduction").unwrap();
        let second = render_topic(&store, "introduction").unwrap();
        assert_eq!(first.as_str().as_bytes(), second.as_str().as_bytes());
    }

    #[test]
    fn test_code_is_escaped_content_is_not() {
        let store = sample_store();
        let html = render_topic(&store, "introduction").unwrap().into_string();

        assert!(html.contains("#include &lt;stdio.h&gt;"));
        assert!(html.contains("printf(&quot;hi &amp; bye&quot;);"));
        assert!(html.contains("A <strong>procedural</strong> language."));
        assert!(html.contains("Learn the <em>fundamentals</em>."));
        assert!(html.contains("<ul class=\"feature-list\"><li>Fast</li><li>Portable</li></ul>"));
        assert!(html.contains("<button class=\"copy-btn\">Copy Code</button>"));
    }

    #[test]
    fn test_section_without_extras() {
        let store = sample_store();
        let html = render_topic(&store, "history").unwrap().into_string();
        assert!(!html.contains("feature-list"));
        assert!(!html.contains("code-example"));
    }

    #[test]
    fn test_render_unknown_is_none() {
        assert!(render_topic(&sample_store(), "nonexistent").is_none());
    }

    #[test]
    fn test_target_keeps_contents_on_unknown() {
        let store = sample_store();
        let mut target = RenderTarget::new();
        assert!(target.render(&store, "history"));
        let before = target.contents().clone();

        assert!(!target.render(&store, "nonexistent"));
        assert_eq!(target.contents(), &before);
    }

    #[test]
    fn test_html_escape() {
        assert!(matches!(html_escape("plain text"), Cow::Borrowed(_)));
        assert_eq!(html_escape("<a href=\"x\">it's</a>"), "&lt;a href=&quot;x&quot;&gt;it&#39;s&lt;/a&gt;");
    }
}
