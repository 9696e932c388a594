//! Course content: topics, sections and the immutable content store.
//!
//! A course file is TOML with one `[course]` table, an ordered list of
//! `[[topic]]` entries and optional `[[question]]` entries for the quiz.
//!
//! ```toml
//! [course]
//! title = "C Programming"
//! default_topic = "introduction"
//!
//! [[topic]]
//! id = "introduction"
//! title = "Introduction to C"
//! description = "Learn the fundamentals."
//!
//! [[topic.section]]
//! title = "Hello World Program"
//! content = "The classic first program."
//! code = '''
//! int main() { return 0; }
//! '''
//! ```

mod error;

pub use error::ContentError;

use crate::{quiz::Question, render::QUIZ_PAGE};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Identifier of a topic (or page) inside a course.
pub type TopicId = String;

/// A titled block of explanatory text within a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Section {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// A named unit of content the learner can navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDocument {
    pub title: String,
    pub description: String,
    pub sections: Vec<Section>,
}

/// Immutable, insertion-ordered mapping from topic id to document.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    topics: Vec<(TopicId, TopicDocument)>,
    index: FxHashMap<TopicId, usize>,
}

impl ContentStore {
    /// Build a store, rejecting empty and duplicate ids.
    pub fn from_topics<I>(topics: I) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = (TopicId, TopicDocument)>,
    {
        let mut store = Self::default();
        for (id, doc) in topics {
            if id.is_empty() {
                return Err(ContentError::EmptyTopicId);
            }
            if store.index.contains_key(&id) {
                return Err(ContentError::DuplicateTopic(id));
            }
            store.index.insert(id.clone(), store.topics.len());
            store.topics.push((id, doc));
        }
        Ok(store)
    }

    pub fn get(&self, id: &str) -> Option<&TopicDocument> {
        self.index.get(id).map(|&i| &self.topics[i].1)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Topic ids in authored order.
    pub fn ids(&self) -> impl Iterator<Item = &TopicId> {
        self.topics.iter().map(|(id, _)| id)
    }

    /// Topics in authored order.
    pub fn iter(&self) -> impl Iterator<Item = (&TopicId, &TopicDocument)> {
        self.topics.iter().map(|(id, doc)| (id, doc))
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Ids whose title contains `term`, case-insensitively.
    ///
    /// An empty (or all-whitespace) term matches every topic.
    pub fn search(&self, term: &str) -> Vec<&TopicId> {
        let term = term.trim().to_lowercase();
        self.topics
            .iter()
            .filter(|(_, doc)| term.is_empty() || doc.title.to_lowercase().contains(&term))
            .map(|(id, _)| id)
            .collect()
    }
}

// ============================================================================
// Course File
// ============================================================================

/// `[course]` table of a course file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CourseInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Page shown on startup. Falls back to the first topic.
    #[serde(default)]
    pub default_topic: Option<TopicId>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TopicEntry {
    id: TopicId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default, rename = "section")]
    sections: Vec<Section>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CourseFile {
    #[serde(default)]
    course: CourseInfo,
    #[serde(default, rename = "topic")]
    topics: Vec<TopicEntry>,
    #[serde(default, rename = "question")]
    questions: Vec<Question>,
}

/// A loaded course: metadata, topics and quiz questions.
#[derive(Debug, Clone)]
pub struct Course {
    pub info: CourseInfo,
    pub store: ContentStore,
    pub questions: Vec<Question>,
}

impl Course {
    /// Parse a course from TOML source.
    pub fn from_str(content: &str) -> Result<Self, ContentError> {
        let file: CourseFile = toml::from_str(content)?;
        let store = ContentStore::from_topics(file.topics.into_iter().map(|entry| {
            let doc = TopicDocument {
                title: entry.title,
                description: entry.description,
                sections: entry.sections,
            };
            (entry.id, doc)
        }))?;
        if store.is_empty() {
            return Err(ContentError::NoTopics);
        }
        if !file.questions.is_empty() && store.contains(QUIZ_PAGE) {
            return Err(ContentError::ReservedTopic(QUIZ_PAGE.to_owned()));
        }

        if let Some(default) = &file.course.default_topic
            && !store.contains(default)
        {
            return Err(ContentError::UnknownDefault(default.clone()));
        }

        Ok(Self {
            info: file.course,
            store,
            questions: file.questions,
        })
    }

    /// Load a course file from disk.
    pub fn from_path(path: &Path) -> Result<Self, ContentError> {
        let content =
            fs::read_to_string(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// The page shown on startup.
    pub fn default_topic(&self) -> &str {
        self.info
            .default_topic
            .as_deref()
            .or_else(|| self.store.ids().next().map(String::as_str))
            .unwrap_or_default()
    }
}
