//! Content loading error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or assembling a course.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Course file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Duplicate topic id `{0}`")]
    DuplicateTopic(String),

    #[error("Topic id must not be empty")]
    EmptyTopicId,

    #[error("Default topic `{0}` is not defined in the course")]
    UnknownDefault(String),

    #[error("Course defines no topics")]
    NoTopics,

    #[error("Topic id `{0}` is reserved for the quiz page")]
    ReservedTopic(String),
}
