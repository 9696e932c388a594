//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid primer.toml")]
    Toml(#[from] toml::de::Error),

    #[error("course file `{0}` not found")]
    MissingCourse(PathBuf),

    #[error("{0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_course_names_path() {
        let err = ConfigError::MissingCourse(PathBuf::from("content/course.toml"));
        assert_eq!(err.to_string(), "course file `content/course.toml` not found");
    }

    #[test]
    fn test_toml_error_keeps_source() {
        let parse = toml::from_str::<toml::Value>("[base").unwrap_err();
        let err = ConfigError::from(parse);
        assert!(std::error::Error::source(&err).is_some());
    }
}
