//! Copy-to-clipboard affordance for code examples.

use crate::{content::ContentStore, render::COPY_LABEL};
use std::{fs, path::PathBuf};
use thiserror::Error;

/// Button label while a copy has just succeeded.
pub const COPIED_LABEL: &str = "Copied!";
/// Alert text shown when the copy fails.
pub const COPY_FAILED: &str = "Failed to copy code";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no code example at section {section} of `{topic}`")]
    NoCode { topic: String, section: usize },

    #[error("clipboard unavailable")]
    Unavailable(#[source] std::io::Error),
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard that writes copied text to a file.
#[derive(Debug)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Clipboard for FileClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(ClipboardError::Unavailable)?;
        }
        fs::write(&self.path, text).map_err(ClipboardError::Unavailable)
    }
}

/// What the copy button shows after a click.
#[derive(Debug, PartialEq, Eq)]
pub enum CopyFeedback {
    /// Transient label; the button reverts to `restore` afterwards.
    Copied {
        label: &'static str,
        restore: &'static str,
    },
    Failed { alert: &'static str },
}

/// Copy the code of section `section` in `topic`.
pub fn copy_code(
    clipboard: &mut dyn Clipboard,
    store: &ContentStore,
    topic: &str,
    section: usize,
) -> Result<(), ClipboardError> {
    let code = store
        .get(topic)
        .and_then(|doc| doc.sections.get(section))
        .and_then(|s| s.code.as_deref())
        .ok_or_else(|| ClipboardError::NoCode {
            topic: topic.to_owned(),
            section,
        })?;
    clipboard.write_text(code)
}

impl CopyFeedback {
    pub fn from_result(result: &Result<(), ClipboardError>) -> Self {
        match result {
            Ok(()) => Self::Copied {
                label: COPIED_LABEL,
                restore: COPY_LABEL,
            },
            Err(_) => Self::Failed { alert: COPY_FAILED },
        }
    }
}
