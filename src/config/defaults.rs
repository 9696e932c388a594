//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn title() -> String {
        "Tutorial".into()
    }

    pub fn language() -> String {
        "en".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content/course.toml".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }
}

// ============================================================================
// [session] Section Defaults
// ============================================================================

pub mod session {
    use std::path::PathBuf;

    pub fn storage() -> PathBuf {
        ".primer/storage.json".into()
    }

    pub fn clipboard() -> PathBuf {
        ".primer/clipboard.txt".into()
    }

    pub fn theme_key() -> String {
        "primerTheme".into()
    }

    pub fn progress_key() -> String {
        "primerProgress".into()
    }
}
