//! `[session]` section configuration.
//!
//! Where the learner session keeps its local state.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[session]` section in primer.toml.
///
/// # Example
/// ```toml
/// [session]
/// storage = "~/.local/share/primer/c.json"
/// theme_key = "cTutorialTheme"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Key/value storage file. `~` is expanded.
    #[serde(default = "defaults::session::storage")]
    #[educe(Default = defaults::session::storage())]
    pub storage: PathBuf,

    /// File receiving copied code.
    #[serde(default = "defaults::session::clipboard")]
    #[educe(Default = defaults::session::clipboard())]
    pub clipboard: PathBuf,

    #[serde(default = "defaults::session::theme_key")]
    #[educe(Default = defaults::session::theme_key())]
    pub theme_key: String,

    #[serde(default = "defaults::session::progress_key")]
    #[educe(Default = defaults::session::progress_key())]
    pub progress_key: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_session_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.session.storage, PathBuf::from(".primer/storage.json"));
        assert_eq!(config.session.theme_key, "primerTheme");
        assert_eq!(config.session.progress_key, "primerProgress");
    }

    #[test]
    fn test_session_keys() {
        let config: SiteConfig = toml::from_str(
            r#"
            [session]
            theme_key = "htmlTutorialTheme"
            progress_key = "htmlTutorialProgress"
        "#,
        )
        .unwrap();
        assert_eq!(config.session.theme_key, "htmlTutorialTheme");
        assert_eq!(config.session.progress_key, "htmlTutorialProgress");
    }
}
