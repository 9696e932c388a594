//! `[build]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in primer.toml - static output settings.
///
/// # Example
/// ```toml
/// [build]
/// content = "content/course.toml"
/// output = "public"
/// minify = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Course file holding topics and quiz questions.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Directory receiving the rendered pages.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Minify generated HTML.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub minify: bool,

    /// Remove the output directory before building.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_build_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.build.content, PathBuf::from("content/course.toml"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert!(!config.build.minify);
        assert!(!config.build.clean);
        assert_eq!(config.build.root, None);
    }

    #[test]
    fn test_build_overrides() {
        let config: SiteConfig = toml::from_str(
            r#"
            [build]
            content = "lessons/c.toml"
            output = "dist"
            minify = true
        "#,
        )
        .unwrap();
        assert_eq!(config.build.content, PathBuf::from("lessons/c.toml"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(config.build.minify);
    }
}
