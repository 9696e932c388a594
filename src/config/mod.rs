//! Site configuration management for `primer.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                        |
//! |-------------|------------------------------------------------|
//! | `[base]`    | Site metadata (title, description, language)   |
//! | `[build]`   | Course file, output directory, minify          |
//! | `[session]` | Local storage file, clipboard file, state keys |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "HTML Tutorial"
//!
//! [build]
//! content = "content/course.toml"
//! output = "public"
//!
//! [session]
//! progress_key = "htmlTutorialProgress"
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod session;

pub use error::ConfigError;

use base::BaseConfig;
use build::BuildConfig;
use session::SessionConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing primer.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Learner session settings
    #[serde(default)]
    pub session: SessionConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let base = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        match &cli.command {
            Commands::Build { clean, minify } => {
                self.build.clean |= *clean;
                Self::update_option(&mut self.build.minify, minify.as_ref());
            }
            Commands::Session {
                storage: Some(storage),
                ..
            } => self.session.storage = storage.clone(),
            _ => {}
        }

        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve every path against `root` and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_name));
        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.session.storage = Self::expand_path(&root, &self.session.storage);
        self.session.clipboard = Self::expand_path(&root, &self.session.clipboard);
    }

    /// Tilde-expand `path`, then resolve it against `root` if relative
    fn expand_path(root: &Path, path: &Path) -> PathBuf {
        let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
        if expanded.is_relative() {
            Self::normalize_path(&root.join(expanded))
        } else {
            Self::normalize_path(&expanded)
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for commands that read the course
    pub fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!("Config file not found");
        }
        if !self.build.content.is_file() {
            bail!(ConfigError::MissingCourse(self.build.content.clone()));
        }
        if self.session.theme_key == self.session.progress_key {
            bail!(ConfigError::Validation(
                "[session.theme_key] and [session.progress_key] must differ".into()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(SiteConfig::from_str("[base\ntitle = 1").is_err());
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        assert!(SiteConfig::from_str("[serve]\nport = 1\n").is_err());
    }

    #[test]
    fn test_get_root_default() {
        assert_eq!(SiteConfig::default().get_root(), Path::new("./"));
    }

    #[test]
    fn test_update_with_cli_resolves_paths() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["primer", "-r", root, "build", "--minify"]));

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.get_root(), root);
        assert_eq!(config.config_path, root.join("primer.toml"));
        assert_eq!(config.build.content, root.join("content/course.toml"));
        assert_eq!(config.build.output, root.join("public"));
        assert_eq!(config.session.storage, root.join(".primer/storage.json"));
        assert!(config.build.minify);
        assert!(!config.build.clean);
    }

    #[test]
    fn test_update_with_cli_init_name() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["primer", "-r", root, "init", "learn-c"]));
        assert!(config.get_root().ends_with("learn-c"));
    }

    #[test]
    fn test_session_storage_override_and_tilde() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();

        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["primer", "-r", root, "session", "-s", "state.json"]));
        assert!(config.session.storage.ends_with("state.json"));
        assert!(config.session.storage.is_absolute());

        let mut config = SiteConfig::from_str("[session]\nstorage = \"~/primer.json\"\n").unwrap();
        config.update_with_cli(&cli(&["primer", "-r", root, "session"]));
        assert!(!config.session.storage.to_string_lossy().contains('~'));
    }

    #[test]
    fn test_validate_requires_course() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("primer.toml"), "").unwrap();
        let root = dir.path().to_str().unwrap();

        let mut config = SiteConfig::default();
        config.update_with_cli(&cli(&["primer", "-r", root, "render", "intro"]));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("course file"));

        fs::create_dir_all(dir.path().join("content")).unwrap();
        fs::write(dir.path().join("content/course.toml"), "").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_shared_keys() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("primer.toml"), "").unwrap();
        fs::create_dir_all(dir.path().join("content")).unwrap();
        fs::write(dir.path().join("content/course.toml"), "").unwrap();
        let root = dir.path().to_str().unwrap();

        let mut config =
            SiteConfig::from_str("[session]\ntheme_key = \"k\"\nprogress_key = \"k\"\n").unwrap();
        config.update_with_cli(&cli(&["primer", "-r", root, "render", "intro"]));
        assert!(config.validate().is_err());
    }
}
