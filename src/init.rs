//! Site initialization module.
//!
//! Creates a new tutorial site with default configuration and a sample course.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Default config filename
const CONFIG_FILE: &str = "primer.toml";

/// Sample C tutorial, with a five-question quiz
const SAMPLE_COURSE: &str = include_str!("../assets/course.toml");

/// Create a new site with the default structure
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Without a name we init in place, which needs an empty directory
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `primer init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_sample_course(&config.build.content)?;
    init_default_config(root)?;
    init_ignored_files(root, &[config.build.output.as_path(), Path::new(".primer/")])?;

    log!("init"; "created site at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(root: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(root.join(CONFIG_FILE), content)?;
    Ok(())
}

/// Write the sample course, creating its directory
fn init_sample_course(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "Path `{}` already exists. Try `primer init <SITE_NAME>` instead.",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, SAMPLE_COURSE).with_context(|| format!("Failed to write {}", path.display()))
}

/// Write `.gitignore` listing `paths` relative to `root`
fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    let content = paths
        .iter()
        .map(|p| p.strip_prefix(root).unwrap_or(p))
        .filter_map(|p| p.to_str())
        .collect::<Vec<_>>()
        .join("\n");

    let path = root.join(".gitignore");
    if !path.exists() {
        fs::write(&path, content + "\n")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{content::Course, quiz::QuizEngine};
    use tempfile::TempDir;

    fn config_at(root: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.set_root(root);
        config.build.content = root.join("content/course.toml");
        config.build.output = root.join("public");
        config
    }

    #[test]
    fn test_sample_course_is_valid() {
        let course = Course::from_str(SAMPLE_COURSE).unwrap();
        assert_eq!(course.default_topic(), "introduction");
        assert_eq!(course.store.len(), 4);
        let quiz = QuizEngine::new(course.questions).unwrap();
        assert_eq!(quiz.total(), 5);
    }

    #[test]
    fn test_new_site_writes_scaffold() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("learn-c");
        let config = config_at(&root);

        new_site(&config, true).unwrap();

        let written = SiteConfig::from_path(&root.join(CONFIG_FILE)).unwrap();
        assert_eq!(written.session.progress_key, "primerProgress");
        assert!(Course::from_path(&root.join("content/course.toml")).is_ok());

        let ignore = fs::read_to_string(root.join(".gitignore")).unwrap();
        assert_eq!(ignore, "public\n.primer/\n");
    }

    #[test]
    fn test_new_site_refuses_non_empty_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "keep").unwrap();
        let config = config_at(dir.path());

        let err = new_site(&config, false).unwrap_err();
        assert!(err.to_string().contains("not empty"));
        assert!(!dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_new_site_refuses_existing_course() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("content")).unwrap();
        fs::write(root.join("content/course.toml"), "").unwrap();

        let err = new_site(&config_at(root), true).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
