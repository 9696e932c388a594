//! Primer - static tutorial sites with learner progress, themes and quizzes.

mod logger;

mod app;
mod build;
mod cli;
mod clipboard;
mod config;
mod content;
mod init;
mod navigation;
mod preview;
mod progress;
mod quiz;
mod render;
mod session;
mod storage;
mod theme;

use anyhow::{Context, Result, bail};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use content::Course;
use init::new_site;
use session::run_session;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Init { name } => new_site(&config, name.is_some()),
        Commands::Build { .. } => build_site(&config).map(|_| ()),
        Commands::Render { topic } => render_one(&config, topic),
        Commands::Session { os_theme, .. } => run_session(&config, *os_theme),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);

    // Validate config state based on command
    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) => bail!("Config file not found."),
        _ => {}
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}

/// Print one topic fragment to stdout.
fn render_one(config: &SiteConfig, topic: &str) -> Result<()> {
    let course_path = &config.build.content;
    let course = Course::from_path(course_path)
        .with_context(|| format!("Failed to load course {}", course_path.display()))?;

    match render::render_topic(&course.store, topic) {
        Some(fragment) => println!("{}", fragment.into_string()),
        None => log!("warn"; "unknown topic: {}", topic),
    }
    Ok(())
}
