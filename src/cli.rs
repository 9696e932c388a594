//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::theme::Theme;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Primer tutorial site CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Course file path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: primer.toml)
    #[arg(short = 'C', long, default_value = "primer.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Init a template tutorial site
    Init {
        /// the name(path) of site directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Render every topic and the quiz into the output directory
    Build {
        /// Clean output directory completely before building
        #[arg(long)]
        clean: bool,

        /// Minify the html content
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        minify: Option<bool>,
    },

    /// Print the rendered fragment of one topic
    Render {
        /// Topic identifier
        topic: String,
    },

    /// Run an interactive learner session on stdin
    Session {
        /// OS color-scheme preference used when no theme is saved
        #[arg(long, value_parser = parse_theme)]
        os_theme: Option<Theme>,

        /// Storage file (overrides `[session].storage`)
        #[arg(short, long)]
        storage: Option<PathBuf>,
    },
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    s.parse()
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_session(&self) -> bool {
        matches!(self.command, Commands::Session { .. })
    }
}
