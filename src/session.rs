//! Interactive learner session.
//!
//! Reads one command per line from stdin and dispatches it against an
//! [`App`] backed by the on-disk storage and clipboard files.

use crate::{
    app::{App, AppOptions},
    clipboard::FileClipboard,
    config::SiteConfig,
    content::Course,
    log,
    storage::FileStore,
    theme::Theme,
};
use anyhow::{Context, Result};
use std::io::{self, BufRead, IsTerminal, Write};

/// Start a session and run it until `quit` or end of input.
pub fn run_session(config: &SiteConfig, os_theme: Option<Theme>) -> Result<()> {
    let course_path = &config.build.content;
    let course = Course::from_path(course_path)
        .with_context(|| format!("Failed to load course {}", course_path.display()))?;

    let session = &config.session;
    let storage = FileStore::open(&session.storage)?;
    log!("session"; "state in {}", storage.path().display());

    let options = AppOptions {
        theme_key: session.theme_key.clone(),
        progress_key: session.progress_key.clone(),
        os_theme,
    };
    let mut app = App::start(
        course,
        options,
        Box::new(storage),
        Box::new(FileClipboard::new(&session.clipboard)),
    )?;

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", app.display())?;

    run_lines(&mut app, stdin.lock(), &mut stdout, interactive)
}

/// Feed every input line to `app`, writing outcome messages to `out`.
fn run_lines(
    app: &mut App,
    input: impl BufRead,
    out: &mut impl Write,
    prompt: bool,
) -> Result<()> {
    if prompt {
        write!(out, "> ")?;
        out.flush()?;
    }
    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        let line = line.trim();
        if matches!(line, "quit" | "exit") {
            break;
        }

        let outcome = app.dispatch(line);
        for message in &outcome.messages {
            writeln!(out, "{message}")?;
        }

        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
    }
    Ok(())
}
