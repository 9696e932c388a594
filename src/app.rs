//! Application state and command dispatch.
//!
//! [`App`] owns every piece of learner state and the injected storage and
//! clipboard. User actions arrive as command lines (`navigate links`,
//! `answer 3 1`, ...) and are routed through an explicit table from action
//! name to handler.
//!
//! # Architecture
//!
//! ```text
//! dispatch("answer 3 1")
//!     │
//!     ├── CommandTable: "answer" → cmd_answer
//!     │
//!     └── cmd_answer(app, ["3", "1"])
//!             │
//!             └── QuizEngine::select_answer → Outcome { messages }
//! ```

use crate::{
    clipboard::{Clipboard, CopyFeedback, copy_code},
    content::Course,
    log,
    navigation::{NavigationController, Transition},
    preview::PreviewFrame,
    progress::ProgressTracker,
    quiz::QuizEngine,
    render::{QUIZ_PAGE, RenderTarget, render_quiz},
    storage::KeyValueStore,
    theme::{Theme, ThemeController},
};
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;

/// Storage keys and environment inputs for an [`App`].
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub theme_key: String,
    pub progress_key: String,
    /// OS color-scheme preference, if known.
    pub os_theme: Option<Theme>,
}

/// What a command produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub messages: Vec<String>,
    /// The view changed page and should return to the top.
    pub scroll_to_top: bool,
}

impl Outcome {
    fn message(text: impl Into<String>) -> Self {
        Self {
            messages: vec![text.into()],
            scroll_to_top: false,
        }
    }
}

type Handler = fn(&mut App, &[&str]) -> Result<Outcome>;

/// Mapping from action identifier to handler.
pub struct CommandTable {
    handlers: FxHashMap<&'static str, (Handler, &'static str)>,
}

impl CommandTable {
    pub fn new() -> Self {
        let entries: [(&'static str, Handler, &'static str); 15] = [
            ("navigate", cmd_navigate, "navigate <page>"),
            ("next", cmd_next, "next"),
            ("prev", cmd_prev, "prev"),
            ("hash", cmd_hash, "hash <#page>"),
            ("toggle-theme", cmd_toggle_theme, "toggle-theme"),
            ("system-theme", cmd_system_theme, "system-theme <light|dark>"),
            ("answer", cmd_answer, "answer <question> <option>"),
            ("submit", cmd_submit, "submit"),
            ("reset-quiz", cmd_reset_quiz, "reset-quiz"),
            ("search", cmd_search, "search <term>"),
            ("copy", cmd_copy, "copy <section> [topic]"),
            ("preview", cmd_preview, "preview <markup>"),
            ("progress", cmd_progress, "progress"),
            ("show", cmd_show, "show"),
            ("help", cmd_help, "help"),
        ];
        let handlers = entries
            .into_iter()
            .map(|(name, handler, usage)| (name, (handler, usage)))
            .collect();
        Self { handlers }
    }

    fn get(&self, action: &str) -> Option<Handler> {
        self.handlers.get(action).map(|(handler, _)| *handler)
    }

    /// Usage lines, sorted by action name.
    pub fn usage(&self) -> Vec<&'static str> {
        let mut lines: Vec<_> = self.handlers.values().map(|(_, usage)| *usage).collect();
        lines.sort_unstable();
        lines
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

pub struct App {
    course: Course,
    nav: NavigationController,
    progress: ProgressTracker,
    theme: ThemeController,
    quiz: Option<QuizEngine>,
    target: RenderTarget,
    preview: Option<PreviewFrame>,
    storage: Box<dyn KeyValueStore>,
    clipboard: Box<dyn Clipboard>,
    commands: CommandTable,
}

impl App {
    /// Restore persisted state and show the default page.
    pub fn start(
        course: Course,
        options: AppOptions,
        storage: Box<dyn KeyValueStore>,
        clipboard: Box<dyn Clipboard>,
    ) -> Result<Self> {
        let quiz = if course.questions.is_empty() {
            None
        } else {
            Some(QuizEngine::new(course.questions.clone()).context("Invalid quiz question")?)
        };

        let mut pages: Vec<String> = course.store.ids().cloned().collect();
        if quiz.is_some() {
            pages.push(QUIZ_PAGE.to_owned());
        }

        let nav = NavigationController::new(pages.iter().cloned(), course.default_topic());
        let mut progress = ProgressTracker::new(options.progress_key, pages);
        let mut theme = ThemeController::new(options.theme_key);

        progress.load(storage.as_ref())?;
        theme.initialize(storage.as_ref(), options.os_theme)?;

        let mut app = Self {
            course,
            nav,
            progress,
            theme,
            quiz,
            target: RenderTarget::new(),
            preview: None,
            storage,
            clipboard,
            commands: CommandTable::new(),
        };
        let default = app.nav.default_page().to_owned();
        app.enter(&default)?;
        log!(
            "session"; "started on {} (theme {}, progress {}%)",
            app.nav.active(),
            app.theme.current(),
            app.progress.percentage()
        );
        Ok(app)
    }

    /// Parse and run one command line.
    ///
    /// Unknown actions, refused operations and storage failures all come
    /// back as messages. A failed command leaves the previous state in place.
    pub fn dispatch(&mut self, line: &str) -> Outcome {
        let mut parts = line.split_whitespace();
        let Some(action) = parts.next() else {
            return Outcome::default();
        };
        let args: Vec<&str> = parts.collect();

        let Some(handler) = self.commands.get(action) else {
            log!("warn"; "unknown command: {}", action);
            return Outcome::message(format!("unknown command `{action}`, try `help`"));
        };
        handler(self, &args).unwrap_or_else(|err| {
            log!("error"; "{}: {:#}", action, err);
            Outcome::message(format!("{action} failed: {err:#}"))
        })
    }

    pub fn active(&self) -> &str {
        self.nav.active()
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn display(&self) -> &str {
        self.target.contents().as_str()
    }

    pub fn preview(&self) -> Option<&PreviewFrame> {
        self.preview.as_ref()
    }

    /// Apply a successful transition: render, record the visit, scroll.
    fn arrive(&mut self, transition: Option<Transition>) -> Result<Outcome> {
        let Some(transition) = transition else {
            return Ok(Outcome::message(format!(
                "staying on {}",
                self.nav.active()
            )));
        };
        let percentage = match self.enter(&transition.to) {
            Ok(percentage) => percentage,
            Err(err) => {
                self.nav.navigate(&transition.from);
                return Err(err.context(format!("cannot record visit to {}", transition.to)));
            }
        };
        log!("session"; "navigated to {}", transition.to);
        Ok(Outcome {
            messages: vec![format!(
                "Navigated to page: {} (progress {}%)",
                transition.to, percentage
            )],
            scroll_to_top: true,
        })
    }

    /// Record the visit, then show `page`.
    fn enter(&mut self, page: &str) -> Result<u32> {
        let percentage = self.progress.mark_visited(self.storage.as_mut(), page)?;
        self.refresh(page);
        Ok(percentage)
    }

    fn refresh(&mut self, page: &str) {
        match &self.quiz {
            Some(quiz) if page == QUIZ_PAGE => {
                self.target.show(render_quiz(quiz));
            }
            _ => {
                self.target.render(&self.course.store, page);
            }
        }
    }

    fn refresh_quiz_view(&mut self) {
        if self.nav.is_active(QUIZ_PAGE) {
            let page = self.nav.active().to_owned();
            self.refresh(&page);
        }
    }

    fn quiz_mut(&mut self) -> Option<&mut QuizEngine> {
        self.quiz.as_mut()
    }
}

// ============================================================================
// Handlers
// ============================================================================

fn usage(text: &str) -> Result<Outcome> {
    Ok(Outcome::message(format!("usage: {text}")))
}

fn no_quiz() -> Result<Outcome> {
    Ok(Outcome::message("this course has no quiz"))
}

fn cmd_navigate(app: &mut App, args: &[&str]) -> Result<Outcome> {
    let [page] = args else {
        return usage("navigate <page>");
    };
    let transition = app.nav.navigate(page);
    app.arrive(transition)
}

fn cmd_next(app: &mut App, _: &[&str]) -> Result<Outcome> {
    let transition = app.nav.next();
    app.arrive(transition)
}

fn cmd_prev(app: &mut App, _: &[&str]) -> Result<Outcome> {
    let transition = app.nav.previous();
    app.arrive(transition)
}

fn cmd_hash(app: &mut App, args: &[&str]) -> Result<Outcome> {
    let hash = args.first().copied().unwrap_or_default();
    let transition = app.nav.from_hash(hash);
    app.arrive(transition)
}

fn cmd_toggle_theme(app: &mut App, _: &[&str]) -> Result<Outcome> {
    let theme = app.theme.toggle(app.storage.as_mut())?;
    Ok(Outcome::message(format!("theme: {theme}")))
}

fn cmd_system_theme(app: &mut App, args: &[&str]) -> Result<Outcome> {
    let Some(Ok(os)) = args.first().map(|raw| raw.parse::<Theme>()) else {
        return usage("system-theme <light|dark>");
    };
    Ok(match app.theme.system_changed(app.storage.as_ref(), os)? {
        Some(theme) => Outcome::message(format!("theme: {theme} (system)")),
        None => Outcome::message(format!("theme: {} (saved preference)", app.theme.current())),
    })
}

fn cmd_answer(app: &mut App, args: &[&str]) -> Result<Outcome> {
    let [question, option] = args else {
        return usage("answer <question> <option>");
    };
    let (Ok(question), Ok(option)) = (question.parse::<u32>(), option.parse::<usize>()) else {
        return usage("answer <question> <option>");
    };
    let Some(quiz) = app.quiz_mut() else {
        return no_quiz();
    };
    let outcome = match quiz.select_answer(question, option) {
        Ok(()) => Outcome::message(format!("Question {question} answer: {option}")),
        Err(err) => Outcome::message(err.to_string()),
    };
    app.refresh_quiz_view();
    Ok(outcome)
}

fn cmd_submit(app: &mut App, _: &[&str]) -> Result<Outcome> {
    let Some(quiz) = app.quiz_mut() else {
        return no_quiz();
    };
    let outcome = match quiz.submit() {
        Ok(result) => {
            log!("quiz"; "submitted: {}/{} ({}%)", result.correct, result.total, result.percentage);
            Outcome {
                messages: vec![result.score_text(), result.tier.message().to_owned()],
                scroll_to_top: false,
            }
        }
        Err(err) => Outcome::message(err.to_string()),
    };
    app.refresh_quiz_view();
    Ok(outcome)
}

fn cmd_reset_quiz(app: &mut App, _: &[&str]) -> Result<Outcome> {
    let Some(quiz) = app.quiz_mut() else {
        return no_quiz();
    };
    quiz.reset();
    app.refresh_quiz_view();
    Ok(Outcome::message("quiz reset"))
}

fn cmd_search(app: &mut App, args: &[&str]) -> Result<Outcome> {
    let term = args.join(" ");
    let store = &app.course.store;
    let messages: Vec<String> = store
        .search(&term)
        .into_iter()
        .filter_map(|id| store.get(id).map(|doc| format!("{id}: {}", doc.title)))
        .collect();
    if messages.is_empty() {
        return Ok(Outcome::message(format!("no topics match `{term}`")));
    }
    Ok(Outcome {
        messages,
        scroll_to_top: false,
    })
}

fn cmd_copy(app: &mut App, args: &[&str]) -> Result<Outcome> {
    let Some(Ok(section)) = args.first().map(|raw| raw.parse::<usize>()) else {
        return usage("copy <section> [topic]");
    };
    let topic = args.get(1).copied().unwrap_or(app.nav.active()).to_owned();
    let result = copy_code(app.clipboard.as_mut(), &app.course.store, &topic, section);
    if let Err(err) = &result {
        log!("warn"; "copy failed: {}", err);
    }
    Ok(match CopyFeedback::from_result(&result) {
        CopyFeedback::Copied { label, restore } => {
            Outcome::message(format!("{label} (button returns to \"{restore}\")"))
        }
        CopyFeedback::Failed { alert } => Outcome::message(alert),
    })
}

fn cmd_preview(app: &mut App, args: &[&str]) -> Result<Outcome> {
    let frame = PreviewFrame::load(args.join(" "));
    let html = frame.to_iframe();
    log!("session"; "preview loaded ({} bytes)", frame.markup().len());
    app.preview = Some(frame);
    Ok(Outcome::message(html))
}

fn cmd_progress(app: &mut App, _: &[&str]) -> Result<Outcome> {
    let progress = &app.progress;
    let visited: Vec<&str> = progress.visited().iter().map(String::as_str).collect();
    Ok(Outcome {
        messages: vec![
            format!(
                "Progress: {}/{} ({}%)",
                progress.visited_known(),
                progress.total(),
                progress.percentage()
            ),
            format!("Visited: {}", visited.join(", ")),
        ],
        scroll_to_top: false,
    })
}

fn cmd_show(app: &mut App, _: &[&str]) -> Result<Outcome> {
    Ok(Outcome::message(app.display()))
}

fn cmd_help(app: &mut App, _: &[&str]) -> Result<Outcome> {
    Ok(Outcome {
        messages: app.commands.usage().into_iter().map(String::from).collect(),
        scroll_to_top: false,
    })
}
