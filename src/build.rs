//! Static site output.
//!
//! Renders every topic, plus the quiz when the course has questions, into
//! standalone HTML pages.
//!
//! # Output
//!
//! ```text
//! public/
//! ├── index.html          (default topic)
//! ├── introduction.html
//! ├── history.html
//! └── quiz.html
//! ```

use crate::{
    config::SiteConfig,
    content::Course,
    log,
    quiz::QuizEngine,
    render::{PageContext, QUIZ_PAGE, render_page, render_quiz, render_topic},
    theme::Theme,
};
use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};

/// One page waiting to be written.
struct Page {
    path: PathBuf,
    html: String,
}

/// Build the whole site and return the number of files written.
///
/// If `config.build.clean` is true, clears the output directory first.
pub fn build_site(config: &SiteConfig) -> Result<usize> {
    let course_path = &config.build.content;
    let course = Course::from_path(course_path)
        .with_context(|| format!("Failed to load course {}", course_path.display()))?;

    let output = &config.build.output;
    prepare_output(output, config.build.clean)?;

    log!("build"; "rendering {} topics...", course.store.len());
    let pages = render_pages(config, &course)?;

    pages.par_iter().try_for_each(|page| {
        let html = minify(page.html.as_bytes(), config.build.minify);
        fs::write(&page.path, html)
            .with_context(|| format!("Failed to write {}", page.path.display()))
    })?;

    log!("build"; "wrote {} pages to {}", pages.len(), output.display());
    Ok(pages.len())
}

/// Create the output directory, removing it first when `clean` is set.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clean {}", output.display()))?;
        log!("build"; "cleaned {}", output.display());
    }
    fs::create_dir_all(output).with_context(|| format!("Failed to create {}", output.display()))
}

fn render_pages(config: &SiteConfig, course: &Course) -> Result<Vec<Page>> {
    let output = &config.build.output;
    let site_title = if course.info.title.is_empty() {
        config.base.title.as_str()
    } else {
        course.info.title.as_str()
    };
    let description = if course.info.description.is_empty() {
        config.base.description.as_str()
    } else {
        course.info.description.as_str()
    };
    let has_quiz = !course.questions.is_empty();
    let default = course.default_topic();
    let base = PageContext {
        site_title,
        description,
        language: &config.base.language,
        theme: Theme::default(),
        store: &course.store,
        active: default,
        progress: 0,
        has_quiz,
    };

    let mut pages = Vec::with_capacity(course.store.len() + 2);
    for id in course.store.ids() {
        let body =
            render_topic(&course.store, id).ok_or_else(|| anyhow!("topic `{id}` vanished"))?;
        pages.push(Page {
            path: output.join(format!("{id}.html")),
            html: render_page(&PageContext { active: id, ..base }, &body),
        });
    }

    if has_quiz {
        let engine = QuizEngine::new(course.questions.clone()).context("Invalid quiz question")?;
        pages.push(Page {
            path: output.join(format!("{QUIZ_PAGE}.html")),
            html: render_page(
                &PageContext { active: QUIZ_PAGE, ..base },
                &render_quiz(&engine),
            ),
        });
    }

    if let Some(body) = render_topic(&course.store, default) {
        pages.push(Page {
            path: output.join("index.html"),
            html: render_page(&base, &body),
        });
    }

    Ok(pages)
}

/// Minify HTML with `minify_html`, or pass it through untouched.
fn minify(html: &[u8], enabled: bool) -> Cow<'_, [u8]> {
    if !enabled {
        return Cow::Borrowed(html);
    }
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    Cow::Owned(minify_html::minify(html, &cfg))
}
