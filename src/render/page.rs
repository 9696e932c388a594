//! Full-page and quiz markup.

use super::{Fragment, html_escape};
use crate::{
    content::ContentStore,
    quiz::{QuizEngine, QuizView},
    theme::Theme,
};
use std::fmt::Write;

/// Page id of the quiz view.
pub const QUIZ_PAGE: &str = "quiz";

/// Everything the page shell needs besides the body fragment.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub site_title: &'a str,
    /// `<meta name="description">`, omitted when empty.
    pub description: &'a str,
    pub language: &'a str,
    pub theme: Theme,
    pub store: &'a ContentStore,
    pub active: &'a str,
    pub progress: u32,
    pub has_quiz: bool,
}

/// Wrap `body` in a complete HTML document with sidebar and progress bar.
pub fn render_page(ctx: &PageContext<'_>, body: &Fragment) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n\
         <html lang=\"{}\" data-theme=\"{}\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n\
         {}</head>\n\
         <body>\n\
         <header class=\"header\">\n\
         <span class=\"site-title\">{}</span>\n\
         <button id=\"theme-toggle\" title=\"{label}\" aria-label=\"{label}\">◐</button>\n\
         </header>\n",
        ctx.language,
        ctx.theme,
        ctx.site_title,
        meta_description(ctx.description),
        ctx.site_title,
        label = ctx.theme.toggle_label(),
    );

    html.push_str("<nav id=\"sidebar\">\n<ul id=\"topicsList\">\n");
    for (id, doc) in ctx.store.iter() {
        nav_item(&mut html, id, &doc.title, ctx.active == id);
    }
    if ctx.has_quiz {
        nav_item(&mut html, QUIZ_PAGE, "Quiz", ctx.active == QUIZ_PAGE);
    }
    let _ = write!(
        html,
        "</ul>\n\
         <div class=\"progress\">\n\
         <div id=\"progress-fill\" style=\"width: {p}%\"></div>\n\
         <span id=\"progress-percentage\">{p}</span>%\n\
         </div>\n\
         </nav>\n\
         <main id=\"contentContainer\">\n{}</main>\n\
         </body>\n\
         </html>\n",
        body.as_str(),
        p = ctx.progress,
    );
    html
}

fn meta_description(description: &str) -> String {
    if description.is_empty() {
        return String::new();
    }
    format!(
        "<meta name=\"description\" content=\"{}\">\n",
        html_escape(description)
    )
}

fn nav_item(html: &mut String, id: &str, title: &str, active: bool) {
    let class = if active { "nav-link active" } else { "nav-link" };
    let _ = writeln!(
        html,
        "<li><a class=\"{class}\" data-page=\"{id}\" href=\"{id}.html\">{title}</a></li>"
    );
}

/// Render the quiz: the questions while answering, the score afterwards.
pub fn render_quiz(quiz: &QuizEngine) -> Fragment {
    let mut html = String::from("<div class=\"quiz\">\n");
    let total = quiz.total();

    match quiz.view() {
        QuizView::Answering => {
            html.push_str("<div id=\"quiz-questions-container\">\n");
            for (index, question) in quiz.questions().iter().enumerate() {
                let _ = write!(
                    html,
                    "<div class=\"quiz-question\" id=\"question-{id}\">\n\
                     <h4>Question {n} of {total}</h4>\n\
                     <p>{prompt}</p>\n\
                     <div class=\"quiz-options\">\n",
                    id = question.id,
                    n = index + 1,
                    prompt = question.prompt,
                );
                for (option_index, option) in question.options.iter().enumerate() {
                    let checked = if quiz.selected(question.id) == Some(option_index) {
                        " checked"
                    } else {
                        ""
                    };
                    let _ = writeln!(
                        html,
                        "<label class=\"quiz-option\"><input type=\"radio\" name=\"question-{}\" value=\"{option_index}\"{checked}> {option}</label>",
                        question.id
                    );
                }
                html.push_str("</div>\n</div>\n");
            }
            html.push_str("</div>\n<button id=\"submit-quiz-btn\">Submit Quiz</button>\n");
        }
        QuizView::Results(outcome) => {
            let _ = write!(
                html,
                "<div id=\"quiz-result\">\n\
                 <p id=\"score-display\">You scored <strong>{}/{}</strong> ({}%)</p>\n\
                 <p class=\"feedback\">{}</p>\n\
                 <button id=\"reset-quiz-btn\">Retake Quiz</button>\n\
                 </div>\n",
                outcome.correct,
                outcome.total,
                outcome.percentage,
                outcome.tier.message()
            );
        }
    }

    html.push_str("</div>\n");
    Fragment(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        quiz::tests::sample_questions,
        render::{render_topic, tests::sample_store},
    };

    #[test]
    fn test_page_marks_active_and_theme() {
        let store = sample_store();
        let body = render_topic(&store, "history").unwrap();
        let ctx = PageContext {
            site_title: "C Tutorial",
            description: "Learn \"C\" & more",
            language: "en",
            theme: Theme::Dark,
            store: &store,
            active: "history",
            progress: 50,
            has_quiz: true,
        };
        let html = render_page(&ctx, &body);

        assert!(html.contains("<html lang=\"en\" data-theme=\"dark\">"));
        assert!(html.contains("title=\"Switch to light mode\""));
        assert!(html.contains("<a class=\"nav-link active\" data-page=\"history\""));
        assert!(html.contains("<a class=\"nav-link\" data-page=\"introduction\""));
        assert!(html.contains("data-page=\"quiz\""));
        assert!(html.contains("<span id=\"progress-percentage\">50</span>"));
        assert!(html.contains(body.as_str()));
        assert!(html.contains(
            "<meta name=\"description\" content=\"Learn &quot;C&quot; &amp; more\">"
        ));

        let bare = render_page(&PageContext { description: "", ..ctx }, &body);
        assert!(!bare.contains("name=\"description\""));
    }

    #[test]
    fn test_quiz_questions_view() {
        let mut quiz = QuizEngine::new(sample_questions()).unwrap();
        quiz.select_answer(2, 3).unwrap();
        let html = render_quiz(&quiz).into_string();

        assert!(html.contains("<h4>Question 1 of 5</h4>"));
        assert!(html.contains("name=\"question-2\" value=\"3\" checked"));
        assert!(!html.contains("name=\"question-1\" value=\"0\" checked"));
        assert!(!html.contains("quiz-result"));
    }

    #[test]
    fn test_quiz_results_view() {
        let mut quiz = QuizEngine::new(sample_questions()).unwrap();
        for q in sample_questions() {
            quiz.select_answer(q.id, q.correct).unwrap();
        }
        quiz.submit().unwrap();
        let html = render_quiz(&quiz).into_string();

        assert!(html.contains("You scored <strong>5/5</strong> (100%)"));
        assert!(html.contains("Excellent work!"));
        assert!(!html.contains("quiz-questions-container"));
    }
}
