//! Multiple-choice quiz state and scoring.
//!
//! The question list is fixed when the engine is built. Answers are kept per
//! question id and scored only once every question has one.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Options per question.
pub const OPTION_COUNT: usize = 4;

/// A question with four options and one correct (0-based) index.
///
/// `prompt` and `options` are authored markup and rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub options: [String; OPTION_COUNT],
    pub correct: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("Please answer all questions. You have answered {answered} of {total}.")]
    Incomplete { answered: usize, total: usize },

    #[error("Unknown question {0}")]
    UnknownQuestion(u32),

    #[error("Option {option} out of range for question {question}")]
    OptionOutOfRange { question: u32, option: usize },

    #[error("Invalid question {0}: {1}")]
    InvalidQuestion(u32, &'static str),
}

/// Feedback classification of a submitted quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTier {
    /// 80% and above
    Excellent,
    /// 60% and above
    Good,
    KeepPracticing,
}

impl FeedbackTier {
    pub const fn from_percentage(percentage: u32) -> Self {
        match percentage {
            80.. => Self::Excellent,
            60.. => Self::Good,
            _ => Self::KeepPracticing,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Excellent => "🎉 Excellent work!",
            Self::Good => "✓ Good effort!",
            Self::KeepPracticing => "📚 Keep practicing!",
        }
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
    pub tier: FeedbackTier,
}

impl QuizOutcome {
    /// "You scored 4/5 (80%)"
    pub fn score_text(&self) -> String {
        format!(
            "You scored {}/{} ({}%)",
            self.correct, self.total, self.percentage
        )
    }
}

/// Which part of the quiz is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizView {
    Answering,
    Results(QuizOutcome),
}

#[derive(Debug, Clone)]
pub struct QuizEngine {
    questions: Vec<Question>,
    answers: BTreeMap<u32, usize>,
    view: QuizView,
}

impl QuizEngine {
    /// Build an engine over a fixed question list.
    ///
    /// Ids must be unique and every `correct` index must name an option.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        let mut seen = BTreeSet::new();
        for q in &questions {
            if !seen.insert(q.id) {
                return Err(QuizError::InvalidQuestion(q.id, "duplicate id"));
            }
            if q.correct >= OPTION_COUNT {
                return Err(QuizError::InvalidQuestion(q.id, "correct index out of range"));
            }
        }
        Ok(Self {
            questions,
            answers: BTreeMap::new(),
            view: QuizView::Answering,
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn selected(&self, question_id: u32) -> Option<usize> {
        self.answers.get(&question_id).copied()
    }

    pub const fn view(&self) -> QuizView {
        self.view
    }

    /// Record (or replace) the selected option for a question.
    pub fn select_answer(&mut self, question_id: u32, option: usize) -> Result<(), QuizError> {
        if !self.questions.iter().any(|q| q.id == question_id) {
            return Err(QuizError::UnknownQuestion(question_id));
        }
        if option >= OPTION_COUNT {
            return Err(QuizError::OptionOutOfRange {
                question: question_id,
                option,
            });
        }
        self.answers.insert(question_id, option);
        Ok(())
    }

    /// Score the quiz. Refuses while any question is unanswered.
    pub fn submit(&mut self) -> Result<QuizOutcome, QuizError> {
        let total = self.total();
        let answered = self.answered();
        if answered < total {
            return Err(QuizError::Incomplete { answered, total });
        }

        let correct = self
            .questions
            .iter()
            .filter(|q| self.answers.get(&q.id) == Some(&q.correct))
            .count();
        let percentage = percent(correct, total);
        let outcome = QuizOutcome {
            correct,
            total,
            percentage,
            tier: FeedbackTier::from_percentage(percentage),
        };
        self.view = QuizView::Results(outcome);
        Ok(outcome)
    }

    /// Clear every answer and go back to the questions.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.view = QuizView::Answering;
    }
}

/// `round(100 * part / total)`, 0 when `total` is 0.
pub fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * part as f64 / total as f64).round() as u32
}
