//! # Quiz Engine
//!
//! Grades a question bank against a learner's attempt. `grade` is a pure
//! function of `(bank, attempt)` — the same inputs always produce the same
//! `QuizResult`, so the UI can re-grade freely on redraw.
//!
//! Scoring rules: one point per question whose selected option is the correct
//! one. Unanswered counts as wrong and still counts toward the total; there
//! is no partial credit and no extra penalty for a wrong pick over a blank.
//!
//! Integrity errors (`MalformedBank`, `UnknownOption`) mean the data or the
//! caller is buggy. They propagate so the problem surfaces as a diagnostic
//! instead of a silently wrong score, even though catalog validation should
//! have caught the bank shape long before grading.

use std::collections::HashMap;
use std::fmt;

use crate::core::catalog::Question;

/// The learner's in-flight answers for one quiz step: question id → selected
/// option id. Ephemeral — replaced on re-attempt, dropped on step change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizAttempt {
    answers: HashMap<u32, String>,
}

impl QuizAttempt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or replace) the selection for a question.
    pub fn select(&mut self, question_id: u32, option_id: &str) {
        self.answers.insert(question_id, option_id.to_string());
    }

    pub fn selected(&self, question_id: u32) -> Option<&str> {
        self.answers.get(&question_id).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// Grading outcome for a single question, in bank order.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionResult {
    pub question_id: u32,
    /// None when the question was left unanswered.
    pub selected: Option<String>,
    pub correct: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizResult {
    pub per_question: Vec<QuestionResult>,
    pub score: usize,
    pub total: usize,
}

impl QuizResult {
    /// Score as a whole percentage.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100; // an empty bank can't gate anything
        }
        (self.score * 100 / self.total) as u8
    }

    pub fn passed(&self, threshold: u8) -> bool {
        self.percent() >= threshold
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum QuizError {
    /// A question has zero or several correct options.
    MalformedBank {
        question_id: u32,
        correct_options: usize,
    },
    /// The attempt references an option id the question doesn't have —
    /// a UI/data desync, not a wrong answer.
    UnknownOption {
        question_id: u32,
        option_id: String,
    },
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::MalformedBank {
                question_id,
                correct_options,
            } => write!(
                f,
                "question {question_id} has {correct_options} correct options (want exactly 1)"
            ),
            QuizError::UnknownOption {
                question_id,
                option_id,
            } => write!(
                f,
                "question {question_id} has no option '{option_id}' (stale selection?)"
            ),
        }
    }
}

impl std::error::Error for QuizError {}

/// Grade an attempt against a bank. Results preserve bank order.
pub fn grade(bank: &[Question], attempt: &QuizAttempt) -> Result<QuizResult, QuizError> {
    let mut per_question = Vec::with_capacity(bank.len());
    let mut score = 0;

    for question in bank {
        let correct_options = question.options.iter().filter(|o| o.correct).count();
        if correct_options != 1 {
            return Err(QuizError::MalformedBank {
                question_id: question.id,
                correct_options,
            });
        }

        let selected = attempt.selected(question.id);
        let correct = match selected {
            Some(option_id) => {
                let option = question
                    .options
                    .iter()
                    .find(|o| o.id == option_id)
                    .ok_or_else(|| QuizError::UnknownOption {
                        question_id: question.id,
                        option_id: option_id.to_string(),
                    })?;
                option.correct
            }
            None => false,
        };
        if correct {
            score += 1;
        }

        per_question.push(QuestionResult {
            question_id: question.id,
            selected: selected.map(str::to_string),
            correct,
            explanation: question.explanation.clone(),
        });
    }

    Ok(QuizResult {
        score,
        total: bank.len(),
        per_question,
    })
}
