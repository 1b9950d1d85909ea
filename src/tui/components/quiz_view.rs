//! # Quiz View
//!
//! One question at a time: Tab cycles questions, arrows move the option
//! cursor, Enter (or Space) selects, `s` submits the attempt, `r` retries
//! after grading. The view only *emits* events — selection state lives in the
//! core `QuizAttempt` and grading in the core engine, so this component never
//! computes a score itself.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::core::catalog::Question;
use crate::core::quiz::{QuizAttempt, QuizResult};
use crate::tui::event::TuiEvent;

/// Cursor position within the quiz, persisted in `TuiState`.
#[derive(Default)]
pub struct QuizViewState {
    pub question: usize,
    pub option: usize,
}

/// Events emitted toward the reducer.
#[derive(Debug, PartialEq)]
pub enum QuizEvent {
    Select { question_id: u32, option_id: String },
    Submit,
    Retry,
}

impl QuizViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Handle a key event against the given bank. `graded` disables answer
    /// changes (the learner browses results until they retry).
    pub fn handle_event(
        &mut self,
        event: &TuiEvent,
        bank: &[Question],
        graded: bool,
    ) -> Option<QuizEvent> {
        if bank.is_empty() {
            return None;
        }
        self.question = self.question.min(bank.len() - 1);
        let options = bank[self.question].options.len();

        match event {
            TuiEvent::NextField => {
                self.question = (self.question + 1) % bank.len();
                self.option = 0;
                None
            }
            TuiEvent::PrevField => {
                self.question = self.question.checked_sub(1).unwrap_or(bank.len() - 1);
                self.option = 0;
                None
            }
            TuiEvent::CursorUp if !graded => {
                self.option = self.option.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown if !graded => {
                self.option = (self.option + 1).min(options.saturating_sub(1));
                None
            }
            TuiEvent::Submit | TuiEvent::InputChar(' ') if !graded => {
                let question = &bank[self.question];
                let option = question.options.get(self.option)?;
                Some(QuizEvent::Select {
                    question_id: question.id,
                    option_id: option.id.clone(),
                })
            }
            TuiEvent::InputChar('s') if !graded => Some(QuizEvent::Submit),
            TuiEvent::InputChar('r') if graded => Some(QuizEvent::Retry),
            _ => None,
        }
    }
}

/// Transient render wrapper.
pub struct QuizView<'a> {
    state: &'a mut QuizViewState,
    bank: &'a [Question],
    attempt: &'a QuizAttempt,
    result: Option<&'a QuizResult>,
}

impl<'a> QuizView<'a> {
    pub fn new(
        state: &'a mut QuizViewState,
        bank: &'a [Question],
        attempt: &'a QuizAttempt,
        result: Option<&'a QuizResult>,
    ) -> Self {
        Self {
            state,
            bank,
            attempt,
            result,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.bank.is_empty() {
            return;
        }
        self.state.question = self.state.question.min(self.bank.len() - 1);
        let question = &self.bank[self.state.question];
        let graded = self.result.is_some();

        let mut lines: Vec<Line> = Vec::new();

        // Header: position plus either answered count or the score.
        let header = match self.result {
            Some(result) => format!(
                "Question {} of {} — score {}/{} ({}%)",
                self.state.question + 1,
                self.bank.len(),
                result.score,
                result.total,
                result.percent()
            ),
            None => format!(
                "Question {} of {} — {} answered",
                self.state.question + 1,
                self.bank.len(),
                self.attempt.answered_count()
            ),
        };
        lines.push(Line::from(Span::styled(
            header,
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::default());

        lines.push(Line::from(Span::styled(
            question.prompt.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());

        let per_question = self
            .result
            .map(|r| &r.per_question[self.state.question]);
        let selected_id = match per_question {
            Some(entry) => entry.selected.as_deref(),
            None => self.attempt.selected(question.id),
        };

        for (i, option) in question.options.iter().enumerate() {
            let cursor = if !graded && i == self.state.option {
                "▸ "
            } else {
                "  "
            };
            let is_selected = selected_id == Some(option.id.as_str());
            let radio = if is_selected { "(•)" } else { "( )" };

            let (verdict, style) = if graded {
                if option.correct {
                    ("✓", Style::default().fg(Color::Green))
                } else if is_selected {
                    ("✗", Style::default().fg(Color::Red))
                } else {
                    (" ", Style::default().fg(Color::Gray).add_modifier(Modifier::DIM))
                }
            } else if !graded && i == self.state.option {
                (" ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            } else {
                (" ", Style::default().fg(Color::Gray))
            };

            lines.push(Line::from(vec![
                Span::styled(cursor.to_string(), Style::default().fg(Color::White)),
                Span::styled(format!("{radio} "), style),
                Span::styled(option.text.clone(), style),
                Span::styled(format!(" {verdict}"), style),
            ]));
        }

        if let Some(entry) = per_question {
            lines.push(Line::default());
            let verdict = if entry.correct {
                Span::styled("Correct. ", Style::default().fg(Color::Green))
            } else if entry.selected.is_none() {
                Span::styled("Unanswered. ", Style::default().fg(Color::Red))
            } else {
                Span::styled("Not quite. ", Style::default().fg(Color::Red))
            };
            lines.push(Line::from(vec![
                verdict,
                Span::styled(
                    entry.explanation.clone(),
                    Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
                ),
            ]));
        }

        lines.push(Line::default());
        let help = if graded {
            "Tab next question  r Retry  n Next step"
        } else {
            "↑↓ Option  Enter Select  Tab Question  s Submit"
        };
        lines.push(Line::from(Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        )));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
