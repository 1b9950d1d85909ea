//! # Actions
//!
//! Everything that can happen in Sensei becomes an `Action`.
//! Learner presses "next"? That's `Action::NextStep`.
//! A playground slider moves? That's `Action::ParameterChanged(change)`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing the I/O (if any) the caller
//! should perform. No I/O happens here, which is what keeps the whole
//! navigation and scoring engine testable without a terminal.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Navigation range errors are expected at the boundaries and turn into
//! status messages, not failures. Quiz integrity errors (`MalformedBank`,
//! `UnknownOption`) mean the data or the UI is buggy — they surface in
//! `app.error` as a visible diagnostic rather than a silently wrong score.

use log::{debug, error, warn};

use crate::core::bridge::ParameterChange;
use crate::core::navigator::{NavigationState, Navigator};
use crate::core::quiz;
use crate::core::state::{App, Session};

#[derive(Debug)]
pub enum Action {
    /// Open a course, optionally resuming from saved progress or starting at
    /// a specific step ("open course X at step Y" from the CLI).
    OpenCourse {
        id: String,
        resume: Option<NavigationState>,
        start_at: Option<usize>,
    },
    /// Leave the course and return to the picker.
    CloseCourse,
    NextStep,
    PrevStep,
    /// Jump via the progress rail. Out-of-range indices are declined, never
    /// clamped.
    JumpTo(usize),
    SelectAnswer {
        question_id: u32,
        option_id: String,
    },
    /// Wipe the current attempt and its result for a retry.
    ResetAttempt,
    SubmitQuiz,
    /// A playground reported a live parameter change over the bridge.
    ParameterChanged(ParameterChange),
    Quit,
}

/// What the caller should do after an update.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Navigation state changed; persist it (if progress is enabled).
    SaveProgress,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::OpenCourse {
            id,
            resume,
            start_at,
        } => open_course(app, id, resume, start_at),
        Action::CloseCourse => {
            app.session = None;
            app.error = None;
            app.status_message = String::from("Pick a course");
            Effect::None
        }
        Action::NextStep => next_step(app),
        Action::PrevStep => prev_step(app),
        Action::JumpTo(index) => jump_to(app, index),
        Action::SelectAnswer {
            question_id,
            option_id,
        } => select_answer(app, question_id, option_id),
        Action::ResetAttempt => {
            if let Some(session) = app.session.as_mut() {
                session.attempt.clear();
                session.result = None;
                app.status_message = String::from("Attempt cleared");
            }
            Effect::None
        }
        Action::SubmitQuiz => submit_quiz(app),
        Action::ParameterChanged(change) => {
            if let Some(session) = app.session.as_mut() {
                app.status_message = format!("{} = {}", change.name, change.value);
                session.record_param(change);
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn open_course(
    app: &mut App,
    id: String,
    resume: Option<NavigationState>,
    start_at: Option<usize>,
) -> Effect {
    let opened = match resume {
        Some(saved) if saved.course_id == id => Navigator::resume(app.catalog.clone(), saved),
        _ => Navigator::open(app.catalog.clone(), &id),
    };

    match opened {
        Ok(mut navigator) => {
            let mut status = None;
            if let Some(index) = start_at
                && let Err(e) = navigator.go_to(index)
            {
                warn!("requested start step rejected: {e}");
                status = Some(e.to_string());
            }
            app.status_message =
                status.unwrap_or_else(|| navigator.current().title.clone());
            app.session = Some(Session::new(navigator));
            app.error = None;
            Effect::None
        }
        Err(e) => {
            error!("failed to open course '{id}': {e}");
            app.error = Some(e.to_string());
            Effect::None
        }
    }
}

/// True when an uncompleted quiz step blocks advancement: gating is on and
/// the step has no passing grade yet. Quiz steps already in the completed set
/// never re-gate on a revisit.
fn quiz_gate_blocks(app: &App, session: &Session) -> Option<String> {
    if !app.require_quiz_pass {
        return None;
    }
    let step = session.navigator.current();
    if !step.is_quiz() || session.navigator.is_step_completed(&step.id) {
        return None;
    }
    match &session.result {
        Some(result) if result.passed(app.pass_threshold) => None,
        Some(result) => Some(format!(
            "Scored {}% — need {}% to continue",
            result.percent(),
            app.pass_threshold
        )),
        None => Some(String::from("Submit the quiz to continue")),
    }
}

fn next_step(app: &mut App) -> Effect {
    let gate = match &app.session {
        Some(session) => quiz_gate_blocks(app, session),
        None => return Effect::None,
    };
    if let Some(message) = gate {
        app.status_message = message;
        return Effect::None;
    }

    let Some(session) = app.session.as_mut() else {
        return Effect::None;
    };
    match session.navigator.advance() {
        Ok(step) => {
            let title = step.title.clone();
            session.on_step_changed();
            app.status_message = if session.navigator.is_complete() {
                format!("{title} — course complete!")
            } else {
                title
            };
            Effect::SaveProgress
        }
        Err(e) => {
            debug!("advance declined: {e}");
            app.status_message = if session.navigator.is_complete() {
                String::from("Course complete — Esc to pick another")
            } else {
                String::from("Already at the last step")
            };
            Effect::None
        }
    }
}

fn prev_step(app: &mut App) -> Effect {
    let Some(session) = app.session.as_mut() else {
        return Effect::None;
    };
    match session.navigator.retreat() {
        Ok(step) => {
            let title = step.title.clone();
            session.on_step_changed();
            app.status_message = title;
            Effect::SaveProgress
        }
        Err(e) => {
            debug!("retreat declined: {e}");
            app.status_message = String::from("Already at the first step");
            Effect::None
        }
    }
}

fn jump_to(app: &mut App, index: usize) -> Effect {
    let Some(session) = app.session.as_mut() else {
        return Effect::None;
    };
    if index == session.navigator.index() {
        return Effect::None; // already there; don't reset the step's state
    }
    match session.navigator.go_to(index) {
        Ok(step) => {
            let title = step.title.clone();
            session.on_step_changed();
            app.status_message = title;
            Effect::SaveProgress
        }
        Err(e) => {
            debug!("jump declined: {e}");
            app.status_message = e.to_string();
            Effect::None
        }
    }
}

fn select_answer(app: &mut App, question_id: u32, option_id: String) -> Effect {
    let Some(session) = app.session.as_mut() else {
        return Effect::None;
    };
    let Some(bank) = session.navigator.current().questions() else {
        return Effect::None; // not a quiz step; stray event
    };
    let total = bank.len();

    // Selecting after a grade starts a fresh attempt on top of the old answers.
    session.result = None;
    session.attempt.select(question_id, &option_id);
    app.status_message = format!(
        "{} of {} answered",
        session.attempt.answered_count(),
        total
    );
    Effect::None
}

fn submit_quiz(app: &mut App) -> Effect {
    let Some(session) = app.session.as_mut() else {
        return Effect::None;
    };
    let Some(bank) = session.navigator.current().questions() else {
        return Effect::None;
    };

    match quiz::grade(bank, &session.attempt) {
        Ok(result) => {
            app.status_message =
                format!("Score: {}/{} ({}%)", result.score, result.total, result.percent());
            session.result = Some(result);
            Effect::None
        }
        Err(e) => {
            error!("quiz grading failed: {e}");
            app.error = Some(format!("Quiz data error: {e}"));
            Effect::None
        }
    }
}
