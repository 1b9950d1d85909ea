//! # Application State
//!
//! Core business state for Sensei. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── catalog: Arc<Catalog>          // immutable course collection
//! ├── session: Option<Session>      // the open course, if any
//! ├── status_message: String         // status bar text
//! ├── error: Option<String>          // fatal-to-the-view diagnostic
//! ├── require_quiz_pass: bool        // gate "next" behind quiz score
//! ├── pass_threshold: u8             // passing score, percent
//! ├── progress_enabled: bool         // persist NavigationState?
//! └── progress_dir: Option<PathBuf>  // progress dir override
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::path::PathBuf;
use std::sync::Arc;

use crate::core::bridge::{ParamValue, ParameterChange};
use crate::core::catalog::Catalog;
use crate::core::config::ResolvedConfig;
use crate::core::navigator::Navigator;
use crate::core::quiz::{QuizAttempt, QuizResult};

pub struct App {
    pub catalog: Arc<Catalog>,
    pub session: Option<Session>,
    pub status_message: String,
    pub error: Option<String>,
    pub require_quiz_pass: bool,
    pub pass_threshold: u8,
    pub progress_enabled: bool,
    pub progress_dir: Option<PathBuf>,
}

/// One learner's open course: the navigator plus the per-step scratch state
/// that dies whenever the step changes.
pub struct Session {
    pub navigator: Navigator,
    /// In-flight quiz answers for the current step.
    pub attempt: QuizAttempt,
    /// Grading outcome of the last submit on the current step.
    pub result: Option<QuizResult>,
    /// Latest value reported per playground parameter, in first-report order.
    pub live_params: Vec<(String, ParamValue)>,
}

impl Session {
    pub fn new(navigator: Navigator) -> Self {
        Self {
            navigator,
            attempt: QuizAttempt::new(),
            result: None,
            live_params: Vec::new(),
        }
    }

    /// Reset everything scoped to the step that was just left.
    pub fn on_step_changed(&mut self) {
        self.attempt.clear();
        self.result = None;
        self.live_params.clear();
    }

    /// Record a reported parameter value, replacing any earlier report.
    pub fn record_param(&mut self, change: ParameterChange) {
        match self.live_params.iter_mut().find(|(n, _)| *n == change.name) {
            Some((_, value)) => *value = change.value,
            None => self.live_params.push((change.name, change.value)),
        }
    }
}

impl App {
    pub fn new(catalog: Arc<Catalog>, config: &ResolvedConfig) -> Self {
        Self {
            catalog,
            session: None,
            status_message: String::from("Welcome to Sensei!"),
            error: None,
            require_quiz_pass: config.require_quiz_pass,
            pass_threshold: config.pass_threshold,
            progress_enabled: config.progress_enabled,
            progress_dir: config.progress_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::bridge::{ParamValue, ParameterChange};
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to Sensei!");
        assert!(app.session.is_none());
        assert!(app.error.is_none());
    }

    #[test]
    fn test_record_param_replaces_by_name() {
        let mut app = test_app();
        crate::core::action::update(
            &mut app,
            crate::core::action::Action::OpenCourse {
                id: "demo".into(),
                resume: None,
                start_at: None,
            },
        );
        let session = app.session.as_mut().unwrap();

        session.record_param(ParameterChange {
            name: "slope".into(),
            value: ParamValue::Number(1.0),
        });
        session.record_param(ParameterChange {
            name: "noise".into(),
            value: ParamValue::Flag(true),
        });
        session.record_param(ParameterChange {
            name: "slope".into(),
            value: ParamValue::Number(2.5),
        });

        assert_eq!(session.live_params.len(), 2);
        assert_eq!(session.live_params[0].0, "slope");
        assert_eq!(session.live_params[0].1, ParamValue::Number(2.5));
    }
}
