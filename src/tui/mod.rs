//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm; the core
//! never sees a terminal. The event loop is the one place side effects
//! happen: it polls keys, drains the playground bridge, feeds everything
//! through `update()`, and performs whatever `Effect` comes back (saving
//! progress, quitting).
//!
//! ## Redraw strategy
//!
//! Nothing animates, so the loop just blocks on input for up to 250ms and
//! redraws once per wakeup. Cheap enough that no dirty-tracking is needed.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::sync::mpsc::Receiver;

use log::{info, warn};

use crate::core::action::{Action, Effect, update};
use crate::core::bridge::{ParameterChange, PlaygroundBridge};
use crate::core::catalog::{Catalog, StepBody};
use crate::core::config::ResolvedConfig;
use crate::core::navigator::NavigationState;
use crate::core::progress;
use crate::core::state::App;
use crate::tui::components::{
    CoursePickerState, PickerEvent, PlaygroundState, QuizEvent, QuizViewState, StepViewState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// How the session was launched from the CLI.
pub struct Launch {
    /// Zero-based step override ("open course X at step Y").
    pub start_at: Option<usize>,
    /// Ignore saved progress for the initial course.
    pub fresh: bool,
}

/// TUI-specific presentation state (not part of core business logic).
pub struct TuiState {
    pub picker: CoursePickerState,
    pub step_view: StepViewState,
    pub quiz: QuizViewState,
    /// Present while the current step is an experiment.
    pub playground: Option<PlaygroundState>,
    /// (course id, step index) of the last-seen step, for change detection.
    last_step: Option<(String, usize)>,
    /// Reload picker progress counts next time the picker is shown.
    picker_dirty: bool,
}

impl TuiState {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            picker: CoursePickerState::new(catalog.summaries()),
            step_view: StepViewState::new(),
            quiz: QuizViewState::new(),
            playground: None,
            last_step: None,
            picker_dirty: true,
        }
    }
}

pub fn run(catalog: Arc<Catalog>, config: ResolvedConfig, launch: Launch) -> io::Result<()> {
    let mut app = App::new(catalog.clone(), &config);
    let mut tui = TuiState::new(&catalog);
    let (bridge, bridge_rx) = PlaygroundBridge::channel();

    // "Open course X at step Y" — the routing layer's only contract with us.
    if let Some(course_id) = config.default_course.clone() {
        let resume = if launch.fresh {
            None
        } else {
            load_resume(&app, &course_id)
        };
        update(
            &mut app,
            Action::OpenCourse {
                id: course_id,
                resume,
                start_at: launch.start_at,
            },
        );
    }

    let mut terminal = ratatui::init();
    info!("Terminal initialized");

    loop {
        sync_session_view(&app, &mut tui, &bridge);
        if app.session.is_none() && tui.picker_dirty {
            tui.picker.set_progress(picker_progress(&app));
            tui.picker_dirty = false;
        }

        terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;

        // Collect actions from input events, then from the bridge.
        let mut actions: Vec<Action> = Vec::new();
        let first_event = poll_event_timeout(std::time::Duration::from_millis(250));
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue; // redraw happens on the next loop pass anyway
            }
            if matches!(event, TuiEvent::ForceQuit) {
                actions.push(Action::Quit);
                continue;
            }
            if app.session.is_some() || app.error.is_some() {
                if let Some(action) = route_course_event(&app, &mut tui, &event) {
                    actions.push(action);
                }
            } else if let Some(picker_event) = tui.picker.handle_event(&event) {
                match picker_event {
                    PickerEvent::Open(id) => {
                        let resume = load_resume(&app, &id);
                        actions.push(Action::OpenCourse {
                            id,
                            resume,
                            start_at: None,
                        });
                    }
                    PickerEvent::Restart(id) => {
                        clear_saved(&app, &id);
                        actions.push(Action::OpenCourse {
                            id,
                            resume: None,
                            start_at: None,
                        });
                    }
                    PickerEvent::Quit => actions.push(Action::Quit),
                }
            }
        }
        drain_bridge(&bridge_rx, &mut actions);

        let mut should_quit = false;
        for action in actions {
            // Leaving a course is the one transition that must save *before*
            // the reducer clears the session.
            if matches!(action, Action::CloseCourse) {
                progress::save_current(&app);
            }
            match update(&mut app, action) {
                Effect::Quit => should_quit = true,
                Effect::SaveProgress => progress::save_current(&app),
                Effect::None => {}
            }
        }
        if should_quit {
            break;
        }
    }

    // Save on exit if a course is open
    progress::save_current(&app);

    ratatui::restore();
    Ok(())
}

/// Translate a key event into an action while a course (or its error view)
/// is on screen. Keys that only move presentation state (scrolling, cursor
/// moves) are handled in place and produce no action.
fn route_course_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if app.error.is_some() {
        // A visible diagnostic: only acknowledge-and-leave applies.
        return matches!(event, TuiEvent::Escape | TuiEvent::Submit)
            .then_some(Action::CloseCourse);
    }
    let session = app.session.as_ref()?;

    match event {
        TuiEvent::Escape => return Some(Action::CloseCourse),
        TuiEvent::InputChar('q') => return Some(Action::Quit),
        TuiEvent::InputChar('n') => return Some(Action::NextStep),
        TuiEvent::InputChar('p') => return Some(Action::PrevStep),
        TuiEvent::InputChar(c) if c.is_ascii_digit() && *c != '0' => {
            let index = (*c as usize) - ('1' as usize);
            return Some(Action::JumpTo(index));
        }
        _ => {}
    }

    // Remaining keys belong to whichever component the step kind puts in
    // focus.
    use crate::tui::component::EventHandler;
    let step = session.navigator.current();
    match &step.body {
        StepBody::Concept { .. } => {
            match event {
                TuiEvent::CursorLeft => return Some(Action::PrevStep),
                TuiEvent::CursorRight => return Some(Action::NextStep),
                _ => {
                    tui.step_view.handle_event(event);
                }
            }
            None
        }
        StepBody::Experiment { .. } => {
            if matches!(event, TuiEvent::PageUp | TuiEvent::PageDown) {
                tui.step_view.handle_event(event);
            } else if let Some(playground) = &mut tui.playground {
                playground.handle_event(event);
            }
            None
        }
        StepBody::Quiz { questions, .. } => {
            let graded = session.result.is_some();
            match tui.quiz.handle_event(event, questions, graded)? {
                QuizEvent::Select {
                    question_id,
                    option_id,
                } => Some(Action::SelectAnswer {
                    question_id,
                    option_id,
                }),
                QuizEvent::Submit => Some(Action::SubmitQuiz),
                QuizEvent::Retry => Some(Action::ResetAttempt),
            }
        }
    }
}

/// Reset per-step presentation state when the step (or course) changes.
fn sync_session_view(app: &App, tui: &mut TuiState, bridge: &PlaygroundBridge) {
    let signature = app
        .session
        .as_ref()
        .map(|s| (s.navigator.course().id.clone(), s.navigator.index()));
    if signature == tui.last_step {
        return;
    }

    tui.step_view.reset();
    tui.quiz.reset();
    tui.playground = app.session.as_ref().and_then(|s| match &s.navigator.current().body {
        StepBody::Experiment { params, .. } => {
            Some(PlaygroundState::new(params, bridge.clone()))
        }
        _ => None,
    });
    if signature.is_none() {
        tui.picker_dirty = true; // back on the picker: refresh counts
    }
    tui.last_step = signature;
}

fn drain_bridge(rx: &Receiver<ParameterChange>, actions: &mut Vec<Action>) {
    while let Ok(change) = rx.try_recv() {
        actions.push(Action::ParameterChanged(change));
    }
}

/// Saved progress for a course, if persistence is on and a record exists.
fn load_resume(app: &App, course_id: &str) -> Option<NavigationState> {
    if !app.progress_enabled {
        return None;
    }
    let dir = match progress::resolve_dir(app.progress_dir.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            warn!("progress dir unavailable: {e}");
            return None;
        }
    };
    match progress::load(&dir, course_id) {
        Ok(record) => record.map(|r| r.state),
        Err(e) => {
            warn!("ignoring unreadable progress for '{course_id}': {e}");
            None
        }
    }
}

fn clear_saved(app: &App, course_id: &str) {
    if !app.progress_enabled {
        return;
    }
    if let Ok(dir) = progress::resolve_dir(app.progress_dir.as_deref())
        && let Err(e) = progress::clear(&dir, course_id)
    {
        warn!("failed to clear progress for '{course_id}': {e}");
    }
}

/// Completed/total counts per course for the picker.
fn picker_progress(app: &App) -> HashMap<String, (usize, usize)> {
    let mut counts = HashMap::new();
    if !app.progress_enabled {
        return counts;
    }
    let Ok(dir) = progress::resolve_dir(app.progress_dir.as_deref()) else {
        return counts;
    };
    let ids: Vec<String> = app.catalog.summaries().into_iter().map(|s| s.id).collect();
    for record in progress::load_known(&dir, &ids) {
        if let Ok(course) = app.catalog.course(&record.state.course_id) {
            let total = course.steps.len();
            let done = record.state.completed_step_ids.len().min(total);
            counts.insert(record.state.course_id.clone(), (done, total));
        }
    }
    counts
}
