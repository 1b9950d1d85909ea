//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! Two patterns, matching how much state a component needs:
//!
//! - **Stateless (props-based)**: receive everything as fields, render, done.
//!   `TitleBar`, `ProgressRail`.
//! - **Stateful (event-driven)**: a `*State` struct lives in `TuiState`
//!   across frames and handles events; a transient wrapper created each frame
//!   borrows it for rendering. `CoursePicker`, `StepView`, `QuizView`,
//!   `PlaygroundPanel`.
//!
//! Components never read `App` directly — the draw code hands them exactly
//! the props they need, which keeps them testable with fabricated data.

pub mod course_picker;
pub mod playground_panel;
pub mod progress_rail;
pub mod quiz_view;
pub mod step_view;
pub mod title_bar;

pub use course_picker::{CoursePicker, CoursePickerState, PickerEvent};
pub use playground_panel::{PlaygroundPanel, PlaygroundState};
pub use progress_rail::ProgressRail;
pub use quiz_view::{QuizEvent, QuizView, QuizViewState};
pub use step_view::{StepView, StepViewState};
pub use title_bar::TitleBar;
