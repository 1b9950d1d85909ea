//! # Course Picker Component
//!
//! The home screen: a list of every course in the catalog with saved
//! progress counts. Enter opens, `r` (pressed twice) restarts a course from
//! scratch, Esc or `q` quits.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CoursePickerState` lives in `TuiState`
//! - `CoursePicker` is created each frame with borrowed state

use std::collections::HashMap;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::core::catalog::CourseSummary;
use crate::tui::event::TuiEvent;

/// Persistent state for the course picker.
pub struct CoursePickerState {
    pub courses: Vec<CourseSummary>,
    /// course id → (completed steps, total steps)
    pub progress: HashMap<String, (usize, usize)>,
    pub selected: usize,
    pub confirm_restart: bool,
    pub list_state: ListState,
}

impl CoursePickerState {
    pub fn new(courses: Vec<CourseSummary>) -> Self {
        let mut list_state = ListState::default();
        if !courses.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            courses,
            progress: HashMap::new(),
            selected: 0,
            confirm_restart: false,
            list_state,
        }
    }

    /// Replace the progress counts (called whenever the picker is shown).
    pub fn set_progress(&mut self, progress: HashMap<String, (usize, usize)>) {
        self.progress = progress;
    }

    /// Handle a key event, returning a PickerEvent if the picker should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<PickerEvent> {
        // Reset restart confirmation on any non-restart key
        let is_restart_key = matches!(event, TuiEvent::InputChar('r'));
        if !is_restart_key {
            self.confirm_restart = false;
        }

        match event {
            TuiEvent::Escape | TuiEvent::InputChar('q') => Some(PickerEvent::Quit),
            TuiEvent::CursorUp => {
                if !self.courses.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.courses.is_empty() {
                    self.selected = (self.selected + 1).min(self.courses.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => self
                .courses
                .get(self.selected)
                .map(|course| PickerEvent::Open(course.id.clone())),
            TuiEvent::InputChar('r') => {
                if self.courses.is_empty() {
                    return None;
                }
                if self.confirm_restart {
                    self.confirm_restart = false;
                    Some(PickerEvent::Restart(self.courses[self.selected].id.clone()))
                } else {
                    self.confirm_restart = true;
                    None
                }
            }
            _ => None,
        }
    }
}

/// Events emitted by the course picker.
#[derive(Debug, PartialEq)]
pub enum PickerEvent {
    Open(String),
    /// Wipe saved progress, then open fresh.
    Restart(String),
    Quit,
}

/// Transient render wrapper for the course picker.
pub struct CoursePicker<'a> {
    state: &'a mut CoursePickerState,
}

impl<'a> CoursePicker<'a> {
    pub fn new(state: &'a mut CoursePickerState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let help_text = if self.state.confirm_restart {
            " Press r again to wipe progress | any other key cancels "
        } else {
            " ↑↓ Select  Enter Open  r Restart  q Quit "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Courses ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.state.courses.is_empty() {
            // Can't normally happen (the catalog refuses to load empty), but
            // render something sane rather than an empty frame.
            let empty = Paragraph::new("No courses in the catalog.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .state
            .courses
            .iter()
            .enumerate()
            .map(|(i, course)| {
                let counts = self
                    .state
                    .progress
                    .get(&course.id)
                    .map(|(done, total)| format!("{done}/{total}"))
                    .unwrap_or_else(|| String::from("new"));

                // Layout: "  <title>  <description…>   3/8  "
                let fixed = course.title.len() + 2 + counts.len() + 2;
                let desc_width = inner_width.saturating_sub(fixed);
                let description = truncate_str(&course.description, desc_width);
                let padded_desc = format!("{description:<desc_width$}");

                let style = if i == self.state.selected {
                    if self.state.confirm_restart {
                        Style::default()
                            .fg(Color::Red)
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                    } else {
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                    }
                } else {
                    Style::default().fg(Color::Gray)
                };

                let line = Line::from(vec![
                    Span::styled(course.title.clone(), style),
                    Span::styled("  ", style),
                    Span::styled(padded_desc, style.add_modifier(Modifier::DIM)),
                    Span::styled("  ", style),
                    Span::styled(counts, style),
                ]);
                ListItem::new(line)
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` chars, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        ".".repeat(max_width)
    } else {
        let cut: String = s.chars().take(max_width - 3).collect();
        format!("{cut}...")
    }
}
