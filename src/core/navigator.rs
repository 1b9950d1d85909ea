//! # Step Navigator
//!
//! A cursor over one course's step sequence. This is the state machine at the
//! heart of a learning session:
//!
//! ```text
//! index:      0 ──advance──▶ 1 ──advance──▶ ... ──advance──▶ N-1
//!             ◀──retreat──     ◀──retreat──       go_to(i) anywhere
//! ```
//!
//! Range errors at the boundaries are expected, not exceptional: callers
//! decline the action (a disabled "next" affordance), they don't crash.
//! Out-of-range jumps fail instead of clamping so a buggy caller is caught
//! rather than silently corrected.
//!
//! Completion is monotonic: `completed` only ever grows. Advancing marks the
//! step being left behind; arriving at the final step (by advance, jump, or
//! opening a one-step course) marks the final step itself, so a learner who
//! walks the whole course ends with every step completed.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::catalog::{Catalog, CatalogError, Course, Step};

/// The serializable snapshot of a learning session's position. This is the
/// whole persistence surface — progress files store exactly this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    pub course_id: String,
    pub step_index: usize,
    pub completed_step_ids: BTreeSet<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum NavError {
    /// advance() at the last step or retreat() at the first.
    OutOfRange { at: usize, len: usize },
    /// go_to() with an index outside `0..len`. The cursor is unchanged.
    IndexOutOfRange { requested: usize, len: usize },
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::OutOfRange { at, len } => {
                write!(f, "no step beyond position {} of {}", at + 1, len)
            }
            NavError::IndexOutOfRange { requested, len } => {
                write!(f, "step index {requested} out of range (course has {len} steps)")
            }
        }
    }
}

impl std::error::Error for NavError {}

/// Cursor over a course's steps. Owns a handle to the shared read-only
/// catalog; all mutation is confined to the index and the completed set.
pub struct Navigator {
    catalog: Arc<Catalog>,
    course_id: String,
    index: usize,
    completed: BTreeSet<String>,
}

impl Navigator {
    /// Open a course at its first step.
    pub fn open(catalog: Arc<Catalog>, course_id: &str) -> Result<Self, CatalogError> {
        catalog.course(course_id)?;
        let mut nav = Self {
            catalog,
            course_id: course_id.to_string(),
            index: 0,
            completed: BTreeSet::new(),
        };
        nav.mark_if_final();
        Ok(nav)
    }

    /// Reopen a course from a saved snapshot. A snapshot whose index no
    /// longer fits (the course content changed since it was written) falls
    /// back to the first step; completed ids that no longer exist are
    /// dropped.
    pub fn resume(catalog: Arc<Catalog>, saved: NavigationState) -> Result<Self, CatalogError> {
        let (index, completed) = {
            let course = catalog.course(&saved.course_id)?;
            let index = if saved.step_index < course.steps.len() {
                saved.step_index
            } else {
                warn!(
                    "saved step index {} out of range for '{}', restarting at 0",
                    saved.step_index, saved.course_id
                );
                0
            };
            let known: BTreeSet<&str> = course.steps.iter().map(|s| s.id.as_str()).collect();
            let completed = saved
                .completed_step_ids
                .into_iter()
                .filter(|id| known.contains(id.as_str()))
                .collect();
            (index, completed)
        };

        let mut nav = Self {
            catalog,
            course_id: saved.course_id,
            index,
            completed,
        };
        nav.mark_if_final();
        Ok(nav)
    }

    pub fn course(&self) -> &Course {
        // The constructor verified the id; the catalog is immutable.
        self.catalog
            .course(&self.course_id)
            .unwrap_or_else(|_| unreachable!("course id validated at open"))
    }

    /// The step under the cursor.
    pub fn current(&self) -> &Step {
        &self.course().steps[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Step count of the open course (always at least 1 after validation).
    pub fn len(&self) -> usize {
        self.course().steps.len()
    }

    /// Move forward one step. Marks the step being left as completed.
    pub fn advance(&mut self) -> Result<&Step, NavError> {
        let len = self.len();
        if self.index + 1 >= len {
            return Err(NavError::OutOfRange {
                at: self.index,
                len,
            });
        }
        let departed = self.current().id.clone();
        self.completed.insert(departed);
        self.index += 1;
        self.mark_if_final();
        Ok(self.current())
    }

    /// Move back one step. Never removes anything from the completed set.
    pub fn retreat(&mut self) -> Result<&Step, NavError> {
        if self.index == 0 {
            return Err(NavError::OutOfRange {
                at: 0,
                len: self.len(),
            });
        }
        self.index -= 1;
        Ok(self.current())
    }

    /// Jump to an arbitrary step (progress rail, CLI `--step`). Fails — does
    /// not clamp — on an out-of-range index, leaving the cursor where it was.
    pub fn go_to(&mut self, index: usize) -> Result<&Step, NavError> {
        let len = self.len();
        if index >= len {
            return Err(NavError::IndexOutOfRange {
                requested: index,
                len,
            });
        }
        self.index = index;
        self.mark_if_final();
        Ok(self.current())
    }

    /// True once every step in the course has been completed.
    pub fn is_complete(&self) -> bool {
        self.course()
            .steps
            .iter()
            .all(|s| self.completed.contains(&s.id))
    }

    pub fn is_step_completed(&self, step_id: &str) -> bool {
        self.completed.contains(step_id)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn completed_step_ids(&self) -> &BTreeSet<String> {
        &self.completed
    }

    /// Snapshot for persistence.
    pub fn state(&self) -> NavigationState {
        NavigationState {
            course_id: self.course_id.clone(),
            step_index: self.index,
            completed_step_ids: self.completed.clone(),
        }
    }

    /// Visiting the final step is what finishes a course, so arrival there
    /// counts as completing it.
    fn mark_if_final(&mut self) {
        if self.index + 1 == self.len() {
            let id = self.current().id.clone();
            self.completed.insert(id);
        }
    }
}
