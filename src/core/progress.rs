//! # Progress Persistence
//!
//! Saves course progress to `~/.sensei/progress/<course-id>.json` so a
//! learner can pick up where they left off. A progress file is just the
//! navigator's serializable [`NavigationState`] plus a timestamp — nothing
//! the core engine depends on; losing these files only loses resume points.
//!
//! All writes go through atomic rename (write `.tmp`, then `rename()`) for
//! crash safety. Save failures are logged and swallowed: a read-only home
//! directory shouldn't take down a lesson in progress.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::navigator::NavigationState;
use crate::core::state::App;

/// One course's saved progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub state: NavigationState,
    pub updated_at: i64,
}

/// Returns the progress directory, creating it if needed. An explicit
/// override (config `progress.dir`) wins over `~/.sensei/progress/`.
pub fn resolve_dir(override_dir: Option<&Path>) -> io::Result<PathBuf> {
    let dir = match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => {
            let home = dirs::home_dir()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
            home.join(".sensei").join("progress")
        }
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn record_path(dir: &Path, course_id: &str) -> PathBuf {
    dir.join(format!("{course_id}.json"))
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Save a course's progress, replacing any earlier record.
pub fn save(dir: &Path, state: &NavigationState) -> io::Result<()> {
    let record = ProgressRecord {
        state: state.clone(),
        updated_at: Utc::now().timestamp(),
    };
    atomic_write_json(&record_path(dir, &record.state.course_id), &record)
}

/// Load a course's saved progress. `Ok(None)` when there is none.
pub fn load(dir: &Path, course_id: &str) -> io::Result<Option<ProgressRecord>> {
    let path = record_path(dir, course_id);
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(&path)?;
    let record = serde_json::from_str(&json)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(Some(record))
}

/// Delete a course's saved progress (restart from scratch).
pub fn clear(dir: &Path, course_id: &str) -> io::Result<()> {
    let path = record_path(dir, course_id);
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Load progress for each listed course, skipping missing or corrupt
/// records. Used by the course picker to show completion counts.
pub fn load_known(dir: &Path, course_ids: &[String]) -> Vec<ProgressRecord> {
    course_ids
        .iter()
        .filter_map(|id| match load(dir, id) {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping unreadable progress for '{id}': {e}");
                None
            }
        })
        .collect()
}

/// Save the active session's progress, if persistence is enabled. The single
/// entry point the event loop uses — on navigation effects and on exit.
pub fn save_current(app: &App) {
    if !app.progress_enabled {
        return;
    }
    let Some(session) = &app.session else {
        return;
    };

    let state = session.navigator.state();
    let result =
        resolve_dir(app.progress_dir.as_deref()).and_then(|dir| save(&dir, &state));
    match result {
        Ok(()) => debug!("progress saved for '{}'", state.course_id),
        Err(e) => warn!("failed to save progress for '{}': {e}", state.course_id),
    }
}
