use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::model::note::Note;
use crate::model::task::Task;
use crate::parse::{parse_notes, parse_task_line};

/// Task list files, read in this order
pub const TASK_FILES: [&str; 2] = ["todo.txt", "done.txt"];

/// Error type for loading tasks from disk
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("directory {0} not found")]
    MissingBaseDir(PathBuf),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Load `todo.txt` and `done.txt` from `base_dir`, attaching each task's note
/// document from `notes_dir/<id>.md`.
///
/// Missing task files contribute no tasks. Positions keep counting across
/// files, so a line in `done.txt` never shares a position with `todo.txt`.
pub fn load_tasks(base_dir: &Path, notes_dir: &Path) -> Result<Vec<Task>, LoadError> {
    if !base_dir.is_dir() {
        return Err(LoadError::MissingBaseDir(base_dir.to_path_buf()));
    }

    let mut tasks = Vec::new();
    let mut offset = 0;
    for name in TASK_FILES {
        let path = base_dir.join(name);
        let Some(text) = read_optional(&path)? else {
            debug!("{} not present, skipping", path.display());
            continue;
        };
        tasks.extend(parse_task_list(&text, offset));
        offset += text.lines().count();
    }

    for task in &mut tasks {
        if let Some(id) = task.id.as_deref() {
            task.notes = load_notes(notes_dir, id);
        }
    }

    debug!("loaded {} tasks from {}", tasks.len(), base_dir.display());
    Ok(tasks)
}

/// Parse task list text. Blank lines and `#` comments are skipped; the first
/// line gets position `offset + 1`.
pub fn parse_task_list(text: &str, offset: usize) -> Vec<Task> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(idx, line)| parse_task_line(line, offset + idx + 1))
        .collect()
}

/// Read and parse `<notes_dir>/<id>.md`. A missing or unreadable document
/// yields no notes.
pub fn load_notes(notes_dir: &Path, id: &str) -> Vec<Note> {
    let path = note_path(notes_dir, id);
    match read_optional(&path) {
        Ok(Some(text)) => parse_notes(&text),
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!("{}", e);
            Vec::new()
        }
    }
}

pub fn note_path(notes_dir: &Path, id: &str) -> PathBuf {
    notes_dir.join(format!("{}.md", id))
}

fn read_optional(path: &Path) -> Result<Option<String>, LoadError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LoadError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
