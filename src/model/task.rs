use serde::Serialize;

use super::note::Note;

/// A single entry from a todo.txt task list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Task {
    /// 1-based line number, used to address the task from the command line
    pub position: usize,
    /// The original line, untouched
    #[serde(skip)]
    pub raw: String,
    /// Display title with all recognized tokens removed
    pub title: String,
    /// Line started with the `x ` completion marker
    pub completed: bool,
    /// Single uppercase letter from a leading `(A)`
    pub priority: Option<char>,
    /// `id:` value
    pub id: Option<String>,
    /// `st:` value
    pub status: Option<String>,
    /// `link:` value; may name a task or a note heading
    pub link: Option<String>,
    /// `area:` value
    pub area: Option<String>,
    /// `type:` value
    pub kind: Option<String>,
    /// `+tag` tokens (without the sigil), in line order
    pub tags: Vec<String>,
    /// `@context` value
    pub context: Option<String>,
    /// `due:` value
    pub due: Option<String>,
    /// Top-level typed headings from the task's note document
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
}

impl Task {
    /// Create a task with only a position and title set
    pub fn new(position: usize, title: impl Into<String>) -> Self {
        let title = title.into();
        Task {
            position,
            raw: title.clone(),
            title,
            ..Task::default()
        }
    }

    /// True when every tag in `required` is present on this task
    pub fn has_all_tags(&self, required: &[String]) -> bool {
        required.iter().all(|t| self.tags.contains(t))
    }

    /// Depth-first walk over every note in this task's forest
    pub fn walk_notes(&self) -> impl Iterator<Item = &Note> {
        let mut stack: Vec<&Note> = self.notes.iter().rev().collect();
        std::iter::from_fn(move || {
            let note = stack.pop()?;
            stack.extend(note.children.iter().rev());
            Some(note)
        })
    }
}
