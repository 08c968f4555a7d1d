use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::model::note::Note;
use crate::model::task::Task;

/// Index of a task in the slice the graph was built from
pub type TaskKey = usize;

/// Where a task's `link:` value points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// A task id
    Task(TaskKey),
    /// A note id; the key is the task that owns the note
    Note(TaskKey),
}

/// Relationship indices over one run's tasks.
///
/// Everything is computed once in [`LinkGraph::build`] and read-only
/// afterwards. Tasks are referred to by [`TaskKey`], never copied.
///
/// Duplicate task ids and duplicate note ids resolve last-writer-wins.
/// A link that names both a task id and a note id resolves to the task.
#[derive(Debug)]
pub struct LinkGraph<'a> {
    tasks: &'a [Task],
    /// task id → task
    by_id: HashMap<&'a str, TaskKey>,
    /// note id → task whose document holds the heading
    note_owner: HashMap<&'a str, TaskKey>,
    /// note id → tasks whose link names that note, in task order
    note_refs: HashMap<&'a str, Vec<TaskKey>>,
    /// parent → tasks linking to its id, in task order
    children: HashMap<TaskKey, Vec<TaskKey>>,
    /// child → parent, through either link kind
    parents: HashMap<TaskKey, TaskKey>,
}

impl<'a> LinkGraph<'a> {
    pub fn build(tasks: &'a [Task]) -> Self {
        let mut by_id = HashMap::new();
        for (key, task) in tasks.iter().enumerate() {
            if let Some(id) = task.id.as_deref()
                && let Some(prev) = by_id.insert(id, key)
            {
                warn!(
                    "duplicate task id '{}' on lines {} and {}; using line {}",
                    id, tasks[prev].position, task.position, task.position
                );
            }
        }

        let mut note_owner = HashMap::new();
        for (key, task) in tasks.iter().enumerate() {
            for note in task.walk_notes() {
                if let Some(id) = note.id.as_deref()
                    && let Some(prev) = note_owner.insert(id, key)
                    && prev != key
                {
                    warn!(
                        "note id '{}' appears under lines {} and {}; using line {}",
                        id, tasks[prev].position, task.position, task.position
                    );
                }
            }
        }

        let mut children: HashMap<TaskKey, Vec<TaskKey>> = HashMap::new();
        let mut parents = HashMap::new();
        let mut note_refs: HashMap<&str, Vec<TaskKey>> = HashMap::new();

        for (key, task) in tasks.iter().enumerate() {
            let Some(link) = task.link.as_deref() else {
                continue;
            };

            if let Some(&parent) = by_id.get(link) {
                children.entry(parent).or_default().push(key);
                parents.insert(key, parent);
            } else if let Some(&owner) = note_owner.get(link) {
                parents.insert(key, owner);
            } else {
                debug!("line {}: link '{}' matches no task or note", task.position, link);
            }

            if note_owner.contains_key(link) {
                note_refs.entry(link).or_default().push(key);
            }
        }

        debug!(
            "graph: {} tasks, {} ids, {} note ids, {} parented",
            tasks.len(),
            by_id.len(),
            note_owner.len(),
            parents.len()
        );

        LinkGraph {
            tasks,
            by_id,
            note_owner,
            note_refs,
            children,
            parents,
        }
    }

    pub fn tasks(&self) -> &'a [Task] {
        self.tasks
    }

    pub fn task(&self, key: TaskKey) -> &'a Task {
        &self.tasks[key]
    }

    pub fn find_by_id(&self, id: &str) -> Option<TaskKey> {
        self.by_id.get(id).copied()
    }

    /// First task parsed from the given line
    pub fn find_by_position(&self, position: usize) -> Option<TaskKey> {
        self.tasks.iter().position(|t| t.position == position)
    }

    pub fn note_owner(&self, note_id: &str) -> Option<TaskKey> {
        self.note_owner.get(note_id).copied()
    }

    /// Tasks whose link names this note id
    pub fn referencing(&self, note_id: &str) -> &[TaskKey] {
        self.note_refs.get(note_id).map_or(&[], Vec::as_slice)
    }

    /// Tasks referencing `note`, which lives in `owner`'s document. Empty
    /// when another task won the note's id.
    pub fn note_referrers(&self, owner: TaskKey, note: &Note) -> &[TaskKey] {
        match note.id.as_deref() {
            Some(id) if self.note_owner(id) == Some(owner) => self.referencing(id),
            _ => &[],
        }
    }

    /// Tasks linking directly to this task. Empty for a task whose id was
    /// taken over by a later duplicate.
    pub fn children_of(&self, key: TaskKey) -> &[TaskKey] {
        self.children.get(&key).map_or(&[], Vec::as_slice)
    }

    pub fn parent_of(&self, key: TaskKey) -> Option<TaskKey> {
        self.parents.get(&key).copied()
    }

    /// Parent id of the task with the given id
    pub fn parent_id(&self, id: &str) -> Option<&'a str> {
        let parent = self.parent_of(self.find_by_id(id)?)?;
        self.task(parent).id.as_deref()
    }

    /// Resolve a task's link, task ids first
    pub fn resolve_link(&self, key: TaskKey) -> Option<LinkTarget> {
        let link = self.task(key).link.as_deref()?;
        if let Some(target) = self.find_by_id(link) {
            Some(LinkTarget::Task(target))
        } else {
            self.note_owner(link).map(LinkTarget::Note)
        }
    }

    /// True when the task has a resolved parent, direct children, or a note
    /// that other tasks reference
    pub fn has_relation(&self, key: TaskKey) -> bool {
        self.parent_of(key).is_some()
            || !self.children_of(key).is_empty()
            || self
                .task(key)
                .walk_notes()
                .any(|n| !self.note_referrers(key, n).is_empty())
    }

    /// Follow parents upward to the ultimate ancestor. Stops at the last
    /// task before a cycle would repeat.
    pub fn find_root(&self, key: TaskKey) -> TaskKey {
        let mut root = key;
        let mut seen = HashSet::from([key]);
        while let Some(parent) = self.parent_of(root) {
            if !seen.insert(parent) {
                break;
            }
            root = parent;
        }
        root
    }

    /// Tasks with no resolved parent, in task order
    pub fn roots(&self) -> impl Iterator<Item = TaskKey> + '_ {
        (0..self.tasks.len()).filter(|key| !self.parents.contains_key(key))
    }
}
