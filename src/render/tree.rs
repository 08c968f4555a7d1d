use std::collections::HashSet;

use indexmap::IndexSet;
use log::debug;

use crate::model::note::Note;
use crate::model::options::{DisplayOptions, Selection};
use crate::model::task::Task;
use crate::ops::graph::{LinkGraph, TaskKey};

use super::inline::format_inline;
use super::style::{
    BLUE, CYAN, GRAY, GREEN, MAGENTA, Painter, WHITE, fg, note_kind_color, priority_color,
    status_color,
};

const BRANCH: &str = "├─";
const LAST_BRANCH: &str = "└─";
const PIPE_INDENT: &str = "│  ";
const BLANK_INDENT: &str = "   ";
/// Prefix for the children of a top-level task
const ROOT_CHILD_PREFIX: &str = " ";

/// What happened to the requested selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    /// Nothing to show (no tasks, or every root is hidden)
    Empty,
    /// No task was parsed from this line
    PositionNotFound(usize),
    /// The selected task is completed and completed tasks are hidden
    PositionHidden(usize),
    /// Filters were given but no task matched them
    NoMatches,
}

impl RenderOutcome {
    /// Message for outcomes the user should hear about
    pub fn message(&self) -> Option<String> {
        match self {
            RenderOutcome::Rendered | RenderOutcome::Empty => None,
            RenderOutcome::PositionNotFound(pos) => Some(format!("Task at line {} not found", pos)),
            RenderOutcome::PositionHidden(pos) => Some(format!(
                "Task at line {} is completed (hidden). Use --show-done to display.",
                pos
            )),
            RenderOutcome::NoMatches => Some("No tasks found with given filters".to_string()),
        }
    }
}

/// Lines produced by one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub lines: Vec<String>,
    pub outcome: RenderOutcome,
}

/// Per-render bookkeeping, passed down through every recursive call
#[derive(Debug, Default)]
struct RenderState {
    visited: HashSet<TaskKey>,
    lines: Vec<String>,
}

/// One entry under a task or note
#[derive(Debug, Clone, Copy)]
enum Branch<'a> {
    /// A note and the task whose document holds it
    Note(&'a Note, TaskKey),
    Task(TaskKey),
}

/// Render the selected part of the graph as a tree.
pub fn render(
    graph: &LinkGraph<'_>,
    options: &DisplayOptions,
    selection: Selection,
    painter: Painter,
) -> Rendered {
    TreeRenderer {
        graph,
        options,
        painter,
    }
    .render(selection)
}

struct TreeRenderer<'g, 'a> {
    graph: &'g LinkGraph<'a>,
    options: &'g DisplayOptions,
    painter: Painter,
}

impl<'a> TreeRenderer<'_, 'a> {
    fn render(&self, selection: Selection) -> Rendered {
        let mut state = RenderState::default();

        let roots = match self.select_roots(selection) {
            Ok(roots) => roots,
            Err(outcome) => {
                return Rendered {
                    lines: Vec::new(),
                    outcome,
                };
            }
        };

        for root in roots {
            if !self.is_shown(root, &state) {
                continue;
            }
            if !state.lines.is_empty() {
                state.lines.push(String::new());
            }
            self.render_task(root, "", true, false, &mut state);
        }

        let outcome = if state.lines.is_empty() {
            RenderOutcome::Empty
        } else {
            RenderOutcome::Rendered
        };
        debug!("rendered {} tasks in {} lines", state.visited.len(), state.lines.len());
        Rendered {
            lines: state.lines,
            outcome,
        }
    }

    // -----------------------------------------------------------------------
    // Root selection
    // -----------------------------------------------------------------------

    fn select_roots(&self, selection: Selection) -> Result<Vec<TaskKey>, RenderOutcome> {
        match selection {
            Selection::Branch(pos) => self.select_position(pos, false),
            Selection::Root(pos) => self.select_position(pos, true),
            Selection::All if self.options.has_filters() => self.select_filtered(),
            Selection::All => Ok(self.select_all()),
        }
    }

    fn select_position(&self, position: usize, to_root: bool) -> Result<Vec<TaskKey>, RenderOutcome> {
        let key = self
            .graph
            .find_by_position(position)
            .ok_or(RenderOutcome::PositionNotFound(position))?;
        let key = if to_root { self.graph.find_root(key) } else { key };
        if !self.passes_done_filter(self.graph.task(key)) {
            return Err(RenderOutcome::PositionHidden(position));
        }
        Ok(vec![key])
    }

    /// Parentless tasks, followed by one entry per link cycle (which has no
    /// parentless ancestor and would otherwise never show).
    fn select_all(&self) -> Vec<TaskKey> {
        let mut roots: IndexSet<TaskKey> = self
            .graph
            .roots()
            .filter(|&k| self.is_root_candidate(k))
            .collect();

        let mut reachable = HashSet::new();
        for &root in &roots {
            self.collect_subtree(root, &mut reachable);
        }
        for key in 0..self.graph.tasks().len() {
            if reachable.contains(&key) || !self.is_root_candidate(key) {
                continue;
            }
            let top = self.graph.find_root(key);
            if self.graph.parent_of(top).is_some() && roots.insert(top) {
                self.collect_subtree(top, &mut reachable);
            }
        }
        roots.into_iter().collect()
    }

    /// Every task matching the filters, lifted to its ultimate root
    fn select_filtered(&self) -> Result<Vec<TaskKey>, RenderOutcome> {
        let matching: Vec<TaskKey> = (0..self.graph.tasks().len())
            .filter(|&k| self.matches_filters(self.graph.task(k)) && self.is_root_candidate(k))
            .collect();
        if matching.is_empty() {
            return Err(RenderOutcome::NoMatches);
        }
        let roots: IndexSet<TaskKey> = matching.into_iter().map(|k| self.graph.find_root(k)).collect();
        Ok(roots.into_iter().collect())
    }

    fn matches_filters(&self, task: &Task) -> bool {
        let o = self.options;
        o.area.as_ref().is_none_or(|a| task.area.as_ref() == Some(a))
            && o.status.as_ref().is_none_or(|s| task.status.as_ref() == Some(s))
            && o.context.as_ref().is_none_or(|c| task.context.as_ref() == Some(c))
            && task.has_all_tags(&o.tags)
    }

    fn is_root_candidate(&self, key: TaskKey) -> bool {
        self.passes_done_filter(self.graph.task(key))
            && (!self.options.link_lock || self.graph.has_relation(key))
    }

    /// Keys reachable through direct children, note references and note links
    fn collect_subtree(&self, key: TaskKey, seen: &mut HashSet<TaskKey>) {
        if !seen.insert(key) {
            return;
        }
        for &child in self.graph.children_of(key) {
            self.collect_subtree(child, seen);
        }
        for note in self.graph.task(key).walk_notes() {
            for &child in self.graph.note_referrers(key, note) {
                self.collect_subtree(child, seen);
            }
            if let Some(target) = note.link.as_deref().and_then(|l| self.graph.find_by_id(l)) {
                self.collect_subtree(target, seen);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Visibility
    // -----------------------------------------------------------------------

    fn passes_done_filter(&self, task: &Task) -> bool {
        self.options.show_done || !task.completed
    }

    /// Would this task be printed if reached now?
    fn is_shown(&self, key: TaskKey, state: &RenderState) -> bool {
        !state.visited.contains(&key) && self.passes_done_filter(self.graph.task(key))
    }

    /// Notes to show in place of `notes`. A note hidden by `hide_notes`
    /// hands its own visible descendants up to take its place.
    fn visible_notes<'n>(&self, notes: &'n [Note]) -> Vec<&'n Note> {
        if !self.options.hide_notes {
            return notes.iter().collect();
        }
        let mut out = Vec::new();
        for note in notes {
            if note.is_anchored() {
                out.push(note);
            } else {
                out.extend(self.visible_notes(&note.children));
            }
        }
        out
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    fn render_task(&self, key: TaskKey, prefix: &str, is_last: bool, is_child: bool, state: &mut RenderState) {
        if !self.is_shown(key, state) {
            return;
        }
        state.visited.insert(key);
        let task = self.graph.task(key);

        let mut branches: Vec<Branch<'a>> = self
            .visible_notes(&task.notes)
            .into_iter()
            .map(|note| Branch::Note(note, key))
            .collect();
        branches.extend(
            self.graph
                .children_of(key)
                .iter()
                .filter(|&&child| self.is_shown(child, state))
                .map(|&child| Branch::Task(child)),
        );

        let child_prefix = if is_child {
            let color = if task.completed { GRAY } else { CYAN };
            let connector = if is_last { LAST_BRANCH } else { BRANCH };
            state.lines.push(format!(
                "{} {}",
                self.painter.paint(&format!("{}{}", prefix, connector), fg(color)),
                self.format_task(task)
            ));
            format!("{}{}", prefix, if is_last { BLANK_INDENT } else { PIPE_INDENT })
        } else {
            state.lines.push(self.format_task(task));
            ROOT_CHILD_PREFIX.to_string()
        };

        self.render_branches(&branches, &child_prefix, state);
    }

    fn render_branches(&self, branches: &[Branch<'a>], prefix: &str, state: &mut RenderState) {
        for (i, &branch) in branches.iter().enumerate() {
            let is_last = self.nothing_after(branch, &branches[i + 1..], state);
            match branch {
                Branch::Note(note, owner) => self.render_note(note, owner, prefix, is_last, state),
                Branch::Task(key) => self.render_task(key, prefix, is_last, true, state),
            }
        }
    }

    /// True when none of `rest` will still be printed once `branch` has been.
    /// Later siblings can be printed inside `branch`'s own subtree.
    fn nothing_after(&self, branch: Branch<'a>, rest: &[Branch<'a>], state: &RenderState) -> bool {
        let mut later = Vec::new();
        for b in rest {
            match *b {
                Branch::Note(..) => return false,
                Branch::Task(key) if self.is_shown(key, state) => later.push(key),
                Branch::Task(_) => {}
            }
        }
        if later.is_empty() {
            return true;
        }
        let mut reached = HashSet::new();
        self.reach(branch, state, &mut reached);
        later.iter().all(|key| reached.contains(key))
    }

    /// Collect the tasks rendering `branch` would print, in the same walk
    /// `render_task` and `render_note` make.
    fn reach(&self, branch: Branch<'a>, state: &RenderState, reached: &mut HashSet<TaskKey>) {
        match branch {
            Branch::Task(key) => {
                if !self.is_shown(key, state) || !reached.insert(key) {
                    return;
                }
                for note in self.visible_notes(&self.graph.task(key).notes) {
                    self.reach(Branch::Note(note, key), state, reached);
                }
                for &child in self.graph.children_of(key) {
                    self.reach(Branch::Task(child), state, reached);
                }
            }
            Branch::Note(note, owner) => {
                for child in self.visible_notes(&note.children) {
                    self.reach(Branch::Note(child, owner), state, reached);
                }
                for &key in self.graph.note_referrers(owner, note) {
                    self.reach(Branch::Task(key), state, reached);
                }
                if let Some(target) = note.link.as_deref().and_then(|l| self.graph.find_by_id(l)) {
                    self.reach(Branch::Task(target), state, reached);
                }
            }
        }
    }

    /// `[12] Title ¦ A st ¦ area type @ctx [due]`
    fn format_task(&self, task: &Task) -> String {
        let p = &self.painter;
        let dim = self.options.show_done && task.completed;
        let tint = |color| if dim { GRAY } else { color };

        let mut parts = Vec::new();
        let position_color = if task.completed { GRAY } else { CYAN };
        parts.push(p.paint(&format!("[{}]", task.position), fg(position_color)));
        parts.push(p.paint(&task.title, fg(tint(WHITE))));
        parts.push(p.paint("¦", fg(tint(WHITE))));

        if let Some(priority) = task.priority {
            let color = if dim { Some(GRAY) } else { priority_color(priority) };
            parts.push(p.color(&priority.to_string(), color));
        }
        if let Some(status) = &task.status {
            let color = if dim { Some(GRAY) } else { status_color(status) };
            parts.push(p.color(&format!("{} ¦", status), color));
        }
        if let Some(area) = &task.area {
            parts.push(p.paint(area, fg(tint(GREEN))));
        }
        if let Some(kind) = &task.kind {
            parts.push(p.paint(kind, fg(tint(MAGENTA))));
        }
        if let Some(context) = &task.context {
            parts.push(p.paint(&format!("@{}", context), fg(tint(BLUE))));
        }
        if let Some(due) = &task.due {
            parts.push(p.paint(&format!("[{}]", due), fg(GRAY)));
        }

        parts.retain(|s| !s.is_empty());
        parts.join(" ")
    }

    // -----------------------------------------------------------------------
    // Notes
    // -----------------------------------------------------------------------

    fn render_note(&self, note: &'a Note, owner: TaskKey, prefix: &str, is_last: bool, state: &mut RenderState) {
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        state.lines.push(format!(
            "{} {}",
            self.painter.paint(&format!("{}{}", prefix, connector), fg(CYAN)),
            self.format_note(note)
        ));
        let child_prefix = format!("{}{}", prefix, if is_last { BLANK_INDENT } else { PIPE_INDENT });

        if self.options.show_context
            && let Some(content) = &note.content
        {
            for line in content.lines().filter(|l| !l.trim().is_empty()) {
                let segments = format_inline(line, fg(GRAY));
                state
                    .lines
                    .push(format!("{}{}", child_prefix, self.painter.segments(&segments)));
            }
        }

        let mut branches: Vec<Branch<'a>> = self
            .visible_notes(&note.children)
            .into_iter()
            .map(|child| Branch::Note(child, owner))
            .collect();

        let mut listed = HashSet::new();
        for &key in self.graph.note_referrers(owner, note) {
            if self.is_shown(key, state) && listed.insert(key) {
                branches.push(Branch::Task(key));
            }
        }
        if let Some(target) = note.link.as_deref().and_then(|l| self.graph.find_by_id(l))
            && self.is_shown(target, state)
            && listed.insert(target)
        {
            branches.push(Branch::Task(target));
        }

        self.render_branches(&branches, &child_prefix, state);
    }

    /// `[OBS] Title [date]`
    fn format_note(&self, note: &Note) -> String {
        let p = &self.painter;
        let kind = if note.kind.is_empty() { "note" } else { &note.kind };
        let badge = format!("[{}]", kind.to_uppercase());
        let mut out = format!(
            "{} {}",
            p.paint(&badge, fg(note_kind_color(kind))),
            p.paint(&note.title, fg(WHITE))
        );
        if let Some(date) = &note.date {
            out.push(' ');
            out.push_str(&p.paint(&format!("[{}]", date), fg(GRAY)));
        }
        out
    }
}
