use serde::Serialize;

use crate::model::task::Task;
use crate::ops::graph::LinkGraph;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson<'a> {
    #[serde(flatten)]
    pub task: &'a Task,
    /// Id of the task this one hangs under, directly or through a note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<&'a str>,
    /// Positions of the tasks linking directly to this one
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<usize>,
}

#[derive(Serialize)]
pub struct TaskListJson<'a> {
    pub tasks: Vec<TaskJson<'a>>,
    /// Positions of tasks that have no parent
    pub roots: Vec<usize>,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

pub fn task_list_to_json<'a>(graph: &LinkGraph<'a>) -> TaskListJson<'a> {
    let tasks = graph
        .tasks()
        .iter()
        .enumerate()
        .map(|(key, task)| TaskJson {
            task,
            parent: graph.parent_of(key).and_then(|p| graph.task(p).id.as_deref()),
            children: graph
                .children_of(key)
                .iter()
                .map(|&child| graph.task(child).position)
                .collect(),
        })
        .collect();
    let roots = graph.roots().map(|key| graph.task(key).position).collect();
    TaskListJson { tasks, roots }
}
