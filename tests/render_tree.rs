//! Render scenarios driven through the library API: task files on disk,
//! note documents, graph building and tree output.

use std::fs;
use std::path::Path;

use linktree::io::loader::load_tasks;
use linktree::model::{DisplayOptions, Selection, Task};
use linktree::ops::graph::LinkGraph;
use linktree::parse::{parse_notes, parse_task_line};
use linktree::render::{Painter, RenderOutcome, Rendered, render};
use pretty_assertions::assert_eq;

fn write_project(root: &Path) {
    let notes = root.join("notes");
    fs::create_dir_all(&notes).unwrap();
    fs::write(
        root.join("todo.txt"),
        "\
(A) Research caching id:100 area:work st:run +perf
Try an LRU id:101 link:h1 area:work +perf
Benchmark it id:102 link:100 @desk due:2025-03-01
# comment line

Water plants id:200 area:home
",
    )
    .unwrap();
    fs::write(root.join("done.txt"), "x Old spike id:103 link:100\n").unwrap();
    fs::write(
        notes.join("100.md"),
        "\
# Cache misses type:obs date:2025-02-01
Misses spike on **cold** start.
## Eviction type:hyp id:h1
Try `lru` first.
# Scratch type:idea
",
    )
    .unwrap();
}

fn render_plain(tasks: &[Task], options: &DisplayOptions, selection: Selection) -> Rendered {
    let graph = LinkGraph::build(tasks);
    render(&graph, options, selection, Painter::plain())
}

#[test]
fn test_direct_link_places_child_under_parent() {
    let tasks = vec![
        parse_task_line("(B) Fix bug id:111 link:222", 1),
        parse_task_line("Investigate id:222", 2),
    ];
    let graph = LinkGraph::build(&tasks);
    assert_eq!(graph.find_root(0), 1);

    let out = render(&graph, &DisplayOptions::default(), Selection::All, Painter::plain());
    assert_eq!(out.lines, vec!["[2] Investigate ¦", " └─ [1] Fix bug ¦ B"]);

    let out = render(&graph, &DisplayOptions::default(), Selection::Root(1), Painter::plain());
    assert_eq!(out.lines, vec!["[2] Investigate ¦", " └─ [1] Fix bug ¦ B"]);

    let out = render(&graph, &DisplayOptions::default(), Selection::Branch(1), Painter::plain());
    assert_eq!(out.lines, vec!["[1] Fix bug ¦ B"]);
}

#[test]
fn test_task_referencing_a_note_hangs_under_it() {
    let mut tasks = vec![
        parse_task_line("Research id:111", 1),
        parse_task_line("Review link:999", 2),
    ];
    tasks[0].notes = parse_notes("# Obs type:obs id:999\ntext\n## Hyp type:hyp id:998\nmore");

    let out = render_plain(&tasks, &DisplayOptions::default(), Selection::All);
    assert_eq!(
        out.lines,
        vec![
            "[1] Research ¦",
            " └─ [OBS] Obs",
            "    ├─ [HYP] Hyp",
            "    └─ [2] Review ¦",
        ]
    );
    assert_eq!(tasks[0].notes[0].children[0].content.as_deref(), Some("more"));
}

#[test]
fn test_project_on_disk() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_project(tmp.path());
    let tasks = load_tasks(tmp.path(), &tmp.path().join("notes")).unwrap();
    assert_eq!(tasks.len(), 5);

    let out = render_plain(&tasks, &DisplayOptions::default(), Selection::All);
    assert_eq!(
        out.lines,
        vec![
            "[1] Research caching ¦ A run ¦ work",
            " ├─ [OBS] Cache misses [2025-02-01]",
            " │  └─ [HYP] Eviction",
            " │     └─ [2] Try an LRU ¦ work",
            " ├─ [IDEA] Scratch",
            " └─ [3] Benchmark it ¦ @desk [2025-03-01]",
            "",
            "[6] Water plants ¦ home",
        ]
    );
    assert_eq!(out.outcome, RenderOutcome::Rendered);
}

#[test]
fn test_project_with_done_and_context() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_project(tmp.path());
    let tasks = load_tasks(tmp.path(), &tmp.path().join("notes")).unwrap();

    let options = DisplayOptions {
        show_done: true,
        show_context: true,
        hide_notes: true,
        ..DisplayOptions::default()
    };
    let out = render_plain(&tasks, &options, Selection::Branch(1));
    assert_eq!(
        out.lines,
        vec![
            "[1] Research caching ¦ A run ¦ work",
            " ├─ [HYP] Eviction",
            " │  Try lru first.",
            " │  └─ [2] Try an LRU ¦ work",
            " ├─ [3] Benchmark it ¦ @desk [2025-03-01]",
            " └─ [7] Old spike ¦",
        ]
    );
}

#[test]
fn test_filters_and_link_lock() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_project(tmp.path());
    let tasks = load_tasks(tmp.path(), &tmp.path().join("notes")).unwrap();

    let options = DisplayOptions {
        area: Some("home".into()),
        ..DisplayOptions::default()
    };
    let out = render_plain(&tasks, &options, Selection::All);
    assert_eq!(out.lines, vec!["[6] Water plants ¦ home"]);

    let options = DisplayOptions {
        link_lock: true,
        hide_notes: true,
        ..DisplayOptions::default()
    };
    let out = render_plain(&tasks, &options, Selection::All);
    assert_eq!(out.lines[0], "[1] Research caching ¦ A run ¦ work");
    assert!(!out.lines.iter().any(|l| l.contains("Water plants")));

    let options = DisplayOptions {
        tags: vec!["perf".into(), "missing".into()],
        ..DisplayOptions::default()
    };
    let out = render_plain(&tasks, &options, Selection::All);
    assert_eq!(out.outcome, RenderOutcome::NoMatches);
}

#[test]
fn test_positions_outside_the_lists() {
    let tmp = tempfile::TempDir::new().unwrap();
    write_project(tmp.path());
    let tasks = load_tasks(tmp.path(), &tmp.path().join("notes")).unwrap();

    // line 4 is a comment, line 7 is the completed task in done.txt
    let out = render_plain(&tasks, &DisplayOptions::default(), Selection::Branch(4));
    assert_eq!(out.outcome, RenderOutcome::PositionNotFound(4));
    let out = render_plain(&tasks, &DisplayOptions::default(), Selection::Branch(7));
    assert_eq!(out.outcome, RenderOutcome::PositionHidden(7));
}
