mod repl;
pub use repl::{ReplCommand, parse_command};

use std::path::{Path, PathBuf};

use crossterm::tty::IsTty;
use log::{debug, info};

use crate::cli::commands::Cli;
use crate::cli::output::task_list_to_json;
use crate::io::{config_io, loader};
use crate::model::config::ColorMode;
use crate::ops::graph::LinkGraph;
use crate::render::{Painter, Rendered, render};

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let base_dir = resolve_base_dir(cli.base_dir.as_deref())?;
    let config = config_io::load_config(&base_dir, cli.config.as_deref())?;
    let notes_dir = cli
        .notes_dir
        .clone()
        .unwrap_or_else(|| config_io::notes_dir(&base_dir, &config));
    debug!(
        "base dir {}, notes dir {}",
        base_dir.display(),
        notes_dir.display()
    );

    let tasks = loader::load_tasks(&base_dir, &notes_dir)?;
    let graph = LinkGraph::build(&tasks);
    info!("{} tasks loaded", tasks.len());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&task_list_to_json(&graph))?);
        return Ok(());
    }

    let painter = Painter::new(color_enabled(cli.color.unwrap_or(config.display.color)));
    let defaults = config.display.to_options();

    if cli.interactive {
        return repl::run(&graph, &defaults, painter);
    }

    if tasks.is_empty() {
        eprintln!("No tasks found");
        return Ok(());
    }

    let options = cli.apply_to(defaults);
    print_rendered(&render(&graph, &options, cli.selection(), painter));
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `--base-dir`, or `~/Documents/todo`
fn resolve_base_dir(explicit: Option<&Path>) -> Result<PathBuf, String> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    let home = std::env::var_os("HOME")
        .ok_or_else(|| "cannot find home directory; use --base-dir".to_string())?;
    Ok(PathBuf::from(home).join("Documents").join("todo"))
}

fn color_enabled(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_tty(),
    }
}

/// Tree lines go to stdout, outcome notices to stderr
pub(crate) fn print_rendered(rendered: &Rendered) {
    for line in &rendered.lines {
        println!("{}", line);
    }
    if let Some(message) = rendered.outcome.message() {
        eprintln!("{}", message);
    }
}
