use std::path::PathBuf;

use clap::Parser;

use crate::model::config::ColorMode;
use crate::model::options::{DisplayOptions, Selection};

#[derive(Parser)]
#[command(name = "lt", about = concat!("linktree v", env!("CARGO_PKG_VERSION"), " - todo.txt tasks and notes as a tree"), version)]
pub struct Cli {
    /// Line number of a task; shows its branch
    pub position: Option<usize>,

    /// Show the whole tree containing POSITION
    #[arg(short = 'r', long, requires = "position")]
    pub root: bool,

    /// Hide notes without an id
    #[arg(short = 'H', long)]
    pub hide_notes: bool,

    /// Show completed tasks
    #[arg(short = 'd', long)]
    pub show_done: bool,

    /// Only tasks that are linked to something
    #[arg(short = 'l', long)]
    pub link_lock: bool,

    /// Show the text under note headings
    #[arg(short = 'x', long)]
    pub show_context: bool,

    /// Filter by area
    #[arg(short = 'a', long)]
    pub area: Option<String>,

    /// Filter by status
    #[arg(short = 's', long)]
    pub status: Option<String>,

    /// Filter by context
    #[arg(short = 'c', long)]
    pub context: Option<String>,

    /// Filter by tag (repeatable, all must match)
    #[arg(short = 't', long = "tag")]
    pub tags: Vec<String>,

    /// Directory holding todo.txt and done.txt [default: ~/Documents/todo]
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Directory holding <id>.md note documents [default: <base-dir>/notes]
    #[arg(long)]
    pub notes_dir: Option<PathBuf>,

    /// Config file [default: <base-dir>/linktree.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// When to use color
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Print parsed tasks and notes as JSON
    #[arg(long, conflicts_with = "interactive")]
    pub json: bool,

    /// Start an interactive prompt
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// More log output (repeat for more)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn selection(&self) -> Selection {
        match (self.position, self.root) {
            (Some(pos), true) => Selection::Root(pos),
            (Some(pos), false) => Selection::Branch(pos),
            (None, _) => Selection::All,
        }
    }

    /// Layer flags over the configured defaults. Flags only switch things on.
    pub fn apply_to(&self, mut options: DisplayOptions) -> DisplayOptions {
        options.hide_notes |= self.hide_notes;
        options.show_done |= self.show_done;
        options.link_lock |= self.link_lock;
        options.show_context |= self.show_context;
        if self.area.is_some() {
            options.area = self.area.clone();
        }
        if self.status.is_some() {
            options.status = self.status.clone();
        }
        if self.context.is_some() {
            options.context = self.context.clone();
        }
        if !self.tags.is_empty() {
            options.tags = self.tags.clone();
        }
        options
    }
}
