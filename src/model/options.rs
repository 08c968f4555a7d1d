/// Switches and filters that shape a single render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Hide notes without an id (unless something depends on them)
    pub hide_notes: bool,
    /// Include completed tasks
    pub show_done: bool,
    /// Only tasks that take part in at least one relation
    pub link_lock: bool,
    /// Print the text captured under each note heading
    pub show_context: bool,
    pub area: Option<String>,
    pub status: Option<String>,
    pub context: Option<String>,
    /// Every listed tag must be present
    pub tags: Vec<String>,
}

impl DisplayOptions {
    /// True when any equality filter narrows root selection
    pub fn has_filters(&self) -> bool {
        self.area.is_some() || self.status.is_some() || self.context.is_some() || !self.tags.is_empty()
    }
}

/// Which part of the graph to render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    /// Every root (or every filtered root)
    #[default]
    All,
    /// The task at this position and its subtree only
    Branch(usize),
    /// The ultimate ancestor of the task at this position, and its subtree
    Root(usize),
}
