use serde::Serialize;

/// A typed heading from a task's note document.
///
/// Only headings carrying a `type:` attribute become notes. Untyped headings
/// still shape the outline while parsing but leave no trace here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Heading text with `type:`, `date:`, `id:` and `link:` stripped
    pub title: String,
    /// `type:` value, e.g. `obs`, `hyp`; empty when `type:` has no word after it
    pub kind: String,
    /// `date:` value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// `id:` value; lives in its own namespace next to task ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `link:` value pointing at a task id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Number of `#` markers (1 = top)
    pub level: usize,
    /// Non-blank lines between this heading and the next heading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Typed headings nested under this one
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Note>,
}

impl Note {
    /// A note is anchored when other records can point at it or it points
    /// somewhere itself.
    pub fn is_anchored(&self) -> bool {
        self.id.is_some() || self.link.is_some()
    }
}
