use std::sync::LazyLock;

use regex::Regex;

use crate::model::note::Note;
use crate::parse::task_parser::is_date_like;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#+)\s+(\S.*)$").expect("heading pattern"));
static TYPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"type:(\w+)").expect("type pattern"));

/// Parse a note document into its forest of typed headings.
///
/// Headings carrying `type:` become [`Note`]s nested by level. Untyped
/// headings are dropped together with the text under them, but they still
/// close any open heading of the same or deeper level.
pub fn parse_notes(text: &str) -> Vec<Note> {
    let mut roots: Vec<Note> = Vec::new();
    // Open headings, innermost last. A heading is attached to its parent
    // (or to `roots`) when it is closed.
    let mut stack: Vec<Note> = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    let mut collecting = false;

    for line in text.lines() {
        let Some((level, heading)) = parse_heading(line) else {
            if collecting && !line.trim().is_empty() {
                buffer.push(line);
            }
            continue;
        };

        if collecting {
            flush(stack.last_mut(), &buffer);
        }
        buffer.clear();

        close_from(level, &mut stack, &mut roots);

        match heading {
            Some(note) => {
                stack.push(note);
                collecting = true;
            }
            None => collecting = false,
        }
    }

    if collecting {
        flush(stack.last_mut(), &buffer);
    }
    close_from(0, &mut stack, &mut roots);

    roots
}

/// Recognize a heading line. Returns its level and, for typed headings, the
/// note it introduces.
fn parse_heading(line: &str) -> Option<(usize, Option<Note>)> {
    let caps = HEADING.captures(line)?;
    let level = caps[1].len();
    Some((level, parse_typed_heading(caps[2].trim(), level)))
}

/// Extract `type:`, `date:`, `id:` and `link:` from heading text. Returns
/// `None` when the text has no `type:` at all. A `type:` without a word
/// after it still makes a note, with an empty kind.
fn parse_typed_heading(text: &str, level: usize) -> Option<Note> {
    if !text.contains("type:") {
        return None;
    }
    let mut note = Note {
        level,
        kind: TYPE
            .captures(text)
            .map(|caps| caps[1].to_string())
            .unwrap_or_default(),
        ..Note::default()
    };
    let mut title_words = Vec::new();

    for word in text.split_whitespace() {
        let consumed = match word.split_once(':') {
            Some(("type", _)) => true,
            Some(("date", value)) if is_date_like(value) => {
                note.date.get_or_insert_with(|| value.to_string());
                true
            }
            Some(("id", value)) if !value.is_empty() => {
                note.id.get_or_insert_with(|| value.to_string());
                true
            }
            Some(("link", value)) if !value.is_empty() => {
                note.link.get_or_insert_with(|| value.to_string());
                true
            }
            _ => false,
        };
        if !consumed {
            title_words.push(word);
        }
    }

    note.title = title_words.join(" ");
    Some(note)
}

/// Move buffered content into the innermost open heading.
fn flush(top: Option<&mut Note>, buffer: &[&str]) {
    let Some(note) = top else {
        return;
    };
    let content = buffer.join("\n").trim().to_string();
    if !content.is_empty() {
        note.content = Some(content);
    }
}

/// Close every open heading whose level is `level` or deeper.
fn close_from(level: usize, stack: &mut Vec<Note>, roots: &mut Vec<Note>) {
    while let Some(note) = stack.pop() {
        if note.level < level {
            stack.push(note);
            break;
        }
        match stack.last_mut() {
            Some(parent) => parent.children.push(note),
            None => roots.push(note),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_heading_attributes() {
        let notes = parse_notes("# Cache misses type:obs date:2025-03-02 id:900 link:111\n");
        assert_eq!(notes.len(), 1);
        let n = &notes[0];
        assert_eq!(n.title, "Cache misses");
        assert_eq!(n.kind, "obs");
        assert_eq!(n.date.as_deref(), Some("2025-03-02"));
        assert_eq!(n.id.as_deref(), Some("900"));
        assert_eq!(n.link.as_deref(), Some("111"));
        assert_eq!(n.level, 1);
        assert_eq!(n.content, None);
    }

    #[test]
    fn test_nesting_by_level() {
        let doc = "\
# A type:obs
## A1 type:hyp
### A1a type:do
## A2 type:hyp
# B type:res
";
        let notes = parse_notes(doc);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "A");
        assert_eq!(notes[0].children.len(), 2);
        assert_eq!(notes[0].children[0].title, "A1");
        assert_eq!(notes[0].children[0].children[0].title, "A1a");
        assert_eq!(notes[0].children[1].title, "A2");
        assert!(notes[0].children[1].children.is_empty());
        assert_eq!(notes[1].title, "B");
    }

    #[test]
    fn test_skipped_levels_still_nest() {
        let notes = parse_notes("# Top type:obs\n### Deep type:hyp\n## Mid type:do\n");
        assert_eq!(notes.len(), 1);
        let titles: Vec<_> = notes[0].children.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Deep", "Mid"]);
    }

    #[test]
    fn test_nested_document_with_content() {
        let notes = parse_notes("# Obs type:obs id:999\ntext\n## Hyp type:hyp id:998\nmore");
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id.as_deref(), Some("999"));
        assert_eq!(notes[0].content.as_deref(), Some("text"));
        let child = &notes[0].children[0];
        assert_eq!(child.id.as_deref(), Some("998"));
        assert_eq!(child.level, 2);
        assert_eq!(child.content.as_deref(), Some("more"));
    }

    #[test]
    fn test_only_untyped_headings_yield_empty_forest() {
        let doc = "# Intro\nsome prose\n## Details\n- bullet\n### Deeper\ntext\n";
        assert!(parse_notes(doc).is_empty());
        assert!(parse_notes("").is_empty());
    }

    #[test]
    fn test_preamble_is_discarded() {
        let notes = parse_notes("loose text\nmore loose\n# Obs type:obs\nkept\n");
        assert_eq!(notes[0].content.as_deref(), Some("kept"));
    }

    #[test]
    fn test_untyped_heading_stops_collection() {
        let doc = "\
# Obs type:obs
kept line
## Scratch
dropped line
## Hyp type:hyp
second kept
";
        let notes = parse_notes(doc);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content.as_deref(), Some("kept line"));
        assert_eq!(notes[0].children.len(), 1);
        assert_eq!(notes[0].children[0].content.as_deref(), Some("second kept"));
    }

    #[test]
    fn test_untyped_heading_pops_stack() {
        // The untyped level-1 heading closes "A", so "B" becomes a root.
        let notes = parse_notes("# A type:obs\n# Untyped\n## B type:hyp\n");
        assert_eq!(notes.len(), 2);
        assert!(notes[0].children.is_empty());
        assert_eq!(notes[1].title, "B");
    }

    #[test]
    fn test_heading_without_content_has_no_content() {
        let notes = parse_notes("# A type:obs\n\n\n## B type:hyp\nbody\n");
        assert_eq!(notes[0].content, None);
        assert_eq!(notes[0].children[0].content.as_deref(), Some("body"));
    }

    #[test]
    fn test_content_keeps_lines_and_skips_blanks() {
        let notes = parse_notes("# A type:obs\nfirst\n\n  indented\nlast\n");
        assert_eq!(notes[0].content.as_deref(), Some("first\n  indented\nlast"));
    }

    #[test]
    fn test_type_without_value_is_still_a_note() {
        let notes = parse_notes("# Broken type:\nbody\n");
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Broken");
        assert_eq!(notes[0].kind, "");
        assert_eq!(notes[0].content.as_deref(), Some("body"));
    }

    #[test]
    fn test_type_value_stops_at_punctuation() {
        let doc = "\
# Obs type:obs
kept
## Trailing type:hyp, id:h2
also kept
";
        let notes = parse_notes(doc);
        assert_eq!(notes[0].content.as_deref(), Some("kept"));
        let child = &notes[0].children[0];
        assert_eq!(child.kind, "hyp");
        assert_eq!(child.title, "Trailing");
        assert_eq!(child.id.as_deref(), Some("h2"));
        assert_eq!(child.content.as_deref(), Some("also kept"));
    }

    #[test]
    fn test_hash_without_space_is_not_heading() {
        let notes = parse_notes("# A type:obs\n#hashtag line\n");
        assert_eq!(notes[0].content.as_deref(), Some("#hashtag line"));
    }
}
