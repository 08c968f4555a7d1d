use crate::model::task::Task;

/// Parse one todo.txt line into a task. `position` is the 1-based line number.
///
/// Extraction is best-effort: anything not recognized stays in the title, and
/// no input makes this fail.
pub fn parse_task_line(line: &str, position: usize) -> Task {
    let mut task = Task {
        position,
        raw: line.to_string(),
        ..Task::default()
    };

    let mut rest = line.trim();
    if let Some(after) = rest.strip_prefix("x ") {
        task.completed = true;
        rest = after.trim_start();
    }
    if let Some((priority, after)) = parse_priority(rest) {
        task.priority = Some(priority);
        rest = after.trim_start();
    }

    let mut title_words = Vec::new();
    for word in rest.split_whitespace() {
        if !apply_token(&mut task, word) {
            title_words.push(word);
        }
    }
    task.title = title_words.join(" ");
    task
}

/// `(A) ` at the start of the text
fn parse_priority(s: &str) -> Option<(char, &str)> {
    let inner = s.strip_prefix('(')?;
    let mut chars = inner.chars();
    let letter = chars.next()?;
    let after = chars.as_str().strip_prefix(')')?;
    if !letter.is_ascii_uppercase() || !(after.is_empty() || after.starts_with(char::is_whitespace)) {
        return None;
    }
    Some((letter, after))
}

/// Record a recognized token on the task. Returns false for plain title words.
///
/// The first occurrence of a single-valued key wins; repeats are still
/// consumed so they never leak into the title.
fn apply_token(task: &mut Task, word: &str) -> bool {
    if let Some(tag) = word.strip_prefix('+') {
        if tag.is_empty() {
            return false;
        }
        task.tags.push(tag.to_string());
        return true;
    }
    if let Some(ctx) = word.strip_prefix('@') {
        return set_once(&mut task.context, ctx);
    }

    let Some((key, value)) = word.split_once(':') else {
        return false;
    };
    match key {
        "id" => set_once(&mut task.id, value),
        "link" => set_once(&mut task.link, value),
        "area" => set_once(&mut task.area, value),
        "st" => set_once(&mut task.status, value),
        "type" => set_once(&mut task.kind, value),
        "due" if is_date_like(value) => set_once(&mut task.due, value),
        _ => false,
    }
}

fn set_once(slot: &mut Option<String>, value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    if slot.is_none() {
        *slot = Some(value.to_string());
    }
    true
}

/// Digits and dashes only, e.g. `2025-05-14`
pub(crate) fn is_date_like(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit() || c == '-')
}
