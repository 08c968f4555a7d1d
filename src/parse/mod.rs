pub mod note_parser;
pub mod task_parser;

pub use note_parser::parse_notes;
pub use task_parser::parse_task_line;
