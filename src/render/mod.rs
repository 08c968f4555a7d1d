pub mod inline;
pub mod style;
pub mod tree;

pub use inline::format_inline;
pub use style::{Painter, Segment};
pub use tree::{RenderOutcome, Rendered, render};
