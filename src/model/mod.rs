pub mod config;
pub mod note;
pub mod options;
pub mod task;

pub use config::*;
pub use note::*;
pub use options::*;
pub use task::*;
