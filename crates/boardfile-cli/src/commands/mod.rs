pub mod common;
pub mod completions;
pub mod preview;
pub mod submit;
