//! Block shortcuts: typing a short marker such as `-` or `>` at the start of
//! a paragraph and pressing space turns the paragraph into another block type.

mod config;
mod keypress;
mod recognizer;
mod rules;
mod transform;

pub use crate::config::*;
pub use crate::keypress::*;
pub use crate::recognizer::*;
pub use crate::rules::*;
pub use crate::transform::*;
