mod core;
mod document;
mod error;
mod ops;
pub mod path;
mod serde_value;

pub use crate::core::*;
pub use crate::document::*;
pub use crate::error::*;
pub use crate::ops::*;
pub use crate::path::Path;
pub use crate::serde_value::*;
