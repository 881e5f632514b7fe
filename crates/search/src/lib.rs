mod classifier;
mod text;

pub use classifier::{ContentClassifier, TagCount};
pub use text::{search, TextQuery};
