//! Format selection: classify, deduplicate, rank and pair streams

pub mod catalog;
pub mod choice;
pub mod classifier;
pub mod dedup;
pub mod pairer;
pub mod ranker;

pub use catalog::{FormatCatalog, SelectionPolicy};
pub use choice::{parse_selection, FormatChoice};
pub use pairer::{is_compatible, AudioMatcher, GreedyMatcher};
