//! Directory scanning logic

mod pair;
mod scan;
mod walker;

pub use crate::types::is_skippable;
pub use pair::{scan_pair, PairProgressCallback, TreeSide};
pub use scan::{scan_tree, ProgressCallback};
pub use walker::{walk_directory, ScanOptions, TreeWalker};
