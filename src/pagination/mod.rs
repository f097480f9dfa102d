//! Pagination module - incremental loading of the post feed

mod walker;

pub use walker::CursorWalker;
