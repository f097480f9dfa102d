//! Helper functions for displaying content

mod date;

pub use date::*;
