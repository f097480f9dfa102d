//! Content module - post models and reading time

mod post;
pub mod reading;

pub(crate) use post::nullable_timestamp;
pub use post::{parse_timestamp, ContentSection, PageResult, Paragraph, PostContent, PostSummary};
