//! Content source - where posts come from
//!
//! The [`ContentSource`] trait is the only seam between the blog and its
//! headless CMS. [`PrismicClient`] implements it over the Prismic REST API;
//! tests substitute in-memory sources.

mod predicate;
mod prismic;

pub use predicate::Predicate;
pub use prismic::PrismicClient;

use async_trait::async_trait;

use crate::content::{PageResult, PostContent};
use crate::error::Result;

/// Read-only access to a paginated post repository
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the first page of documents matching `predicate`
    async fn query(&self, predicate: &Predicate, page_size: usize) -> Result<PageResult>;

    /// Fetch the page a previous result's `next_cursor` points at
    async fn fetch_by_cursor(&self, cursor: &str) -> Result<PageResult>;

    /// Fetch a single document by UID, failing with `NotFound` if absent
    async fn get_by_uid(&self, document_type: &str, uid: &str) -> Result<PostContent>;
}
