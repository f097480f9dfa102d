//! Cursor-driven "load more" pagination

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::content::{PageResult, PostSummary};
use crate::error::{BlogError, Result};
use crate::source::{ContentSource, Predicate};

#[derive(Debug, Default)]
struct WalkerState {
    items: Vec<PostSummary>,
    cursor: Option<String>,
}

/// Walks a post feed page by page, growing the visible list.
///
/// Items are only ever appended, in cursor-chain order. At most one
/// [`load_more`](CursorWalker::load_more) runs at a time; overlapping calls
/// are rejected with [`BlogError::Busy`]. The state lock is never held across
/// the network wait.
pub struct CursorWalker<S> {
    source: S,
    state: Mutex<WalkerState>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when a load finishes or its future is dropped
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: ContentSource> CursorWalker<S> {
    /// Seed a walker with an already fetched first page
    pub fn new(source: S, initial: PageResult) -> Self {
        Self {
            source,
            state: Mutex::new(WalkerState {
                items: initial.items,
                cursor: initial.next_cursor,
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Fetch the first page from `source` and seed a walker with it
    pub async fn start(source: S, predicate: &Predicate, page_size: usize) -> Result<Self> {
        let initial = source.query(predicate, page_size).await?;
        tracing::info!(
            "Loaded first page: {} posts, more: {}",
            initial.items.len(),
            initial.next_cursor.is_some()
        );
        Ok(Self::new(source, initial))
    }

    fn state(&self) -> MutexGuard<'_, WalkerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the posts shown so far
    pub fn visible_items(&self) -> Vec<PostSummary> {
        self.state().items.clone()
    }

    /// Number of posts shown so far
    pub fn len(&self) -> usize {
        self.state().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().items.is_empty()
    }

    /// Locator of the next page, if any
    pub fn cursor(&self) -> Option<String> {
        self.state().cursor.clone()
    }

    /// Whether a "load more" trigger should be offered
    pub fn has_more(&self) -> bool {
        self.state().cursor.is_some()
    }

    /// Whether a `load_more` call is pending
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Fetch the next page and append its posts.
    ///
    /// Returns the number of posts appended. Fails with `Busy` if another
    /// call is pending and with `Exhausted` if there is no next page; both
    /// leave the walker untouched. On a fetch error nothing changes either,
    /// so the caller can retry by calling again.
    pub async fn load_more(&self) -> Result<usize> {
        let _guard = InFlight::acquire(&self.in_flight).ok_or(BlogError::Busy)?;

        let cursor = self.state().cursor.clone().ok_or(BlogError::Exhausted)?;
        let page = self.source.fetch_by_cursor(&cursor).await?;

        let appended = page.items.len();
        let mut state = self.state();
        state.items.extend(page.items);
        state.cursor = page.next_cursor;
        tracing::info!(
            "Loaded {} more posts ({} shown, more: {})",
            appended,
            state.items.len(),
            state.cursor.is_some()
        );

        Ok(appended)
    }

    /// Keep loading until the feed is exhausted or `max_pages` pages were added
    pub async fn load_pages(&self, max_pages: Option<usize>) -> Result<usize> {
        let mut loaded = 0;
        while self.has_more() && max_pages.map_or(true, |max| loaded < max) {
            self.load_more().await?;
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Consume the walker, returning the posts shown so far
    pub fn into_items(self) -> Vec<PostSummary> {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .items
    }
}
