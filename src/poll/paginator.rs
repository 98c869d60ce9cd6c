//! Offset/limit accumulation over a sorted remote list.
//!
//! Leaderboards are fetched a page at a time and appended in order. The only
//! end-of-data signal is a short page: a page of exactly `limit` items keeps
//! `has_more` set, even when it happens to be the last one, so the final
//! "load more" may come back empty. Items are not de-duplicated across
//! pages; a live leaderboard can reorder between requests and the
//! accumulated list reflects whatever each page returned.
//!
//! Each filter change starts a new epoch. A page that resolves for an older
//! epoch is dropped, so results from the previous filter never appear under
//! the new one.

use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{DashError, ErrorInfo, Result};

/// Window requested from the page fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

/// Snapshot of a paginator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageState<T> {
    pub items: Vec<T>,
    /// Offset the next page will be requested at (`items.len()`).
    pub offset: usize,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<ErrorInfo>,
}

struct Cursor<K, T> {
    filter: K,
    epoch: u64,
    items: Vec<T>,
    has_more: bool,
    loading: bool,
    error: Option<ErrorInfo>,
}

fn lock<K, T>(cursor: &Mutex<Cursor<K, T>>) -> MutexGuard<'_, Cursor<K, T>> {
    cursor.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Clears `loading` if a fetch is dropped before it resolves, unless a
/// reset has already moved the cursor to a newer epoch.
struct PendingPage<'a, K, T> {
    cursor: &'a Mutex<Cursor<K, T>>,
    epoch: u64,
    resolved: bool,
}

impl<K, T> Drop for PendingPage<'_, K, T> {
    fn drop(&mut self) {
        if self.resolved {
            return;
        }
        let mut c = lock(self.cursor);
        if c.epoch == self.epoch {
            debug!(epoch = self.epoch, "page fetch cancelled");
            c.loading = false;
        }
    }
}

/// Accumulates pages from `fetch(filter, PageRequest)`.
///
/// Methods take `&self`, so `load_more` and `reset` can race from the same
/// task (e.g. via `tokio::join!`) without extra wrapping.
pub struct Paginator<K, T, F> {
    limit: usize,
    fetch: F,
    cursor: Mutex<Cursor<K, T>>,
}

impl<K, T, F, Fut> Paginator<K, T, F>
where
    K: Clone,
    T: Clone,
    F: Fn(K, PageRequest) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    /// Nothing is fetched until the first [`load_more`](Self::load_more).
    pub fn new(filter: K, limit: usize, fetch: F) -> Result<Self> {
        if limit == 0 {
            return Err(DashError::validation("page limit must be greater than zero"));
        }
        Ok(Self {
            limit,
            fetch,
            cursor: Mutex::new(Cursor {
                filter,
                epoch: 0,
                items: Vec::new(),
                has_more: true,
                loading: false,
                error: None,
            }),
        })
    }

    fn cursor(&self) -> MutexGuard<'_, Cursor<K, T>> {
        lock(&self.cursor)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn filter(&self) -> K {
        self.cursor().filter.clone()
    }

    pub fn snapshot(&self) -> PageState<T> {
        let c = self.cursor();
        PageState {
            items: c.items.clone(),
            offset: c.items.len(),
            has_more: c.has_more,
            loading: c.loading,
            error: c.error.clone(),
        }
    }

    /// Fetch the next page. No-op while a page is in flight or after a
    /// short page.
    pub async fn load_more(&self) {
        let (filter, epoch, offset) = {
            let mut c = self.cursor();
            if c.loading || !c.has_more {
                return;
            }
            c.loading = true;
            (c.filter.clone(), c.epoch, c.items.len())
        };
        self.run(filter, epoch, offset).await;
    }

    /// Switch to `filter`, drop everything accumulated so far and fetch the
    /// first page. Any page still in flight for the old filter is discarded.
    pub async fn reset(&self, filter: K) {
        let epoch = {
            let mut c = self.cursor();
            c.epoch += 1;
            c.filter = filter.clone();
            c.items.clear();
            c.has_more = true;
            c.error = None;
            c.loading = true;
            c.epoch
        };
        debug!(epoch, "paginator reset");
        self.run(filter, epoch, 0).await;
    }

    async fn run(&self, filter: K, epoch: u64, offset: usize) {
        let page = PageRequest {
            offset,
            limit: self.limit,
        };
        let mut pending = PendingPage {
            cursor: &self.cursor,
            epoch,
            resolved: false,
        };
        let outcome = (self.fetch)(filter, page).await;
        pending.resolved = true;

        let mut c = self.cursor();
        if c.epoch != epoch {
            debug!(epoch, current = c.epoch, "discarding stale page");
            return;
        }
        c.loading = false;
        match outcome {
            Ok(items) => {
                c.has_more = items.len() >= self.limit;
                c.items.extend(items);
                c.error = None;
            }
            Err(e) => {
                warn!(offset, error = %e, "page fetch failed");
                c.error = Some(ErrorInfo::from(&e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::sleep;

    /// A remote list of `total` numbered rows per filter.
    fn rows(filter: &str, page: PageRequest, total: usize) -> Vec<String> {
        (page.offset..total.min(page.offset + page.limit))
            .map(|i| format!("{}-{}", filter, i))
            .collect()
    }

    #[tokio::test]
    async fn test_zero_limit_is_rejected() {
        let result = Paginator::new((), 0, |_, _| async { Ok(Vec::<u8>::new()) });
        assert_eq!(result.err().unwrap().kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_accumulates_until_short_page() {
        let p = Paginator::new("hr", 2, |f: &'static str, page| async move {
            Ok(rows(f, page, 5))
        })
        .unwrap();

        let s = p.snapshot();
        assert!(s.items.is_empty());
        assert!(s.has_more);

        p.load_more().await;
        p.load_more().await;
        let s = p.snapshot();
        assert_eq!(s.items, vec!["hr-0", "hr-1", "hr-2", "hr-3"]);
        assert_eq!(s.offset, 4);
        assert!(s.has_more);

        p.load_more().await;
        let s = p.snapshot();
        assert_eq!(s.items.len(), 5);
        assert!(!s.has_more);
        assert!(!s.loading);

        // no further requests once exhausted
        p.load_more().await;
        assert_eq!(p.snapshot().items.len(), 5);
    }

    #[tokio::test]
    async fn test_full_last_page_needs_one_empty_load() {
        let calls = AtomicUsize::new(0);
        let p = Paginator::new("k", 2, |f: &'static str, page| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(rows(f, page, 4)) }
        })
        .unwrap();

        p.load_more().await;
        p.load_more().await;
        assert!(p.snapshot().has_more);

        p.load_more().await;
        let s = p.snapshot();
        assert_eq!(s.items.len(), 4);
        assert!(!s.has_more);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_load_more_issues_one_request() {
        let calls = AtomicUsize::new(0);
        let p = Paginator::new("k", 3, |f: &'static str, page| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                sleep(Duration::from_millis(100)).await;
                Ok(rows(f, page, 10))
            }
        })
        .unwrap();

        tokio::join!(p.load_more(), p.load_more());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(p.snapshot().items.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_discards_stale_page() {
        let p = Paginator::new("old", 2, |f: &'static str, page| async move {
            let delay = if f == "old" { 200 } else { 500 };
            sleep(Duration::from_millis(delay)).await;
            Ok(rows(f, page, 10))
        })
        .unwrap();

        tokio::join!(
            p.load_more(),
            async {
                sleep(Duration::from_millis(50)).await;
                p.reset("new").await;
            },
            async {
                // old page has resolved by now, new one has not
                sleep(Duration::from_millis(300)).await;
                let s = p.snapshot();
                assert!(s.items.is_empty());
                assert_eq!(s.offset, 0);
                assert!(s.loading);
            }
        );

        let s = p.snapshot();
        assert_eq!(s.items, vec!["new-0", "new-1"]);
        assert_eq!(p.filter(), "new");
        assert!(!s.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_load_more_can_be_retried() {
        let calls = AtomicUsize::new(0);
        let p = Paginator::new("k", 2, |f: &'static str, page| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                let delay = if n == 0 { 500 } else { 10 };
                sleep(Duration::from_millis(delay)).await;
                Ok(rows(f, page, 10))
            }
        })
        .unwrap();
        assert_eq!(p.limit(), 2);

        let first = tokio::time::timeout(Duration::from_millis(100), p.load_more()).await;
        assert!(first.is_err());
        let s = p.snapshot();
        assert!(!s.loading);
        assert!(s.items.is_empty());

        sleep(Duration::from_secs(5)).await;
        p.load_more().await;
        let s = p.snapshot();
        assert_eq!(s.items, vec!["k-0", "k-1"]);
        assert!(!s.loading);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_stale_page_leaves_reset_loading() {
        let p = Paginator::new("old", 2, |f: &'static str, page| async move {
            let delay = if f == "old" { 500 } else { 200 };
            sleep(Duration::from_millis(delay)).await;
            Ok(rows(f, page, 10))
        })
        .unwrap();

        tokio::join!(
            async {
                // old fetch is dropped after the reset has started
                let _ = tokio::time::timeout(Duration::from_millis(100), p.load_more()).await;
                let s = p.snapshot();
                assert!(s.loading);
                assert!(s.items.is_empty());
            },
            async {
                sleep(Duration::from_millis(50)).await;
                p.reset("new").await;
            }
        );

        let s = p.snapshot();
        assert_eq!(s.items, vec!["new-0", "new-1"]);
        assert!(!s.loading);
    }

    #[tokio::test]
    async fn test_reset_refetches_from_zero() {
        let p = Paginator::new("a", 2, |f: &'static str, page| async move {
            Ok(rows(f, page, 10))
        })
        .unwrap();

        p.load_more().await;
        p.load_more().await;
        assert_eq!(p.snapshot().offset, 4);

        p.reset("b").await;
        let s = p.snapshot();
        assert_eq!(s.items, vec!["b-0", "b-1"]);
        assert_eq!(s.offset, 2);
    }

    #[tokio::test]
    async fn test_error_is_surfaced_and_retryable() {
        let calls = AtomicUsize::new(0);
        let p = Paginator::new("k", 2, |f: &'static str, page| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 1 {
                    Err(DashError::Http {
                        status: 502,
                        body: "bad gateway".to_string(),
                    })
                } else {
                    Ok(rows(f, page, 10))
                }
            }
        })
        .unwrap();

        p.load_more().await;
        p.load_more().await;
        let s = p.snapshot();
        assert_eq!(s.items.len(), 2);
        assert!(s.has_more);
        assert!(!s.loading);
        assert_eq!(s.error.as_ref().unwrap().status, Some(502));

        p.load_more().await;
        let s = p.snapshot();
        assert_eq!(s.items, vec!["k-0", "k-1", "k-2", "k-3"]);
        assert!(s.error.is_none());
    }

    #[tokio::test]
    async fn test_does_not_deduplicate() {
        // a leaderboard that shifted between requests
        let p = Paginator::new((), 2, |_, page: PageRequest| async move {
            Ok(if page.offset == 0 {
                vec!["a", "b"]
            } else {
                vec!["b", "c"]
            })
        })
        .unwrap();

        p.load_more().await;
        p.load_more().await;
        assert_eq!(p.snapshot().items, vec!["a", "b", "b", "c"]);
    }
}
