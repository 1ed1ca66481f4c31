//! Page-until-empty traversal of GitHub list endpoints.
//!
//! GitHub REST list endpoints are read with a fixed page size, starting at
//! page 1 and stopping at the first empty page. GraphQL connections are read
//! by following `pageInfo.endCursor`. Both loops are capped so that a
//! misbehaving API cannot keep the run busy forever.

use std::future::Future;

use serde::Deserialize;

use super::error::ReminderError;

/// Items requested per REST page (the GitHub maximum).
pub const PER_PAGE: u8 = 100;

/// Upper bound on pages fetched for a single listing.
pub const MAX_PAGES: u32 = 100;

/// A single REST page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u8,
}

impl PageRequest {
    /// Creates a request for the given 1-based page.
    #[must_use]
    pub const fn new(page: u32) -> Self {
        Self {
            page,
            per_page: PER_PAGE,
        }
    }

    /// Current page number (1-based).
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Items per page.
    #[must_use]
    pub const fn per_page(&self) -> u8 {
        self.per_page
    }

    /// Query parameters for this page.
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}

/// Fetches consecutive pages until one comes back empty and returns the
/// concatenation of all non-empty pages, in page order.
///
/// # Errors
///
/// Propagates the first error from `fetch_page`, and returns
/// [`ReminderError::PageLimitExceeded`] when [`MAX_PAGES`] non-empty pages
/// were read without reaching an empty one.
pub async fn collect_pages<T, F, Fut>(
    resource: &str,
    mut fetch_page: F,
) -> Result<Vec<T>, ReminderError>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Vec<T>, ReminderError>>,
{
    let mut items = Vec::new();
    for page in 1..=MAX_PAGES {
        let batch = fetch_page(PageRequest::new(page)).await?;
        if batch.is_empty() {
            return Ok(items);
        }
        items.extend(batch);
    }

    Err(ReminderError::PageLimitExceeded {
        resource: resource.to_owned(),
        limit: MAX_PAGES,
    })
}

/// GraphQL `pageInfo` selection.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CursorPageInfo {
    /// Whether another page follows this one.
    pub has_next_page: bool,
    /// Cursor to pass as `after` for the next page.
    pub end_cursor: Option<String>,
}

/// One page of a GraphQL connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPage<T> {
    /// Nodes on this page.
    pub nodes: Vec<T>,
    /// Continuation state.
    pub page_info: CursorPageInfo,
}

/// Follows a GraphQL connection from its first page until `hasNextPage` is
/// false.
///
/// # Errors
///
/// Propagates the first error from `fetch_page`, and returns
/// [`ReminderError::PageLimitExceeded`] after [`MAX_PAGES`] pages that all
/// announced a successor.
pub async fn collect_cursor_pages<T, F, Fut>(
    resource: &str,
    mut fetch_page: F,
) -> Result<Vec<T>, ReminderError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<CursorPage<T>, ReminderError>>,
{
    let mut items = Vec::new();
    let mut cursor = None;
    for _ in 0..MAX_PAGES {
        let CursorPage { nodes, page_info } = fetch_page(cursor).await?;
        items.extend(nodes);
        match page_info {
            CursorPageInfo {
                has_next_page: true,
                end_cursor: Some(next),
            } => cursor = Some(next),
            _ => return Ok(items),
        }
    }

    Err(ReminderError::PageLimitExceeded {
        resource: resource.to_owned(),
        limit: MAX_PAGES,
    })
}
