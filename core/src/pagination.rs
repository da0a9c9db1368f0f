//! Fetch every page of a search.
//!
//! `count` is the total number of matches, and some endpoints return a
//! positive `count` with no items. The loop therefore stops on whichever
//! comes first: the next offset reaches `count`, or a page is empty.

use std::future::Future;

use crate::envelope::Envelope;
use crate::error::Result;

/// Call `fetch_page(offset, limit)` with increasing offsets, starting at
/// `start`, and collect the items of every page.
pub async fn fetch_all<T, F, Fut>(start: u64, page_size: u64, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u64, u64) -> Fut,
    Fut: Future<Output = Result<Envelope<T>>>,
{
    let page_size = page_size.max(1);
    let mut items = Vec::new();
    let mut offset = start;

    loop {
        let page = fetch_page(offset, page_size).await?;
        if page.items.is_empty() {
            break;
        }
        offset += page.items.len() as u64;
        items.extend(page.items);
        if offset >= page.count {
            break;
        }
    }

    Ok(items)
}
