use std::sync::Arc;

use futures::{Stream, TryStreamExt, stream};
use m365sec_core::{
    BaseRequestBuilder, CollectionResponse, GraphError, NoQuery, Parsable, RequestAdapter, Result,
};
use tracing::debug;

/// Walks a collection across `@odata.nextLink` pages.
pub struct PageIterator<T> {
    adapter: Arc<dyn RequestAdapter>,
    page: CollectionResponse<T>,
}

enum Cursor<T> {
    Page(CollectionResponse<T>),
    Link(String),
    Done,
}

impl<T: Parsable> PageIterator<T> {
    /// Start from an already fetched first page.
    pub fn new(adapter: Arc<dyn RequestAdapter>, first_page: CollectionResponse<T>) -> Self {
        Self {
            adapter,
            page: first_page,
        }
    }

    /// Feed every item to `callback` until it returns `false` or the last page
    /// has been consumed.
    pub async fn iterate<F>(self, mut callback: F) -> Result<()>
    where
        F: FnMut(T) -> bool,
    {
        let adapter = self.adapter;
        let mut page = self.page;
        let mut pages = 1u32;
        loop {
            for item in page.value {
                if !callback(item) {
                    debug!(pages, "page iteration stopped by callback");
                    return Ok(());
                }
            }
            let Some(link) = page.next_link else {
                debug!(pages, "page iteration complete");
                return Ok(());
            };
            page = fetch_page(&adapter, &link).await?;
            pages += 1;
        }
    }

    /// Every item of every page.
    pub async fn collect_all(self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        self.iterate(|item| {
            items.push(item);
            true
        })
        .await?;
        Ok(items)
    }

    /// Items as a stream. The next page is requested only once the current
    /// one has been drained.
    pub fn into_stream(self) -> impl Stream<Item = Result<T>> {
        let adapter = self.adapter;
        stream::try_unfold(Cursor::Page(self.page), move |cursor| {
            let adapter = adapter.clone();
            async move {
                let page = match cursor {
                    Cursor::Done => return Ok(None),
                    Cursor::Page(page) => page,
                    Cursor::Link(link) => fetch_page(&adapter, &link).await?,
                };
                let next = match page.next_link {
                    Some(link) => Cursor::Link(link),
                    None => Cursor::Done,
                };
                Ok::<_, GraphError>(Some((page.value, next)))
            }
        })
        .map_ok(|items| stream::iter(items.into_iter().map(Ok::<T, GraphError>)))
        .try_flatten()
    }
}

async fn fetch_page<T: Parsable>(
    adapter: &Arc<dyn RequestAdapter>,
    link: &str,
) -> Result<CollectionResponse<T>> {
    debug!(link, "fetching next page");
    BaseRequestBuilder::with_raw_url(adapter.clone(), "", link)
        .get::<CollectionResponse<T>, NoQuery>(None)
        .await
        .map(Option::unwrap_or_default)
}
