use std::future::IntoFuture;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

use crate::error::ZoomError;
use crate::executor::authenticated::AuthenticatedExecutor;
use crate::executor::request::RequestDescriptor;
use crate::executor::response::ApiResponse;
use crate::pagination::cursor::{take_items, PagePosition};
use crate::sources::transport::HttpTransport;
use crate::utils::constants::DEFAULT_CURSOR_FIELD;

/// Where a list endpoint puts its items and its cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    pub items_field: String,
    pub cursor_field: String,
}

impl PaginationConfig {
    pub fn new(items_field: impl Into<String>) -> Self {
        Self {
            items_field: items_field.into(),
            cursor_field: DEFAULT_CURSOR_FIELD.to_owned(),
        }
    }

    pub fn with_cursor_field(mut self, cursor_field: impl Into<String>) -> Self {
        self.cursor_field = cursor_field.into();
        self
    }
}

/// Handle returned by list endpoints.
///
/// - `.await` (or [`Paginated::first_page`]) resolves the first page;
/// - [`Paginated::items`] streams items across all pages;
/// - [`Paginated::pages`] streams raw pages;
/// - [`Paginated::next_page`] steps through pages by hand;
/// - [`Paginated::page_at`] fetches the page for an explicit cursor.
///
/// Every mode follows the same cursor chain and fetches page N+1 only after
/// page N's cursor is known. The streams each start from the first page, which
/// is fetched once per handle. Pick one mode per handle: `next_page` keeps its
/// own position that the streams do not see.
pub struct Paginated<T: HttpTransport> {
    source: Arc<PageSource<T>>,
    stepper: Mutex<PagePosition>,
}

struct PageSource<T: HttpTransport> {
    executor: Arc<AuthenticatedExecutor<T>>,
    descriptor: RequestDescriptor,
    config: PaginationConfig,
    first_page: OnceCell<ApiResponse>,
}

impl<T: HttpTransport> PageSource<T> {
    async fn first_page(&self) -> Result<ApiResponse, ZoomError> {
        self.first_page
            .get_or_try_init(|| self.fetch(None))
            .await
            .cloned()
    }

    /// The original request, with the cursor field overridden when a cursor is given.
    async fn fetch(&self, cursor: Option<&str>) -> Result<ApiResponse, ZoomError> {
        let descriptor = match cursor {
            Some(cursor) => self
                .descriptor
                .clone()
                .with_query(self.config.cursor_field.as_str(), cursor),
            None => self.descriptor.clone(),
        };
        debug!(
            path = %descriptor.path,
            cursor = cursor.unwrap_or_default(),
            "fetching page"
        );

        let page = self.executor.execute(&descriptor).await?;
        self.executor.metrics().pages_fetched.inc();
        Ok(page)
    }

    async fn page_at(&self, position: &PagePosition) -> Option<Result<ApiResponse, ZoomError>> {
        match position {
            PagePosition::First => Some(self.first_page().await),
            PagePosition::Next(cursor) => Some(self.fetch(Some(cursor)).await),
            PagePosition::Exhausted => None,
        }
    }

    fn position_after(&self, page: &ApiResponse) -> PagePosition {
        PagePosition::after(&page.body, &self.config.cursor_field)
    }
}

impl<T: HttpTransport> Paginated<T> {
    pub(crate) fn new(
        executor: Arc<AuthenticatedExecutor<T>>,
        descriptor: RequestDescriptor,
        config: PaginationConfig,
    ) -> Self {
        Self {
            source: Arc::new(PageSource {
                executor,
                descriptor,
                config,
                first_page: OnceCell::new(),
            }),
            stepper: Mutex::new(PagePosition::First),
        }
    }

    pub fn descriptor(&self) -> &RequestDescriptor {
        &self.source.descriptor
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.source.config
    }

    /// First page; fetched on first use and reused afterwards.
    pub async fn first_page(&self) -> Result<ApiResponse, ZoomError> {
        self.source.first_page().await
    }

    /// Page for an explicit cursor (`None` re-issues the original request).
    ///
    /// Does not touch the handle's own position or cached first page.
    pub async fn page_at(&self, cursor: Option<&str>) -> Result<ApiResponse, ZoomError> {
        self.source.fetch(cursor).await
    }

    /// First page on the first call, each following page afterwards,
    /// `None` once the chain is exhausted. A failed step can be retried.
    pub async fn next_page(&self) -> Result<Option<ApiResponse>, ZoomError> {
        let mut position = self.stepper.lock().await;
        let page = match self.source.page_at(&position).await {
            Some(page) => page?,
            None => return Ok(None),
        };
        *position = self.source.position_after(&page);
        Ok(Some(page))
    }

    /// Lazy stream of raw pages. Ends after the last page or after the first error.
    pub fn pages(&self) -> impl Stream<Item = Result<ApiResponse, ZoomError>> + Send + 'static {
        let source = self.source.clone();
        stream::unfold(PagePosition::First, move |position| {
            let source = source.clone();
            async move {
                match source.page_at(&position).await? {
                    Ok(page) => {
                        let next = source.position_after(&page);
                        Some((Ok(page), next))
                    }
                    Err(err) => Some((Err(err), PagePosition::Exhausted)),
                }
            }
        })
    }

    /// Lazy stream of items across pages; a page is fetched only once the
    /// previous page's items are consumed.
    pub fn items(&self) -> impl Stream<Item = Result<Value, ZoomError>> + Send + 'static {
        let items_field = self.source.config.items_field.clone();
        self.pages()
            .map(move |page| page.and_then(|page| take_items(page.body, &items_field)))
            .map_ok(|items| stream::iter(items.into_iter().map(Ok::<Value, ZoomError>)))
            .try_flatten()
    }

    /// [`Paginated::items`] decoded into `D`.
    pub fn items_as<D>(&self) -> impl Stream<Item = Result<D, ZoomError>> + Send + 'static
    where
        D: DeserializeOwned + Send + 'static,
    {
        let items_field = self.source.config.items_field.clone();
        self.items().map(move |item| {
            item.and_then(|item| {
                serde_json::from_value(item).map_err(|e| ZoomError::UnexpectedPayload {
                    field: items_field.to_owned(),
                    reason: e.to_string(),
                })
            })
        })
    }

    /// Every item of every page.
    pub async fn collect_items(&self) -> Result<Vec<Value>, ZoomError> {
        self.items().try_collect().await
    }
}

impl<T: HttpTransport> IntoFuture for Paginated<T> {
    type Output = Result<ApiResponse, ZoomError>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        let source = self.source;
        Box::pin(async move { source.first_page().await })
    }
}
