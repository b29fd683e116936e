use std::collections::VecDeque;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::{
    request::StringMap,
    transport::{OneShotTransport, Transport},
    Api, ApiRequest, NovuError, Result,
};

/// Page size used when none is set.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Walks a paginated list endpoint one item at a time.
///
/// Pages are requested with `page` (0-based) and `limit` query parameters.
/// Items come from the `data` array of each page. Paging continues while the
/// response says `hasMore`, or, when that flag is absent, while `totalCount`
/// is larger than the number of items seen so far.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> novu_http::Result<()> {
/// use novu_http::{Api, NovuConfig};
///
/// let api = Api::new(NovuConfig::new("https://api.novu.co", "key"));
/// let url = api.config().endpoint("/v1/subscribers");
/// let mut subscribers = api.paginate::<serde_json::Value>(url);
/// while let Some(subscriber) = subscribers.next_item().await? {
///     println!("{subscriber}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct Paginator<'a, I, T = OneShotTransport> {
    api: &'a Api<T>,
    url: String,
    params: StringMap,
    limit: u32,
    page: u32,
    seen: u64,
    has_more: bool,
    buffer: VecDeque<I>,
}

impl<'a, I, T> Paginator<'a, I, T>
where
    I: DeserializeOwned,
    T: Transport,
{
    pub fn new(api: &'a Api<T>, url: impl Into<String>) -> Self {
        Self {
            api,
            url: url.into(),
            params: StringMap::new(),
            limit: DEFAULT_PAGE_LIMIT,
            page: 0,
            seen: 0,
            has_more: true,
            buffer: VecDeque::new(),
        }
    }

    /// Sets the page size. Zero is treated as one.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Adds a filter parameter sent with every page request.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Returns the next item, fetching the next page when the buffer is empty.
    pub async fn next_item(&mut self) -> Result<Option<I>> {
        if self.buffer.is_empty() && self.has_more {
            let items = self.fetch_page().await?;
            self.buffer.extend(items);
        }
        Ok(self.buffer.pop_front())
    }

    /// Returns the rest of the current page, or the next page when it is
    /// drained. `None` once the listing is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<I>>> {
        if !self.buffer.is_empty() {
            return Ok(Some(self.buffer.drain(..).collect()));
        }
        if !self.has_more {
            return Ok(None);
        }
        let items = self.fetch_page().await?;
        Ok((!items.is_empty()).then_some(items))
    }

    /// Drains every remaining item.
    pub async fn collect_all(mut self) -> Result<Vec<I>> {
        let mut all = Vec::new();
        while let Some(page) = self.next_page().await? {
            all.extend(page);
        }
        Ok(all)
    }

    async fn fetch_page(&mut self) -> Result<Vec<I>> {
        let page = self.page;
        let mut request = ApiRequest::get(self.url.clone())
            .query("page", page.to_string())
            .query("limit", self.limit.to_string());
        for (name, value) in &self.params {
            request = request.query(name.clone(), value.clone());
        }

        let body = self.api.execute(request).await?;
        self.page += 1;

        let items = match body.get("data") {
            Some(JsonValue::Array(items)) => items.clone(),
            Some(JsonValue::Null) | None => Vec::new(),
            Some(other) => {
                return Err(NovuError::Decode(format!(
                    "expected 'data' array on page {page}, got {other}"
                )))
            }
        };
        self.seen += items.len() as u64;

        self.has_more = !items.is_empty()
            && match body.get("hasMore").and_then(JsonValue::as_bool) {
                Some(flag) => flag,
                None => body
                    .get("totalCount")
                    .and_then(JsonValue::as_u64)
                    .is_some_and(|total| total > self.seen),
            };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).map_err(|err| {
                    NovuError::Decode(format!("invalid item {index} on page {page}: {err}"))
                })
            })
            .collect()
    }
}
