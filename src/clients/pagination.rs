//! Automatic pagination over GitHub list endpoints.
//!
//! GitHub paginates collections with `Link` response headers carrying
//! absolute URLs. This module follows `rel="next"` links sequentially,
//! accumulating each page's items into a single ordered sequence. A
//! per-page callback can observe each raw response and stop traversal
//! early via [`PageControl::done`].

use serde_json::Value;

use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::clients::logging::LoggedClient;

/// Envelope keys ignored when locating a page's item collection.
///
/// Search and installation endpoints wrap their collection in an object
/// alongside these bookkeeping fields.
const ENVELOPE_KEYS: [&str; 3] = ["total_count", "incomplete_results", "repository_selection"];

/// Early-termination control handed to the per-page callback.
///
/// # Example
///
/// ```rust,ignore
/// let items = api
///     .paginate_with(request, |response, control| {
///         if response.body.as_array().map_or(true, Vec::is_empty) {
///             control.done();
///         }
///     })
///     .await?;
/// ```
#[derive(Debug, Default)]
pub struct PageControl {
    done: bool,
}

impl PageControl {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stops pagination after the current page.
    pub fn done(&mut self) {
        self.done = true;
    }

    pub(crate) const fn is_done(&self) -> bool {
        self.done
    }
}

/// Extracts the item collection from a page body.
///
/// An array body is the collection itself. An object body contributes its
/// first array-valued entry after the known envelope keys are ignored.
/// Anything else contributes nothing.
pub(crate) fn page_items(body: &Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items.clone(),
        Value::Object(map) => map
            .iter()
            .filter(|(key, _)| !ENVELOPE_KEYS.contains(&key.as_str()))
            .find_map(|(_, value)| value.as_array().cloned())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Follows `rel="next"` links from `first`, accumulating page items.
///
/// Traversal is strictly sequential: the next page's URL is only known
/// once the current page resolves. Each follow-up request reuses the
/// method, extra headers, body, and `tries` budget of the previous one,
/// with the query cleared (the next URL carries its own parameters).
///
/// There is no built-in page cap: a server that keeps returning a `next`
/// link keeps traversal going until the callback calls
/// [`PageControl::done`]. Any page failure aborts the whole traversal with
/// that error, discarding the accumulation.
pub(crate) async fn paginate(
    client: &LoggedClient,
    first: HttpRequest,
    mut on_page: Option<&mut (dyn FnMut(&HttpResponse, &mut PageControl) + Send)>,
) -> Result<Vec<Value>, HttpError> {
    let mut accumulated = Vec::new();
    let mut current = first;

    loop {
        // Capture the request template before the call consumes it
        let method = current.http_method;
        let extra_headers = current.extra_headers.clone();
        let body = current.body.clone();
        let tries = current.tries;

        let response = client.request(current).await?;
        accumulated.extend(page_items(&response.body));

        if let Some(callback) = on_page.as_deref_mut() {
            let mut control = PageControl::new();
            callback(&response, &mut control);
            if control.is_done() {
                break;
            }
        }

        let Some(next_url) = response.next_page_url() else {
            break;
        };

        let mut builder = HttpRequest::builder(method, next_url).tries(tries);
        if let Some(headers) = extra_headers {
            builder = builder.extra_headers(headers);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }
        current = builder.build()?;
    }

    Ok(accumulated)
}
