//! Remote catalog interface.
//!
//! The plugin never performs I/O itself: a [`Catalog`] only describes the
//! HTTP request for a query, and the Zellij host executes it. The answer comes
//! back later as a `WebRequestResult` event carrying the same context map.

use crate::domain::error::{BookfinderError, Result};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Context key under which the submitted query travels with the request.
pub const QUERY_CONTEXT_KEY: &str = "query";

/// A fully-built GET request ready for `web_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    /// Echoed back by the host alongside the response.
    pub context: BTreeMap<String, String>,
}

impl CatalogRequest {
    /// The query this request was built for, as recorded in its context.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.context.get(QUERY_CONTEXT_KEY).map(String::as_str)
    }
}

/// Builds catalog search requests.
///
/// Injected into [`AppState`](crate::app::AppState) at construction so tests
/// can substitute their own endpoint or a failing implementation.
pub trait Catalog: fmt::Debug {
    /// Describes the request that searches the catalog for `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built (e.g. misconfigured
    /// endpoint). The caller reports it through the normal failure path.
    fn search_request(&self, query: &str) -> Result<CatalogRequest>;
}

/// Catalog reached over HTTP with the query passed as a URL parameter.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    endpoint: std::result::Result<Url, String>,
    query_param: String,
}

impl HttpCatalog {
    /// Creates a catalog for `api_url`, sending the query as `query_param`.
    ///
    /// An unparsable URL is kept as an error and reported on every search,
    /// so a bad configuration shows up in the UI instead of aborting load.
    #[must_use]
    pub fn new(api_url: &str, query_param: &str) -> Self {
        let endpoint = Url::parse(api_url).map_err(|e| {
            tracing::debug!(api_url = %api_url, error = %e, "invalid catalog endpoint");
            format!("endpoint inválido '{api_url}': {e}")
        });

        Self {
            endpoint,
            query_param: query_param.to_string(),
        }
    }
}

impl Catalog for HttpCatalog {
    fn search_request(&self, query: &str) -> Result<CatalogRequest> {
        let mut url = self
            .endpoint
            .clone()
            .map_err(BookfinderError::Config)?;

        url.query_pairs_mut().append_pair(&self.query_param, query);

        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        let mut context = BTreeMap::new();
        context.insert(QUERY_CONTEXT_KEY.to_string(), query.to_string());

        Ok(CatalogRequest {
            url: url.into(),
            headers,
            context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_query_as_parameter() {
        let catalog = HttpCatalog::new("https://example.org/api/v1.2/book", "titulo");
        let request = catalog.search_request("dom casmurro").unwrap();

        assert_eq!(
            request.url,
            "https://example.org/api/v1.2/book?titulo=dom+casmurro"
        );
        assert_eq!(request.query(), Some("dom casmurro"));
        assert_eq!(
            request.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn keeps_existing_query_parameters() {
        let catalog = HttpCatalog::new("https://example.org/book?format=json", "q");
        let request = catalog.search_request("joyce").unwrap();
        assert_eq!(request.url, "https://example.org/book?format=json&q=joyce");
    }

    #[test]
    fn invalid_endpoint_fails_at_search_time() {
        let catalog = HttpCatalog::new("not a url", "titulo");
        let err = catalog.search_request("joyce").unwrap_err();
        assert!(matches!(err, BookfinderError::Config(_)));
        assert!(err.to_string().contains("not a url"));
    }
}
