//! Pagination and filter helpers for API requests
//!
//! Every listing endpoint is paged with `per_page`/`page`; the rendered path
//! (including the query string) doubles as the response cache key, so query
//! parameters are always emitted in a stable, sorted order.

/// Largest page size accepted by the Actions API.
pub const MAX_PAGE_SIZE: usize = 100;

/// Server-side filters for listing workflow runs.
///
/// Unset or empty fields are left out of the request entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFilter {
    /// Only runs for this branch
    pub branch: Option<String>,
    /// Run status or conclusion (`success`, `failure`, `in_progress`, ...)
    pub status: Option<String>,
    /// Creation date range, `start..end` in RFC3339
    pub created: Option<String>,
}

impl RunFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn created(mut self, range: impl Into<String>) -> Self {
        self.created = Some(range.into());
        self
    }

    /// Drop the creation-date constraint.
    pub fn without_created(mut self) -> Self {
        self.created = None;
        self
    }

    /// Non-empty filters as query parameters.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        [
            ("branch", &self.branch),
            ("status", &self.status),
            ("created", &self.created),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (name, v.to_string()))
        })
        .collect()
    }
}

/// Render `path?query` with parameters sorted by name and values
/// percent-encoded.
pub fn render_path(path: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }

    let mut sorted: Vec<_> = params.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);

    let query: Vec<String> = sorted
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect();
    format!("{}?{}", path, query.join("&"))
}

/// Page parameters for a request.
pub fn page_params(per_page: usize, page: usize) -> Vec<(&'static str, String)> {
    vec![("per_page", per_page.to_string()), ("page", page.to_string())]
}
