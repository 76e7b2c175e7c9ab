//! Endpoint selection by search text, method and path

use crate::model::Endpoint;

/// Criteria for narrowing an endpoint list; unset criteria match everything
#[derive(Debug, Clone, Default)]
pub struct EndpointFilter {
    /// Case-insensitive substring over method, path, operationId and summary
    pub search: Option<String>,
    /// HTTP method; `ALL` is treated as no constraint
    pub method: Option<String>,
    /// Exact path template
    pub path: Option<String>,
}

impl EndpointFilter {
    pub fn matches(&self, endpoint: &Endpoint) -> bool {
        if let Some(method) = self.method.as_deref().map(str::trim)
            && !method.is_empty()
            && !method.eq_ignore_ascii_case("ALL")
            && !endpoint.method.eq_ignore_ascii_case(method)
        {
            return false;
        }

        if let Some(path) = self.path.as_deref()
            && endpoint.path != path
        {
            return false;
        }

        let query = self
            .search
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .unwrap_or_default();
        if query.is_empty() {
            return true;
        }

        let haystack = format!(
            "{} {} {} {}",
            endpoint.method,
            endpoint.path,
            endpoint.operation_id.as_deref().unwrap_or_default(),
            endpoint.summary.as_deref().unwrap_or_default()
        )
        .to_lowercase();

        haystack.contains(&query)
    }

    pub fn apply<'a>(&self, endpoints: &'a [Endpoint]) -> Vec<&'a Endpoint> {
        endpoints.iter().filter(|e| self.matches(e)).collect()
    }
}
