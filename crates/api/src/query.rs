//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// List-endpoint parameters (`?q=&page=&per_page=`).
///
/// `q` substring-filters the resource's searchable columns. Listing is
/// unpaginated unless `page` is present; `per_page` defaults to 20 and is
/// clamped in the db layer via `page_bounds`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
