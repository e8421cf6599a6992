mod request;
mod wrapper;

pub use request::*;
pub use wrapper::*;

use serde::{Deserialize, Serialize};

/// Raw `/api/reviews` query string. Every value is kept as text and
/// interpreted by the query builder, so a bad value never fails extraction.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct ReviewQueryParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub category: Option<String>,
    pub owner: Option<String>,
    pub limit: Option<String>,
    pub p: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct PaginationParams {
    pub limit: Option<String>,
    pub p: Option<String>,
}
