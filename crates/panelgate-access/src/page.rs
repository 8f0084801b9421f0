use panelgate_core::leading_int;
use serde::Serialize;

const DEFAULT_CURRENT_PAGE: i64 = 1;
const DEFAULT_PAGE_SIZE: i64 = 10;

/// Paginated user list with no rows.
///
/// Mirrors the admin `user/fetch` response so the list view renders an empty
/// table instead of an error. `current_page` and `per_page` echo the request's
/// `current` and `pageSize` query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyPage {
    pub total: u64,
    pub current_page: i64,
    pub per_page: i64,
    pub last_page: u64,
    pub data: Vec<()>,
}

impl EmptyPage {
    /// Builds the page from raw query values, defaulting to page 1 of size 10.
    pub fn echo(current: Option<&str>, page_size: Option<&str>) -> Self {
        Self {
            total: 0,
            current_page: current.map(leading_int).unwrap_or(DEFAULT_CURRENT_PAGE),
            per_page: page_size.map(leading_int).unwrap_or(DEFAULT_PAGE_SIZE),
            last_page: 1,
            data: Vec::new(),
        }
    }
}
