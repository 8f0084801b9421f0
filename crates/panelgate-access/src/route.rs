//! Route normalization.
//!
//! Panel routes are mounted under a three segment namespace such as
//! `api/v2/{secure_path}` or `api/v1/user`. Whitelists are written without
//! that namespace (`stat/getStats`), so a request path is reduced to its
//! *effective route* before matching.

/// Number of leading namespace segments stripped from long paths.
pub const VERSION_PREFIX_SEGMENTS: usize = 3;

/// Path with leading and trailing `/` removed.
pub fn trimmed_path(path: &str) -> &str {
    path.trim_matches('/')
}

/// Reduces a request path to the route used for whitelist matching.
///
/// Contract:
///
/// - leading and trailing `/` are trimmed
/// - the remainder is split on `/`
/// - with more than [`VERSION_PREFIX_SEGMENTS`] segments, the first three are
///   dropped and the rest rejoined with `/`
/// - otherwise the trimmed path is returned as is
///
/// ```
/// use panelgate_access::effective_route;
///
/// assert_eq!(effective_route("/api/v2/admin/stat/getOrder"), "stat/getOrder");
/// assert_eq!(effective_route("v1/user/123/stat/getOrder"), "stat/getOrder");
/// assert_eq!(effective_route("stat/getOrder"), "stat/getOrder");
/// assert_eq!(effective_route("/api/v2/admin/"), "api/v2/admin");
/// ```
pub fn effective_route(path: &str) -> String {
    let trimmed = trimmed_path(path);
    let segments: Vec<&str> = trimmed.split('/').collect();

    if segments.len() > VERSION_PREFIX_SEGMENTS {
        segments[VERSION_PREFIX_SEGMENTS..].join("/")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_paths_are_kept() {
        assert_eq!(effective_route("stat/getOrder"), "stat/getOrder");
        assert_eq!(effective_route("/user/fetch/"), "user/fetch");
        assert_eq!(effective_route("a/b/c"), "a/b/c");
        assert_eq!(effective_route(""), "");
        assert_eq!(effective_route("/"), "");
    }

    #[test]
    fn test_prefix_is_stripped_beyond_three_segments() {
        assert_eq!(effective_route("a/b/c/d"), "d");
        assert_eq!(effective_route("api/v2/admin/server/group/fetch"), "server/group/fetch");
        assert_eq!(effective_route("/api/v1/user/123/stat/getOrder/"), "123/stat/getOrder");
    }

    #[test]
    fn test_five_and_two_segment_forms_agree() {
        assert_eq!(
            effective_route("v1/user/123/stat/getOrder"),
            effective_route("stat/getOrder")
        );
    }

    #[test]
    fn test_inner_empty_segments_are_preserved() {
        assert_eq!(effective_route("api/v2/admin//stat"), "/stat");
    }

    #[test]
    fn test_trimmed_path() {
        assert_eq!(trimmed_path("//api/v2/"), "api/v2");
        assert_eq!(trimmed_path("plain"), "plain");
    }
}
