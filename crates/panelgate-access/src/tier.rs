//! Restriction tiers.
//!
//! A tier is a value: the principal IDs it applies to, the exact routes they
//! may reach, and the routes answered with an empty payload instead of a
//! denial. Both tiers share one evaluator; only their data differs.

use std::collections::BTreeSet;
use std::fmt;

/// Routes reachable by dashboard-only principals.
pub const DASHBOARD_WHITELIST: [&str; 15] = [
    "stat/getOverride",
    "stat/getStats",
    "stat/getServerLastRank",
    "stat/getServerYesterdayRank",
    "stat/getOrder",
    "stat/getStatUser",
    "stat/getRanking",
    "stat/getStatRecord",
    "stat/getTrafficRank",
    "system/getSystemStatus",
    "system/getQueueStats",
    "system/getQueueWorkload",
    "system/getQueueMasters",
    "system/getLogClearStats",
    "traffic-reset/stats",
];

/// Routes reachable by customer principals.
pub const CUSTOMER_WHITELIST: [&str; 11] = [
    "ticket/fetch",
    "plan/fetch",
    "server/group/fetch",
    "user/fetch",
    "user/generate",
    "user/update",
    "stat/getOrder",
    "stat/getTrafficRank",
    "stat/getStats",
    "system/getSystemStatus",
    "system/getQueueStats",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    DashboardOnly,
    Customer,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::DashboardOnly => "dashboard_only",
            Tier::Customer => "customer",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canned payload substituted for a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialResponse {
    /// Raw paginated envelope with no rows.
    EmptyUserPage,
    /// Success envelope wrapping `[]`.
    EmptyList,
}

/// A route answered with [`SpecialResponse`] when it is outside the whitelist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialCase {
    pub route: String,
    pub response: SpecialResponse,
}

impl SpecialCase {
    pub fn new(route: impl Into<String>, response: SpecialResponse) -> Self {
        Self {
            route: route.into(),
            response,
        }
    }

    /// Matches on the effective route, or on any trimmed path ending with the route.
    pub fn matches(&self, effective_route: &str, trimmed_path: &str) -> bool {
        effective_route == self.route || trimmed_path.ends_with(self.route.as_str())
    }

    /// `user/fetch` and `server/group/fetch`, checked in that order.
    pub fn standard() -> Vec<SpecialCase> {
        vec![
            SpecialCase::new("user/fetch", SpecialResponse::EmptyUserPage),
            SpecialCase::new("server/group/fetch", SpecialResponse::EmptyList),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierPolicy {
    pub tier: Tier,
    pub ids: BTreeSet<i64>,
    pub whitelist: Vec<String>,
    pub special_cases: Vec<SpecialCase>,
}

impl TierPolicy {
    pub fn new<I, W, S>(tier: Tier, ids: I, whitelist: W, special_cases: Vec<SpecialCase>) -> Self
    where
        I: IntoIterator<Item = i64>,
        W: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tier,
            ids: ids.into_iter().collect(),
            whitelist: whitelist.into_iter().map(Into::into).collect(),
            special_cases,
        }
    }

    pub fn dashboard_only(ids: impl IntoIterator<Item = i64>) -> Self {
        Self::new(
            Tier::DashboardOnly,
            ids,
            DASHBOARD_WHITELIST,
            SpecialCase::standard(),
        )
    }

    pub fn customer(ids: impl IntoIterator<Item = i64>) -> Self {
        Self::new(
            Tier::Customer,
            ids,
            CUSTOMER_WHITELIST,
            SpecialCase::standard(),
        )
    }

    pub fn applies_to(&self, principal_id: i64) -> bool {
        self.ids.contains(&principal_id)
    }

    /// Exact, case-sensitive membership.
    pub fn allows(&self, effective_route: &str) -> bool {
        self.whitelist.iter().any(|route| route == effective_route)
    }

    pub fn special_case(&self, effective_route: &str, trimmed_path: &str) -> Option<&SpecialCase> {
        self.special_cases
            .iter()
            .find(|case| case.matches(effective_route, trimmed_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitelist_sizes() {
        assert_eq!(DASHBOARD_WHITELIST.len(), 15);
        assert_eq!(CUSTOMER_WHITELIST.len(), 11);
    }

    #[test]
    fn test_allows_is_exact() {
        let policy = TierPolicy::customer([1]);
        assert!(policy.allows("plan/fetch"));
        assert!(!policy.allows("plan/fetch/"));
        assert!(!policy.allows("Plan/fetch"));
        assert!(!policy.allows("plan"));
    }

    #[test]
    fn test_applies_to() {
        let policy = TierPolicy::dashboard_only([3, 4]);
        assert!(policy.applies_to(3));
        assert!(!policy.applies_to(5));
        assert!(!TierPolicy::dashboard_only(Vec::new()).applies_to(0));
    }

    #[test]
    fn test_special_case_suffix_match() {
        let case = SpecialCase::new("user/fetch", SpecialResponse::EmptyUserPage);
        assert!(case.matches("user/fetch", "user/fetch"));
        assert!(case.matches("x/user/fetch", "api/v2/admin/x/user/fetch"));
        assert!(!case.matches("user/fetchAll", "api/v2/admin/user/fetchAll"));
    }

    #[test]
    fn test_special_case_order() {
        let policy = TierPolicy::dashboard_only([1]);
        let case = policy
            .special_case("server/group/fetch", "api/v2/admin/server/group/fetch")
            .unwrap();
        assert_eq!(case.response, SpecialResponse::EmptyList);
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(Tier::DashboardOnly.to_string(), "dashboard_only");
        assert_eq!(Tier::Customer.to_string(), "customer");
    }
}
