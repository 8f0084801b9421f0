use tracing::{debug, info, warn};

use crate::page::EmptyPage;
use crate::route::{effective_route, trimmed_path};
use crate::tier::{SpecialResponse, Tier, TierPolicy};

/// Inputs the decision depends on. Method, headers and body are irrelevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestFacts<'a> {
    pub principal_id: Option<i64>,
    pub path: &'a str,
    /// Raw `current` query parameter.
    pub current: Option<&'a str>,
    /// Raw `pageSize` query parameter.
    pub page_size: Option<&'a str>,
}

impl<'a> RequestFacts<'a> {
    pub fn new(principal_id: Option<i64>, path: &'a str) -> Self {
        Self {
            principal_id,
            path,
            current: None,
            page_size: None,
        }
    }

    #[must_use]
    pub fn with_paging(mut self, current: Option<&'a str>, page_size: Option<&'a str>) -> Self {
        self.current = current;
        self.page_size = page_size;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassReason {
    /// No principal attached to the request.
    Anonymous,
    /// Principal is not listed in any tier.
    Unrestricted,
    /// Effective route is on the tier's whitelist.
    Whitelisted(Tier),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Pass(PassReason),
    EmptyUserPage(EmptyPage),
    EmptyList,
    Deny,
}

impl Decision {
    pub fn is_pass(&self) -> bool {
        matches!(self, Decision::Pass(_))
    }
}

/// Ordered tiers; the first tier listing the principal governs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    tiers: Vec<TierPolicy>,
}

impl AccessPolicy {
    pub fn new(tiers: Vec<TierPolicy>) -> Self {
        Self { tiers }
    }

    /// Dashboard-only tier first, then the customer tier.
    pub fn standard(
        customer_ids: impl IntoIterator<Item = i64>,
        dashboard_only_ids: impl IntoIterator<Item = i64>,
    ) -> Self {
        Self::new(vec![
            TierPolicy::dashboard_only(dashboard_only_ids),
            TierPolicy::customer(customer_ids),
        ])
    }

    pub fn tiers(&self) -> &[TierPolicy] {
        &self.tiers
    }

    pub fn tier_for(&self, principal_id: i64) -> Option<&TierPolicy> {
        self.tiers.iter().find(|tier| tier.applies_to(principal_id))
    }

    pub fn evaluate(&self, facts: &RequestFacts<'_>) -> Decision {
        debug!(path = %facts.path, "Access policy start");

        let Some(user_id) = facts.principal_id else {
            debug!(path = %facts.path, "Access policy skip: no principal");
            return Decision::Pass(PassReason::Anonymous);
        };

        let Some(policy) = self.tier_for(user_id) else {
            debug!(user_id, path = %facts.path, "Access policy skip: principal not restricted");
            return Decision::Pass(PassReason::Unrestricted);
        };

        let tier = policy.tier;
        let route = effective_route(facts.path);
        let trimmed = trimmed_path(facts.path);

        info!(user_id, tier = %tier, path = %facts.path, "Access policy hit");

        if policy.allows(&route) {
            info!(user_id, tier = %tier, path = %facts.path, effective_route = %route, "Access policy whitelist pass");
            return Decision::Pass(PassReason::Whitelisted(tier));
        }

        if let Some(case) = policy.special_case(&route, trimmed) {
            info!(
                user_id,
                tier = %tier,
                path = %facts.path,
                effective_route = %route,
                special_route = %case.route,
                "Access policy returning empty data"
            );
            return match case.response {
                SpecialResponse::EmptyUserPage => {
                    Decision::EmptyUserPage(EmptyPage::echo(facts.current, facts.page_size))
                }
                SpecialResponse::EmptyList => Decision::EmptyList,
            };
        }

        warn!(user_id, tier = %tier, path = %facts.path, effective_route = %route, "Access policy deny");
        Decision::Deny
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tier::{CUSTOMER_WHITELIST, DASHBOARD_WHITELIST};

    const CUSTOMER: i64 = 7;
    const DASHBOARD: i64 = 9;
    const BOTH: i64 = 11;
    const OTHER: i64 = 42;

    fn policy() -> AccessPolicy {
        AccessPolicy::standard([CUSTOMER, BOTH], [DASHBOARD, BOTH])
    }

    fn decide(id: Option<i64>, path: &str) -> Decision {
        policy().evaluate(&RequestFacts::new(id, path))
    }

    #[test]
    fn test_anonymous_passes() {
        assert_eq!(
            decide(None, "/api/v2/admin/ticket/fetch"),
            Decision::Pass(PassReason::Anonymous)
        );
    }

    #[test]
    fn test_unrestricted_principal_passes_everywhere() {
        for path in ["/api/v2/admin/ticket/fetch", "/x", "", "/api/v2/admin/config/save"] {
            assert_eq!(decide(Some(OTHER), path), Decision::Pass(PassReason::Unrestricted));
        }
    }

    #[test]
    fn test_empty_tiers_restrict_nobody() {
        let policy = AccessPolicy::standard(Vec::new(), Vec::new());
        let decision = policy.evaluate(&RequestFacts::new(Some(1), "/api/v2/admin/plan/save"));
        assert_eq!(decision, Decision::Pass(PassReason::Unrestricted));
    }

    #[test]
    fn test_dashboard_whitelist_passes_at_any_depth() {
        for route in DASHBOARD_WHITELIST {
            assert_eq!(
                decide(Some(DASHBOARD), &format!("/api/v2/admin/{route}")),
                Decision::Pass(PassReason::Whitelisted(Tier::DashboardOnly)),
                "{route}"
            );
            assert_eq!(
                decide(Some(DASHBOARD), route),
                Decision::Pass(PassReason::Whitelisted(Tier::DashboardOnly)),
                "{route}"
            );
        }
    }

    #[test]
    fn test_customer_whitelist_passes() {
        for route in CUSTOMER_WHITELIST {
            assert_eq!(
                decide(Some(CUSTOMER), &format!("/api/v2/admin/{route}")),
                Decision::Pass(PassReason::Whitelisted(Tier::Customer)),
                "{route}"
            );
        }
    }

    #[test]
    fn test_dashboard_user_fetch_echoes_paging() {
        let facts = RequestFacts::new(Some(DASHBOARD), "/api/v2/admin/user/fetch")
            .with_paging(Some("4"), Some("25"));
        match policy().evaluate(&facts) {
            Decision::EmptyUserPage(page) => {
                assert_eq!(page.total, 0);
                assert_eq!(page.current_page, 4);
                assert_eq!(page.per_page, 25);
                assert_eq!(page.last_page, 1);
                assert!(page.data.is_empty());
            }
            other => panic!("unexpected decision: {other:?}"),
        }
    }

    #[test]
    fn test_dashboard_user_fetch_defaults() {
        assert_eq!(
            decide(Some(DASHBOARD), "/api/v2/admin/user/fetch"),
            Decision::EmptyUserPage(EmptyPage::echo(None, None))
        );
    }

    #[test]
    fn test_user_fetch_suffix_at_deeper_prefix() {
        assert!(matches!(
            decide(Some(DASHBOARD), "/api/v2/admin/extra/user/fetch"),
            Decision::EmptyUserPage(_)
        ));
        assert!(matches!(
            decide(Some(DASHBOARD), "user/fetch"),
            Decision::EmptyUserPage(_)
        ));
    }

    #[test]
    fn test_dashboard_server_group_fetch_is_empty_list() {
        assert_eq!(
            decide(Some(DASHBOARD), "/api/v2/admin/server/group/fetch"),
            Decision::EmptyList
        );
    }

    #[test]
    fn test_dashboard_denies_other_routes() {
        for path in [
            "/api/v2/admin/ticket/fetch",
            "/api/v2/admin/plan/fetch",
            "/api/v2/admin/user/update",
            "/api/v2/admin/stat/getstats",
        ] {
            assert_eq!(decide(Some(DASHBOARD), path), Decision::Deny, "{path}");
        }
    }

    #[test]
    fn test_customer_denies_dashboard_only_routes() {
        assert_eq!(
            decide(Some(CUSTOMER), "/api/v2/admin/stat/getOverride"),
            Decision::Deny
        );
        assert_eq!(
            decide(Some(CUSTOMER), "/api/v2/admin/traffic-reset/stats"),
            Decision::Deny
        );
    }

    #[test]
    fn test_customer_special_cases_outside_whitelist() {
        assert!(matches!(
            decide(Some(CUSTOMER), "/api/v2/admin/extra/user/fetch"),
            Decision::EmptyUserPage(_)
        ));
        assert_eq!(
            decide(Some(CUSTOMER), "/api/v2/admin/extra/server/group/fetch"),
            Decision::EmptyList
        );
    }

    #[test]
    fn test_dashboard_tier_takes_precedence() {
        assert_eq!(decide(Some(BOTH), "/api/v2/admin/ticket/fetch"), Decision::Deny);
        assert_eq!(
            decide(Some(BOTH), "/api/v2/admin/stat/getOverride"),
            Decision::Pass(PassReason::Whitelisted(Tier::DashboardOnly))
        );
        assert_eq!(policy().tier_for(BOTH).map(|t| t.tier), Some(Tier::DashboardOnly));
    }

    #[test]
    fn test_normalization_equivalence() {
        assert_eq!(
            decide(Some(CUSTOMER), "v1/user/123/stat/getOrder"),
            decide(Some(CUSTOMER), "stat/getOrder")
        );
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let policy = policy();
        let facts = RequestFacts::new(Some(DASHBOARD), "/api/v2/admin/user/fetch")
            .with_paging(Some("2"), None);
        assert_eq!(policy.evaluate(&facts), policy.evaluate(&facts));
    }

    #[test]
    fn test_is_pass() {
        assert!(Decision::Pass(PassReason::Anonymous).is_pass());
        assert!(!Decision::Deny.is_pass());
        assert!(!Decision::EmptyList.is_pass());
    }
}
