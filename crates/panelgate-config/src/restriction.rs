//! Restricted principal ID lists.
//!
//! Two comma-separated lists of user IDs select which principals are subject
//! to the route access policy:
//!
//! - `CUSTOMER_IDS`: customer accounts limited to account/billing endpoints
//! - `DASHBOARD_ONLY_IDS`: accounts limited to dashboard statistics
//!
//! Each entry is read by its leading integer (`12x` is `12`). Entries that
//! read as `0` are dropped. Duplicates collapse. An empty list disables that
//! tier.

use std::collections::BTreeSet;
use std::env;

use panelgate_core::leading_int;
use tracing::debug;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RestrictionConfig {
    pub customer_ids: BTreeSet<i64>,
    pub dashboard_only_ids: BTreeSet<i64>,
}

impl RestrictionConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            &env::var("CUSTOMER_IDS").unwrap_or_default(),
            &env::var("DASHBOARD_ONLY_IDS").unwrap_or_default(),
        )
    }

    pub fn from_values(customer_ids: &str, dashboard_only_ids: &str) -> Self {
        Self {
            customer_ids: parse_id_list(customer_ids),
            dashboard_only_ids: parse_id_list(dashboard_only_ids),
        }
    }

    /// True when neither tier has any member.
    pub fn is_disabled(&self) -> bool {
        self.customer_ids.is_empty() && self.dashboard_only_ids.is_empty()
    }
}

/// Parses a comma-separated ID list, discarding entries whose leading integer is `0`.
pub fn parse_id_list(raw: &str) -> BTreeSet<i64> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match leading_int(entry) {
            0 => {
                debug!(entry = %entry, "Dropping restriction id");
                None
            }
            id => Some(id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list_basic() {
        let ids = parse_id_list("1,2,3");
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_id_list_drops_zero_and_garbage() {
        let ids = parse_id_list(" 7 , ,abc,0,-0, 9,");
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![7, 9]);
    }

    #[test]
    fn test_parse_id_list_reads_leading_integer() {
        let ids = parse_id_list("12x, 7, 3.5");
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![3, 7, 12]);
    }

    #[test]
    fn test_parse_id_list_duplicates_collapse() {
        let ids = parse_id_list("5,5,5,4");
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&5));
        assert!(ids.contains(&4));
    }

    #[test]
    fn test_parse_id_list_empty() {
        assert!(parse_id_list("").is_empty());
        assert!(parse_id_list(",,,").is_empty());
    }

    #[test]
    fn test_from_values() {
        let config = RestrictionConfig::from_values("10,11", "20");
        assert!(config.customer_ids.contains(&10));
        assert!(config.dashboard_only_ids.contains(&20));
        assert!(!config.is_disabled());
    }

    #[test]
    fn test_default_is_disabled() {
        assert!(RestrictionConfig::default().is_disabled());
        assert!(RestrictionConfig::from_values("", "x").is_disabled());
    }
}
